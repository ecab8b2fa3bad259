use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::triangles::TriangleId;
use crate::utils::{orient_2d, Orientation};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Default for Point {
    fn default() -> Self {
        Self { x: 0., y: 0. }
    }
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// z component of the 3d cross product
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    pub fn distance_squared(self, other: Self) -> f64 {
        (self - other).length_squared()
    }

    /// unit vector with same direction, `None` for zero or non finite length
    pub fn normalize(self) -> Option<Self> {
        let len = self.length();
        if len > 0. && len.is_finite() {
            Some(Self::new(self.x / len, self.y / len))
        } else {
            None
        }
    }

    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2., (self.y + other.y) / 2.)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Self) -> Self::Output {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Self) -> Self::Output {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Self::Output {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Self::Output {
        Point::new(-self.x, -self.y)
    }
}

/// Undirected segment, `Edge::new(a, b) == Edge::new(b, a)`
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub a: Point,
    pub b: Point,
}

impl Edge {
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    /// slot in the pool, stable for the pool's lifetime
    slot: TriangleId,

    /// triangle points, in the order produced by `populate`
    points: [Point; 3],

    /// edges `ab`, `bc`, `ca`
    edges: [Edge; 3],

    /// neighbor across each edge, same index as `edges`
    pub neighbors: [TriangleId; 3],

    circumcenter: Point,
    circumradius: f64,
}

impl Triangle {
    /// An unpopulated triangle owning `slot`, everything else zeroed
    pub fn empty(slot: TriangleId) -> Self {
        let origin = Point::default();
        Self {
            slot,
            points: [origin; 3],
            edges: [Edge::new(origin, origin); 3],
            neighbors: [TriangleId::INVALID; 3],
            circumcenter: origin,
            circumradius: 0.,
        }
    }

    /// Assign all three points at once.
    ///
    /// Points get sorted (highest first, then the left-most of the remaining
    /// two), the circumcircle and edges are recomputed and every neighbor
    /// link is cleared.
    pub fn populate(&mut self, a: Point, b: Point, c: Point) {
        self.points = sort_points(a, b, c);
        let [a, b, c] = self.points;

        let (center, radius) = circumcircle(a, b, c);
        self.circumcenter = center;
        self.circumradius = radius;

        self.edges = [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)];
        self.clear_neighbors();
    }

    pub fn slot(&self) -> TriangleId {
        self.slot
    }

    pub fn points(&self) -> [Point; 3] {
        self.points
    }

    pub fn edges(&self) -> &[Edge; 3] {
        &self.edges
    }

    pub fn circumcenter(&self) -> Point {
        self.circumcenter
    }

    pub fn circumradius(&self) -> f64 {
        self.circumradius
    }

    /// whether point is strictly inside the circumcircle, points on the circle are not
    pub fn contains_in_circumcircle(&self, point: Point) -> bool {
        point.distance_squared(self.circumcenter) < self.circumradius * self.circumradius
    }

    /// whether `point` is one of the vertices
    pub fn contains(&self, point: Point) -> bool {
        self.points.contains(&point)
    }

    /// whether `point` is inside the triangle or on its sides
    pub fn encloses(&self, point: Point) -> bool {
        let [a, b, c] = self.ccw_points();
        !orient_2d(a, b, point).is_cw()
            && !orient_2d(b, c, point).is_cw()
            && !orient_2d(c, a, point).is_cw()
    }

    /// vertex across from edge `edge_index`
    pub fn opposite(&self, edge_index: usize) -> Point {
        self.points[(edge_index + 2) % 3]
    }

    /// index of `edge` in this triangle
    pub fn edge_index(&self, edge: &Edge) -> Option<usize> {
        self.edges.iter().position(|e| e == edge)
    }

    /// Points reordered so they are counter clockwise by signed area.
    ///
    /// The stored order only approximates ccw.
    pub fn ccw_points(&self) -> [Point; 3] {
        let [a, b, c] = self.points;
        match orient_2d(a, b, c) {
            Orientation::CW => [a, c, b],
            _ => [a, b, c],
        }
    }

    /// unsigned area
    pub fn area(&self) -> f64 {
        let [a, b, c] = self.points;
        ((b - a).cross(c - a) / 2.).abs()
    }

    pub fn is_degenerate(&self) -> bool {
        let [a, b, c] = self.points;
        crate::utils::is_degenerate(a, b, c)
    }

    pub fn clear_neighbors(&mut self) {
        self.neighbors = [TriangleId::INVALID; 3];
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.points;
        write!(
            f,
            "{{[{:.6},{:.6}][{:.6},{:.6}][{:.6},{:.6}]}}",
            a.x, a.y, b.x, b.y, c.x, c.y
        )
    }
}

/// Highest point first (left-most on ties), then the left-most of the other two.
fn sort_points(mut a: Point, mut b: Point, mut c: Point) -> [Point; 3] {
    if b.y > a.y || (b.y == a.y && b.x < a.x) {
        std::mem::swap(&mut a, &mut b);
    }
    if c.y > a.y || (c.y == a.y && c.x < a.x) {
        std::mem::swap(&mut a, &mut c);
    }
    if b.x > c.x {
        std::mem::swap(&mut b, &mut c);
    }
    [a, b, c]
}

/// Center and radius of the circle through `a`, `b` and `c`.
///
/// The center is the intersection of the perpendicular bisectors of `ab` and
/// `ac`, each written as `y = m * x + q`. A horizontal side has a vertical
/// bisector, in which case the center's x is the side's midpoint.
/// Collinear points give non finite results.
fn circumcircle(a: Point, b: Point, c: Point) -> (Point, f64) {
    let mid_ab = a.midpoint(b);
    let mid_ac = a.midpoint(c);
    let slope_ab = (b.y - a.y) / (b.x - a.x);
    let slope_ac = (c.y - a.y) / (c.x - a.x);

    let center = if slope_ab == 0. {
        let x = mid_ab.x;
        let intercept = mid_ac.y + mid_ac.x / slope_ac;
        Point::new(x, -x / slope_ac + intercept)
    } else if slope_ac == 0. {
        let x = mid_ac.x;
        let intercept = mid_ab.y + mid_ab.x / slope_ab;
        Point::new(x, -x / slope_ab + intercept)
    } else {
        let intercept_ab = mid_ab.y + mid_ab.x / slope_ab;
        let intercept_ac = mid_ac.y + mid_ac.x / slope_ac;
        let x = (intercept_ac - intercept_ab) / (1. / slope_ac - 1. / slope_ab);
        Point::new(x, -x / slope_ab + intercept_ab)
    };

    (center, (a - center).length())
}

use crate::shape::{Edge, Point};
use crate::triangles::TriangleId;
use crate::utils::{is_degenerate, orient_2d};

/// One side of the retraction polygon.
#[derive(Debug, Clone, Copy)]
pub struct BoundaryEdge {
    pub edge: Edge,
    /// vertex of the bad triangle opposite to the edge, on the cavity's side
    pub inner: Point,
    /// triangle across the edge that stays in the mesh, `INVALID` when unknown or none
    pub outer: TriangleId,
}

/// The retraction polygon: edges owned by exactly one bad triangle.
///
/// Edges are kept in discovery order, the buffer is reused from point to
/// point so it only grows to the largest cavity seen.
#[derive(Debug, Default)]
pub struct Boundary {
    edges: Vec<BoundaryEdge>,
}

impl Boundary {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            edges: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.edges.clear();
    }

    pub fn push(&mut self, edge: Edge, inner: Point, outer: TriangleId) {
        self.edges.push(BoundaryEdge { edge, inner, outer });
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoundaryEdge> {
        self.edges.iter()
    }

    /// Whether any triangle built from a boundary edge and `apex` would be degenerate
    pub fn fan_is_degenerate(&self, apex: Point) -> bool {
        self.edges
            .iter()
            .any(|b| is_degenerate(b.edge.a, b.edge.b, apex))
    }

    /// Whether `apex` sees every edge from the cavity's side
    pub fn is_star_shaped(&self, apex: Point) -> bool {
        self.edges.iter().all(|b| {
            let side = orient_2d(b.edge.a, b.edge.b, apex);
            !side.is_collinear() && side == orient_2d(b.edge.a, b.edge.b, b.inner)
        })
    }

    /// Whether fanning the edges around `apex` exactly re-tiles a cavity
    /// made of `bad_count` triangles.
    ///
    /// A cavity without inner vertices has two more sides than triangles,
    /// and the fan only covers it once when `apex` sees all of them.
    pub fn fits_cavity(&self, bad_count: usize, apex: Point) -> bool {
        self.edges.len() == bad_count + 2
            && self.is_star_shaped(apex)
            && !self.fan_is_degenerate(apex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// the boundary of the single triangle `p0 p1 p2`
    fn triangle_boundary() -> Boundary {
        let p0 = Point::new(0., 0.);
        let p1 = Point::new(2., 0.);
        let p2 = Point::new(1., 2.);
        let mut boundary = Boundary::with_capacity(4);
        boundary.push(Edge::new(p0, p1), p2, TriangleId::INVALID);
        boundary.push(Edge::new(p1, p2), p0, TriangleId(3));
        boundary.push(Edge::new(p2, p0), p1, TriangleId::INVALID);
        boundary
    }

    #[test]
    fn test_boundary() {
        let mut boundary = triangle_boundary();
        assert_eq!(boundary.len(), 3);
        assert_eq!(boundary.iter().filter(|b| !b.outer.invalid()).count(), 1);
        assert!(!boundary.fan_is_degenerate(Point::new(1., 0.5)));
        // on the line through p0 and p1
        assert!(boundary.fan_is_degenerate(Point::new(3., 0.)));

        boundary.clear();
        assert!(boundary.is_empty());
    }

    #[test]
    fn test_fits_cavity() {
        let boundary = triangle_boundary();
        let inside = Point::new(1., 0.5);
        assert!(boundary.is_star_shaped(inside));
        assert!(boundary.fits_cavity(1, inside));

        // side count does not match the triangle count
        assert!(!boundary.fits_cavity(2, inside));

        // outside the cavity, the edge `p0 p1` is seen from behind
        let below = Point::new(1., -0.5);
        assert!(!boundary.is_star_shaped(below));
        assert!(!boundary.fits_cavity(1, below));

        // on an edge
        assert!(!boundary.fits_cavity(1, Point::new(1., 0.)));
    }

    #[test]
    fn test_concave_cavity_is_not_star_shaped() {
        // a dart with its reflex vertex at `c`, from `apex` the side `c d` faces away
        let a = Point::new(0., 0.);
        let b = Point::new(2., 0.);
        let c = Point::new(1., 1.);
        let d = Point::new(1., 3.);
        let mut boundary = Boundary::default();
        // triangles `a b c` and `a c d`, sharing `a c`
        boundary.push(Edge::new(a, b), c, TriangleId::INVALID);
        boundary.push(Edge::new(b, c), a, TriangleId::INVALID);
        boundary.push(Edge::new(c, d), a, TriangleId::INVALID);
        boundary.push(Edge::new(d, a), c, TriangleId::INVALID);

        assert!(boundary.fits_cavity(2, Point::new(0.5, 0.6)));
        let apex = Point::new(1.5, 0.2);
        assert!(!boundary.fits_cavity(2, apex));
    }
}

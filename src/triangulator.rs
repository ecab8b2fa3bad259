use rustc_hash::FxHashSet;

use crate::context::Context;
use crate::shape::{Point, Triangle};
use crate::triangles::{TriangleId, TrianglePool};
use crate::{Config, Error};

/// Which Bowyer-Watson variant rebuilds the mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// test every triangle for every point
    #[default]
    BowyerWatson,
    /// find one bad triangle, then walk neighbor links
    ContiguousBowyerWatson,
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::BowyerWatson => "bowyer-watson",
            Algorithm::ContiguousBowyerWatson => "contiguous bowyer-watson",
        }
    }

    /// the other variant
    pub fn toggle(&self) -> Self {
        match self {
            Algorithm::BowyerWatson => Algorithm::ContiguousBowyerWatson,
            Algorithm::ContiguousBowyerWatson => Algorithm::BowyerWatson,
        }
    }
}

/// Outcome of inserting one point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Insertion {
    Inserted,
    /// the point is outside the super triangle
    Uncovered,
    /// the point already is a vertex
    Duplicate,
    /// the cavity could not be re-triangulated cleanly around the point,
    /// which happens on nearly collinear or cocircular input
    Degenerate,
}

/// Summary of one rebuild
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebuildStats {
    pub algorithm: Algorithm,
    pub inserted: usize,
    pub skipped: usize,
    /// triangles in the mesh, super triangle corners included
    pub triangles: usize,
}

/// Owned copy of a mesh, safe to hand to another thread.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<[Point; 3]>,
    pub super_triangle: [Point; 3],
}

impl Mesh {
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// triangles with no super triangle corner
    pub fn without_super_triangle(&self) -> impl Iterator<Item = &[Point; 3]> {
        self.triangles
            .iter()
            .filter(|t| !t.iter().any(|p| self.super_triangle.contains(p)))
    }
}

/// Incremental Delaunay triangulation of a point set.
///
/// Each rebuild starts from scratch: the pool is reset, the super triangle
/// is inserted, then every point is inserted in order.
#[derive(Debug)]
pub struct Triangulator {
    pool: TrianglePool,
    triangulation: FxHashSet<TriangleId>,
    super_triangle: [Point; 3],
    algorithm: Algorithm,
    context: Context,
}

impl Triangulator {
    pub fn new(config: &Config) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self::with_capacity(
            config.super_triangle_inradius(),
            config.pool_capacity(),
        ))
    }

    /// Triangulator whose super triangle is equilateral, centered on the
    /// origin, with inscribed circle of radius `inradius`.
    pub fn with_capacity(inradius: f64, capacity: usize) -> Self {
        let half_base = 3_f64.sqrt() * inradius;
        Self {
            pool: TrianglePool::with_capacity(capacity),
            triangulation: FxHashSet::default(),
            super_triangle: [
                Point::new(0., 2. * inradius),
                Point::new(-half_base, -inradius),
                Point::new(half_base, -inradius),
            ],
            algorithm: Algorithm::default(),
            context: Context::new(),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        if self.algorithm != algorithm {
            tracing::info!("algorithm set to {}", algorithm.name());
        }
        self.algorithm = algorithm;
    }

    pub fn super_triangle(&self) -> [Point; 3] {
        self.super_triangle
    }

    pub fn is_super_vertex(&self, point: Point) -> bool {
        self.super_triangle.contains(&point)
    }

    pub fn pool(&self) -> &TrianglePool {
        &self.pool
    }

    pub fn len(&self) -> usize {
        self.triangulation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangulation.is_empty()
    }

    pub fn get(&self, id: TriangleId) -> Option<&Triangle> {
        if self.triangulation.contains(&id) {
            self.pool.get(id)
        } else {
            None
        }
    }

    pub fn triangle_ids(&self) -> impl Iterator<Item = TriangleId> + '_ {
        self.triangulation.iter().copied()
    }

    /// triangles of the current mesh, in no particular order
    pub fn triangles(&self) -> impl Iterator<Item = &Triangle> {
        self.triangulation.iter().map(|id| id.get(&self.pool))
    }

    pub fn mesh(&self) -> Mesh {
        Mesh {
            triangles: self.triangles().map(|t| t.points()).collect(),
            super_triangle: self.super_triangle,
        }
    }

    /// Rebuild the mesh for `points` with the selected algorithm.
    ///
    /// On error the mesh is left empty.
    pub fn triangulate(&mut self, points: &[Point]) -> Result<RebuildStats, Error> {
        match self.algorithm {
            Algorithm::BowyerWatson => self.triangulate_naive(points),
            Algorithm::ContiguousBowyerWatson => self.triangulate_contiguous(points),
        }
    }

    pub fn triangulate_naive(&mut self, points: &[Point]) -> Result<RebuildStats, Error> {
        self.rebuild(points, Algorithm::BowyerWatson)
    }

    pub fn triangulate_contiguous(&mut self, points: &[Point]) -> Result<RebuildStats, Error> {
        self.rebuild(points, Algorithm::ContiguousBowyerWatson)
    }

    fn rebuild(&mut self, points: &[Point], algorithm: Algorithm) -> Result<RebuildStats, Error> {
        let result = self.try_rebuild(points, algorithm);
        if let Err(err) = &result {
            tracing::error!("{} rebuild aborted: {err}", algorithm.name());
            self.triangulation.clear();
            self.pool.reset();
        }
        result
    }

    fn try_rebuild(&mut self, points: &[Point], algorithm: Algorithm) -> Result<RebuildStats, Error> {
        self.triangulation.clear();
        self.pool.reset();

        let [a, b, c] = self.super_triangle;
        let super_id = self.pool.acquire()?;
        self.pool.get_mut_unchecked(super_id).populate(a, b, c);
        self.triangulation.insert(super_id);

        let mut stats = RebuildStats {
            algorithm,
            inserted: 0,
            skipped: 0,
            triangles: 0,
        };

        for &point in points {
            let insertion = match algorithm {
                Algorithm::BowyerWatson => self.insert_naive(point)?,
                Algorithm::ContiguousBowyerWatson => self.insert_contiguous(point)?,
            };

            match insertion {
                Insertion::Inserted => stats.inserted += 1,
                Insertion::Uncovered => {
                    tracing::warn!("point {point:?} is outside the super triangle, skipped");
                    stats.skipped += 1;
                }
                Insertion::Duplicate => {
                    tracing::warn!("point {point:?} is already a vertex, skipped");
                    stats.skipped += 1;
                }
                Insertion::Degenerate => {
                    tracing::warn!("point {point:?} leaves a degenerate cavity, skipped");
                    stats.skipped += 1;
                }
            }
        }

        stats.triangles = self.triangulation.len();
        tracing::debug!(
            algorithm = algorithm.name(),
            inserted = stats.inserted,
            skipped = stats.skipped,
            triangles = stats.triangles,
            "rebuild done"
        );
        Ok(stats)
    }

    /// Release every bad triangle of the context and forget it.
    fn release_bad<'a>(
        pool: &mut TrianglePool,
        triangulation: &mut FxHashSet<TriangleId>,
        bad: impl Iterator<Item = &'a TriangleId>,
    ) {
        for id in bad {
            triangulation.remove(id);
            pool.release(*id);
        }
    }

    /// The triangle `point` falls in, which must also be bad.
    ///
    /// Points on a side or vertex count as inside, so a point repeating a
    /// vertex always lands in a triangle having that vertex.
    fn locate(
        pool: &TrianglePool,
        triangulation: &FxHashSet<TriangleId>,
        point: Point,
    ) -> Result<TriangleId, Insertion> {
        let Some(enclosing) = triangulation
            .iter()
            .copied()
            .find(|id| id.get(pool).encloses(point))
        else {
            return Err(Insertion::Uncovered);
        };

        let triangle = enclosing.get(pool);
        if triangle.contains(point) {
            return Err(Insertion::Duplicate);
        }
        if !triangle.contains_in_circumcircle(point) {
            return Err(Insertion::Degenerate);
        }
        Ok(enclosing)
    }
}

/// Brute force variant
impl Triangulator {
    fn insert_naive(&mut self, point: Point) -> Result<Insertion, Error> {
        let Self {
            pool,
            triangulation,
            context,
            ..
        } = self;
        context.clear();

        let enclosing = match Self::locate(pool, triangulation, point) {
            Ok(id) => id,
            Err(insertion) => return Ok(insertion),
        };

        // every triangle is tested
        context.bad.extend(
            triangulation
                .iter()
                .copied()
                .filter(|id| id.get(pool).contains_in_circumcircle(point)),
        );

        // keep the bad triangles reachable from the enclosing one through
        // shared edges, moving them to the front
        let bad = &mut context.bad;
        let Some(first) = bad.iter().position(|id| *id == enclosing) else {
            return Ok(Insertion::Degenerate);
        };
        bad.swap(0, first);
        let mut connected = 1;
        let mut next = 0;
        while next < connected {
            let triangle = bad[next].get(pool);
            for j in connected..bad.len() {
                let other = bad[j].get(pool);
                if triangle.edges().iter().any(|e| other.edge_index(e).is_some()) {
                    bad.swap(connected, j);
                    connected += 1;
                }
            }
            next += 1;
        }
        bad.truncate(connected);

        // an edge is on the polygon if no other bad triangle has it
        for (outer, outer_id) in context.bad.iter().enumerate() {
            let triangle = outer_id.get(pool);
            for (index, edge) in triangle.edges().iter().enumerate() {
                let is_shared = context
                    .bad
                    .iter()
                    .enumerate()
                    .any(|(inner, inner_id)| {
                        inner != outer && inner_id.get(pool).edge_index(edge).is_some()
                    });
                if !is_shared {
                    context
                        .boundary
                        .push(*edge, triangle.opposite(index), TriangleId::INVALID);
                }
            }
        }

        if !context.boundary.fits_cavity(context.bad.len(), point) {
            return Ok(Insertion::Degenerate);
        }

        tracing::trace!(
            bad = context.bad.len(),
            boundary = context.boundary.len(),
            "insert {point:?}"
        );

        Self::release_bad(pool, triangulation, context.bad.iter());

        for boundary_edge in context.boundary.iter() {
            let id = pool.acquire()?;
            pool.get_mut_unchecked(id)
                .populate(boundary_edge.edge.a, boundary_edge.edge.b, point);
            triangulation.insert(id);
        }

        Ok(Insertion::Inserted)
    }
}

/// Adjacency walk variant
impl Triangulator {
    fn insert_contiguous(&mut self, point: Point) -> Result<Insertion, Error> {
        let Self {
            pool,
            triangulation,
            context,
            ..
        } = self;
        context.clear();

        // the bad triangles are connected, the enclosing one seeds the walk
        let seed = match Self::locate(pool, triangulation, point) {
            Ok(id) => id,
            Err(insertion) => return Ok(insertion),
        };

        context.bad_set.insert(seed);
        context.walk_stack.push(seed);
        while let Some(id) = context.walk_stack.pop() {
            for neighbor in id.get(pool).neighbors {
                if neighbor.invalid() || context.bad_set.contains(&neighbor) {
                    continue;
                }
                if neighbor.get(pool).contains_in_circumcircle(point) {
                    context.bad_set.insert(neighbor);
                    context.walk_stack.push(neighbor);
                }
            }
        }

        // an edge is on the polygon if the triangle across it is not bad,
        // that triangle becomes the new triangle's outer neighbor
        for id in context.bad_set.iter() {
            let triangle = id.get(pool);
            for (index, (edge, neighbor)) in
                triangle.edges().iter().zip(triangle.neighbors).enumerate()
            {
                if !context.bad_set.contains(&neighbor) {
                    context
                        .boundary
                        .push(*edge, triangle.opposite(index), neighbor);
                }
            }
        }

        if !context.boundary.fits_cavity(context.bad_set.len(), point) {
            return Ok(Insertion::Degenerate);
        }

        tracing::trace!(
            bad = context.bad_set.len(),
            boundary = context.boundary.len(),
            "insert {point:?}"
        );

        Self::release_bad(pool, triangulation, context.bad_set.iter());

        for boundary_edge in context.boundary.iter() {
            let id = pool.acquire()?;
            pool.get_mut_unchecked(id)
                .populate(boundary_edge.edge.a, boundary_edge.edge.b, point);
            // only the boundary edge can face the outer triangle
            pool.mark_neighbor(id, boundary_edge.outer);
            context.partial.push(id);
            context.sibling_links.push(0);
        }

        // each new triangle shares its two edges through `point` with siblings
        let partial = &context.partial;
        let links = &mut context.sibling_links;
        for i in 0..partial.len() {
            for j in (i + 1)..partial.len() {
                if links[i] == 2 {
                    break;
                }
                if links[j] == 2 {
                    continue;
                }
                if pool.mark_neighbor(partial[i], partial[j]) {
                    links[i] += 1;
                    links[j] += 1;
                }
            }
        }

        triangulation.extend(context.partial.iter().copied());

        Ok(Insertion::Inserted)
    }
}

/// Diagnostics
impl Triangulator {
    /// Pairs `(triangle, other)` where a vertex of `other` lies inside the
    /// circumcircle of `triangle` by more than `tolerance` (relative to the
    /// radius).
    pub fn illegal_triangles(&self, tolerance: f64) -> Vec<(TriangleId, TriangleId)> {
        let mut result = vec![];
        for id in self.triangle_ids() {
            let triangle = id.get(&self.pool);
            let center = triangle.circumcenter();
            let radius = triangle.circumradius();
            let limit = (radius * (1. - tolerance)).powi(2);

            for other_id in self.triangle_ids() {
                if other_id == id {
                    continue;
                }
                let other = other_id.get(&self.pool);
                let violates = other
                    .points()
                    .iter()
                    .filter(|p| !triangle.contains(**p))
                    .any(|p| p.distance_squared(center) < limit);
                if violates {
                    result.push((id, other_id));
                }
            }
        }
        result
    }

    /// Links `(triangle, edge index)` that point outside the mesh, are not
    /// mutual or do not share the edge.
    pub fn broken_links(&self) -> Vec<(TriangleId, usize)> {
        let mut result = vec![];
        for id in self.triangle_ids() {
            let triangle = id.get(&self.pool);
            for (index, neighbor) in triangle.neighbors.iter().enumerate() {
                if neighbor.invalid() {
                    continue;
                }
                let Some(other) = self.get(*neighbor) else {
                    result.push((id, index));
                    continue;
                };
                let back = other.edge_index(&triangle.edges()[index]);
                if back.map(|i| other.neighbors[i]) != Some(id) {
                    result.push((id, index));
                }
            }
        }
        result
    }
}

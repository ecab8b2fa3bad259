use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::{edge::Boundary, triangles::TriangleId};

/// Scratch buffers for a single point insertion.
///
/// Every buffer is cleared per point and reused across points and frames,
/// so once warmed up a rebuild does not allocate.
#[derive(Debug, Default)]
pub struct Context {
    /// bad triangles in discovery order, naive variant
    pub bad: Vec<TriangleId>,
    /// bad triangles, contiguous variant; doubles as the walk's visited set
    pub bad_set: FxHashSet<TriangleId>,
    /// pending triangles of the adjacency walk
    pub walk_stack: Vec<TriangleId>,
    pub boundary: Boundary,
    /// new triangles not yet merged into the triangulation
    pub partial: Vec<TriangleId>,
    /// links each partial triangle has to its siblings
    pub sibling_links: SmallVec<[u8; 16]>,
}

impl Context {
    pub fn new() -> Self {
        Self {
            bad: Vec::with_capacity(32),
            bad_set: FxHashSet::default(),
            walk_stack: Vec::with_capacity(32),
            boundary: Boundary::with_capacity(32),
            partial: Vec::with_capacity(32),
            sibling_links: SmallVec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.bad.clear();
        self.bad_set.clear();
        self.walk_stack.clear();
        self.boundary.clear();
        self.partial.clear();
        self.sibling_links.clear();
    }
}

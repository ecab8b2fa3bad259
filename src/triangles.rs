use crate::shape::Triangle;
use crate::Error;

#[derive(Debug, Hash, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TriangleId(pub(crate) usize);

impl TriangleId {
    pub const INVALID: TriangleId = TriangleId(usize::MAX);

    /// whether id is invalid
    pub fn invalid(&self) -> bool {
        self.0 == Self::INVALID.0
    }

    pub fn get<'b>(&self, triangles: &'b TrianglePool) -> &'b Triangle {
        triangles.get_unchecked(*self)
    }
}

/// Fixed capacity triangle store.
///
/// All slots are allocated up front, released slots go to a LIFO free list
/// and are handed out again before the high-water mark advances, so a
/// rebuild never allocates.
// Note: For n points, the mesh holds 2n + 1 triangles including the super
//       triangle, and bad triangles are released before their replacements
//       are acquired, so the high-water mark stays at 2n + 1.
#[derive(Debug)]
pub struct TrianglePool {
    triangles: Vec<Triangle>,
    /// released slots, last released on top
    free: Vec<TriangleId>,
    /// high-water mark, slots at or above it were never handed out since last reset
    current_size: usize,
}

impl TrianglePool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: (0..capacity).map(|i| Triangle::empty(TriangleId(i))).collect(),
            free: Vec::with_capacity(capacity),
            current_size: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.triangles.len()
    }

    pub fn current_size(&self) -> usize {
        self.current_size
    }

    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    /// number of slots handed out and not released
    pub fn active_len(&self) -> usize {
        self.current_size - self.free.len()
    }

    /// Hand out a slot, the most recently released one if any.
    ///
    /// The slot keeps whatever geometry it had, callers `populate` it.
    pub fn acquire(&mut self) -> Result<TriangleId, Error> {
        if let Some(id) = self.free.pop() {
            return Ok(id);
        }

        if self.current_size == self.triangles.len() {
            return Err(Error::PoolExhausted {
                capacity: self.triangles.len(),
            });
        }

        let id = TriangleId(self.current_size);
        self.current_size += 1;
        Ok(id)
    }

    /// Return a slot to the free list, its geometry is left as is.
    pub fn release(&mut self, id: TriangleId) {
        debug_assert!(id.0 < self.current_size, "releasing a slot never acquired");
        debug_assert!(!self.free.contains(&id), "slot released twice");
        debug_assert_eq!(self.triangles[id.0].slot(), id);
        self.free.push(id);
    }

    /// Deactivate every slot at once
    pub fn reset(&mut self) {
        self.free.clear();
        self.current_size = 0;
    }

    /// whether the slot is handed out and not released
    pub fn is_active(&self, id: TriangleId) -> bool {
        id.0 < self.current_size && !self.free.contains(&id)
    }

    pub fn get(&self, id: TriangleId) -> Option<&Triangle> {
        if id == TriangleId::INVALID {
            return None;
        }
        self.triangles.get(id.0)
    }

    pub fn get_unchecked(&self, id: TriangleId) -> &Triangle {
        if id == TriangleId::INVALID {
            panic!("id should be valid");
        }
        &self.triangles[id.0]
    }

    pub fn get_mut(&mut self, id: TriangleId) -> Option<&mut Triangle> {
        if id == TriangleId::INVALID {
            return None;
        }
        self.triangles.get_mut(id.0)
    }

    pub fn get_mut_unchecked(&mut self, id: TriangleId) -> &mut Triangle {
        &mut self.triangles[id.0]
    }

    fn get_mut_two(&mut self, id_0: TriangleId, id_1: TriangleId) -> (&mut Triangle, &mut Triangle) {
        assert!(id_0 != id_1 && id_0.0 < self.triangles.len() && id_1.0 < self.triangles.len());

        if id_0.0 < id_1.0 {
            let (head, tail) = self.triangles.split_at_mut(id_1.0);
            (&mut head[id_0.0], &mut tail[0])
        } else {
            let (head, tail) = self.triangles.split_at_mut(id_0.0);
            (&mut tail[0], &mut head[id_1.0])
        }
    }

    /// Mark two triangles as neighbors if they share an edge.
    ///
    /// Sets the link on both sides and returns whether an edge matched.
    pub fn mark_neighbor(&mut self, left: TriangleId, right: TriangleId) -> bool {
        if left == right || left.invalid() || right.invalid() {
            return false;
        }

        let (left_triangle, right_triangle) = self.get_mut_two(left, right);

        for (l_ei, edge) in left_triangle.edges().iter().enumerate() {
            if let Some(r_ei) = right_triangle.edge_index(edge) {
                left_triangle.neighbors[l_ei] = right;
                right_triangle.neighbors[r_ei] = left;
                return true;
            }
        }

        false
    }
}

use glam::Vec2;

use crate::types::NodeId;

/// A scratch buffer that accumulates force per node.
///
/// Every force phase adds into this buffer before integration reads it,
/// so all forces for a tick are computed against the same pre-move
/// snapshot of the lattice. Entry `i` corresponds to node `i`.
#[derive(Debug, Default)]
pub struct ForceBuffer {
    force: Vec<Vec2>,
}

impl ForceBuffer {
    /// Creates a buffer with `len` zeroed entries.
    pub fn with_len(len: usize) -> Self {
        Self {
            force: vec![Vec2::ZERO; len],
        }
    }

    /// Ensures the buffer matches the lattice size and is clear.
    ///
    /// All entries are zeroed even when the length was already correct.
    pub fn ensure_len(&mut self, len: usize) {
        if self.force.len() != len {
            self.force.resize(len, Vec2::ZERO);
        }
        self.clear();
    }

    /// Zeroes every entry without changing the length.
    pub fn clear(&mut self) {
        for f in &mut self.force {
            *f = Vec2::ZERO;
        }
    }

    /// Adds one force contribution for the given node.
    ///
    /// ### Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    pub fn add(&mut self, id: NodeId, force: Vec2) {
        self.force[id] += force;
    }

    /// Accumulated force for the given node.
    #[inline]
    pub fn get(&self, id: NodeId) -> Vec2 {
        self.force[id]
    }

    pub fn len(&self) -> usize {
        self.force.len()
    }

    pub fn is_empty(&self) -> bool {
        self.force.is_empty()
    }
}

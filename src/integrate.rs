//! Semi-implicit Euler integration with implicit unit mass and unit
//! timestep.
//!
//! Forces are fully accumulated before this runs, so every node is
//! advanced from the same pre-integration snapshot regardless of
//! iteration order.

use crate::force_buffer::ForceBuffer;
use crate::grid::Grid;

/// Advances velocity from force, then position from the new velocity.
pub fn step(grid: &mut Grid, forces: &ForceBuffer) {
    for (id, node) in grid.nodes.iter_mut().enumerate() {
        node.vel += forces.get(id);
        node.pos += node.vel;
    }
}

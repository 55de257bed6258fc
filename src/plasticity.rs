//! Rest-position migration — the lattice's shape memory.
//!
//! Under sustained, engaged interaction the mesh deforms permanently:
//! each affected node's rest position creeps toward wherever the node
//! currently is, and is smeared along the focus movement. This is the
//! only writer of rest positions after grid construction; hovering, or
//! nodes outside the plastic radius, leave them bit-for-bit unchanged.

use crate::config::Config;
use crate::grid::Grid;
use crate::pointer::PointerState;
use crate::types::Viewport;

/// Migrates rest positions around an engaged focus.
pub fn settle(grid: &mut Grid, pointer: &PointerState, viewport: Viewport, cfg: &Config) {
    if !pointer.active {
        return;
    }

    let radius = viewport.min_dim() * cfg.plastic_radius;
    if radius <= 0.0 {
        return;
    }
    let movement = pointer.movement();

    for node in &mut grid.nodes {
        let offset = node.pos - pointer.pos;
        let mut dist = offset.length();
        if dist == 0.0 {
            dist = 1.0;
        }
        if dist >= radius {
            continue;
        }

        let falloff = 1.0 - dist / radius;
        let influence = falloff * falloff;
        let rate = cfg.plastic_settle * influence;

        node.rest += (node.pos - node.rest) * rate + movement * (cfg.plastic_drag * influence);
    }
}

//! Edge-length constraint relaxation and velocity reconciliation.
//!
//! After integration, every lattice edge is clamped into a min/max
//! length band by moving both endpoints symmetrically along the edge
//! direction — pure position correction, independent of force or
//! velocity. Axis-aligned edges use one band, the two diagonals of each
//! cell a slightly wider one; diagonals exist only here, never as
//! springs. Once all passes have run, each node's velocity is rebuilt
//! from the displacement that actually survived the constraints,
//! damped, so corrections cannot inject unbounded energy.

use glam::Vec2;

use crate::config::Config;
use crate::grid::Grid;
use crate::types::NodeId;

/// Corrections smaller than this are skipped outright.
const TOLERANCE: f32 = 1e-4;

/// Runs the configured number of relaxation passes.
pub fn relax(grid: &mut Grid, cfg: &Config) {
    for _ in 0..cfg.relax_passes {
        relax_pass(grid, cfg);
    }
}

/// One sweep over every cell's right, down, and diagonal edges.
pub fn relax_pass(grid: &mut Grid, cfg: &Config) {
    let (axis_min, axis_max) = cfg.axis_band;
    let (diag_min, diag_max) = cfg.diagonal_band;

    let x_band = (axis_min * grid.spacing_x, axis_max * grid.spacing_x);
    let y_band = (axis_min * grid.spacing_y, axis_max * grid.spacing_y);
    let d_band = (
        diag_min * grid.spacing_diagonal,
        diag_max * grid.spacing_diagonal,
    );

    for r in 0..grid.rows {
        for c in 0..grid.cols {
            let here = grid.index(r, c);
            if c + 1 < grid.cols {
                limit_edge(grid, here, grid.index(r, c + 1), x_band);
            }
            if r + 1 < grid.rows {
                limit_edge(grid, here, grid.index(r + 1, c), y_band);
                if c + 1 < grid.cols {
                    limit_edge(grid, here, grid.index(r + 1, c + 1), d_band);
                }
                if c >= 1 {
                    limit_edge(grid, here, grid.index(r + 1, c - 1), d_band);
                }
            }
        }
    }
}

/// Clamps one edge to the nearest band bound, half the correction per
/// endpoint. Edges already inside the band (or within tolerance of it)
/// are left untouched.
fn limit_edge(grid: &mut Grid, a: NodeId, b: NodeId, (min, max): (f32, f32)) {
    let delta = grid.nodes[b].pos - grid.nodes[a].pos;
    let mut dist = delta.length();
    if dist == 0.0 {
        dist = 1.0;
    }

    let target = if dist > max {
        max
    } else if dist < min {
        min
    } else {
        return;
    };

    let error = dist - target;
    if error.abs() <= TOLERANCE {
        return;
    }

    let correction = delta / dist * (error * 0.5);
    grid.nodes[a].pos += correction;
    grid.nodes[b].pos -= correction;
}

/// Rebuilds velocity from the displacement that survived constraining.
///
/// `before` is the position snapshot taken ahead of integration; the
/// portion of the integrated displacement the constraints rejected is
/// discarded and the remainder damped.
pub fn reconcile(grid: &mut Grid, before: &[Vec2], cfg: &Config) {
    debug_assert_eq!(grid.nodes.len(), before.len());
    for (node, &prev) in grid.nodes.iter_mut().zip(before) {
        node.vel = (node.pos - prev) * cfg.rebound_damping;
    }
}

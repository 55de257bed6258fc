//! Force accumulation for one tick.
//!
//! Three independent force phases write into a shared [`ForceBuffer`]:
//! 1. [`anchor_phase`] — every node is pulled toward its rest position,
//!    damped against its own velocity, and driven by a small idle
//!    oscillation keyed to its noise phase.
//! 2. [`spring_phase`] — axis-aligned neighbors are coupled by damped
//!    Hookean springs, applied once per undirected edge with equal and
//!    opposite magnitude. Diagonals carry no spring; they are enforced
//!    as hard constraints instead.
//! 3. [`pointer_phase`] — nodes inside the focus radius are attracted
//!    toward the focus and dragged along its movement vector.
//!
//! All phases read the same pre-integration snapshot of the lattice;
//! nothing here mutates a node.

use crate::config::Config;
use crate::force_buffer::ForceBuffer;
use crate::grid::Grid;
use crate::pointer::PointerState;
use crate::types::{NodeId, Viewport};

/// Runs all three force phases into `out`.
///
/// The buffer is resized and cleared to match the lattice first, so a
/// grid rebuilt on resize never reads stale entries.
pub fn accumulate(
    grid: &Grid,
    pointer: &PointerState,
    viewport: Viewport,
    time: f32,
    cfg: &Config,
    out: &mut ForceBuffer,
) {
    out.ensure_len(grid.nodes.len());
    anchor_phase(grid, time, cfg, out);
    spring_phase(grid, cfg, out);
    pointer_phase(grid, pointer, viewport, cfg, out);
}

/// Pulls each node toward its rest position.
///
/// `k * (rest - pos) - damping * vel + drive * sin(t * rate + phase)`,
/// with a per-axis drive amplitude (smaller on x) so idle motion reads
/// as a loose vertical shimmer rather than a uniform wobble.
pub fn anchor_phase(grid: &Grid, time: f32, cfg: &Config, out: &mut ForceBuffer) {
    for (id, node) in grid.nodes.iter().enumerate() {
        let wave = (time * cfg.idle_rate + node.phase).sin();
        let force = (node.rest - node.pos) * cfg.anchor_stiffness
            - node.vel * cfg.anchor_damping
            + cfg.idle_drive * wave;
        out.add(id, force);
    }
}

/// Applies damped structural springs along right and down edges.
///
/// For each edge the restoring force is
/// `extension * k + closing_speed * friction` along the edge direction,
/// added to one endpoint and subtracted from the other, so the net
/// momentum contribution of every edge is exactly zero.
pub fn spring_phase(grid: &Grid, cfg: &Config, out: &mut ForceBuffer) {
    for r in 0..grid.rows {
        for c in 0..grid.cols {
            let a = grid.index(r, c);
            if c + 1 < grid.cols {
                apply_spring(grid, a, grid.index(r, c + 1), grid.spacing_x, cfg, out);
            }
            if r + 1 < grid.rows {
                apply_spring(grid, a, grid.index(r + 1, c), grid.spacing_y, cfg, out);
            }
        }
    }
}

fn apply_spring(
    grid: &Grid,
    a: NodeId,
    b: NodeId,
    rest_length: f32,
    cfg: &Config,
    out: &mut ForceBuffer,
) {
    let na = &grid.nodes[a];
    let nb = &grid.nodes[b];

    let delta = nb.pos - na.pos;
    let mut dist = delta.length();
    if dist == 0.0 {
        dist = 1.0;
    }
    let dir = delta / dist;

    let extension = dist - rest_length;
    let separating = (nb.vel - na.vel).dot(dir);
    let magnitude = extension * cfg.spring_stiffness + separating * cfg.spring_friction;

    out.add(a, dir * magnitude);
    out.add(b, dir * -magnitude);
}

/// Attracts nodes inside the focus radius and drags them along the
/// focus movement.
///
/// The radius shrinks to a fixed pinpoint under multi-touch, otherwise
/// it scales with the viewport and widens while engaged. Influence
/// falls off quadratically from 1 at the focus to 0 at the radius, so
/// nodes outside it (including any pointer parked far off screen) are
/// untouched.
pub fn pointer_phase(
    grid: &Grid,
    pointer: &PointerState,
    viewport: Viewport,
    cfg: &Config,
    out: &mut ForceBuffer,
) {
    let radius = if pointer.multi_touch {
        cfg.multi_touch_radius
    } else if pointer.active {
        viewport.min_dim() * cfg.pointer_radius_active
    } else {
        viewport.min_dim() * cfg.pointer_radius_idle
    };
    if radius <= 0.0 {
        return;
    }

    let (pull, drag) = if pointer.active {
        (cfg.pull_active, cfg.drag_active)
    } else {
        (cfg.pull_idle, cfg.drag_idle)
    };
    let movement = pointer.movement();

    for (id, node) in grid.nodes.iter().enumerate() {
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
        let toward_focus = -(offset / dist);

        out.add(
            id,
            toward_focus * (influence * pull) + movement * (influence * drag),
        );
    }
}

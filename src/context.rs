//! Per-instance simulation state and the tick pipeline.
//!
//! One [`SimulationContext`] owns exactly one grid, one pointer state,
//! and a monotonically increasing time accumulator. Nothing is shared
//! between instances, so hosts can run several simulations side by side
//! and tests get full determinism.
//!
//! The per-tick pipeline:
//! 1. Atomic grid rebuild if the viewport changed since the last tick.
//! 2. Pointer normalization and smoothing ([`crate::pointer`]).
//! 3. Force accumulation ([`crate::forces`]).
//! 4. Semi-implicit Euler integration ([`crate::integrate`]).
//! 5. Edge-length relaxation and velocity reconciliation
//!    ([`crate::constraint`]).
//! 6. Rest-position plasticity ([`crate::plasticity`]).

use glam::Vec2;

use crate::config::Config;
use crate::constraint;
use crate::force_buffer::ForceBuffer;
use crate::forces;
use crate::grid::Grid;
use crate::integrate;
use crate::plasticity;
use crate::pointer::{self, PointerState};
use crate::types::Viewport;

/// Raw host input for one tick, in viewport space.
///
/// The heterogeneous pointer/touch shape is normalized at the boundary
/// (see [`pointer::resolve`]); simulation logic never branches on it.
#[derive(Clone, Debug)]
pub struct TickInput {
    pub viewport: Viewport,
    /// Last known pointer position, if any.
    pub pointer: Option<Vec2>,
    /// Active touch points, first one wins.
    pub touches: Vec<Vec2>,
    /// A press button is held.
    pub pressed: bool,
}

impl TickInput {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            pointer: None,
            touches: Vec::new(),
            pressed: false,
        }
    }
}

/// All mutable state of one simulation instance.
pub struct SimulationContext {
    config: Config,
    viewport: Viewport,
    grid: Grid,
    pointer: PointerState,
    drift: f32,
    forces: ForceBuffer,
    snapshot: Vec<Vec2>,
}

impl SimulationContext {
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_config(width, height, Config::default())
    }

    pub fn with_config(width: f32, height: f32, config: Config) -> Self {
        let viewport = Viewport::new(width, height);
        let grid = Grid::from_viewport(viewport);
        let node_count = grid.nodes.len();
        Self {
            config,
            viewport,
            grid,
            pointer: PointerState::new(),
            drift: 0.0,
            forces: ForceBuffer::with_len(node_count),
            snapshot: Vec::with_capacity(node_count),
        }
    }

    /// Discards the lattice and rebuilds it for a new viewport.
    ///
    /// The old grid is replaced wholesale, never patched, and pointer
    /// smoothing history is dropped with it; the next sample snaps
    /// fresh. Runs to completion before the next tick can observe
    /// anything, so a tick never sees a partially rebuilt grid.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        self.grid = Grid::from_viewport(self.viewport);
        self.pointer.reset();
    }

    /// Advances the simulation by one frame and returns the lattice for
    /// rendering.
    pub fn tick(&mut self, input: &TickInput) -> &Grid {
        if input.viewport != self.viewport {
            self.resize(input.viewport.width, input.viewport.height);
        }
        self.drift += self.config.drift_step;

        let sample = pointer::resolve(
            input.pointer,
            &input.touches,
            input.pressed,
            self.viewport,
            self.drift,
            &self.config,
        );
        self.pointer.update(sample, &self.config);

        forces::accumulate(
            &self.grid,
            &self.pointer,
            self.viewport,
            self.drift,
            &self.config,
            &mut self.forces,
        );

        self.snapshot.clear();
        self.snapshot.extend(self.grid.nodes.iter().map(|n| n.pos));

        integrate::step(&mut self.grid, &self.forces);
        constraint::relax(&mut self.grid, &self.config);
        constraint::reconcile(&mut self.grid, &self.snapshot, &self.config);
        plasticity::settle(&mut self.grid, &self.pointer, self.viewport, &self.config);

        &self.grid
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current value of the time accumulator.
    pub fn time(&self) -> f32 {
        self.drift
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeId;

    /// No idle drive and no hover influence: the only motion left comes
    /// from explicit engagement.
    fn quiet_config() -> Config {
        Config {
            idle_drive: Vec2::ZERO,
            pull_idle: 0.0,
            drag_idle: 0.0,
            ..Config::default()
        }
    }

    fn nearest_node_to_center(grid: &Grid) -> NodeId {
        let mut best = 0;
        let mut best_d2 = f32::MAX;
        for (id, node) in grid.nodes.iter().enumerate() {
            let d2 = node.rest.length_squared();
            if d2 < best_d2 {
                best_d2 = d2;
                best = id;
            }
        }
        best
    }

    #[test]
    fn lattice_at_rest_stays_at_rest() {
        let mut ctx = SimulationContext::with_config(800.0, 600.0, quiet_config());
        let input = TickInput::new(ctx.viewport());

        for _ in 0..5 {
            ctx.tick(&input);
        }

        // Assembled positions carry float rounding on the order of an
        // ulp, so springs exert vanishing residual forces; everything
        // must stay pinned to rest within that noise floor.
        let grid = ctx.grid();
        for node in &grid.nodes {
            assert!((node.pos - node.rest).length() < 1e-3);
            assert!(node.vel.length() < 1e-4);
        }
        for r in 0..grid.rows {
            for c in 0..grid.cols {
                assert!(grid.strain(r, c) < 1e-3);
            }
        }
    }

    #[test]
    fn resting_pair_is_exactly_immobile() {
        // Integer spacing keeps every assembled coordinate exact, so a
        // tick must leave the lattice bit-for-bit untouched.
        let cfg = quiet_config();
        let mut grid = Grid::with_dims(2, 2, 40.0, 40.0).unwrap();
        let viewport = Viewport::new(800.0, 600.0);

        let mut far = PointerState::new();
        far.update(
            crate::pointer::PointerSample {
                pos: Vec2::new(1e6, 1e6),
                active: false,
                multi_touch: false,
            },
            &cfg,
        );

        let before: Vec<Vec2> = grid.nodes.iter().map(|n| n.pos).collect();
        let mut buf = ForceBuffer::default();
        forces::accumulate(&grid, &far, viewport, 3.0, &cfg, &mut buf);
        integrate::step(&mut grid, &buf);
        constraint::relax(&mut grid, &cfg);
        constraint::reconcile(&mut grid, &before, &cfg);
        plasticity::settle(&mut grid, &far, viewport, &cfg);

        for (node, prev) in grid.nodes.iter().zip(&before) {
            assert_eq!(node.pos, *prev);
            assert_eq!(node.vel, Vec2::ZERO);
        }
        assert_eq!(grid.strain(0, 0), 0.0);
    }

    #[test]
    fn kinetic_energy_is_non_increasing_from_rest() {
        let mut ctx = SimulationContext::with_config(640.0, 480.0, quiet_config());
        let input = TickInput::new(ctx.viewport());

        // Assembled-position rounding leaves a noise floor of residual
        // spring energy around 1e-7; above it the sequence must decay.
        let mut previous = ctx.grid().kinetic_energy();
        for _ in 0..40 {
            ctx.tick(&input);
            let energy = ctx.grid().kinetic_energy();
            assert!(energy <= previous + 1e-6, "{energy} > {previous}");
            previous = energy;
        }
        assert!(previous < 1e-6);
    }

    #[test]
    fn released_mesh_settles_back_down() {
        let mut ctx = SimulationContext::with_config(800.0, 600.0, quiet_config());
        let center = ctx.viewport().center();

        let engaged = TickInput {
            pointer: Some(center + Vec2::new(40.0, -25.0)),
            pressed: true,
            ..TickInput::new(ctx.viewport())
        };
        for _ in 0..30 {
            ctx.tick(&engaged);
        }
        let energy_at_release = ctx.grid().kinetic_energy();
        assert!(energy_at_release > 0.0);

        let released = TickInput::new(ctx.viewport());
        for _ in 0..400 {
            ctx.tick(&released);
        }

        // Plasticity reshaped the rest lattice, so the mesh settles into
        // a new anchor/spring equilibrium rather than the original one;
        // what must vanish is the motion.
        assert!(ctx.grid().kinetic_energy() < 1e-3);

        let settled: Vec<Vec2> = ctx.grid().nodes.iter().map(|n| n.pos).collect();
        ctx.tick(&released);
        for (node, prev) in ctx.grid().nodes.iter().zip(&settled) {
            assert!((node.pos - *prev).length() < 1e-2);
        }
    }

    #[test]
    fn node_under_a_held_pointer_closes_in_on_it() {
        let cfg = Config {
            idle_drive: Vec2::ZERO,
            ..Config::default()
        };
        let mut ctx = SimulationContext::with_config(800.0, 600.0, cfg);
        let center = ctx.viewport().center();

        let held = TickInput {
            pointer: Some(center + Vec2::new(35.0, 0.0)),
            pressed: true,
            ..TickInput::new(ctx.viewport())
        };

        let id = nearest_node_to_center(ctx.grid());
        let distance = |ctx: &SimulationContext| {
            ctx.grid().nodes[id].pos.distance(ctx.pointer().pos)
        };

        ctx.tick(&held);
        let mut previous = distance(&ctx);
        for _ in 0..3 {
            ctx.tick(&held);
            let d = distance(&ctx);
            assert!(d < previous, "distance should shrink: {d} >= {previous}");
            previous = d;
        }

        let mut trail = previous;
        for _ in 0..150 {
            ctx.tick(&held);
            trail = distance(&ctx);
        }
        assert!(trail < 12.0, "node never stabilized near focus: {trail}");

        ctx.tick(&held);
        assert!((distance(&ctx) - trail).abs() < 0.5, "still oscillating");
    }

    #[test]
    fn rest_positions_only_move_under_engagement() {
        let mut ctx = SimulationContext::new(800.0, 600.0);
        let center = ctx.viewport().center();

        // Hovering ticks: rest positions bit-for-bit unchanged.
        let hover = TickInput {
            pointer: Some(center),
            ..TickInput::new(ctx.viewport())
        };
        ctx.tick(&hover);
        let before: Vec<Vec2> = ctx.grid().nodes.iter().map(|n| n.rest).collect();
        for _ in 0..10 {
            ctx.tick(&hover);
        }
        for (node, prev) in ctx.grid().nodes.iter().zip(&before) {
            assert_eq!(node.rest, *prev);
        }

        // Engaged ticks: nearby rest positions migrate, far ones do not.
        let held = TickInput { pressed: true, ..hover.clone() };
        for _ in 0..10 {
            ctx.tick(&held);
        }
        let id = nearest_node_to_center(ctx.grid());
        assert_ne!(ctx.grid().nodes[id].rest, before[id]);

        let corner = ctx.grid().nodes.len() - 1;
        assert_eq!(ctx.grid().nodes[corner].rest, before[corner]);
    }

    #[test]
    fn viewport_change_rebuilds_the_grid_atomically() {
        let mut ctx = SimulationContext::new(800.0, 600.0);
        let held = TickInput {
            pointer: Some(Vec2::new(400.0, 300.0)),
            pressed: true,
            ..TickInput::new(ctx.viewport())
        };
        for _ in 0..20 {
            ctx.tick(&held);
        }

        let resized = TickInput::new(Viewport::new(1280.0, 1024.0));
        ctx.tick(&resized);

        let fresh = Grid::from_viewport(Viewport::new(1280.0, 1024.0));
        let grid = ctx.grid();
        assert_eq!(grid.rows, fresh.rows);
        assert_eq!(grid.cols, fresh.cols);

        // Smoothing history did not survive: the focus re-snapped.
        assert_eq!(ctx.pointer().movement(), Vec2::ZERO);
    }

    #[test]
    fn instances_with_identical_input_stay_identical() {
        let mut a = SimulationContext::new(800.0, 600.0);
        let mut b = SimulationContext::new(800.0, 600.0);

        for i in 0..60 {
            let t = i as f32;
            let input = TickInput {
                pointer: Some(Vec2::new(400.0 + t * 3.0, 300.0 - t)),
                pressed: i % 2 == 0,
                ..TickInput::new(a.viewport())
            };
            a.tick(&input);
            b.tick(&input);
        }

        for (na, nb) in a.grid().nodes.iter().zip(&b.grid().nodes) {
            assert_eq!(na, nb);
        }
    }

    #[test]
    fn auto_focus_orbit_drives_the_focus_without_input() {
        let cfg = Config {
            auto_focus: true,
            ..Config::default()
        };
        let mut ctx = SimulationContext::with_config(800.0, 600.0, cfg);
        let input = TickInput::new(ctx.viewport());

        ctx.tick(&input);
        // The orbit starts near cos(0) * 0.24 * width, well off center.
        assert!(ctx.pointer().pos.x > 100.0);
        assert!(!ctx.pointer().active);
    }
}

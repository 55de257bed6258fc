//! Pointer sample normalization and smoothing.
//!
//! The host hands over whatever it has each frame — a pointer position,
//! a touch list, a button flag — and [`resolve`] collapses that into one
//! canonical sample in the lattice's centered coordinate frame before
//! anything in the core sees it. [`PointerState::update`] then smooths
//! successive samples into a stable focus and a per-tick movement vector
//! used by the drag force and plasticity.

use glam::Vec2;

use crate::config::Config;
use crate::types::Viewport;

/// One normalized pointer sample, in centered lattice coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub pos: Vec2,
    /// Pressed or touching, as opposed to hovering.
    pub active: bool,
    /// More than one simultaneous touch point.
    pub multi_touch: bool,
}

/// Smoothed pointer focus, mutated once per tick and read-only to every
/// other component.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerState {
    pub pos: Vec2,
    pub prev: Vec2,
    pub active: bool,
    pub multi_touch: bool,
    initialized: bool,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets all smoothing history. The next sample snaps directly,
    /// as on the very first sample for a new grid.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Movement of the smoothed focus over the last tick.
    pub fn movement(&self) -> Vec2 {
        self.pos - self.prev
    }

    /// Folds one sample into the smoothed state.
    ///
    /// The first sample after construction or [`reset`](Self::reset)
    /// snaps both the current and previous focus to the raw position so
    /// the focus never lags in from a stale location. Subsequent samples
    /// are tracked exponentially, faster while engaged.
    pub fn update(&mut self, sample: PointerSample, cfg: &Config) {
        self.active = sample.active;
        self.multi_touch = sample.multi_touch;

        if !self.initialized {
            self.pos = sample.pos;
            self.prev = sample.pos;
            self.initialized = true;
            return;
        }

        self.prev = self.pos;
        let rate = if sample.active {
            cfg.track_rate_active
        } else {
            cfg.track_rate_idle
        };
        self.pos += (sample.pos - self.pos) * rate;
    }
}

/// Collapses raw host input into one canonical sample.
///
/// Resolution order: the first touch point, else the last known pointer
/// position, else the viewport center. Coordinates arrive in viewport
/// space and leave in centered lattice space. With
/// [`Config::auto_focus`] enabled, an unusable pointer (absent, or
/// outside the viewport) is replaced by the autonomous orbit instead of
/// the center, always as a hover-strength focus.
pub fn resolve(
    pointer: Option<Vec2>,
    touches: &[Vec2],
    pressed: bool,
    viewport: Viewport,
    time: f32,
    cfg: &Config,
) -> PointerSample {
    let active = !touches.is_empty() || pressed;
    let multi_touch = touches.len() > 1;
    let raw = touches.first().copied().or(pointer);

    match raw {
        Some(p) if !cfg.auto_focus || viewport.contains(p) => PointerSample {
            pos: p - viewport.center(),
            active,
            multi_touch,
        },
        _ if cfg.auto_focus => PointerSample {
            pos: auto_focus(time, viewport),
            active: false,
            multi_touch: false,
        },
        _ => PointerSample {
            // No pointer available: hover at the viewport center.
            pos: Vec2::ZERO,
            active,
            multi_touch,
        },
    }
}

/// Autonomous focus orbit used when no pointer input is usable: a slow
/// Lissajous path spanning a fraction of the viewport, in centered
/// coordinates.
pub fn auto_focus(time: f32, viewport: Viewport) -> Vec2 {
    Vec2::new(
        (time * 0.8).cos() * viewport.width * 0.24,
        (time * 0.6 + 0.7).sin() * viewport.height * 0.18,
    )
}

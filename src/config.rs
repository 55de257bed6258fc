use glam::Vec2;

/// Tuning constants for the whole simulation pipeline.
///
/// The defaults are the production values; tests override individual
/// fields (e.g. zero `idle_drive`) to isolate one mechanism at a time.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Stiffness of the pull toward a node's rest position.
    pub anchor_stiffness: f32,
    /// Velocity damping applied inside the anchor force.
    pub anchor_damping: f32,
    /// Per-axis amplitude of the idle oscillation drive (x smaller than y).
    pub idle_drive: Vec2,
    /// Angular rate of the idle oscillation.
    pub idle_rate: f32,

    /// Hookean stiffness of axis-aligned structural springs.
    pub spring_stiffness: f32,
    /// Damping on the relative speed along a structural spring.
    pub spring_friction: f32,

    /// Pointer radius as a fraction of `min(width, height)`, engaged.
    pub pointer_radius_active: f32,
    /// Pointer radius as a fraction of `min(width, height)`, hovering.
    pub pointer_radius_idle: f32,
    /// Fixed pointer radius when more than one touch point is down.
    pub multi_touch_radius: f32,
    /// Attraction strength toward the focus, engaged / hovering.
    pub pull_active: f32,
    pub pull_idle: f32,
    /// Movement-vector drag strength, engaged / hovering.
    pub drag_active: f32,
    pub drag_idle: f32,

    /// Pointer smoothing rate, engaged / hovering.
    pub track_rate_active: f32,
    pub track_rate_idle: f32,

    /// Allowed length band for axis-aligned edges, as rest-length factors.
    pub axis_band: (f32, f32),
    /// Allowed length band for diagonal edges, as rest-length factors.
    pub diagonal_band: (f32, f32),
    /// Relaxation passes per tick. Tuned, not a convergence guarantee.
    pub relax_passes: usize,
    /// Damping applied when reconciling velocity with constrained motion.
    pub rebound_damping: f32,

    /// Plastic radius as a fraction of `min(width, height)`.
    pub plastic_radius: f32,
    /// Base rate at which rest positions settle toward current positions.
    pub plastic_settle: f32,
    /// Movement-vector contribution to rest-position migration.
    pub plastic_drag: f32,

    /// Time-accumulator increment per tick.
    pub drift_step: f32,
    /// Drive the focus along an autonomous orbit when no pointer is usable.
    pub auto_focus: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            anchor_stiffness: 0.024,
            anchor_damping: 0.205,
            idle_drive: Vec2::new(0.012, 0.02),
            idle_rate: 1.6,
            spring_stiffness: 0.09,
            spring_friction: 0.095,
            pointer_radius_active: 0.30,
            pointer_radius_idle: 0.24,
            multi_touch_radius: 10.0,
            pull_active: 1.35,
            pull_idle: 0.28,
            drag_active: 9.0,
            drag_idle: 1.2,
            track_rate_active: 0.42,
            track_rate_idle: 0.14,
            axis_band: (0.68, 1.52),
            diagonal_band: (0.76, 1.5),
            relax_passes: 2,
            rebound_damping: 0.86,
            plastic_radius: 0.34,
            plastic_settle: 0.075,
            plastic_drag: 0.22,
            drift_step: 0.0055,
            auto_focus: false,
        }
    }
}

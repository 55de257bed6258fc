use glam::Vec2;

/// Identifier for a node in a [`crate::grid::Grid`].
///
/// This is an index into `Grid::nodes`, and is only meaningful within
/// the lifetime of a given `Grid` instance.
pub type NodeId = usize;

/// Viewport dimensions in pixels, sanitized at construction.
///
/// Degenerate or non-finite dimensions are floored to 1 so that every
/// downstream spacing and radius computation stays finite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    pub fn min_dim(self) -> f32 {
        self.width.min(self.height)
    }

    pub fn area(self) -> f32 {
        self.width * self.height
    }

    pub fn center(self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Whether a point in viewport space lies inside the viewport.
    pub fn contains(self, p: Vec2) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.width && p.y <= self.height
    }
}

fn sanitize(dim: f32) -> f32 {
    if dim.is_finite() { dim.max(1.0) } else { 1.0 }
}

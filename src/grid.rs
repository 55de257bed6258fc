use glam::Vec2;

use crate::error::SimError;
use crate::noise;
use crate::types::{NodeId, Viewport};

/// Baseline viewport area used to normalize lattice density.
const BASELINE_AREA: f32 = 1440.0 * 900.0;
/// Normalization window for derived edge strain.
const STRAIN_WINDOW: f32 = 0.35;

/// One lattice node.
///
/// `rest` is the elastic anchor; it only moves through plasticity.
#[derive(Clone, Debug, PartialEq)]
pub struct GridNode {
    pub rest: Vec2,
    pub pos: Vec2,
    pub vel: Vec2,
    pub phase: f32,
}

/// A rectangular lattice of nodes in row-major order, centered on the
/// origin. Node `(r, c)` lives at index `r * cols + c`; its structural
/// neighbors are `(r, c+1)` and `(r+1, c)`, its diagonal neighbors
/// `(r+1, c+1)` and `(r+1, c-1)`.
#[derive(Clone, Debug)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
    pub spacing_x: f32,
    pub spacing_y: f32,
    pub spacing_diagonal: f32,
    pub nodes: Vec<GridNode>,
}

impl Grid {
    /// Builds a lattice with explicit dimensions and spacing.
    ///
    /// Rejects empty dimensions and non-positive or non-finite spacing;
    /// this is the only fallible entry point into the crate.
    pub fn with_dims(
        rows: usize,
        cols: usize,
        spacing_x: f32,
        spacing_y: f32,
    ) -> Result<Self, SimError> {
        if rows == 0 || cols == 0 {
            return Err(SimError::InvalidDimensions { rows, cols });
        }
        for spacing in [spacing_x, spacing_y] {
            if !spacing.is_finite() || spacing <= 0.0 {
                return Err(SimError::InvalidSpacing(spacing));
            }
        }
        Ok(Self::assemble(rows, cols, spacing_x, spacing_y))
    }

    /// Builds the lattice for a viewport.
    ///
    /// Spacing adapts to viewport size and aspect ratio, and the lattice
    /// is overscanned well past the visible edges so pointer interaction
    /// near (or beyond) the border still has nodes to act on. All inputs
    /// are clamped; this cannot fail.
    pub fn from_viewport(viewport: Viewport) -> Self {
        let width = viewport.width;
        let height = viewport.height;
        let unit = viewport.min_dim();

        let density_scale = (viewport.area() / BASELINE_AREA).powf(0.1);
        let base_spacing = (unit / 22.0).clamp(22.0, 52.0);
        let responsive_spacing = (base_spacing / density_scale).clamp(20.0, 56.0);

        // Nudge cells into a non-square rectangle on wide or large screens.
        let aspect_influence = ((width / height - 1.6) * 0.16).clamp(-0.16, 0.16);
        let size_influence = ((unit - 920.0) / 4200.0).clamp(-0.08, 0.08);
        let cell_ratio = (1.0 + aspect_influence + size_influence).clamp(0.82, 1.22);

        let spacing_x = responsive_spacing * cell_ratio;
        let spacing_y = responsive_spacing / cell_ratio;

        // Overscan on both sides of each axis.
        let margin_x = (8.0 * spacing_x).max(0.45 * width);
        let margin_y = (8.0 * spacing_y).max(0.45 * height);
        let total_width = width + 2.0 * margin_x;
        let total_height = height + 2.0 * margin_y;

        let cols = (total_width / spacing_x).floor() as usize + 1;
        let rows = (total_height / spacing_y).floor() as usize + 1;

        Self::assemble(rows, cols, spacing_x, spacing_y)
    }

    fn assemble(rows: usize, cols: usize, spacing_x: f32, spacing_y: f32) -> Self {
        let start_x = -((cols - 1) as f32) * spacing_x * 0.5;
        let start_y = -((rows - 1) as f32) * spacing_y * 0.5;

        let mut nodes = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                let home = Vec2::new(
                    start_x + c as f32 * spacing_x,
                    start_y + r as f32 * spacing_y,
                );
                nodes.push(GridNode {
                    rest: home,
                    pos: home,
                    vel: Vec2::ZERO,
                    phase: noise::phase(r, c),
                });
            }
        }

        Self {
            rows,
            cols,
            spacing_x,
            spacing_y,
            spacing_diagonal: spacing_x.hypot(spacing_y),
            nodes,
        }
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> NodeId {
        row * self.cols + col
    }

    #[inline]
    pub fn node(&self, row: usize, col: usize) -> &GridNode {
        &self.nodes[self.index(row, col)]
    }

    /// Normalized deviation of the edges leaving `(row, col)` from their
    /// rest lengths, in [0, 1]. Derived on demand for rendering emphasis;
    /// missing neighbors at the lattice border contribute nothing.
    pub fn strain(&self, row: usize, col: usize) -> f32 {
        let here = self.node(row, col).pos;
        let mut deviation = 0.0;
        if col + 1 < self.cols {
            deviation += (here.distance(self.node(row, col + 1).pos) - self.spacing_x).abs();
        }
        if row + 1 < self.rows {
            deviation += (here.distance(self.node(row + 1, col).pos) - self.spacing_y).abs();
        }
        let window = STRAIN_WINDOW * self.spacing_x.min(self.spacing_y);
        (deviation / window).clamp(0.0, 1.0)
    }

    /// Total kinetic energy of the lattice (unit node mass).
    pub fn kinetic_energy(&self) -> f32 {
        self.nodes.iter().map(|n| 0.5 * n.vel.length_squared()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_viewport_matches_spacing_formulas() {
        let grid = Grid::from_viewport(Viewport::new(1440.0, 900.0));

        // unit = 900, densityScale = 1, baseSpacing = 900/22,
        // aspectInfluence = 0, sizeInfluence = -20/4200,
        // cellRatio = 1 - 20/4200.
        let base = 900.0_f32 / 22.0;
        let ratio = 1.0 - 20.0 / 4200.0;
        assert!((grid.spacing_x - base * ratio).abs() < 1e-2, "{}", grid.spacing_x);
        assert!((grid.spacing_y - base / ratio).abs() < 1e-2, "{}", grid.spacing_y);
        assert!(
            (grid.spacing_diagonal - grid.spacing_x.hypot(grid.spacing_y)).abs() < 1e-3
        );

        // Overscan: 0.45 * dim dominates 8 * spacing on both axes here.
        assert_eq!(grid.cols, ((1440.0 + 2.0 * 648.0) / grid.spacing_x) as usize + 1);
        assert_eq!(grid.rows, ((900.0 + 2.0 * 405.0) / grid.spacing_y) as usize + 1);
        assert_eq!(grid.nodes.len(), grid.rows * grid.cols);
    }

    #[test]
    fn lattice_is_centered_and_at_rest() {
        let grid = Grid::from_viewport(Viewport::new(1280.0, 720.0));

        let first = grid.node(0, 0);
        let expected = Vec2::new(
            -((grid.cols - 1) as f32) * grid.spacing_x * 0.5,
            -((grid.rows - 1) as f32) * grid.spacing_y * 0.5,
        );
        assert_eq!(first.rest, expected);

        // Opposite corners mirror each other through the origin.
        let last = grid.node(grid.rows - 1, grid.cols - 1);
        assert!((first.rest + last.rest).length() < 1e-3);

        for node in &grid.nodes {
            assert_eq!(node.pos, node.rest);
            assert_eq!(node.vel, Vec2::ZERO);
        }
    }

    #[test]
    fn phases_come_from_the_noise_field() {
        let grid = Grid::from_viewport(Viewport::new(1024.0, 768.0));
        for r in 0..grid.rows.min(8) {
            for c in 0..grid.cols.min(8) {
                assert_eq!(grid.node(r, c).phase, crate::noise::phase(r, c));
            }
        }
    }

    #[test]
    fn rebuild_with_same_viewport_is_reproducible() {
        let a = Grid::from_viewport(Viewport::new(991.0, 613.0));
        let b = Grid::from_viewport(Viewport::new(991.0, 613.0));
        assert_eq!(a.rows, b.rows);
        assert_eq!(a.cols, b.cols);
        for (na, nb) in a.nodes.iter().zip(&b.nodes) {
            assert_eq!(na.rest, nb.rest);
            assert_eq!(na.phase, nb.phase);
        }
    }

    #[test]
    fn degenerate_viewport_is_floored_not_faulted() {
        let grid = Grid::from_viewport(Viewport::new(0.0, -400.0));
        assert!(grid.rows >= 1);
        assert!(grid.cols >= 1);
        assert!(grid.spacing_x.is_finite() && grid.spacing_x > 0.0);
        assert!(grid.spacing_y.is_finite() && grid.spacing_y > 0.0);
        for node in &grid.nodes {
            assert!(node.pos.is_finite());
        }
    }

    #[test]
    fn with_dims_rejects_empty_lattices_and_bad_spacing() {
        assert_eq!(
            Grid::with_dims(0, 4, 30.0, 30.0).unwrap_err(),
            SimError::InvalidDimensions { rows: 0, cols: 4 }
        );
        assert_eq!(
            Grid::with_dims(4, 0, 30.0, 30.0).unwrap_err(),
            SimError::InvalidDimensions { rows: 4, cols: 0 }
        );
        assert_eq!(
            Grid::with_dims(4, 4, -1.0, 30.0).unwrap_err(),
            SimError::InvalidSpacing(-1.0)
        );
        assert!(Grid::with_dims(4, 4, 30.0, f32::NAN).is_err());
        assert!(Grid::with_dims(2, 2, 30.0, 40.0).is_ok());
    }

    #[test]
    fn strain_is_zero_at_rest_and_saturates_under_stretch() {
        let mut grid = Grid::with_dims(1, 3, 40.0, 40.0).unwrap();
        assert_eq!(grid.strain(0, 0), 0.0);
        assert_eq!(grid.strain(0, 2), 0.0);

        // Stretch the first right edge by half the strain window.
        let half_window = 0.5 * 0.35 * 40.0;
        grid.nodes[1].pos.x += half_window;
        assert!((grid.strain(0, 0) - 0.5).abs() < 1e-4);

        // Far past the window it clamps to 1.
        grid.nodes[1].pos.x += 500.0;
        assert_eq!(grid.strain(0, 0), 1.0);
    }
}

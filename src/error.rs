use thiserror::Error;

/// Precondition violations surfaced when constructing a grid directly.
///
/// The frame path never returns these: every per-tick computation is
/// self-healing by clamping. Only explicit caller requests (a grid with
/// zero cells, a non-positive spacing) are rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("grid needs at least one row and one column (got {rows}x{cols})")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("grid spacing must be positive and finite (got {0})")]
    InvalidSpacing(f32),
}

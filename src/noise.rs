//! Deterministic per-node phase generation.
//!
//! Each lattice cell gets a fixed oscillation phase derived from
//! continuous value noise sampled at `(row * 0.09, col * 0.09)`.
//! Adjacent cells therefore receive correlated phases rather than
//! independent random ones, which reads as a coherent ripple across the
//! mesh instead of static. The function is pure: rebuilding a grid with
//! the same dimensions reproduces the exact same phases.

use std::f32::consts::TAU;

/// Sample step between adjacent lattice cells in noise space.
const FREQUENCY: f32 = 0.09;

/// Returns the oscillation phase for lattice cell `(row, col)`, in [0, 2π).
pub fn phase(row: usize, col: usize) -> f32 {
    value_noise(row as f32 * FREQUENCY, col as f32 * FREQUENCY) * TAU
}

/// Smoothly interpolated value noise in [0, 1).
///
/// The integer lattice is filled with hashed pseudo-random values and
/// bilinearly interpolated with a smoothstep fade, so the field is
/// continuous everywhere and differentiable inside each cell.
fn value_noise(x: f32, y: f32) -> f32 {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = fade(x - x0);
    let fy = fade(y - y0);
    let ix = x0 as i32;
    let iy = y0 as i32;

    let v00 = lattice(ix, iy);
    let v10 = lattice(ix + 1, iy);
    let v01 = lattice(ix, iy + 1);
    let v11 = lattice(ix + 1, iy + 1);

    let top = v00 + (v10 - v00) * fx;
    let bottom = v01 + (v11 - v01) * fx;
    top + (bottom - top) * fy
}

fn fade(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Hashed lattice value in [0, 1). Integer-only mixing keeps the result
/// identical on every platform.
fn lattice(ix: i32, iy: i32) -> f32 {
    let mut h = (ix as u32).wrapping_mul(0x27d4_eb2d) ^ (iy as u32).wrapping_mul(0x1656_67b1);
    h ^= h >> 15;
    h = h.wrapping_mul(0x2c1b_3c6d);
    h ^= h >> 12;
    h = h.wrapping_mul(0x297a_2d39);
    h ^= h >> 15;
    // Top 24 bits, scaled into [0, 1).
    (h >> 8) as f32 / (1u32 << 24) as f32
}

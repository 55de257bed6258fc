//! Core 2-D deformable grid-mesh simulation library.
//!
//! A rectangular mass-spring lattice is pulled toward a smoothed pointer
//! focus, elastically resists stretching, and permanently deforms under
//! sustained interaction. The host drives the simulation with one
//! [`context::SimulationContext::tick`] call per frame and reads node
//! positions, velocities, and derived edge strain back out for rendering.
//!
//! Main components:
//! - [`noise`] — deterministic per-node phase generation.
//! - [`grid`] — lattice construction and storage.
//! - [`pointer`] — pointer sample normalization and smoothing.
//! - [`forces`] — anchor, structural-spring, and pointer forces.
//! - [`integrate`] — semi-implicit Euler velocity/position update.
//! - [`constraint`] — edge-length relaxation and velocity reconciliation.
//! - [`plasticity`] — rest-position migration (shape memory).
//! - [`context`] — per-instance simulation state and the tick pipeline.
//! - [`config`] — tuning constants for the whole pipeline.
//! - [`types`] — shared type aliases and the sanitized viewport.

pub mod config;
pub mod constraint;
pub mod context;
pub mod error;
pub mod force_buffer;
pub mod forces;
pub mod grid;
pub mod integrate;
pub mod noise;
pub mod plasticity;
pub mod pointer;
pub mod types;

//! # Cinder Shared
//!
//! Common types used by every Cinder crate.
//!
//! ## Contents
//!
//! - [`math`]: `Vec3`, angle conversion and basis helpers
//! - [`constants`]: pool sizes and timing constants
//! - [`palette`]: the 256 entry palette and its color ramps
//!
//! This crate must never depend on the renderer or world collision; those
//! live behind traits in `cinder_effects`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod math;
pub mod palette;

pub use constants::{MARK_FADE_TIME, MARK_TOTAL_TIME, MAX_MARK_POLYS, MAX_PARTICLES, MAX_VERTS_ON_POLY};
pub use math::{Basis, Vec2, Vec3};
pub use palette::{palette_rgb, ColorRamp};

//! # Effects Constants
//!
//! Pool sizes and timing values baked into the client.
//!
//! Runtime-tunable values (capacities, cull radius, seed) live in the
//! effects configuration; the values here are the defaults and the fixed
//! lifetimes that apply to every mark uniformly.

// =============================================================================
// POOL SIZES
// =============================================================================

/// Default particle pool capacity
pub const MAX_PARTICLES: usize = 2048;

/// Default mark pool capacity
pub const MAX_MARK_POLYS: usize = 1024;

/// Maximum vertices kept per mark fragment
pub const MAX_VERTS_ON_POLY: usize = 10;

/// Maximum fragments accepted for one impact mark
pub const MAX_MARK_FRAGMENTS: usize = 128;

// =============================================================================
// MARK TIMING (milliseconds)
// =============================================================================

/// Total lifetime of a persistent mark
pub const MARK_TOTAL_TIME: i32 = 10_000;

/// Final window of a mark's life during which it fades out
pub const MARK_FADE_TIME: i32 = 1_000;

/// Window over which energy marks cool down from their initial glow
pub const ENERGY_FADE_TIME: i32 = 3_000;

/// Starting intensity of the energy mark glow (over-bright, clamped at 255)
pub const ENERGY_FADE_START: f32 = 450.0;

/// Distance a decal projection reaches into the surface
pub const MARK_PROJECTION_DEPTH: f32 = 20.0;

// =============================================================================
// PARTICLE PHYSICS
// =============================================================================

/// Base gravity for palette and blood particles (units/s²)
pub const PARTICLE_GRAVITY: f32 = 40.0;

/// Default z acceleration installed after a bounce
pub const POST_IMPACT_GRAVITY: f32 = -200.0;

/// Default viewer distance beyond which smoke and weather are culled
pub const CULL_RADIUS: f32 = 1024.0;

/// Reference screen height for palette sprite scaling
pub const REFERENCE_VID_HEIGHT: u32 = 480;

/// Degrees of global roll accumulated per elapsed millisecond
pub const ROLL_PER_MS: f32 = 0.1;

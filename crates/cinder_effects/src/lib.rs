//! # Cinder Effects
//!
//! Client-side visual effects: particles, persistent wall marks and the
//! emitter presets that feed them.
//!
//! ## Architecture
//!
//! - **Particles**: fixed pool, closed-form kinematics, bounce or
//!   convert-to-decal on world impact, one billboard builder per kind
//! - **Marks**: ring pool that never refuses a new mark, evicting the oldest
//!   same-tick batch instead; fade and resubmit every frame
//! - **Presets**: named recipes that only ever spawn through [`Spawner`]
//!
//! ## Performance Guarantees
//!
//! - Zero heap allocations in the per-frame path
//! - Both pools sized once, at [`EffectsContext::new`]
//! - A full particle pool drops spawns; it never grows
//!
//! ## Frame Model
//!
//! ```text
//! HOST FRAME
//!   |
//!   |--- presets via ctx.spawner(now) ---> particle pool
//!   |--- ctx.tick(now, view, renderer, world)
//!   |        particle pass, then mark pass
//!   |<-- FrameStats
//! ```
//!
//! Everything runs on the rendering thread. The renderer and collision
//! model are reached only through [`SceneRenderer`] and [`WorldCollision`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use cinder_effects::{emitters::lfx, EffectsConfig, EffectsContext};
//!
//! let mut ctx = EffectsContext::new(EffectsConfig::default(), &mut renderer)?;
//! lfx::rocket_explosion(&mut ctx.spawner(now), &mut renderer, origin, normal);
//! let stats = ctx.tick(now, &view, &mut renderer, &world);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod context;
pub mod emitters;
pub mod error;
pub mod interfaces;
pub mod marks;
pub mod media;
pub mod particle;
pub mod random;
pub mod stats;
pub mod view;

// Re-exports for convenience
pub use config::EffectsConfig;
pub use context::EffectsContext;
pub use emitters::Spawner;
pub use error::{EffectsError, EffectsResult};
pub use interfaces::{
    PolyVert, RefEntity, SceneRenderer, ShaderHandle, TraceResult, ViewState, WorldCollision,
    CONTENTS_SOLID, WORLD_ENTITY,
};
pub use marks::{ImpactMark, ImpactOutcome, MarkPoly, MarkPool};
pub use media::{BlendMode, MediaHandles};
pub use particle::{CollisionBehavior, Particle, ParticleKind};
pub use random::EffectRng;
pub use stats::FrameStats;

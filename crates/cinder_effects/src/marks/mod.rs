//! # Marks
//!
//! Persistent surface decals (blood splats, scorch marks). Unlike
//! particles, creating a mark never fails: when the pool is full the oldest
//! batch of marks created in the same millisecond is evicted first.
//!
//! ## Lifecycle
//!
//! 1. [`impact_mark`] clips a quad against the world and stores each
//!    fragment as a [`MarkPoly`]
//! 2. [`add_marks`] fades and resubmits every mark each frame
//! 3. Marks older than `MARK_TOTAL_TIME` are released

mod fade;
mod impact;
mod pool;

pub use fade::{add_marks, MarkPassStats};
pub use impact::{impact_mark, ImpactMark, ImpactOutcome};
pub use pool::{MarkPoly, MarkPool};

//! # Memory Management
//!
//! Pre-allocated slot pools for zero-allocation frame updates.
//!
//! ## Design Philosophy
//!
//! All memory is allocated once when a level starts. During play:
//! - No heap allocations
//! - Every slot is on exactly one list (free or active)
//! - `free + active == capacity` holds after every operation

mod pool;
mod ring;

pub use pool::{FixedPool, SlotHandle};
pub use ring::{RingAllocation, RingPool};

/// Link value meaning "no slot".
pub(crate) const NIL: u32 = u32::MAX;

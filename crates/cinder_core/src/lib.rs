//! # Cinder Core
//!
//! Zero-allocation slot storage for short-lived effect objects.
//!
//! ## Architecture Rules
//!
//! 1. **No heap allocations after construction** - every slot exists up front
//! 2. **Index links, not pointers** - list membership is tracked with `u32`
//!    slot indices, so a stale handle can never dangle
//! 3. **Generation-checked handles** - releasing a slot bumps its generation
//!    and invalidates every handle to the old occupant
//!
//! ## Exhaustion Policies
//!
//! | Pool | When full |
//! |---|---|
//! | [`FixedPool`] | `allocate()` returns `None`, caller drops its object |
//! | [`RingPool`] | evicts every oldest entry that shares the oldest key |

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]
#![allow(clippy::module_name_repetitions)]

pub mod memory;

pub use memory::{FixedPool, RingAllocation, RingPool, SlotHandle};

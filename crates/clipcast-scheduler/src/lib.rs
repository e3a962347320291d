//! `clipcast-scheduler` — daily slot plan with catch-up tolerance.
//!
//! # Overview
//!
//! Each calendar day gets a fixed number of posting slots, one per
//! configured hour, each with a minute drawn once per day from a 5-minute
//! grid. A cycle that fires late may still claim a slot within its grace
//! window; a slot that already posted is never claimed again that day. The
//! plan is persisted through `clipcast-state` and regenerated wholesale when
//! the stored date is no longer today.

pub mod error;
pub mod plan;
pub mod types;

pub use error::{PlanError, Result};
pub use plan::{SlotPlanner, MINUTE_GRID};
pub use types::{Slot, SlotPlan};

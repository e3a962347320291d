//! `clipcast-state` — durable JSON documents with atomic replace-on-write.
//!
//! Two small documents back the whole system: the used-ledger (which
//! candidates were already published) and the daily slot plan (owned by
//! `clipcast-scheduler`, persisted through [`document`]). Each document is
//! read wholesale, mutated in memory, and written back wholesale — a killed
//! process never leaves a partial file behind.

pub mod document;
pub mod error;
pub mod ledger;

pub use error::{Result, StateError};
pub use ledger::UsedLedger;

//! `clipcast-core` — shared configuration, errors, clock, and common types.
//!
//! Everything here is consumed by the other `clipcast-*` crates. The config
//! is loaded once at startup (TOML file + `CLIPCAST_*` env overrides) and
//! passed down explicitly — there is no ambient global state.

pub mod clock;
pub mod config;
pub mod error;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::ClipcastConfig;
pub use error::{CoreError, Result};
pub use types::Candidate;

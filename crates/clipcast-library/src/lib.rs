//! `clipcast-library` — the remote video library collaborator.
//!
//! # Overview
//!
//! Google Drive is the backing store: a service-account JWT is exchanged for
//! a read-only bearer token, folders are listed with full pagination drain,
//! and the chosen file is streamed to a local path. The [`VideoLibrary`]
//! trait is the seam the orchestrator depends on, so cycles can be tested
//! against an in-memory library.
//!
//! The candidate picker also lives here: round-robin-with-reset over the
//! listing, keyed by the used ledger.

pub mod auth;
pub mod drive;
pub mod error;
pub mod pick;

pub use auth::ServiceAccount;
pub use drive::{DriveLibrary, VideoLibrary, VIDEO_EXTENSIONS};
pub use error::{LibraryError, Result};
pub use pick::pick_one;

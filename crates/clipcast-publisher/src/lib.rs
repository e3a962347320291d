//! `clipcast-publisher` — publish metadata and the upload-tool invocation.
//!
//! The upload tool is an external command (`youtube-upload` by default)
//! judged purely by its exit status. A failed invocation is retried exactly
//! once with the optional category argument omitted — a single deterministic
//! fallback, never a backoff loop. The two-attempt policy is surfaced as the
//! explicit [`PublishOutcome`] type rather than error control flow.

pub mod metadata;
pub mod upload;

pub use metadata::{compose, derive_title, PublishMetadata};
pub use upload::{PublishOutcome, Publisher, UploadTool};

use serde::{Deserialize, Serialize};

/// A remote video file eligible for publishing.
///
/// Request-scoped: the listing is re-fetched every cycle and only the `id`
/// survives across runs (in the used ledger).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Stable unique identifier assigned by the remote store.
    pub id: String,
    /// File name, used to derive the publish title.
    pub name: String,
}

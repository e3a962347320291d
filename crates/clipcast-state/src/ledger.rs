use serde::{Deserialize, Serialize};

/// Candidate identifiers already published.
///
/// Membership means "must not be picked again until the set is cleared by
/// exhaustion". Insertion order is irrelevant semantically but preserved in
/// the backing document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsedLedger {
    #[serde(default)]
    pub used_ids: Vec<String>,
}

impl UsedLedger {
    pub fn contains(&self, id: &str) -> bool {
        self.used_ids.iter().any(|used| used == id)
    }

    /// Record a confirmed publish. The orchestrator calls this only after
    /// the downstream publish succeeded — picking alone never records.
    pub fn record(&mut self, id: impl Into<String>) {
        self.used_ids.push(id.into());
    }

    /// Full reset once every candidate has been used.
    pub fn clear(&mut self) {
        self.used_ids.clear();
    }

    pub fn len(&self) -> usize {
        self.used_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document;

    #[test]
    fn record_then_contains() {
        let mut ledger = UsedLedger::default();
        assert!(!ledger.contains("vid-1"));
        ledger.record("vid-1");
        assert!(ledger.contains("vid-1"));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn clear_empties_the_ledger() {
        let mut ledger = UsedLedger::default();
        ledger.record("vid-1");
        ledger.record("vid-2");
        ledger.clear();
        assert!(ledger.is_empty());
    }

    #[test]
    fn document_round_trip_preserves_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("used.json");
        let mut ledger = UsedLedger::default();
        ledger.record("b");
        ledger.record("a");

        document::save_atomic(&path, &ledger).expect("save");
        let loaded: UsedLedger = document::load_or_default(&path);
        assert_eq!(loaded, ledger);
        assert_eq!(loaded.used_ids, vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn wire_format_matches_contract() {
        let mut ledger = UsedLedger::default();
        ledger.record("x1");
        let json = serde_json::to_string(&ledger).expect("serialize");
        assert_eq!(json, r#"{"used_ids":["x1"]}"#);
    }
}

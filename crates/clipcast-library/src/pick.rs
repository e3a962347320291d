//! Round-robin-with-reset candidate selection.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use clipcast_core::Candidate;
use clipcast_state::UsedLedger;

/// Pick one unused candidate uniformly at random.
///
/// When every candidate is already in `used`, the ledger is cleared in place
/// and the whole listing becomes eligible again ("seen everything, start the
/// cycle over"). Returns `None` only for an empty `candidates` list.
///
/// Picking does not mark anything used — the caller records the id after a
/// confirmed downstream publish, so a failed publish never consumes a
/// candidate.
pub fn pick_one<'a, R: Rng>(
    candidates: &'a [Candidate],
    used: &mut UsedLedger,
    rng: &mut R,
) -> Option<&'a Candidate> {
    if candidates.is_empty() {
        return None;
    }

    let remaining: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| !used.contains(&c.id))
        .collect();

    let remaining = if remaining.is_empty() {
        info!(
            total = candidates.len(),
            "every candidate has been published — starting the rotation over"
        );
        used.clear();
        candidates.iter().collect()
    } else {
        remaining
    };

    remaining.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn candidates(ids: &[&str]) -> Vec<Candidate> {
        ids.iter()
            .map(|id| Candidate {
                id: id.to_string(),
                name: format!("{id}.mp4"),
            })
            .collect()
    }

    #[test]
    fn empty_list_yields_none_and_leaves_ledger_alone() {
        let mut used = UsedLedger::default();
        used.record("ghost");
        let mut rng = StdRng::seed_from_u64(1);

        assert!(pick_one(&[], &mut used, &mut rng).is_none());
        assert!(used.contains("ghost"));
    }

    #[test]
    fn used_candidates_are_skipped() {
        let list = candidates(&["a", "b", "c"]);
        let mut used = UsedLedger::default();
        used.record("a");
        used.record("c");
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..20 {
            let picked = pick_one(&list, &mut used, &mut rng).expect("pick");
            assert_eq!(picked.id, "b");
        }
        // No reset happened — the ledger is untouched.
        assert_eq!(used.len(), 2);
    }

    #[test]
    fn exhaustion_clears_the_ledger_and_picks_from_the_full_list() {
        let list = candidates(&["a", "b", "c"]);
        let mut used = UsedLedger::default();
        used.record("a");
        used.record("b");
        used.record("c");
        let mut rng = StdRng::seed_from_u64(3);

        let picked = pick_one(&list, &mut used, &mut rng).expect("pick");
        assert!(used.is_empty());
        assert!(list.iter().any(|c| c.id == picked.id));
    }

    #[test]
    fn every_candidate_is_selected_once_before_any_repeat() {
        let list = candidates(&["a", "b", "c", "d", "e"]);
        let mut used = UsedLedger::default();
        let mut rng = StdRng::seed_from_u64(4);

        // The caller contract: append each pick to the ledger after use.
        let mut first_round: Vec<String> = Vec::new();
        for _ in 0..list.len() {
            let picked = pick_one(&list, &mut used, &mut rng).expect("pick").clone();
            assert!(
                !first_round.contains(&picked.id),
                "repeat before exhaustion: {}",
                picked.id
            );
            first_round.push(picked.id.clone());
            used.record(picked.id);
        }
        assert_eq!(first_round.len(), list.len());

        // The next pick starts a fresh rotation.
        let next = pick_one(&list, &mut used, &mut rng).expect("pick");
        assert!(used.is_empty() || used.len() < list.len());
        assert!(list.iter().any(|c| c.id == next.id));
    }
}

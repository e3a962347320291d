//! One end-to-end publish cycle.
//!
//! The cycle composes the slot planner, the used ledger, the remote library,
//! and the upload tool into the fixed sequence: slot check → load state →
//! list → pick → download → publish → commit. Every path terminates; no-op
//! exits are normal outcomes, not errors.

use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::{error, info};

use clipcast_core::config::PublishConfig;
use clipcast_core::Clock;
use clipcast_library::{pick_one, VideoLibrary};
use clipcast_publisher::{metadata, PublishOutcome, Publisher};
use clipcast_scheduler::SlotPlanner;
use clipcast_state::{document, UsedLedger};

/// File name of the used-ledger document inside the state directory.
pub const USED_DOC: &str = "used.json";
/// File name of the slot-plan document inside the state directory.
pub const SCHEDULE_DOC: &str = "schedule.json";

/// Terminal state of one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// No slot window is open and no override was requested.
    NotTime,
    /// The library returned no candidates.
    LibraryEmpty,
    /// The picker returned nothing despite a non-empty listing.
    NothingPicked,
    /// Publish confirmed; ledger and plan committed.
    Published {
        candidate_id: String,
        fallback: bool,
    },
    /// Both publish attempts failed; no state was committed.
    PublishFailed { detail: String },
}

/// Wires one cycle's collaborators together.
pub struct Cycle<'a> {
    planner: &'a SlotPlanner,
    ledger_path: PathBuf,
    library: &'a dyn VideoLibrary,
    publisher: &'a dyn Publisher,
    clock: &'a dyn Clock,
    publish: &'a PublishConfig,
    /// Publish immediately even when no slot window is open. A forced cycle
    /// still records the ledger but marks no slot.
    force: bool,
}

impl<'a> Cycle<'a> {
    pub fn new(
        planner: &'a SlotPlanner,
        ledger_path: impl Into<PathBuf>,
        library: &'a dyn VideoLibrary,
        publisher: &'a dyn Publisher,
        clock: &'a dyn Clock,
        publish: &'a PublishConfig,
        force: bool,
    ) -> Self {
        Self {
            planner,
            ledger_path: ledger_path.into(),
            library,
            publisher,
            clock,
            publish,
            force,
        }
    }

    /// Run the cycle to one of its terminal states.
    pub async fn run<R: Rng>(&self, rng: &mut R) -> anyhow::Result<CycleOutcome> {
        let now = self.clock.now();
        info!(timestamp = %now.format("%Y-%m-%d %H:%M:%S %:z"), "cycle started");

        let mut plan = self.planner.ensure_today(now.date_naive(), rng)?;

        let slot_index = self.planner.eligible_slot(&plan, now);
        match slot_index {
            Some(index) => {
                info!(slot = %plan.slots[index], "slot triggered");
            }
            None if self.force => {
                info!("no slot window open — forced publish requested");
            }
            None => {
                info!("no slot window open — nothing to do");
                return Ok(CycleOutcome::NotTime);
            }
        }

        let mut ledger: UsedLedger = document::load_or_default(&self.ledger_path);

        let candidates = self.library.list_candidates().await?;
        if candidates.is_empty() {
            info!("library returned no candidates — nothing to publish");
            return Ok(CycleOutcome::LibraryEmpty);
        }

        let Some(chosen) = pick_one(&candidates, &mut ledger, rng) else {
            // Cannot happen with a non-empty listing, but a cycle must end
            // cleanly rather than crash.
            info!("picker returned nothing — ending the cycle");
            return Ok(CycleOutcome::NothingPicked);
        };
        let chosen = chosen.clone();
        info!(candidate_id = %chosen.id, name = %chosen.name, "video chosen");

        // Scoped staging directory — removed on every exit path, including
        // early returns and errors below.
        let staging = tempfile::tempdir()?;
        let local_name = Path::new(&chosen.name)
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "video.mp4".into());
        let local = staging.path().join(local_name);

        info!("downloading candidate");
        self.library.download(&chosen.id, &local).await?;

        let meta = metadata::compose(&chosen.name, self.publish, rng);

        match self.publisher.publish(&local, &meta).await {
            PublishOutcome::Published { fallback } => {
                // Publish-then-commit ordering: a crash between the two
                // leaves the id out of the ledger, so the candidate can be
                // delivered again — at-least-once, never silently lost.
                ledger.record(chosen.id.clone());
                document::save_atomic(&self.ledger_path, &ledger)?;
                if let Some(index) = slot_index {
                    self.planner.mark_posted(&mut plan, index)?;
                }
                info!(candidate_id = %chosen.id, fallback, "publish confirmed — state committed");
                Ok(CycleOutcome::Published {
                    candidate_id: chosen.id,
                    fallback,
                })
            }
            PublishOutcome::Failed { detail } => {
                error!(%detail, "publish failed after fallback — state left untouched");
                Ok(CycleOutcome::PublishFailed { detail })
            }
        }
    }
}

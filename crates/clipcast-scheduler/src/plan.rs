use std::path::PathBuf;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use clipcast_state::document;

use crate::error::{PlanError, Result};
use crate::types::{Slot, SlotPlan};

/// Minute values a slot may draw, one uniform pick per slot per day.
pub const MINUTE_GRID: [u8; 12] = [0, 5, 10, 15, 20, 25, 30, 35, 40, 45, 50, 55];

/// Owns the persisted slot plan: regenerates it once per day, answers "is a
/// slot open right now", and marks slots posted.
pub struct SlotPlanner {
    path: PathBuf,
    hours: Vec<u8>,
    grace: Duration,
}

impl SlotPlanner {
    pub fn new(path: impl Into<PathBuf>, hours: Vec<u8>, grace_minutes: i64) -> Self {
        Self {
            path: path.into(),
            hours,
            grace: Duration::minutes(grace_minutes),
        }
    }

    /// Return the plan for `today`, regenerating when the stored plan is for
    /// another day or has no slots. Regeneration persists immediately;
    /// repeated calls within one day return the same slots unchanged.
    pub fn ensure_today<R: Rng>(&self, today: NaiveDate, rng: &mut R) -> Result<SlotPlan> {
        let stored: SlotPlan = document::load_or_default(&self.path);
        if stored.date == today && !stored.slots.is_empty() {
            return Ok(stored);
        }

        let plan = generate(today, &self.hours, rng);
        document::save_atomic(&self.path, &plan)?;
        info!(date = %today, times = %plan.times_summary(), "slot plan generated");
        Ok(plan)
    }

    /// First unposted slot whose window contains `now`, in stored order.
    ///
    /// A slot's window is `[start, start + grace)`. Slots are scanned in
    /// configured-hour order, so even if several windows overlapped the
    /// earliest slot wins deterministically.
    pub fn eligible_slot(&self, plan: &SlotPlan, now: DateTime<FixedOffset>) -> Option<usize> {
        for (index, slot) in plan.slots.iter().enumerate() {
            if slot.posted {
                continue;
            }
            let Some(start) = slot.starts_at(plan.date, now.offset()) else {
                continue;
            };
            if start <= now && now < start + self.grace {
                let delay = (now - start).num_minutes();
                if delay > 0 {
                    info!(
                        slot = %slot,
                        delay_min = delay,
                        grace_min = self.grace.num_minutes(),
                        "slot caught up late within the grace window"
                    );
                }
                return Some(index);
            }
        }
        None
    }

    /// Mark the slot posted and persist the plan atomically.
    pub fn mark_posted(&self, plan: &mut SlotPlan, index: usize) -> Result<()> {
        let slot = plan
            .slots
            .get_mut(index)
            .ok_or(PlanError::SlotOutOfRange { index })?;
        slot.posted = true;
        document::save_atomic(&self.path, plan)?;
        Ok(())
    }
}

/// Draw a fresh plan for `date`: one slot per hour, each minute picked
/// uniformly and independently from [`MINUTE_GRID`], all unposted.
fn generate<R: Rng>(date: NaiveDate, hours: &[u8], rng: &mut R) -> SlotPlan {
    let slots = hours
        .iter()
        .map(|&hour| Slot {
            hour,
            minute: MINUTE_GRID.choose(rng).copied().unwrap_or(0),
            posted: false,
        })
        .collect();
    SlotPlan { date, slots }
}

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

/// One of the day's fixed posting windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Fixed target hour from the configured set.
    pub hour: u8,
    /// Minute drawn once per day from the 5-minute grid.
    pub minute: u8,
    /// Set true exactly once, when a publish succeeds for this slot.
    /// Never reset — the next day's regeneration discards the whole plan.
    #[serde(default)]
    pub posted: bool,
}

impl Slot {
    /// The slot's start instant on `date` in the given timezone.
    ///
    /// Returns `None` for hour/minute combinations the calendar cannot
    /// represent (out-of-range values in a hand-edited document).
    pub fn starts_at(&self, date: NaiveDate, offset: &FixedOffset) -> Option<DateTime<FixedOffset>> {
        use chrono::Datelike;
        offset
            .with_ymd_and_hms(
                date.year(),
                date.month(),
                date.day(),
                u32::from(self.hour),
                u32::from(self.minute),
                0,
            )
            .single()
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// A full day's posting plan. Valid for `date` only; any read on a
/// different day is stale and must be regenerated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPlan {
    pub date: NaiveDate,
    #[serde(default)]
    pub slots: Vec<Slot>,
}

impl SlotPlan {
    /// Human-readable list of the day's slot times, in posting order.
    pub fn times_summary(&self) -> String {
        self.slots
            .iter()
            .map(Slot::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_start_combines_date_and_offset() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let slot = Slot {
            hour: 8,
            minute: 5,
            posted: false,
        };

        let start = slot.starts_at(date, &offset).unwrap();
        assert_eq!(start, offset.with_ymd_and_hms(2025, 6, 1, 8, 5, 0).unwrap());
    }

    #[test]
    fn out_of_range_slot_has_no_start() {
        let offset = FixedOffset::east_opt(0).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let slot = Slot {
            hour: 99,
            minute: 99,
            posted: false,
        };
        assert!(slot.starts_at(date, &offset).is_none());
    }

    #[test]
    fn plan_document_wire_format() {
        let plan = SlotPlan {
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            slots: vec![Slot {
                hour: 8,
                minute: 15,
                posted: false,
            }],
        };
        let json = serde_json::to_string(&plan).expect("serialize");
        assert_eq!(
            json,
            r#"{"date":"2025-06-01","slots":[{"hour":8,"minute":15,"posted":false}]}"#
        );
    }
}

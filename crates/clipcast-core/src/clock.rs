//! Clock abstraction — "now" and "today" are always derived from an injected
//! clock, never from a direct system read, so tests can simulate arbitrary
//! instants without touching the host clock.

use chrono::{DateTime, FixedOffset, Utc};

/// Provides the current instant in the configured timezone.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Production clock: system time shifted into the configured UTC offset.
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

/// Test clock pinned to a single instant.
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Wall-clock milliseconds that never repeat or go backwards within one process.
///
/// Two calls in the same millisecond get consecutive values, so orderings by
/// `updatedAt` / `publishedAt` are strict.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last: AtomicI64,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_millis(&self) -> i64 {
        let wall = Utc::now().timestamp_millis();
        let previous = self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                Some(wall.max(last + 1))
            })
            .unwrap_or(wall);
        wall.max(previous + 1)
    }
}

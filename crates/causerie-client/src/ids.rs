//! Identifier generation for contacts, messages, calls and status updates.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Hands out strictly increasing numeric ids.
///
/// The clock-backed generator returns `max(now_millis, last + 1)`, so ids keep
/// their timestamp shape but never repeat, even for several calls within the
/// same millisecond.
#[derive(Debug)]
pub struct IdGenerator {
    last: AtomicI64,
    use_clock: bool,
}

impl IdGenerator {
    /// Clock-backed generator.
    pub fn new() -> Self {
        Self {
            last: AtomicI64::new(0),
            use_clock: true,
        }
    }

    /// Deterministic generator yielding `first`, `first + 1`, ...
    pub fn starting_at(first: i64) -> Self {
        Self {
            last: AtomicI64::new(first - 1),
            use_clock: false,
        }
    }

    pub fn next_id(&self) -> i64 {
        let floor = if self.use_clock {
            Utc::now().timestamp_millis()
        } else {
            i64::MIN
        };

        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let next = (prev + 1).max(floor);
            match self
                .last
                .compare_exchange_weak(prev, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return next,
                Err(actual) => prev = actual,
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

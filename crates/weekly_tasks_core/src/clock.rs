//! Injectable source of "now".
//!
//! # Responsibility
//! - Provide the current instant to week, urgency and creation logic.
//! - Allow tests to pin time deterministically.
//!
//! # Invariants
//! - Deadline arithmetic uses the local wall clock (`naive_local`).
//! - Creation timestamps use epoch milliseconds (`timestamp_millis`).

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDateTime, TimeZone, Utc};
use std::cell::Cell;
use std::rc::Rc;

/// Zero-argument provider of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;

    /// Current instant on the user's local wall clock.
    fn local_now(&self) -> NaiveDateTime {
        self.now().naive_local()
    }

    /// Current instant as Unix epoch milliseconds.
    fn epoch_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<FixedOffset> {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> DateTime<FixedOffset> {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> DateTime<FixedOffset> {
        (**self).now()
    }
}

/// Clock backed by the operating system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<DateTime<FixedOffset>>,
}

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    /// Pins the clock to a wall-clock instant with a zero UTC offset.
    pub fn at_local(local: NaiveDateTime) -> Self {
        Self::new(Utc.from_utc_datetime(&local).fixed_offset())
    }

    pub fn set(&self, now: DateTime<FixedOffset>) {
        self.now.set(now);
    }

    pub fn set_local(&self, local: NaiveDateTime) {
        let offset = *self.now.get().offset();
        self.now.set(offset.from_utc_datetime(&(local - offset_duration(offset))));
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.now.get()
    }
}

fn offset_duration(offset: FixedOffset) -> Duration {
    Duration::seconds(i64::from(offset.local_minus_utc()))
}

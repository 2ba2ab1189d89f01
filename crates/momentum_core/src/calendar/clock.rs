//! Source of "today" for every tracker operation.
//!
//! # Invariants
//! - `today()` is evaluated on every call; no implementation caches the day
//!   from an earlier call, so long-lived sessions survive midnight.

use super::date_key::DateKey;
use chrono::Local;
use std::cell::Cell;

/// Supplies the current local calendar day.
pub trait Clock {
    fn today(&self) -> DateKey;
}

/// Wall-clock implementation backed by the local system timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> DateKey {
        today()
    }
}

/// Clock pinned to a settable day. Used by tests and replay tooling.
#[derive(Debug, Clone)]
pub struct FixedClock {
    day: Cell<DateKey>,
}

impl FixedClock {
    pub fn new(day: DateKey) -> Self {
        Self {
            day: Cell::new(day),
        }
    }

    pub fn set(&self, day: DateKey) {
        self.day.set(day);
    }

    /// Moves the pinned day by `n` days.
    pub fn advance(&self, n: i64) {
        self.day.set(self.day.get().add_days(n));
    }
}

impl Clock for FixedClock {
    fn today(&self) -> DateKey {
        self.day.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> DateKey {
        (**self).today()
    }
}

/// Current local calendar day, computed fresh on each call.
pub fn today() -> DateKey {
    DateKey::from_naive(Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::{Clock, FixedClock};
    use crate::calendar::DateKey;

    #[test]
    fn fixed_clock_advances_across_month_end() {
        let clock = FixedClock::new("2024-01-31".parse::<DateKey>().unwrap());
        clock.advance(1);
        assert_eq!(clock.today().to_string(), "2024-02-01");
        clock.advance(-2);
        assert_eq!(clock.today().to_string(), "2024-01-30");
    }
}

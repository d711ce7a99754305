//! Clock seam for render passes.

use chrono::{Local, NaiveDate};

/// Source of "today" as a local calendar date.
///
/// Consumed once per render pass; callers must not cache the result.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Wall clock in the local time zone, truncated to the date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one date, for tests and `--today` overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

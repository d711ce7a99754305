//! Date arithmetic for the life calendar.
//!
//! # Responsibility
//! - Derive `Stats` from validated inputs and today's date.
//! - Derive the year × week grid and per-week date ranges.
//! - Provide the clock seam used by render passes.
//!
//! # Invariants
//! - Year offsets use calendar addition, never 365-day multiples.
//! - A Feb 29 anniversary in a non-leap year falls on Mar 1.

use chrono::{Datelike, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod clock;
pub mod grid;
pub mod stats;

pub type StatsResult<T> = Result<T, StatsError>;

/// Derivation error for calendar computations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// Birth date lies after today.
    BirthDateInFuture { birth: NaiveDate, today: NaiveDate },
    /// Calendar arithmetic left chrono's supported range.
    DateOutOfRange,
}

impl Display for StatsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BirthDateInFuture { birth, today } => {
                write!(f, "birth date {birth} is after today {today}")
            }
            Self::DateOutOfRange => write!(f, "date arithmetic out of supported range"),
        }
    }
}

impl Error for StatsError {}

/// Shifts `date` by whole calendar years.
///
/// Returns `None` when the result leaves chrono's supported range.
pub fn shift_years(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    let year = date.year().checked_add(years)?;
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        // Only Feb 29 can fail here; overflow rolls into March.
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

/// Anniversary of `birth` within calendar `year`.
pub fn anniversary_in(birth: NaiveDate, year: i32) -> Option<NaiveDate> {
    shift_years(birth, year.checked_sub(birth.year())?)
}

//! Derived life statistics record.

use crate::model::life::{BirthDate, LifeExpectancy};
use crate::model::WEEKS_PER_YEAR;
use chrono::NaiveDate;
use serde::Serialize;

/// Statistics derived from birth date, expectancy and today.
///
/// Recomputed on every render pass; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub birth_date: BirthDate,
    pub life_expectancy: LifeExpectancy,
    /// Local calendar date the record was derived for.
    pub today: NaiveDate,
    /// Completed birthdays.
    pub age_in_years: u32,
    /// Whole weeks since the most recent anniversary. Can reach 52 in the
    /// last day or two of an age year.
    pub week_in_year: u32,
    /// Whole weeks of raw elapsed days since birth.
    pub total_weeks_lived: u64,
    pub total_weeks: u64,
    /// Negative once `total_weeks_lived` exceeds `total_weeks`.
    pub remaining_weeks: i64,
    pub age_in_days: u64,
    /// Rounded to one decimal place.
    pub percentage_lived: f64,
    pub heartbeats: u64,
    pub breaths: u64,
    pub sleep_hours: u64,
    pub moon_cycles: u64,
}

impl Stats {
    /// Percentage with exactly one decimal, e.g. `30.1`.
    pub fn percentage_label(&self) -> String {
        format!("{:.1}", self.percentage_lived)
    }

    /// Number of grid rows.
    pub fn expected_years(&self) -> u32 {
        self.life_expectancy.years()
    }

    /// `Year 25 of 80 • Week 1 of 52`
    pub fn footer(&self) -> String {
        format!(
            "Year {} of {} \u{2022} Week {} of {}",
            self.age_in_years + 1,
            self.expected_years(),
            self.week_in_year + 1,
            WEEKS_PER_YEAR
        )
    }
}

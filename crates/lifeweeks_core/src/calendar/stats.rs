//! Life statistics derivation.
//!
//! # Invariants
//! - `age_in_years` counts completed birthdays, not 365-day periods.
//! - `week_in_year` is anniversary-based while `total_weeks_lived` uses raw
//!   elapsed days; the two may disagree near an age-year boundary.
//! - `remaining_weeks` is never clamped.

use super::{anniversary_in, StatsError, StatsResult};
use crate::model::life::{BirthDate, LifeExpectancy};
use crate::model::stats::Stats;
use crate::model::{DAYS_PER_WEEK, WEEKS_PER_YEAR};
use chrono::{Datelike, NaiveDate};

const HEARTBEATS_PER_MINUTE: u64 = 70;
const BREATHS_PER_MINUTE: u64 = 16;
const SLEEP_HOURS_PER_DAY: u64 = 8;
const MINUTES_PER_DAY: u64 = 24 * 60;
const SYNODIC_MONTH_DAYS: f64 = 29.53;

/// Derives the statistics record for `today`.
///
/// # Errors
/// - `BirthDateInFuture` when `birth` is after `today`.
/// - `DateOutOfRange` when anniversary arithmetic overflows chrono's range.
pub fn calculate_stats(
    birth: BirthDate,
    life_expectancy: LifeExpectancy,
    today: NaiveDate,
) -> StatsResult<Stats> {
    let birth_date = birth.date();
    if birth_date > today {
        return Err(StatsError::BirthDateInFuture {
            birth: birth_date,
            today,
        });
    }

    let this_year_anniversary =
        anniversary_in(birth_date, today.year()).ok_or(StatsError::DateOutOfRange)?;
    let before_anniversary = today < this_year_anniversary;

    let mut age_in_years = today.year() - birth_date.year();
    let year_start = if before_anniversary {
        age_in_years -= 1;
        anniversary_in(birth_date, today.year() - 1).ok_or(StatsError::DateOutOfRange)?
    } else {
        this_year_anniversary
    };

    let days_since_year_start = (today - year_start).num_days();
    let week_in_year = days_since_year_start / i64::from(DAYS_PER_WEEK);

    let age_in_days = u64::try_from((today - birth_date).num_days())
        .map_err(|_| StatsError::DateOutOfRange)?;
    let total_weeks_lived = age_in_days / u64::from(DAYS_PER_WEEK);
    let total_weeks = u64::from(life_expectancy.years()) * u64::from(WEEKS_PER_YEAR);
    let remaining_weeks = total_weeks as i64 - total_weeks_lived as i64;

    Ok(Stats {
        birth_date: birth,
        life_expectancy,
        today,
        age_in_years: u32::try_from(age_in_years).map_err(|_| StatsError::DateOutOfRange)?,
        week_in_year: u32::try_from(week_in_year).map_err(|_| StatsError::DateOutOfRange)?,
        total_weeks_lived,
        total_weeks,
        remaining_weeks,
        age_in_days,
        percentage_lived: percentage_lived(total_weeks_lived, total_weeks),
        heartbeats: age_in_days * MINUTES_PER_DAY * HEARTBEATS_PER_MINUTE,
        breaths: age_in_days * MINUTES_PER_DAY * BREATHS_PER_MINUTE,
        sleep_hours: age_in_days * SLEEP_HOURS_PER_DAY,
        moon_cycles: moon_cycles(age_in_days),
    })
}

/// Parses raw form input and derives stats.
///
/// Returns `None` for any invalid input; the caller must not render a grid.
pub fn try_calculate(
    birth_raw: &str,
    life_expectancy_raw: &str,
    today: NaiveDate,
) -> Option<Stats> {
    let birth = BirthDate::parse(birth_raw).ok()?;
    let life_expectancy = LifeExpectancy::parse(life_expectancy_raw).ok()?;
    calculate_stats(birth, life_expectancy, today).ok()
}

/// Full lunar cycles witnessed over `days`.
pub fn moon_cycles(days: u64) -> u64 {
    (days as f64 / SYNODIC_MONTH_DAYS).floor() as u64
}

fn percentage_lived(lived: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = lived as f64 / total as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}

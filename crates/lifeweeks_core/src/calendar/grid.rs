//! Year × week grid derivation.
//!
//! # Responsibility
//! - Flag every cell past/current/future from `Stats`.
//! - Map a cell to the seven dates it covers and to its memory marker.
//!
//! # Invariants
//! - Rows start at the birth anniversary, not at a calendar-year boundary.
//! - Each row covers 364 days; the one or two remaining days of a calendar
//!   year before the next anniversary belong to no cell.

use super::{shift_years, StatsError, StatsResult};
use crate::model::life::BirthDate;
use crate::model::memory::MemoryBook;
use crate::model::stats::Stats;
use crate::model::week::{LifeGrid, WeekCell, WeekPosition, WeekState, YearRow};
use crate::model::{DAYS_PER_WEEK, WEEKS_PER_YEAR};
use chrono::{Datelike, Days, NaiveDate};

/// Builds the full grid: one row per expected year, 52 cells per row.
pub fn build_grid(stats: &Stats, memories: &MemoryBook) -> StatsResult<LifeGrid> {
    let years = stats.expected_years();
    let mut rows = Vec::with_capacity(years as usize);

    for year_index in 0..years {
        let row_start = year_start(stats.birth_date, year_index).ok_or(StatsError::DateOutOfRange)?;
        let mut weeks = Vec::with_capacity(WEEKS_PER_YEAR as usize);
        for week_index in 0..WEEKS_PER_YEAR {
            let position = WeekPosition::new(year_index, week_index);
            let start = row_start
                .checked_add_days(Days::new(u64::from(week_index * DAYS_PER_WEEK)))
                .ok_or(StatsError::DateOutOfRange)?;
            weeks.push(WeekCell {
                position,
                state: week_state(stats, position),
                start,
                has_memory: memories.any_within(start, DAYS_PER_WEEK),
            });
        }
        rows.push(YearRow {
            year_index,
            start_year: stats.birth_date.date().year() + year_index as i32,
            weeks,
        });
    }

    Ok(LifeGrid { rows })
}

/// Temporal state of one cell.
pub fn week_state(stats: &Stats, position: WeekPosition) -> WeekState {
    let WeekPosition {
        year_index,
        week_index,
    } = position;
    if year_index == stats.age_in_years && week_index == stats.week_in_year {
        WeekState::Current
    } else if year_index < stats.age_in_years
        || (year_index == stats.age_in_years && week_index < stats.week_in_year)
    {
        WeekState::Past
    } else {
        WeekState::Future
    }
}

/// First date of the cell at `position`.
pub fn week_start(birth: BirthDate, position: WeekPosition) -> Option<NaiveDate> {
    year_start(birth, position.year_index)?
        .checked_add_days(Days::new(u64::from(position.week_index * DAYS_PER_WEEK)))
}

/// The seven dates covered by the cell at `position`.
pub fn week_dates(birth: BirthDate, position: WeekPosition) -> Option<Vec<NaiveDate>> {
    let start = week_start(birth, position)?;
    Some(start.iter_days().take(DAYS_PER_WEEK as usize).collect())
}

fn year_start(birth: BirthDate, year_index: u32) -> Option<NaiveDate> {
    shift_years(birth.date(), i32::try_from(year_index).ok()?)
}

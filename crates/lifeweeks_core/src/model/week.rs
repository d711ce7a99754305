//! Week-grid projection types.
//!
//! # Invariants
//! - A cell covers `DAYS_PER_WEEK` consecutive dates starting at `start`.
//! - Cells never share a date with another cell.

use crate::model::DAYS_PER_WEEK;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Grid coordinates of one week cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WeekPosition {
    /// Row, 0-based; one row per year of life.
    pub year_index: u32,
    /// Column, 0-based within `0..WEEKS_PER_YEAR`.
    pub week_index: u32,
}

impl WeekPosition {
    pub fn new(year_index: u32, week_index: u32) -> Self {
        Self {
            year_index,
            week_index,
        }
    }
}

/// Temporal state of a cell relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekState {
    Past,
    Current,
    Future,
}

/// One dot of the life grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekCell {
    pub position: WeekPosition,
    pub state: WeekState,
    /// First covered date.
    pub start: NaiveDate,
    /// Whether any covered date carries a memory.
    pub has_memory: bool,
}

impl WeekCell {
    pub fn is_past(&self) -> bool {
        self.state == WeekState::Past
    }

    pub fn is_current(&self) -> bool {
        self.state == WeekState::Current
    }

    /// Last covered date.
    pub fn end(&self) -> NaiveDate {
        self.start
            .checked_add_days(Days::new(u64::from(DAYS_PER_WEEK - 1)))
            .unwrap_or(self.start)
    }

    /// All covered dates in order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.start
            .iter_days()
            .take(DAYS_PER_WEEK as usize)
            .collect()
    }
}

/// One year of life: label years plus its week cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearRow {
    pub year_index: u32,
    /// Calendar year the row starts in.
    pub start_year: i32,
    pub weeks: Vec<WeekCell>,
}

impl YearRow {
    /// Row label, e.g. `2000-2001`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.start_year, self.start_year + 1)
    }
}

/// Complete ordered grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifeGrid {
    pub rows: Vec<YearRow>,
}

impl LifeGrid {
    pub fn cell(&self, position: WeekPosition) -> Option<&WeekCell> {
        self.rows
            .get(position.year_index as usize)?
            .weeks
            .get(position.week_index as usize)
    }

    pub fn cells(&self) -> impl Iterator<Item = &WeekCell> {
        self.rows.iter().flat_map(|row| row.weeks.iter())
    }

    pub fn current(&self) -> Option<&WeekCell> {
        self.cells().find(|cell| cell.is_current())
    }
}

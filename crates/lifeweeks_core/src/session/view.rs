//! Render-ready projections of stats, grid and overlays.

use crate::format::{format_count, format_full, format_number, format_week_range};
use crate::model::memory::MemoryBook;
use crate::model::stats::Stats;
use crate::model::week::{LifeGrid, WeekCell};
use crate::session::state::TooltipAnchor;
use chrono::NaiveDate;

/// One render pass of an active visualization.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub stats: Stats,
    pub grid: LifeGrid,
}

impl Frame {
    pub fn footer(&self) -> String {
        self.stats.footer()
    }
}

/// Hover tooltip content and placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub text: String,
    pub anchor: TooltipAnchor,
}

/// One row of the day picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayOption {
    pub date: NaiveDate,
    /// `Mon, Jan 15, 2024`
    pub label: String,
    pub has_memory: bool,
}

/// Memory editor modal content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorView {
    pub date: NaiveDate,
    pub date_label: String,
    pub draft: String,
}

/// Headline counts and prose shown below the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSummary {
    pub time_lived: Vec<(String, String)>,
    pub rhythms: Vec<String>,
    pub perspective: Vec<String>,
}

/// Tooltip text for a week cell.
pub fn week_range_label(cell: &WeekCell) -> String {
    format_week_range(cell.start, cell.end())
}

/// Picker rows for the seven dates of a week.
pub fn day_options(dates: &[NaiveDate], memories: &MemoryBook) -> Vec<DayOption> {
    dates
        .iter()
        .map(|date| DayOption {
            date: *date,
            label: format_full(*date),
            has_memory: memories.contains(*date),
        })
        .collect()
}

pub fn summarize(stats: &Stats) -> StatsSummary {
    StatsSummary {
        time_lived: vec![
            (format_count(stats.total_weeks_lived), "weeks lived".to_string()),
            (
                format!("{}%", stats.percentage_label()),
                "of expected life".to_string(),
            ),
            (format_count(stats.age_in_days), "days of experience".to_string()),
            (format_number(stats.remaining_weeks), "weeks ahead".to_string()),
        ],
        rhythms: vec![
            format!(
                "Your heart has beaten approximately {} times",
                format_count(stats.heartbeats)
            ),
            format!(
                "You've taken around {} breaths",
                format_count(stats.breaths)
            ),
            format!(
                "You've slept approximately {} hours",
                format_count(stats.sleep_hours)
            ),
            format!(
                "You've witnessed {} full moon cycles",
                format_count(stats.moon_cycles)
            ),
        ],
        perspective: vec![
            format!(
                "If you live to {}, you will have experienced approximately {} weeks.",
                stats.expected_years(),
                format_count(stats.total_weeks)
            ),
            format!(
                "What will you do with your remaining {} weeks?",
                format_number(stats.remaining_weeks)
            ),
        ],
    }
}

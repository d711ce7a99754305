//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Keep error semantics simple: envelopes with messages, never panics.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Stats and grid are re-derived from the wall clock on every call.

use chrono::NaiveDate;
use lifeweeks_core::db::open_db;
use lifeweeks_core::format::{format_count, format_date_key, format_number};
use lifeweeks_core::model::life::ISO_DATE_FORMAT;
use lifeweeks_core::session::view::{day_options, week_range_label};
use lifeweeks_core::{
    build_grid, calculate_stats, core_version as core_version_inner,
    init_logging as init_logging_inner, ping as ping_inner, AppConfig, BirthDate, Clock,
    LifeExpectancy, MemoryChange, MemoryStore, SqliteKeyValueStore, Stats, SystemClock,
    WeekPosition, WeekState,
};
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;

static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Display-ready statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifeStatsView {
    pub age_in_years: u32,
    pub week_in_year: u32,
    pub total_weeks_lived: String,
    pub total_weeks: String,
    pub remaining_weeks: String,
    pub age_in_days: String,
    pub percentage_lived: String,
    pub heartbeats: String,
    pub breaths: String,
    pub sleep_hours: String,
    pub moon_cycles: String,
    /// `Year 25 of 80 • Week 1 of 52`
    pub footer: String,
}

/// One grid row; `cells` holds one char per week:
/// `c` current, `m` lived with memory, `p` lived, `f` ahead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRowView {
    pub label: String,
    pub cells: String,
}

/// One selectable day in the week picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayItem {
    pub date_key: String,
    pub label: String,
    pub has_memory: bool,
    pub memory: Option<String>,
}

/// Week picker response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekDaysResponse {
    pub ok: bool,
    /// Tooltip text, `Jan 15 - Jan 21, 2024`.
    pub range_label: String,
    pub days: Vec<DayItem>,
    pub message: String,
}

/// Stored memory item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryItem {
    pub date_key: String,
    pub text: String,
}

/// Save action response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryActionResponse {
    /// Whether the change reached storage.
    pub ok: bool,
    /// `stored|removed|unchanged`, empty on input errors.
    pub change: String,
    pub message: String,
}

/// Derives stats for today. `None` when input is missing or invalid.
#[flutter_rust_bridge::frb(sync)]
pub fn life_stats(birth_date: String, life_expectancy: String) -> Option<LifeStatsView> {
    let stats = derive_stats(&birth_date, &life_expectancy)?;
    Some(to_stats_view(&stats))
}

/// Derives grid rows for today, with memory markers.
#[flutter_rust_bridge::frb(sync)]
pub fn life_grid(birth_date: String, life_expectancy: String) -> Vec<GridRowView> {
    let Some(stats) = derive_stats(&birth_date, &life_expectancy) else {
        return Vec::new();
    };
    let memories = match with_memory_store(|store| Ok(store.load(stats.birth_date))) {
        Ok(book) => book,
        Err(err) => {
            warn!("event=life_grid module=ffi status=degraded error={err}");
            Default::default()
        }
    };
    match build_grid(&stats, &memories) {
        Ok(grid) => grid
            .rows
            .iter()
            .map(|row| GridRowView {
                label: row.label(),
                cells: row
                    .weeks
                    .iter()
                    .map(|cell| match cell.state {
                        WeekState::Current => 'c',
                        WeekState::Past if cell.has_memory => 'm',
                        WeekState::Past => 'p',
                        WeekState::Future => 'f',
                    })
                    .collect(),
            })
            .collect(),
        Err(err) => {
            warn!("event=life_grid module=ffi status=error error={err}");
            Vec::new()
        }
    }
}

/// Lists the seven days of one week cell with their memories.
#[flutter_rust_bridge::frb(sync)]
pub fn week_days(
    birth_date: String,
    life_expectancy: String,
    year_index: u32,
    week_index: u32,
) -> WeekDaysResponse {
    let Some(stats) = derive_stats(&birth_date, &life_expectancy) else {
        return week_failure("invalid birth date or life expectancy");
    };
    let position = WeekPosition::new(year_index, week_index);
    let memories = match with_memory_store(|store| Ok(store.load(stats.birth_date))) {
        Ok(book) => book,
        Err(err) => return week_failure(&format!("week_days failed: {err}")),
    };
    let grid = match build_grid(&stats, &memories) {
        Ok(grid) => grid,
        Err(err) => return week_failure(&format!("week_days failed: {err}")),
    };
    let Some(cell) = grid.cell(position) else {
        return week_failure("week is outside the grid");
    };

    let days = day_options(&cell.dates(), &memories)
        .into_iter()
        .map(|option| DayItem {
            date_key: format_date_key(option.date),
            label: option.label,
            has_memory: option.has_memory,
            memory: memories.get(option.date).map(str::to_string),
        })
        .collect();
    WeekDaysResponse {
        ok: true,
        range_label: week_range_label(cell),
        days,
        message: String::new(),
    }
}

/// Lists memories for one birth date in date order.
#[flutter_rust_bridge::frb(sync)]
pub fn memory_list(birth_date: String) -> Vec<MemoryItem> {
    let Ok(birth) = BirthDate::parse(&birth_date) else {
        return Vec::new();
    };
    with_memory_store(|store| Ok(store.list(birth)))
        .unwrap_or_default()
        .into_iter()
        .map(|(date, text)| MemoryItem {
            date_key: format_date_key(date),
            text,
        })
        .collect()
}

/// Saves one day's memory; empty text clears it.
#[flutter_rust_bridge::frb(sync)]
pub fn memory_save(birth_date: String, date: String, text: String) -> MemoryActionResponse {
    let birth = match BirthDate::parse(&birth_date) {
        Ok(birth) => birth,
        Err(err) => return memory_failure(err.to_string()),
    };
    let date = match NaiveDate::parse_from_str(date.trim(), ISO_DATE_FORMAT) {
        Ok(date) => date,
        Err(_) => return memory_failure(format!("invalid date `{date}`")),
    };

    let result = with_memory_store(|store| {
        store
            .save_one(birth, date, &text)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(outcome) => MemoryActionResponse {
            ok: true,
            change: change_label(outcome.change).to_string(),
            message: "Memory saved.".to_string(),
        },
        Err(err) => memory_failure(format!("memory_save failed: {err}")),
    }
}

fn derive_stats(birth_date: &str, life_expectancy: &str) -> Option<Stats> {
    let birth = BirthDate::parse(birth_date).ok()?;
    let years = LifeExpectancy::parse(life_expectancy).ok()?;
    calculate_stats(birth, years, SystemClock.today()).ok()
}

fn to_stats_view(stats: &Stats) -> LifeStatsView {
    LifeStatsView {
        age_in_years: stats.age_in_years,
        week_in_year: stats.week_in_year,
        total_weeks_lived: format_count(stats.total_weeks_lived),
        total_weeks: format_count(stats.total_weeks),
        remaining_weeks: format_number(stats.remaining_weeks),
        age_in_days: format_count(stats.age_in_days),
        percentage_lived: stats.percentage_label(),
        heartbeats: format_count(stats.heartbeats),
        breaths: format_count(stats.breaths),
        sleep_hours: format_count(stats.sleep_hours),
        moon_cycles: format_count(stats.moon_cycles),
        footer: stats.footer(),
    }
}

fn change_label(change: MemoryChange) -> &'static str {
    match change {
        MemoryChange::Stored => "stored",
        MemoryChange::Removed => "removed",
        MemoryChange::Unchanged => "unchanged",
    }
}

fn week_failure(message: &str) -> WeekDaysResponse {
    WeekDaysResponse {
        ok: false,
        range_label: String::new(),
        days: Vec::new(),
        message: message.to_string(),
    }
}

fn memory_failure(message: String) -> MemoryActionResponse {
    MemoryActionResponse {
        ok: false,
        change: String::new(),
        message,
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| AppConfig::from_env().db_path)
        .clone()
}

fn with_memory_store<T>(
    f: impl FnOnce(&MemoryStore<SqliteKeyValueStore<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let conn = open_db(resolve_db_path()).map_err(|err| format!("memory DB open failed: {err}"))?;
    let backend = SqliteKeyValueStore::try_new(&conn)
        .map_err(|err| format!("memory store init failed: {err}"))?;
    f(&MemoryStore::new(backend))
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, life_grid, life_stats, memory_list, memory_save, ping,
        week_days,
    };

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn life_stats_requires_birth_date() {
        assert!(life_stats(String::new(), "80".to_string()).is_none());
        assert!(life_stats("1990-01-01".to_string(), "0".to_string()).is_none());
        let view = life_stats("1990-01-01".to_string(), "80".to_string()).unwrap();
        assert_eq!(view.total_weeks, "4,160");
        assert!(view.footer.starts_with("Year "));
        assert!(view.footer.ends_with(" of 52"));
    }

    #[test]
    fn life_grid_has_one_row_per_year() {
        let rows = life_grid("1991-05-05".to_string(), "70".to_string());
        assert_eq!(rows.len(), 70);
        assert!(rows.iter().all(|row| row.cells.chars().count() == 52));
        assert_eq!(rows[0].label, "1991-1992");
        assert!(rows[0].cells.chars().all(|c| c == 'p'));
    }

    #[test]
    fn memory_save_then_week_days_shows_memory() {
        let saved = memory_save(
            "1987-03-09".to_string(),
            "1987-03-11".to_string(),
            "  first week at home ".to_string(),
        );
        assert!(saved.ok, "{}", saved.message);
        assert_eq!(saved.change, "stored");

        let week = week_days("1987-03-09".to_string(), "80".to_string(), 0, 0);
        assert!(week.ok, "{}", week.message);
        assert_eq!(week.range_label, "Mar 9 - Mar 15, 1987");
        let day = &week.days[2];
        assert_eq!(day.date_key, "1987-03-11");
        assert!(day.has_memory);
        assert_eq!(day.memory.as_deref(), Some("first week at home"));

        let cleared = memory_save(
            "1987-03-09".to_string(),
            "1987-03-11".to_string(),
            "   ".to_string(),
        );
        assert_eq!(cleared.change, "removed");
        assert!(memory_list("1987-03-09".to_string()).is_empty());
    }

    #[test]
    fn memory_save_rejects_bad_dates() {
        let response = memory_save(
            "not-a-date".to_string(),
            "2020-01-01".to_string(),
            "x".to_string(),
        );
        assert!(!response.ok);
        assert!(response.change.is_empty());
    }
}

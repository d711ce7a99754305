//! Core domain logic for the life-in-weeks calendar.
//! This crate is the single source of truth for date arithmetic, grid
//! derivation and memory persistence rules.

pub mod calendar;
pub mod config;
pub mod db;
pub mod format;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod session;

pub use calendar::clock::{Clock, FixedClock, SystemClock};
pub use calendar::grid::{build_grid, week_dates, week_start, week_state};
pub use calendar::stats::{calculate_stats, moon_cycles, try_calculate};
pub use calendar::{StatsError, StatsResult};
pub use config::AppConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::life::{BirthDate, InputError, LifeExpectancy};
pub use model::memory::{MemoryBook, MemoryChange};
pub use model::stats::Stats;
pub use model::week::{LifeGrid, WeekCell, WeekPosition, WeekState, YearRow};
pub use repo::kv_repo::{
    InMemoryKeyValueStore, KeyValueStore, KvError, KvResult, SqliteKeyValueStore,
};
pub use service::memory_service::{
    memory_namespace_key, MemoryError, MemoryResult, MemoryStore, SaveOutcome,
};
pub use session::controller::LifeCalendar;
pub use session::state::{Action, CellRect, Overlay, ViewState};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

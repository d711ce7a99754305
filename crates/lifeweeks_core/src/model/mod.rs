//! Domain model for the life calendar.
//!
//! # Responsibility
//! - Define validated user inputs (`BirthDate`, `LifeExpectancy`).
//! - Define derived projections (`Stats`, `WeekCell`) and the memory set.
//!
//! # Invariants
//! - Derived records are never persisted; only `MemoryBook` is.
//! - Every grid row holds exactly `WEEKS_PER_YEAR` cells.

pub mod life;
pub mod memory;
pub mod stats;
pub mod week;

/// Display grid unit, not a calendar year.
pub const WEEKS_PER_YEAR: u32 = 52;
/// Days covered by one week cell.
pub const DAYS_PER_WEEK: u32 = 7;

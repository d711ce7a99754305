//! Per-day memory set.
//!
//! # Responsibility
//! - Hold the date → text mapping loaded for one birth date.
//! - Own the save policy: trimmed text overwrites, blank text removes.
//!
//! # Invariants
//! - Stored texts are trimmed and never empty, including after decoding.
//! - Serialized form is a JSON object keyed by `YYYY-MM-DD`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of applying one edit to a `MemoryBook`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryChange {
    /// Text was stored (new or overwritten).
    Stored,
    /// Existing entry was removed by a blank save.
    Removed,
    /// Blank save for a date without an entry.
    Unchanged,
}

/// Date-ordered memory set for one birth date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<NaiveDate, String>",
    into = "BTreeMap<NaiveDate, String>"
)]
pub struct MemoryBook {
    entries: BTreeMap<NaiveDate, String>,
}

impl From<BTreeMap<NaiveDate, String>> for MemoryBook {
    /// Blank values are dropped; the rest are trimmed.
    fn from(raw: BTreeMap<NaiveDate, String>) -> Self {
        let mut book = Self::new();
        for (date, text) in raw {
            book.apply(date, &text);
        }
        book
    }
}

impl From<MemoryBook> for BTreeMap<NaiveDate, String> {
    fn from(book: MemoryBook) -> Self {
        book.entries
    }
}

impl MemoryBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the save policy for one date.
    pub fn apply(&mut self, date: NaiveDate, text: &str) -> MemoryChange {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return match self.entries.remove(&date) {
                Some(_) => MemoryChange::Removed,
                None => MemoryChange::Unchanged,
            };
        }
        self.entries.insert(date, trimmed.to_string());
        MemoryChange::Stored
    }

    pub fn get(&self, date: NaiveDate) -> Option<&str> {
        self.entries.get(&date).map(String::as_str)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.entries.contains_key(&date)
    }

    /// Whether any date in `start..start+days` has an entry.
    pub fn any_within(&self, start: NaiveDate, days: u32) -> bool {
        self.count_within(start, days) > 0
    }

    /// Number of entries in `start..start+days`.
    pub fn count_within(&self, start: NaiveDate, days: u32) -> usize {
        match start.checked_add_days(chrono::Days::new(u64::from(days))) {
            Some(end) => self.entries.range(start..end).count(),
            None => self.entries.range(start..).count(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &str)> {
        self.entries.iter().map(|(date, text)| (*date, text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

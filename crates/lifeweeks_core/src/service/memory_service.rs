//! Memory use-case service.
//!
//! # Responsibility
//! - Namespace persisted memories per birth date.
//! - Serialize the date → text mapping as one JSON object.
//! - Apply the save policy and report persistence failures to the log sink.
//!
//! # Invariants
//! - A failed or malformed load yields an empty `MemoryBook` for display.
//! - `save_one` never writes over a namespace it could not read.
//! - A failed save never rolls back the caller's in-memory book.
//! - Memory text is never written to logs.

use crate::model::life::BirthDate;
use crate::model::memory::{MemoryBook, MemoryChange};
use crate::model::DAYS_PER_WEEK;
use crate::repo::kv_repo::{KeyValueStore, KvError};
use chrono::NaiveDate;
use log::{debug, error, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Prefix of every memory namespace key.
pub const MEMORY_KEY_PREFIX: &str = "life-weeks-memories-";

pub type MemoryResult<T> = Result<T, MemoryError>;

/// Service error for memory persistence.
#[derive(Debug)]
pub enum MemoryError {
    /// Backend read/write failed.
    Storage(KvError),
    /// Stored blob is not a date → text JSON object.
    Malformed(serde_json::Error),
    /// Book could not be encoded.
    Encode(serde_json::Error),
}

impl Display for MemoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Malformed(err) => write!(f, "malformed memory data: {err}"),
            Self::Encode(err) => write!(f, "failed to encode memories: {err}"),
        }
    }
}

impl Error for MemoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Malformed(err) | Self::Encode(err) => Some(err),
        }
    }
}

impl From<KvError> for MemoryError {
    fn from(value: KvError) -> Self {
        Self::Storage(value)
    }
}

/// Outcome of one memory save.
#[derive(Debug)]
pub struct SaveOutcome {
    /// Effect on the in-memory book.
    pub change: MemoryChange,
    /// Persistence error, already reported to the log sink.
    pub persist_error: Option<MemoryError>,
}

impl SaveOutcome {
    pub fn persisted(&self) -> bool {
        self.persist_error.is_none()
    }
}

/// Storage key for the memories of one birth date.
pub fn memory_namespace_key(birth: BirthDate) -> String {
    format!("{MEMORY_KEY_PREFIX}{birth}")
}

/// Memory repository facade over a key-value backend.
pub struct MemoryStore<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> MemoryStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Loads memories, surfacing backend and decode errors.
    pub fn try_load(&self, birth: BirthDate) -> MemoryResult<MemoryBook> {
        let key = memory_namespace_key(birth);
        match self.backend.get(&key)? {
            Some(blob) => serde_json::from_str(&blob).map_err(MemoryError::Malformed),
            None => Ok(MemoryBook::new()),
        }
    }

    /// Loads memories; any failure is treated as "no memories yet".
    pub fn load(&self, birth: BirthDate) -> MemoryBook {
        match self.try_load(birth) {
            Ok(book) => {
                debug!(
                    "event=memory_load module=service status=ok count={}",
                    book.len()
                );
                book
            }
            Err(err) => {
                warn!(
                    "event=memory_load module=service status=error fallback=empty error={}",
                    err
                );
                MemoryBook::new()
            }
        }
    }

    /// Writes the whole book under the birth date namespace.
    pub fn persist(&self, birth: BirthDate, book: &MemoryBook) -> MemoryResult<()> {
        let blob = serde_json::to_string(book).map_err(MemoryError::Encode)?;
        self.backend.set(&memory_namespace_key(birth), &blob)?;
        Ok(())
    }

    /// Applies one edit to `book`, then persists the full book.
    ///
    /// The book is updated before persistence and stays updated when the
    /// write fails; the failure is logged and returned in the outcome.
    pub fn save_memory(
        &self,
        birth: BirthDate,
        book: &mut MemoryBook,
        date: NaiveDate,
        text: &str,
    ) -> SaveOutcome {
        let change = book.apply(date, text);
        let persist_error = match self.persist(birth, book) {
            Ok(()) => {
                debug!(
                    "event=memory_save module=service status=ok change={:?} count={}",
                    change,
                    book.len()
                );
                None
            }
            Err(err) => {
                error!(
                    "event=memory_save module=service status=error change={:?} error={}",
                    change, err
                );
                Some(err)
            }
        };
        SaveOutcome {
            change,
            persist_error,
        }
    }

    /// Loads, edits and persists one day's memory.
    ///
    /// # Errors
    /// - Read or decode failure; storage is left untouched.
    /// - Write failure.
    pub fn save_one(
        &self,
        birth: BirthDate,
        date: NaiveDate,
        text: &str,
    ) -> MemoryResult<SaveOutcome> {
        let mut book = self.try_load(birth).map_err(|err| {
            error!(
                "event=memory_save module=service status=error stage=load error={}",
                err
            );
            err
        })?;
        let SaveOutcome {
            change,
            persist_error,
        } = self.save_memory(birth, &mut book, date, text);
        match persist_error {
            Some(err) => Err(err),
            None => Ok(SaveOutcome {
                change,
                persist_error: None,
            }),
        }
    }

    /// Reads one day's memory from storage.
    pub fn memory_on(&self, birth: BirthDate, date: NaiveDate) -> Option<String> {
        self.load(birth).get(date).map(str::to_string)
    }

    /// All memories of one birth date in date order.
    pub fn list(&self, birth: BirthDate) -> Vec<(NaiveDate, String)> {
        self.load(birth)
            .iter()
            .map(|(date, text)| (date, text.to_string()))
            .collect()
    }

    /// Number of memories in the week starting at `week_start`.
    pub fn count_in_week(&self, birth: BirthDate, week_start: NaiveDate) -> usize {
        self.load(birth).count_within(week_start, DAYS_PER_WEEK)
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }
}

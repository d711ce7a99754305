//! Validated visualization inputs.
//!
//! # Responsibility
//! - Parse raw form input into `BirthDate` and `LifeExpectancy`.
//! - Reject missing, malformed or out-of-range values before any derivation.
//!
//! # Invariants
//! - `LifeExpectancy` is always within `MIN_LIFE_EXPECTANCY..=MAX_LIFE_EXPECTANCY`.
//! - `BirthDate` renders back to the exact `YYYY-MM-DD` form it was parsed from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MIN_LIFE_EXPECTANCY: u32 = 1;
pub const MAX_LIFE_EXPECTANCY: u32 = 120;
pub const DEFAULT_LIFE_EXPECTANCY: u32 = 80;

/// ISO calendar date format used for input, storage keys and memory keys.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Input validation error for the visualization form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Birth date field is empty.
    MissingBirthDate,
    /// Birth date is not a valid `YYYY-MM-DD` calendar date.
    InvalidBirthDate(String),
    /// Life expectancy field is empty.
    MissingLifeExpectancy,
    /// Life expectancy is not an integer.
    InvalidLifeExpectancy(String),
    /// Life expectancy is outside the accepted range.
    LifeExpectancyOutOfRange(i64),
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingBirthDate => write!(f, "birth date is required"),
            Self::InvalidBirthDate(value) => {
                write!(f, "invalid birth date `{value}`; expected YYYY-MM-DD")
            }
            Self::MissingLifeExpectancy => write!(f, "life expectancy is required"),
            Self::InvalidLifeExpectancy(value) => {
                write!(f, "invalid life expectancy `{value}`; expected whole years")
            }
            Self::LifeExpectancyOutOfRange(value) => write!(
                f,
                "life expectancy {value} is out of range {}..={}",
                MIN_LIFE_EXPECTANCY, MAX_LIFE_EXPECTANCY
            ),
        }
    }
}

impl Error for InputError {}

/// User-supplied birth date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parses `YYYY-MM-DD` input. Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InputError::MissingBirthDate);
        }
        NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
            .map(Self)
            .map_err(|_| InputError::InvalidBirthDate(trimmed.to_string()))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl Display for BirthDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(ISO_DATE_FORMAT))
    }
}

impl From<NaiveDate> for BirthDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

/// Expected lifespan in whole years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct LifeExpectancy(u32);

impl LifeExpectancy {
    /// Creates a validated expectancy.
    pub fn new(years: u32) -> Result<Self, InputError> {
        if !(MIN_LIFE_EXPECTANCY..=MAX_LIFE_EXPECTANCY).contains(&years) {
            return Err(InputError::LifeExpectancyOutOfRange(i64::from(years)));
        }
        Ok(Self(years))
    }

    /// Parses form input as whole years.
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InputError::MissingLifeExpectancy);
        }
        let value = trimmed
            .parse::<i64>()
            .map_err(|_| InputError::InvalidLifeExpectancy(trimmed.to_string()))?;
        let years =
            u32::try_from(value).map_err(|_| InputError::LifeExpectancyOutOfRange(value))?;
        Self::new(years)
    }

    pub fn years(&self) -> u32 {
        self.0
    }
}

impl Default for LifeExpectancy {
    fn default() -> Self {
        Self(DEFAULT_LIFE_EXPECTANCY)
    }
}

impl TryFrom<u32> for LifeExpectancy {
    type Error = InputError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LifeExpectancy> for u32 {
    fn from(value: LifeExpectancy) -> Self {
        value.0
    }
}

impl Display for LifeExpectancy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

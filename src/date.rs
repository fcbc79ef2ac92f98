//! Birth-date validation.
//!
//! Accepts exactly `dd/mm/yyyy` with year in [1900, 2025]. The per-month day
//! rule is deliberately simplified: day > 29 is rejected for February and
//! day > 30 for April/June/September/November, so Feb 29 passes in every
//! year. Callers re-prompt on rejection.

use regex::Regex;
use tracing::instrument;

use crate::errors::{StoreError, StoreResult};

pub const MIN_YEAR: u32 = 1900;
pub const MAX_YEAR: u32 = 2025;

/// Validates `dd/mm/yyyy` birth-date strings against a compiled pattern.
pub struct DateValidator {
    pattern: Regex,
}

impl Default for DateValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl DateValidator {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"^(\d{2})/(\d{2})/(\d{4})$").unwrap(),
        }
    }

    /// Checks shape and ranges; `Ok(())` for an acceptable date.
    #[instrument(level = "trace", skip(self))]
    pub fn validate(&self, input: &str) -> StoreResult<()> {
        let invalid = |reason: &str| StoreError::InvalidDate {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let caps = self
            .pattern
            .captures(input)
            .ok_or_else(|| invalid("expected dd/mm/yyyy"))?;

        // Two-digit captures cannot overflow u32
        let day: u32 = caps[1].parse().map_err(|_| invalid("bad day"))?;
        let month: u32 = caps[2].parse().map_err(|_| invalid("bad month"))?;
        let year: u32 = caps[3].parse().map_err(|_| invalid("bad year"))?;

        if !(1..=12).contains(&month) {
            return Err(invalid("month must be 01-12"));
        }
        if !(1..=31).contains(&day) {
            return Err(invalid("day must be 01-31"));
        }
        if month == 2 && day > 29 {
            return Err(invalid("February has at most 29 days"));
        }
        if matches!(month, 4 | 6 | 9 | 11) && day > 30 {
            return Err(invalid("month has only 30 days"));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(invalid("year must be 1900-2025"));
        }
        Ok(())
    }
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::utils::constants::{MAX_BIN_COUNT, MIN_BIN_COUNT};

/// User-selected timestamp interval, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if start > end {
            return Err(DashboardError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Clamp both endpoints into another range (the dataset's time span).
    /// Applied at the UI boundary; the pipeline itself trusts its caller.
    pub fn clamp_to(&self, span: &DateRange) -> Result<Self> {
        let start = self.start.clamp(span.start, span.end);
        let end = self.end.clamp(span.start, span.end);
        DateRange::new(start, end)
    }

    pub fn duration_seconds(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

/// Number of equal-width buckets, bounded to [1, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinCount(u32);

impl BinCount {
    pub fn new(count: u32) -> Result<Self> {
        if !(MIN_BIN_COUNT..=MAX_BIN_COUNT).contains(&count) {
            return Err(DashboardError::InvalidBinCount(count));
        }
        Ok(Self(count))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

//! Year range module - the analysed window and its checkpoint years

use std::fmt;
use std::ops::RangeInclusive;

/// Inclusive range of years `[start, end]`
///
/// A range with `start > end` is valid and empty; iterating it yields nothing,
/// which makes a misconfigured range produce an empty series rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearRange {
    /// First year (inclusive)
    pub start: i32,

    /// Last year (inclusive)
    pub end: i32,
}

impl YearRange {
    /// Create a new range
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Iterate the years in ascending order
    pub fn years(&self) -> RangeInclusive<i32> {
        self.start..=self.end
    }

    /// Number of years in the range
    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.end as i64 - self.start as i64 + 1) as usize
        }
    }

    /// Whether the range contains no years
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Check if the range contains a year
    pub fn contains(&self, year: i32) -> bool {
        self.years().contains(&year)
    }

    /// Integer midpoint `(start + end) / 2`, rounded toward negative infinity
    pub fn midpoint(&self) -> Option<i32> {
        if self.is_empty() {
            return None;
        }
        Some(((self.start as i64 + self.end as i64).div_euclid(2)) as i32)
    }

    /// The years at which assortativity snapshots are taken: first, midpoint, last
    ///
    /// Ascending and duplicate-free, so a single-year range yields one checkpoint.
    pub fn checkpoint_years(&self) -> Vec<i32> {
        let Some(midpoint) = self.midpoint() else {
            return Vec::new();
        };

        let mut years = vec![self.start, midpoint, self.end];
        years.dedup();
        years
    }

    /// Whether the year is one of the checkpoint years
    pub fn is_checkpoint(&self, year: i32) -> bool {
        self.checkpoint_years().contains(&year)
    }
}

impl fmt::Display for YearRange {
    /// Formats as `start-end`, the identifier used for range-wide artifacts
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

//! The projection horizon: an inclusive range of calendar days.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use api_types::forecast::HorizonRange;

use crate::{EngineError, ResultEngine};

/// Inclusive date range over which a projection is computed.
///
/// A degenerate range (`end < start`) is a valid value that contains no days;
/// projecting over it yields an empty series rather than an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Horizon {
    start: NaiveDate,
    end: NaiveDate,
}

impl Horizon {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A single-day horizon.
    pub fn single(day: NaiveDate) -> Self {
        Self::new(day, day)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// `true` when the range contains no days.
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Number of calendar days, inclusive of both endpoints.
    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.end - self.start).num_days() as usize + 1
        }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Iterates every day in the range, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    /// The first day of every calendar month that falls inside the range.
    ///
    /// A horizon starting mid-month does not include that month's 1st.
    pub fn month_firsts(&self) -> Vec<NaiveDate> {
        let mut firsts = Vec::new();
        if self.is_empty() {
            return firsts;
        }
        let mut cursor = NaiveDate::from_ymd_opt(self.start.year(), self.start.month(), 1)
            .unwrap_or(self.start);
        while cursor <= self.end {
            if self.contains(cursor) {
                firsts.push(cursor);
            }
            cursor = cursor
                .checked_add_days(Days::new(32))
                .map(|d| NaiveDate::from_ymd_opt(d.year(), d.month(), 1).unwrap_or(d))
                .unwrap_or(self.end.succ_opt().unwrap_or(self.end));
            if cursor.day() != 1 {
                break;
            }
        }
        firsts
    }
}

impl TryFrom<&HorizonRange> for Horizon {
    type Error = EngineError;

    /// Parses the boundary's ISO 8601 date strings.
    ///
    /// Malformed horizon bounds are a caller error, unlike malformed rows
    /// (which are skipped one by one during normalization).
    fn try_from(range: &HorizonRange) -> ResultEngine<Self> {
        let start = parse_day(&range.start_date)?;
        let end = parse_day(&range.end_date)?;
        Ok(Self::new(start, end))
    }
}

/// Parse an ISO 8601 calendar day (`YYYY-MM-DD`).
pub fn parse_day(value: &str) -> ResultEngine<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| EngineError::InvalidDate(format!("invalid calendar day: {value}")))
}

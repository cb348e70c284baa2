use crate::EgnError;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_MONTH, MAX_YEAR, MIN_YEAR,
};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Gender encoded by the parity of the ninth digit of an EGN
/// (even digit = female, odd digit = male).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[display(fmt = "female")]
    Female,
    #[display(fmt = "male")]
    Male,
}

impl Gender {
    /// Whether a serial digit of this parity encodes this gender
    #[inline]
    pub const fn matches_digit(self, digit: u8) -> bool {
        match self {
            Self::Female => digit % 2 == 0,
            Self::Male => digit % 2 == 1,
        }
    }

    /// Gender encoded by the given serial digit
    #[inline]
    pub const fn from_digit(digit: u8) -> Self {
        if digit % 2 == 0 { Self::Female } else { Self::Male }
    }
}

impl FromStr for Gender {
    type Err = EgnError;

    /// Accepts `male`/`female` and the aliases `m`/`f`, case- and
    /// whitespace-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            other => Err(EgnError::InvalidOption(format!(
                "gender must be male|female|m|f, got {other:?}"
            ))),
        }
    }
}

/// Birth date and gender decoded from a valid EGN.
///
/// Only produced by a successful [`crate::codec::parse`]; the fields are
/// guaranteed to form a calendar-valid Gregorian date within 1800..=2099.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ParsedEgn {
    year: u16,
    month: u8,
    day: u8,
    gender: Gender,
}

impl ParsedEgn {
    pub(crate) const fn new(year: u16, month: u8, day: u8, gender: Gender) -> Self {
        Self {
            year,
            month,
            day,
            gender,
        }
    }

    /// Four-digit birth year
    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Birth month, 1..=12
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Birth day of month, valid for the year and month
    #[inline]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Gender decoded from the serial parity
    #[inline]
    pub const fn gender(&self) -> Gender {
        self.gender
    }
}

/// Inclusive year range the generator draws birth dates from.
///
/// Both bounds must lie within 1800..=2099: the century encoding only
/// distinguishes three centuries, so years outside that window cannot
/// round-trip through an EGN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "(u16, u16)", into = "(u16, u16)")]
pub struct YearRange {
    start: u16,
    end: u16,
}

impl YearRange {
    /// Creates a year range, validating both bounds and their order.
    ///
    /// # Errors
    /// Returns `EgnError::InvalidOption` if `start > end` or either bound
    /// falls outside 1800..=2099.
    pub fn new(start: u16, end: u16) -> Result<Self, EgnError> {
        if start > end {
            return Err(EgnError::InvalidOption(format!(
                "year range start {start} is after end {end}"
            )));
        }
        if start < MIN_YEAR || end > MAX_YEAR {
            return Err(EgnError::InvalidOption(format!(
                "year range {start}..{end} must lie within {MIN_YEAR}..{MAX_YEAR}"
            )));
        }
        Ok(Self { start, end })
    }

    /// First year of the range (inclusive)
    #[inline]
    pub const fn start(&self) -> u16 {
        self.start
    }

    /// Last year of the range (inclusive)
    #[inline]
    pub const fn end(&self) -> u16 {
        self.end
    }

    /// Whether the year falls within the range
    #[inline]
    pub const fn contains(&self, year: u16) -> bool {
        self.start <= year && year <= self.end
    }
}

impl Default for YearRange {
    /// The full representable window, 1800..=2099
    fn default() -> Self {
        Self {
            start: MIN_YEAR,
            end: MAX_YEAR,
        }
    }
}

impl TryFrom<(u16, u16)> for YearRange {
    type Error = EgnError;

    fn try_from(value: (u16, u16)) -> Result<Self, Self::Error> {
        Self::new(value.0, value.1)
    }
}

impl From<YearRange> for (u16, u16) {
    fn from(range: YearRange) -> Self {
        (range.start, range.end)
    }
}

// Helper functions

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Whether (year, month, day) names a real Gregorian calendar date
pub const fn is_valid_date(year: u16, month: u8, day: u8) -> bool {
    month >= 1 && month <= MAX_MONTH && day >= 1 && day <= days_in_month(year, month)
}

use std::str::FromStr;

use thiserror::Error;

/// Calendar month. Each variant owns one partition table named after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MonthName {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

/// Year stamped on every generated date.
pub const RECORD_YEAR: i32 = 2024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid month '{0}'. Use a full month name such as January")]
pub struct InvalidMonth(pub String);

impl MonthName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
            Self::April => "April",
            Self::May => "May",
            Self::June => "June",
            Self::July => "July",
            Self::August => "August",
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
        }
    }

    /// Calendar order, January first.
    pub fn all() -> &'static [MonthName] {
        &[
            Self::January,
            Self::February,
            Self::March,
            Self::April,
            Self::May,
            Self::June,
            Self::July,
            Self::August,
            Self::September,
            Self::October,
            Self::November,
            Self::December,
        ]
    }

    /// 1-based month number.
    pub fn number(&self) -> u32 {
        *self as u32 + 1
    }

    /// Name of the partition table holding this month's records.
    pub fn table_name(&self) -> &'static str {
        self.as_str()
    }

    /// February is fixed at 28 days even though the record year is a leap year.
    pub fn days_in_month(&self) -> u32 {
        match self {
            Self::February => 28,
            Self::April | Self::June | Self::September | Self::November => 30,
            _ => 31,
        }
    }
}

impl FromStr for MonthName {
    type Err = InvalidMonth;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| InvalidMonth(s.to_string()))
    }
}

impl std::fmt::Display for MonthName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// A calendar month used for period filtering, displayed as `YYYY-MM`.
///
/// Ordering is by (year, month), which matches lexicographic order of the
/// display form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Error)]
#[error("invalid month `{0}`, expected YYYY-MM")]
pub struct ParseMonthKeyError(String);

impl FromStr for MonthKey {
    type Err = ParseMonthKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let (year, month) = raw
            .split_once('-')
            .ok_or_else(|| ParseMonthKeyError(raw.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| ParseMonthKeyError(raw.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| ParseMonthKeyError(raw.to_string()))?;
        if !(1..=12).contains(&month) {
            return Err(ParseMonthKeyError(raw.to_string()));
        }
        Ok(Self { year, month })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        assert_eq!(MonthKey::from_date(date).to_string(), "2024-03");
    }

    #[test]
    fn orders_chronologically() {
        let feb: MonthKey = "2024-02".parse().unwrap();
        let mar: MonthKey = "2024-03".parse().unwrap();
        let earlier: MonthKey = "2023-12".parse().unwrap();
        assert!(earlier < feb);
        assert!(feb < mar);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!("2024".parse::<MonthKey>().is_err());
        assert!("2024-13".parse::<MonthKey>().is_err());
        assert!("2024-xx".parse::<MonthKey>().is_err());
    }
}

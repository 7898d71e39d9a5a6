use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};

use crate::ModelError;

/// The production date a record is logged against.
///
/// Only the fixed-width `YYYY-MM-DD` form is accepted, so the derived
/// ordering is the same as comparing the canonical strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductionDate(NaiveDate);

impl ProductionDate {
    pub fn parse(value: &str) -> Result<Self, ModelError> {
        let bytes = value.as_bytes();
        let well_formed = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(index, byte)| index == 4 || index == 7 || byte.is_ascii_digit());
        if !well_formed {
            return Err(ModelError::InvalidDate(value.to_string()));
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| ModelError::InvalidDate(value.to_string()))
    }

    pub fn from_naive(date: NaiveDate) -> Result<Self, ModelError> {
        // Years outside 0..=9999 would break the fixed-width form.
        if !(0..=9999).contains(&date.year()) {
            return Err(ModelError::InvalidDate(date.to_string()));
        }
        Ok(Self(date))
    }

    /// Today's date in UTC.
    pub fn today() -> Self {
        Self(chrono::Utc::now().date_naive())
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// Sunday on or before this date.
    pub fn week_start(&self) -> Self {
        let back = u64::from(self.0.weekday().num_days_from_sunday());
        Self(self.0 - Days::new(back))
    }

    /// First day of this date's month.
    pub fn month_start(&self) -> Self {
        Self(self.0.with_day(1).unwrap_or(self.0))
    }
}

impl fmt::Display for ProductionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for ProductionDate {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for ProductionDate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for ProductionDate {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_fixed_width_forms() {
        assert!(ProductionDate::parse("2024-1-05").is_err());
        assert!(ProductionDate::parse("2024/01/05").is_err());
        assert!(ProductionDate::parse("2024-02-30").is_err());
        assert!(ProductionDate::parse("").is_err());
        assert!(ProductionDate::parse(" 2024-01-05 ").is_err());
        assert!(ProductionDate::parse("2024-01-05").is_ok());
    }

    #[test]
    fn week_starts_on_sunday() {
        // 2024-01-03 is a Wednesday.
        let date = ProductionDate::parse("2024-01-03").unwrap();
        assert_eq!(date.week_start().to_string(), "2023-12-31");
        let sunday = ProductionDate::parse("2023-12-31").unwrap();
        assert_eq!(sunday.week_start(), sunday);
    }

    #[test]
    fn month_start_is_first_day() {
        let date = ProductionDate::parse("2024-02-29").unwrap();
        assert_eq!(date.month_start().to_string(), "2024-02-01");
    }
}

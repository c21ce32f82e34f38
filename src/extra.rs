use chrono::{Months, NaiveDate};
use std::{fmt, str::FromStr};

use crate::error::{ConflictError, ParseError, Result};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Frequency {
    Once,
    Monthly,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Once => write!(f, "once"),
            Frequency::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for Frequency {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "once" => Ok(Frequency::Once),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(ParseError::InvalidFrequency(other.to_string())),
        }
    }
}

/// A supplemental principal payment rule.
///
/// `end_date` is exclusive. `count` is only carried until [`Extra::resolve`]
/// turns it into an end date; the schedule never looks at it.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extra {
    pub frequency: Frequency,
    pub amount: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub count: Option<u32>,
}

impl Extra {
    pub fn once(amount: f64, date: NaiveDate) -> Self {
        Self {
            frequency: Frequency::Once,
            amount,
            start_date: Some(date),
            end_date: None,
            count: None,
        }
    }

    pub fn monthly(amount: f64, start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        Self {
            frequency: Frequency::Monthly,
            amount,
            start_date,
            end_date,
            count: None,
        }
    }

    /// Fills a missing start date with `default_start` and converts a positive
    /// `count` into an end date `count` months after the start.
    pub fn resolve(mut self, default_start: NaiveDate) -> Result<Self> {
        let start = *self.start_date.get_or_insert(default_start);

        if let Some(count) = self.count.filter(|&c| c > 0) {
            if self.end_date.is_some() {
                return Err(ConflictError.into());
            }
            let end = start.checked_add_months(Months::new(count)).ok_or_else(|| {
                ParseError::OutOfRange {
                    field: "count",
                    reason: format!("{} months after {} is not a valid date", count, start),
                }
            })?;
            self.end_date = Some(end);
        }
        Ok(self)
    }

    /// True for a one-time extra whose date has arrived by `date`.
    pub fn is_due(&self, date: NaiveDate) -> bool {
        self.frequency == Frequency::Once && self.start_date.is_some_and(|start| start <= date)
    }

    /// True for a recurring extra whose window covers `date`.
    pub fn is_active(&self, date: NaiveDate) -> bool {
        self.frequency == Frequency::Monthly
            && self.start_date.map_or(true, |start| date >= start)
            && self.end_date.map_or(true, |end| date < end)
    }
}

impl fmt::Display for Extra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.frequency)?;
        if let Some(start) = self.start_date {
            let keyword = match self.frequency {
                Frequency::Once => "on",
                Frequency::Monthly => "starting",
            };
            write!(f, " {} {}", keyword, start)?;
        }
        if let Some(end) = self.end_date {
            write!(f, " ending {}", end)?;
        }
        if let Some(count) = self.count {
            write!(f, " count {}", count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Extra, Frequency};
    use crate::error::{ConflictError, Error, ParseError};
    use chrono::NaiveDate;
    use test_log::test;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_frequency_from_str() {
        assert_eq!("once".parse::<Frequency>(), Ok(Frequency::Once));
        assert_eq!("monthly".parse::<Frequency>(), Ok(Frequency::Monthly));
        assert_eq!(
            "weekly".parse::<Frequency>(),
            Err(ParseError::InvalidFrequency("weekly".to_string()))
        );
        assert_eq!(Frequency::Monthly.to_string(), "monthly");
    }

    #[test]
    fn test_resolve_count() {
        let mut extra = Extra::monthly(50., None, None);
        extra.count = Some(3);

        let resolved = extra.resolve(date(2021, 1, 31)).unwrap();
        assert_eq!(resolved.start_date, Some(date(2021, 1, 31)));
        // chrono clamps to the last day of a shorter month
        assert_eq!(resolved.end_date, Some(date(2021, 4, 30)));
    }

    #[test]
    fn test_resolve_keeps_explicit_start() {
        let extra = Extra::monthly(50., Some(date(2021, 6, 1)), None);
        let resolved = extra.resolve(date(2021, 1, 1)).unwrap();
        assert_eq!(resolved.start_date, Some(date(2021, 6, 1)));
        assert_eq!(resolved.end_date, None);
    }

    #[test]
    fn test_resolve_conflict() {
        let mut extra = Extra::monthly(50., None, Some(date(2022, 1, 1)));
        extra.count = Some(3);
        assert_eq!(
            extra.resolve(date(2021, 1, 1)),
            Err(Error::Conflict(ConflictError))
        );
    }

    #[test]
    fn test_active_window_is_end_exclusive() {
        let extra = Extra::monthly(50., Some(date(2021, 1, 1)), Some(date(2021, 3, 1)));
        assert!(!extra.is_active(date(2020, 12, 1)));
        assert!(extra.is_active(date(2021, 1, 1)));
        assert!(extra.is_active(date(2021, 2, 1)));
        assert!(!extra.is_active(date(2021, 3, 1)));

        let unbounded = Extra::monthly(50., None, None);
        assert!(unbounded.is_active(date(1999, 1, 1)));
        assert!(!unbounded.is_due(date(1999, 1, 1)));
    }

    #[test]
    fn test_once_is_due() {
        let extra = Extra::once(1000., date(2021, 2, 10));
        assert!(!extra.is_due(date(2021, 2, 1)));
        assert!(extra.is_due(date(2021, 2, 10)));
        assert!(extra.is_due(date(2021, 3, 1)));
        assert!(!extra.is_active(date(2021, 3, 1)));
    }

    #[test]
    fn test_display() {
        let extra = Extra::once(12000., date(2020, 11, 10));
        assert_eq!(extra.to_string(), "12000.00 once on 2020-11-10");
    }
}

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};

/// Planned time span of a project; the end date is optional
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PeriodRecord")]
pub struct ProjectPeriod {
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
}

impl ProjectPeriod {
    pub fn new(start_date: NaiveDate, end_date: Option<NaiveDate>) -> DomainResult<Self> {
        if let Some(end) = end_date {
            if end < start_date {
                return Err(DomainError::validation(
                    "end_date",
                    "End date cannot be before start date",
                ));
            }
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Whether `date` falls inside the period (bounds inclusive)
    pub fn is_ongoing(&self, date: NaiveDate) -> bool {
        if date < self.start_date {
            return false;
        }
        match self.end_date {
            Some(end) => date <= end,
            None => true,
        }
    }

    /// Days between start and end, `None` while open-ended
    pub fn duration_days(&self) -> Option<i64> {
        self.end_date
            .map(|end| (end - self.start_date).num_days())
    }
}

impl fmt::Display for ProjectPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end_date {
            Some(end) => write!(f, "{} to {}", self.start_date, end),
            None => write!(f, "From {}", self.start_date),
        }
    }
}

#[derive(Deserialize)]
struct PeriodRecord {
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
}

impl TryFrom<PeriodRecord> for ProjectPeriod {
    type Error = DomainError;

    fn try_from(record: PeriodRecord) -> DomainResult<Self> {
        ProjectPeriod::new(record.start_date, record.end_date)
    }
}

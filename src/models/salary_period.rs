//! Salary segment model used for extra-payment proration.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A stretch of the year during which a given annual salary applied.
///
/// Both dates are inclusive and must fall in the same calendar year.
///
/// # Example
///
/// ```
/// use irpf_engine::models::SalaryPeriod;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let period = SalaryPeriod {
///     salary: Decimal::from(24000),
///     start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2023, 6, 30).unwrap(),
/// };
/// assert!(period.validate(0).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryPeriod {
    /// The gross annual salary in force during the segment.
    pub salary: Decimal,
    /// The first day of the segment (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the segment (inclusive).
    pub end_date: NaiveDate,
}

impl SalaryPeriod {
    /// Checks the same-year and ordering invariants.
    ///
    /// `index` is the segment's position in its list and is reported in the
    /// error so callers can point at the offending row.
    pub fn validate(&self, index: usize) -> EngineResult<()> {
        if self.start_date.year() != self.end_date.year() {
            return Err(EngineError::InvalidSegment {
                index,
                message: format!(
                    "segment spans more than one year ({} to {})",
                    self.start_date, self.end_date
                ),
            });
        }

        if self.start_date > self.end_date {
            return Err(EngineError::InvalidSegment {
                index,
                message: format!(
                    "start date {} is after end date {}",
                    self.start_date, self.end_date
                ),
            });
        }

        Ok(())
    }
}

//! Extra payment proration across salary segments.
//!
//! Extra payments accrue over half-years of [`HALF_YEAR_DAYS`] days. Every
//! month is counted as 30 days, so the accrued fraction of a segment is its
//! 30-day-month day count over 180.

use chrono::Datelike;
use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{CalculationContext, SalaryPeriod};

use super::net_salary::extra_payment;

/// Number of days an extra payment accrues over.
pub const HALF_YEAR_DAYS: u32 = 180;

/// Days per month in the simplified accrual calendar.
pub const DAYS_PER_MONTH: i64 = 30;

/// Counts the days of a segment on the 30-day-month calendar.
///
/// The count is `(end.month - start.month) * 30 - start.day + min(end.day, 30)`,
/// clamped at zero. The start day itself is not counted, which is why a
/// January-to-June segment yields 179 rather than 180. The segment must
/// already satisfy the same-year invariant; see [`SalaryPeriod::validate`].
///
/// # Examples
///
/// ```
/// use irpf_engine::calculation::days_in_segment;
/// use irpf_engine::models::SalaryPeriod;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let period = SalaryPeriod {
///     salary: Decimal::from(24000),
///     start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2023, 6, 30).unwrap(),
/// };
/// assert_eq!(days_in_segment(&period), 179);
/// ```
pub fn days_in_segment(period: &SalaryPeriod) -> u32 {
    let start_month = i64::from(period.start_date.month());
    let end_month = i64::from(period.end_date.month());
    let start_day = i64::from(period.start_date.day());
    let end_day = i64::from(period.end_date.day()).min(DAYS_PER_MONTH);

    let days = (end_month - start_month) * DAYS_PER_MONTH - start_day + end_day;
    u32::try_from(days.max(0)).unwrap_or(0)
}

/// Calculates the extra payment accrued by one validated segment.
pub fn segment_extra_payment(period: &SalaryPeriod, context: &CalculationContext) -> Decimal {
    let days = Decimal::from(days_in_segment(period));
    extra_payment(period.salary, context) * days / Decimal::from(HALF_YEAR_DAYS)
}

/// Sums the prorated extra payment over a list of salary segments.
///
/// Returns zero for an empty list. Every segment is validated before it is
/// counted and the first invalid one aborts the whole calculation with
/// [`EngineError::InvalidSegment`](crate::error::EngineError::InvalidSegment).
/// The total is left unrounded.
pub fn total_extra_payment(
    segments: &[SalaryPeriod],
    context: &CalculationContext,
) -> EngineResult<Decimal> {
    let mut total = Decimal::ZERO;

    for (index, segment) in segments.iter().enumerate() {
        segment.validate(index)?;
        total += segment_extra_payment(segment, context);
    }

    Ok(total)
}

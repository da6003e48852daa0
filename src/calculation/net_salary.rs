//! Net salary and extra payment calculation.
//!
//! Both figures are computed from an unrounded per-period gross minus the
//! relevant deductions, then rounded up to the cent once. The terms are
//! combined over a common denominator and divided a single time, so a result
//! that is an exact cent amount stays exact.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{CONTRIBUTION_PERIODS, CalculationContext, TaxResult};

use super::bracket_lookup::resolve_rate;
use super::deductions::withholding_rate;

/// Rounds a value up (towards positive infinity) to two decimal places.
///
/// # Examples
///
/// ```
/// use irpf_engine::calculation::round_up_cents;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let raw = Decimal::from_str("1234.561").unwrap();
/// assert_eq!(round_up_cents(raw), Decimal::from_str("1234.57").unwrap());
/// ```
pub fn round_up_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::ToPositiveInfinity)
}

/// Splits a gross annual salary over the configured payment periods.
pub fn gross_per_period(salary: Decimal, context: &CalculationContext) -> Decimal {
    salary / context.payment_periods().divisor()
}

/// Calculates the net pay per payment period.
///
/// The per-period gross minus IRPF and the three flat contributions, rounded
/// up to the cent. Returns zero for salaries of zero or less.
pub fn net_salary(salary: Decimal, context: &CalculationContext) -> Decimal {
    if salary <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    // salary/P - salary*r/(100*P) - salary*flat/(100*12)
    let periods = context.payment_periods().divisor();
    let contribution_periods = Decimal::from(CONTRIBUTION_PERIODS);
    let flat = context.flat_rates();
    let flat_total = flat.contingencias_comunes + flat.atur + flat.fp;

    let numerator = salary * (Decimal::ONE_HUNDRED - withholding_rate(salary, context))
        * contribution_periods
        - salary * flat_total * periods;
    round_up_cents(numerator / (Decimal::ONE_HUNDRED * contribution_periods * periods))
}

/// Calculates the standalone extra payment.
///
/// Extra payments carry IRPF but none of the flat social contributions, so
/// this is the per-period gross minus IRPF, rounded up to the cent. Returns
/// zero for salaries of zero or less.
pub fn extra_payment(salary: Decimal, context: &CalculationContext) -> Decimal {
    if salary <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let rate = withholding_rate(salary, context);
    round_up_cents(
        salary * (Decimal::ONE_HUNDRED - rate)
            / (Decimal::ONE_HUNDRED * context.payment_periods().divisor()),
    )
}

/// Returns the withholding percentage for a salary, `None` when it cannot be
/// determined from the bracket table.
pub fn irpf_percentage(salary: Decimal, context: &CalculationContext) -> Option<Decimal> {
    resolve_rate(salary, context.brackets())
}

/// Calculates every figure shown for one gross annual salary.
pub fn calculate_tax_result(salary: Decimal, context: &CalculationContext) -> TaxResult {
    TaxResult {
        irpf_percentage: irpf_percentage(salary, context),
        extra_payment: extra_payment(salary, context),
        net_salary: net_salary(salary, context),
    }
}

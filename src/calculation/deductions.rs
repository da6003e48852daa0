//! Per-period deduction amounts.
//!
//! This module turns a gross annual salary into the four amounts withheld
//! from each payment: IRPF, common contingencies, unemployment and training.
//! IRPF is spread over the configured salary payment periods, while the flat
//! contributions are always spread over [`CONTRIBUTION_PERIODS`].

use rust_decimal::Decimal;

use crate::models::{CONTRIBUTION_PERIODS, CalculationContext, Deductions};

use super::bracket_lookup::resolve_rate;

/// Calculates the IRPF withholding per salary payment.
///
/// An undefined rate (salary at or below the first threshold) withholds
/// nothing. Returns zero for salaries of zero or less.
///
/// # Examples
///
/// ```
/// use irpf_engine::calculation::irpf_value;
/// use irpf_engine::models::*;
/// use rust_decimal::Decimal;
///
/// let tables = RateTables::new(
///     BracketTable::new(vec![
///         Bracket::new(Decimal::from(12450), Decimal::from(19)),
///         Bracket::new(Decimal::from(20200), Decimal::from(24)),
///     ])
///     .unwrap(),
///     FlatRates {
///         contingencias_comunes: Decimal::new(47, 1),
///         atur: Decimal::new(155, 2),
///         fp: Decimal::new(1, 1),
///     },
/// )
/// .unwrap();
/// let context = CalculationContext::new(
///     RateTableKey::new("catalunya", "2024"),
///     tables,
///     PaymentPeriods::Twelve,
/// );
///
/// // 18000 * 19% / 12
/// assert_eq!(irpf_value(Decimal::from(18000), &context), Decimal::from(285));
/// ```
pub fn irpf_value(salary: Decimal, context: &CalculationContext) -> Decimal {
    if salary <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    salary * withholding_rate(salary, context)
        / (Decimal::ONE_HUNDRED * context.payment_periods().divisor())
}

/// The IRPF percentage applied to a salary, zero when the bracket lookup
/// yields no rate.
pub(crate) fn withholding_rate(salary: Decimal, context: &CalculationContext) -> Decimal {
    resolve_rate(salary, context.brackets()).unwrap_or(Decimal::ZERO)
}

/// Calculates the monthly common contingencies contribution.
pub fn contingencias_comunes_value(salary: Decimal, context: &CalculationContext) -> Decimal {
    contribution_value(salary, context.flat_rates().contingencias_comunes)
}

/// Calculates the monthly unemployment contribution.
pub fn atur_value(salary: Decimal, context: &CalculationContext) -> Decimal {
    contribution_value(salary, context.flat_rates().atur)
}

/// Calculates the monthly professional training contribution.
pub fn fp_value(salary: Decimal, context: &CalculationContext) -> Decimal {
    contribution_value(salary, context.flat_rates().fp)
}

/// Calculates all four deductions for a gross annual salary.
pub fn calculate_deductions(salary: Decimal, context: &CalculationContext) -> Deductions {
    Deductions {
        irpf: irpf_value(salary, context),
        contingencias_comunes: contingencias_comunes_value(salary, context),
        atur: atur_value(salary, context),
        fp: fp_value(salary, context),
    }
}

fn contribution_value(salary: Decimal, percentage: Decimal) -> Decimal {
    if salary <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    salary * percentage / (Decimal::ONE_HUNDRED * Decimal::from(CONTRIBUTION_PERIODS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Bracket, BracketTable, FlatRates, PaymentPeriods, RateTableKey, RateTables,
    };
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_context(payment_periods: PaymentPeriods) -> CalculationContext {
        let tables = RateTables::new(
            BracketTable::new(vec![
                Bracket::new(dec("12450"), dec("19")),
                Bracket::new(dec("20200"), dec("24")),
                Bracket::new(dec("35200"), dec("30")),
            ])
            .unwrap(),
            FlatRates {
                contingencias_comunes: dec("4.7"),
                atur: dec("1.55"),
                fp: dec("0.1"),
            },
        )
        .unwrap();
        CalculationContext::new(RateTableKey::new("catalunya", "2024"), tables, payment_periods)
    }

    #[test]
    fn test_irpf_value_uses_payment_periods() {
        let fourteen = create_test_context(PaymentPeriods::Fourteen);
        let twelve = create_test_context(PaymentPeriods::Twelve);

        // 28000 * 24% = 6720
        assert_eq!(irpf_value(dec("28000"), &fourteen), dec("480"));
        assert_eq!(irpf_value(dec("28000"), &twelve), dec("560"));
    }

    #[test]
    fn test_irpf_value_is_zero_for_undefined_rate() {
        let context = create_test_context(PaymentPeriods::Fourteen);
        assert_eq!(irpf_value(dec("12000"), &context), Decimal::ZERO);
    }

    #[test]
    fn test_flat_contributions_ignore_payment_periods() {
        let fourteen = create_test_context(PaymentPeriods::Fourteen);
        let twelve = create_test_context(PaymentPeriods::Twelve);
        let salary = dec("30000");

        assert_eq!(contingencias_comunes_value(salary, &fourteen), dec("117.5"));
        assert_eq!(contingencias_comunes_value(salary, &twelve), dec("117.5"));
        assert_eq!(atur_value(salary, &fourteen), dec("38.75"));
        assert_eq!(atur_value(salary, &twelve), dec("38.75"));
        assert_eq!(fp_value(salary, &fourteen), dec("2.5"));
        assert_eq!(fp_value(salary, &twelve), dec("2.5"));
    }

    #[test]
    fn test_all_deductions_are_zero_for_non_positive_salary() {
        let context = create_test_context(PaymentPeriods::Fourteen);
        for salary in [Decimal::ZERO, dec("-1"), dec("-30000")] {
            assert_eq!(irpf_value(salary, &context), Decimal::ZERO);
            assert_eq!(contingencias_comunes_value(salary, &context), Decimal::ZERO);
            assert_eq!(atur_value(salary, &context), Decimal::ZERO);
            assert_eq!(fp_value(salary, &context), Decimal::ZERO);
        }
    }

    #[test]
    fn test_calculate_deductions_collects_all_four() {
        let context = create_test_context(PaymentPeriods::Twelve);
        let deductions = calculate_deductions(dec("30000"), &context);

        assert_eq!(deductions.irpf, dec("600"));
        assert_eq!(deductions.contingencias_comunes, dec("117.5"));
        assert_eq!(deductions.atur, dec("38.75"));
        assert_eq!(deductions.fp, dec("2.5"));
        assert_eq!(deductions.total(), dec("758.75"));
    }
}

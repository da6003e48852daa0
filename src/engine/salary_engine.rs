//! The salary engine: a calculation context plus the calculation surface.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::calculation;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CalculationContext, Deductions, PaymentPeriods, RateTableKey, RateTables, SalaryPeriod,
    TaxResult,
};

/// Holds the current [`CalculationContext`] and answers salary queries
/// against it.
///
/// Every query fails with [`EngineError::ContextNotLoaded`] until rate tables
/// are published with [`set_tables`](Self::set_tables), and again after
/// [`clear_context`](Self::clear_context). The context is replaced as a
/// whole, never edited in place.
///
/// # Example
///
/// ```
/// use irpf_engine::engine::SalaryEngine;
/// use irpf_engine::error::EngineError;
/// use irpf_engine::models::*;
/// use rust_decimal::Decimal;
///
/// let mut engine = SalaryEngine::default();
/// assert!(matches!(
///     engine.net_salary(Decimal::from(30000)),
///     Err(EngineError::ContextNotLoaded)
/// ));
///
/// let tables = RateTables::new(
///     BracketTable::new(vec![
///         Bracket::new(Decimal::from(12450), Decimal::from(19)),
///         Bracket::new(Decimal::from(20200), Decimal::from(24)),
///         Bracket::new(Decimal::from(35200), Decimal::from(30)),
///     ])
///     .unwrap(),
///     FlatRates {
///         contingencias_comunes: Decimal::new(47, 1),
///         atur: Decimal::new(155, 2),
///         fp: Decimal::new(1, 1),
///     },
/// )
/// .unwrap();
/// engine.set_tables(RateTableKey::new("catalunya", "2024"), tables);
///
/// assert_eq!(engine.net_salary(Decimal::from(30000)).unwrap(), Decimal::new(146983, 2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SalaryEngine {
    context: Option<Arc<CalculationContext>>,
    payment_periods: PaymentPeriods,
}

impl SalaryEngine {
    /// Creates an engine with no context loaded.
    pub fn new(payment_periods: PaymentPeriods) -> Self {
        Self {
            context: None,
            payment_periods,
        }
    }

    /// Publishes freshly loaded tables, replacing any previous context.
    pub fn set_tables(&mut self, key: RateTableKey, tables: RateTables) {
        self.context = Some(Arc::new(CalculationContext::new(
            key,
            tables,
            self.payment_periods,
        )));
    }

    /// Drops the current context. Subsequent queries fail until new tables
    /// are published.
    pub fn clear_context(&mut self) {
        self.context = None;
    }

    /// Returns true if a context is loaded.
    pub fn is_loaded(&self) -> bool {
        self.context.is_some()
    }

    /// The region and year of the loaded context, if any.
    pub fn context_key(&self) -> Option<&RateTableKey> {
        self.context.as_deref().map(CalculationContext::key)
    }

    /// Returns the loaded context.
    pub fn context(&self) -> EngineResult<&CalculationContext> {
        self.context.as_deref().ok_or(EngineError::ContextNotLoaded)
    }

    /// The salary payment periods in force.
    pub fn payment_periods(&self) -> PaymentPeriods {
        self.payment_periods
    }

    /// Changes the salary payment periods.
    ///
    /// A loaded context is rebuilt around the same tables. The flat
    /// contribution divisor is not affected.
    pub fn set_payment_periods(&mut self, payment_periods: PaymentPeriods) {
        self.payment_periods = payment_periods;
        self.context = self
            .context
            .as_ref()
            .map(|context| Arc::new(context.with_payment_periods(payment_periods)));
    }

    /// Withholding percentage for a gross annual salary. `Ok(None)` means
    /// the rate cannot be determined from the bracket table.
    pub fn irpf_percentage(&self, salary: Decimal) -> EngineResult<Option<Decimal>> {
        Ok(calculation::irpf_percentage(salary, self.context()?))
    }

    /// IRPF withheld per salary payment.
    pub fn irpf_value(&self, salary: Decimal) -> EngineResult<Decimal> {
        Ok(calculation::irpf_value(salary, self.context()?))
    }

    /// Monthly common contingencies contribution.
    pub fn contingencias_comunes_value(&self, salary: Decimal) -> EngineResult<Decimal> {
        Ok(calculation::contingencias_comunes_value(
            salary,
            self.context()?,
        ))
    }

    /// Monthly unemployment contribution.
    pub fn atur_value(&self, salary: Decimal) -> EngineResult<Decimal> {
        Ok(calculation::atur_value(salary, self.context()?))
    }

    /// Monthly professional training contribution.
    pub fn fp_value(&self, salary: Decimal) -> EngineResult<Decimal> {
        Ok(calculation::fp_value(salary, self.context()?))
    }

    /// All four per-period deductions.
    pub fn deductions(&self, salary: Decimal) -> EngineResult<Deductions> {
        Ok(calculation::calculate_deductions(salary, self.context()?))
    }

    /// Net pay per payment period, rounded up to the cent.
    pub fn net_salary(&self, salary: Decimal) -> EngineResult<Decimal> {
        Ok(calculation::net_salary(salary, self.context()?))
    }

    /// Standalone extra payment, rounded up to the cent.
    pub fn extra_payment(&self, salary: Decimal) -> EngineResult<Decimal> {
        Ok(calculation::extra_payment(salary, self.context()?))
    }

    /// Percentage, extra payment and net salary in one call.
    pub fn calculate(&self, salary: Decimal) -> EngineResult<TaxResult> {
        Ok(calculation::calculate_tax_result(salary, self.context()?))
    }

    /// Prorated extra payment summed over salary segments.
    pub fn total_extra_payment(&self, segments: &[SalaryPeriod]) -> EngineResult<Decimal> {
        calculation::total_extra_payment(segments, self.context()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bracket, BracketTable, FlatRates};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_tables() -> RateTables {
        RateTables::new(
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
        .unwrap()
    }

    fn create_loaded_engine() -> SalaryEngine {
        let mut engine = SalaryEngine::default();
        engine.set_tables(RateTableKey::new("catalunya", "2024"), create_test_tables());
        engine
    }

    #[test]
    fn test_every_query_fails_without_context() {
        let engine = SalaryEngine::default();
        let salary = dec("30000");

        assert!(matches!(engine.irpf_percentage(salary), Err(EngineError::ContextNotLoaded)));
        assert!(matches!(engine.irpf_value(salary), Err(EngineError::ContextNotLoaded)));
        assert!(matches!(
            engine.contingencias_comunes_value(salary),
            Err(EngineError::ContextNotLoaded)
        ));
        assert!(matches!(engine.atur_value(salary), Err(EngineError::ContextNotLoaded)));
        assert!(matches!(engine.fp_value(salary), Err(EngineError::ContextNotLoaded)));
        assert!(matches!(engine.net_salary(salary), Err(EngineError::ContextNotLoaded)));
        assert!(matches!(engine.extra_payment(salary), Err(EngineError::ContextNotLoaded)));
        assert!(matches!(engine.calculate(salary), Err(EngineError::ContextNotLoaded)));
        assert!(matches!(
            engine.total_extra_payment(&[]),
            Err(EngineError::ContextNotLoaded)
        ));
    }

    #[test]
    fn test_zero_salary_without_context_still_fails() {
        let engine = SalaryEngine::default();
        assert!(matches!(
            engine.net_salary(Decimal::ZERO),
            Err(EngineError::ContextNotLoaded)
        ));
    }

    #[test]
    fn test_default_engine_uses_fourteen_payments() {
        let engine = SalaryEngine::default();
        assert_eq!(engine.payment_periods(), PaymentPeriods::Fourteen);
        assert!(!engine.is_loaded());
        assert!(engine.context_key().is_none());
    }

    #[test]
    fn test_set_tables_loads_context() {
        let engine = create_loaded_engine();
        assert!(engine.is_loaded());
        assert_eq!(
            engine.context_key(),
            Some(&RateTableKey::new("catalunya", "2024"))
        );
        assert_eq!(engine.net_salary(dec("30000")).unwrap(), dec("1469.83"));
    }

    #[test]
    fn test_clear_context_makes_queries_fail_again() {
        let mut engine = create_loaded_engine();
        engine.clear_context();

        assert!(!engine.is_loaded());
        assert!(matches!(
            engine.net_salary(dec("30000")),
            Err(EngineError::ContextNotLoaded)
        ));
    }

    #[test]
    fn test_payment_periods_rescale_net_and_extra_only() {
        let mut engine = create_loaded_engine();
        let salary = dec("30000");
        let contributions_fourteen = engine.atur_value(salary).unwrap();

        engine.set_payment_periods(PaymentPeriods::Twelve);

        assert_eq!(engine.net_salary(salary).unwrap(), dec("1741.25"));
        assert_eq!(engine.extra_payment(salary).unwrap(), dec("1900"));
        assert_eq!(engine.atur_value(salary).unwrap(), contributions_fourteen);
        assert_eq!(
            engine.context().unwrap().payment_periods(),
            PaymentPeriods::Twelve
        );
    }

    #[test]
    fn test_payment_periods_carry_over_to_new_tables() {
        let mut engine = SalaryEngine::default();
        engine.set_payment_periods(PaymentPeriods::Twelve);
        engine.set_tables(RateTableKey::new("catalunya", "2024"), create_test_tables());

        assert_eq!(
            engine.context().unwrap().payment_periods(),
            PaymentPeriods::Twelve
        );
    }

    #[test]
    fn test_undefined_rate_is_not_an_error() {
        let engine = create_loaded_engine();
        assert_eq!(engine.irpf_percentage(dec("12000")).unwrap(), None);
        assert_eq!(engine.irpf_value(dec("12000")).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_deductions_breakdown() {
        let engine = create_loaded_engine();
        let deductions = engine.deductions(dec("30000")).unwrap();
        assert_eq!(deductions.social_contributions(), dec("158.75"));
    }

    #[test]
    fn test_total_extra_payment_delegates() {
        let engine = create_loaded_engine();
        let segments = vec![SalaryPeriod {
            salary: dec("24000"),
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2023, 4, 1).unwrap(),
        }];

        assert_eq!(engine.total_extra_payment(&segments).unwrap(), dec("651.43"));
        assert_eq!(engine.total_extra_payment(&[]).unwrap(), Decimal::ZERO);
    }
}

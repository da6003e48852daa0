//! Calculation output models.
//!
//! This module contains the [`TaxResult`] returned for a single gross salary
//! and the [`Deductions`] breakdown behind it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-period deduction amounts for a gross annual salary.
///
/// Values are unrounded; rounding is applied once, to the combined net
/// figure, by the salary calculations.
///
/// # Example
///
/// ```
/// use irpf_engine::models::Deductions;
/// use rust_decimal::Decimal;
///
/// let deductions = Deductions {
///     irpf: Decimal::from(500),
///     contingencias_comunes: Decimal::from(100),
///     atur: Decimal::from(30),
///     fp: Decimal::from(2),
/// };
/// assert_eq!(deductions.total(), Decimal::from(632));
/// assert_eq!(deductions.social_contributions(), Decimal::from(132));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Deductions {
    /// IRPF withholding per salary payment.
    pub irpf: Decimal,
    /// Common contingencies contribution per month.
    pub contingencias_comunes: Decimal,
    /// Unemployment contribution per month.
    pub atur: Decimal,
    /// Professional training contribution per month.
    pub fp: Decimal,
}

impl Deductions {
    /// Sum of the three flat social contributions.
    pub fn social_contributions(&self) -> Decimal {
        self.contingencias_comunes + self.atur + self.fp
    }

    /// Sum of all four deductions.
    pub fn total(&self) -> Decimal {
        self.irpf + self.social_contributions()
    }
}

/// The figures rendered for one gross annual salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    /// The withholding percentage, or `None` when the salary sits at or
    /// below the first bracket threshold.
    pub irpf_percentage: Option<Decimal>,
    /// The standalone extra payment, rounded up to the cent.
    pub extra_payment: Decimal,
    /// The net pay per payment period, rounded up to the cent.
    pub net_salary: Decimal,
}

//! Core data models for the IRPF engine.
//!
//! This module contains all the domain models used throughout the engine.

mod bracket_table;
mod context;
mod flat_rates;
mod payment_periods;
mod salary_period;
mod tax_result;

pub use bracket_table::{Bracket, BracketTable};
pub use context::{CalculationContext, RateTableKey};
pub use flat_rates::{FlatRates, RateTables};
pub use payment_periods::{CONTRIBUTION_PERIODS, PaymentPeriods};
pub use salary_period::SalaryPeriod;
pub use tax_result::{Deductions, TaxResult};

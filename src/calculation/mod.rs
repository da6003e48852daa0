//! Calculation logic for the IRPF engine.
//!
//! This module contains the pure calculation functions: withholding rate
//! lookup, per-period deductions, net salary and extra payment, and extra
//! payment proration across salary segments. Every function works on an
//! already loaded [`CalculationContext`](crate::models::CalculationContext).

mod bracket_lookup;
mod deductions;
mod net_salary;
mod proration;

pub use bracket_lookup::resolve_rate;
pub use deductions::{
    atur_value, calculate_deductions, contingencias_comunes_value, fp_value, irpf_value,
};
pub use net_salary::{
    calculate_tax_result, extra_payment, gross_per_period, irpf_percentage, net_salary,
    round_up_cents,
};
pub use proration::{
    DAYS_PER_MONTH, HALF_YEAR_DAYS, days_in_segment, segment_extra_payment, total_extra_payment,
};

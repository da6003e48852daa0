//! Calculation context: the tables every salary query runs against.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{BracketTable, FlatRates, PaymentPeriods, RateTables};

/// Identifies a set of rate tables by region and tax year.
///
/// # Example
///
/// ```
/// use irpf_engine::models::RateTableKey;
///
/// let key = RateTableKey::new("catalunya", "2024");
/// assert_eq!(key.to_string(), "catalunya/2024");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RateTableKey {
    /// The region the tables apply to (e.g., "catalunya").
    pub region: String,
    /// The tax year (e.g., "2024").
    pub year: String,
}

impl RateTableKey {
    /// Creates a key from a region and a year.
    pub fn new(region: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            year: year.into(),
        }
    }
}

impl fmt::Display for RateTableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.region, self.year)
    }
}

/// Loaded rate tables plus the payment-period count in force.
///
/// A context is immutable once built. Changing the payment periods produces a
/// new context sharing the same tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationContext {
    key: RateTableKey,
    tables: Arc<RateTables>,
    payment_periods: PaymentPeriods,
}

impl CalculationContext {
    /// Creates a context for the given tables.
    pub fn new(key: RateTableKey, tables: RateTables, payment_periods: PaymentPeriods) -> Self {
        Self {
            key,
            tables: Arc::new(tables),
            payment_periods,
        }
    }

    /// Returns a copy of this context using a different payment-period count.
    pub fn with_payment_periods(&self, payment_periods: PaymentPeriods) -> Self {
        Self {
            key: self.key.clone(),
            tables: Arc::clone(&self.tables),
            payment_periods,
        }
    }

    /// The region and year the tables were loaded for.
    pub fn key(&self) -> &RateTableKey {
        &self.key
    }

    /// The withholding bracket table.
    pub fn brackets(&self) -> &BracketTable {
        &self.tables.brackets
    }

    /// The flat contribution rates.
    pub fn flat_rates(&self) -> &FlatRates {
        &self.tables.flat_rates
    }

    /// The salary payment periods per year.
    pub fn payment_periods(&self) -> PaymentPeriods {
        self.payment_periods
    }
}

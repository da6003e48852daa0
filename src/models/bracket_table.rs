//! Withholding bracket table.
//!
//! This module contains the [`Bracket`] and [`BracketTable`] types. A bracket
//! table is an ordered list of thresholds, each carrying a withholding
//! percentage, loaded once per region and year.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A single entry of a withholding bracket table.
///
/// # Example
///
/// ```
/// use irpf_engine::models::Bracket;
/// use rust_decimal::Decimal;
///
/// let bracket = Bracket {
///     threshold: Decimal::from(12450),
///     rate: Decimal::from(19),
/// };
/// assert_eq!(bracket.rate, Decimal::from(19));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    /// The annual gross salary the entry is attached to.
    pub threshold: Decimal,
    /// The withholding percentage (e.g., 19 for 19%).
    pub rate: Decimal,
}

impl Bracket {
    /// Creates a bracket from a threshold and a percentage.
    pub fn new(threshold: Decimal, rate: Decimal) -> Self {
        Self { threshold, rate }
    }
}

/// An ordered withholding bracket table.
///
/// Thresholds are strictly increasing and the table always holds at least one
/// entry. The order is part of the lookup contract, so the table is kept as a
/// sequence rather than a map.
///
/// # Example
///
/// ```
/// use irpf_engine::models::{Bracket, BracketTable};
/// use rust_decimal::Decimal;
///
/// let table = BracketTable::new(vec![
///     Bracket::new(Decimal::from(12450), Decimal::from(19)),
///     Bracket::new(Decimal::from(20200), Decimal::from(24)),
/// ])
/// .unwrap();
/// assert_eq!(table.brackets().len(), 2);
///
/// // Thresholds must increase.
/// assert!(BracketTable::new(vec![
///     Bracket::new(Decimal::from(20200), Decimal::from(24)),
///     Bracket::new(Decimal::from(12450), Decimal::from(19)),
/// ])
/// .is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Bracket>", into = "Vec<Bracket>")]
pub struct BracketTable {
    brackets: Vec<Bracket>,
}

impl BracketTable {
    /// Builds a table, checking that it is non-empty, that thresholds are
    /// strictly increasing, and that no rate is negative.
    pub fn new(brackets: Vec<Bracket>) -> EngineResult<Self> {
        if brackets.is_empty() {
            return Err(EngineError::InvalidRateTable {
                message: "bracket table is empty".to_string(),
            });
        }

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO {
                return Err(EngineError::InvalidRateTable {
                    message: format!(
                        "bracket {} has negative rate {}",
                        index, bracket.rate
                    ),
                });
            }
        }

        if let Some(pair) = brackets
            .windows(2)
            .find(|pair| pair[1].threshold <= pair[0].threshold)
        {
            return Err(EngineError::InvalidRateTable {
                message: format!(
                    "threshold {} does not increase on {}",
                    pair[1].threshold, pair[0].threshold
                ),
            });
        }

        Ok(Self { brackets })
    }

    /// Returns the brackets in ascending threshold order.
    pub fn brackets(&self) -> &[Bracket] {
        &self.brackets
    }
}

impl TryFrom<Vec<Bracket>> for BracketTable {
    type Error = EngineError;

    fn try_from(brackets: Vec<Bracket>) -> EngineResult<Self> {
        Self::new(brackets)
    }
}

impl From<BracketTable> for Vec<Bracket> {
    fn from(table: BracketTable) -> Self {
        table.brackets
    }
}

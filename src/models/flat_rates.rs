//! Flat social-contribution rates and the combined rate tables.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::BracketTable;

/// Flat-percentage social contributions withheld from every salary.
///
/// Each field is a percentage (e.g., 4.7 for 4.7%). They are applied to the
/// gross salary independently of the bracket table.
///
/// # Example
///
/// ```
/// use irpf_engine::models::FlatRates;
///
/// let json = r#"{"contingenciasComunes": 4.7, "atur": 1.55, "fp": 0.1}"#;
/// let rates: FlatRates = serde_json::from_str(json).unwrap();
/// assert_eq!(rates.atur.to_string(), "1.55");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRates {
    /// Common contingencies contribution.
    #[serde(alias = "contingenciasComunes")]
    pub contingencias_comunes: Decimal,
    /// Unemployment contribution.
    pub atur: Decimal,
    /// Professional training contribution.
    pub fp: Decimal,
}

impl FlatRates {
    /// Checks that no contribution rate is negative.
    pub fn validate(&self) -> EngineResult<()> {
        let fields = [
            ("contingencias_comunes", self.contingencias_comunes),
            ("atur", self.atur),
            ("fp", self.fp),
        ];

        match fields.iter().find(|(_, value)| *value < Decimal::ZERO) {
            Some((name, value)) => Err(EngineError::InvalidRateTable {
                message: format!("flat rate '{}' is negative: {}", name, value),
            }),
            None => Ok(()),
        }
    }
}

/// The pair of tables loaded for a single region and year.
///
/// Deserialization goes through [`RateTables::new`], so flat rates are
/// validated however the tables are built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRateTables")]
pub struct RateTables {
    /// The ordered withholding brackets.
    pub brackets: BracketTable,
    /// The flat contribution rates.
    pub flat_rates: FlatRates,
}

impl RateTables {
    /// Combines a bracket table with validated flat rates.
    pub fn new(brackets: BracketTable, flat_rates: FlatRates) -> EngineResult<Self> {
        flat_rates.validate()?;
        Ok(Self {
            brackets,
            flat_rates,
        })
    }
}

#[derive(Deserialize)]
struct RawRateTables {
    brackets: BracketTable,
    flat_rates: FlatRates,
}

impl TryFrom<RawRateTables> for RateTables {
    type Error = EngineError;

    fn try_from(raw: RawRateTables) -> EngineResult<Self> {
        Self::new(raw.brackets, raw.flat_rates)
    }
}

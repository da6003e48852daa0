//! Configuration types for the IRPF engine.
//!
//! This module contains the strongly-typed settings structure that is
//! deserialized from `settings.yaml`.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::models::PaymentPeriods;

fn default_rates_dir() -> PathBuf {
    PathBuf::from("rates")
}

/// Engine settings.
///
/// Every field is optional in the settings file and falls back to its
/// default.
///
/// # Example
///
/// ```
/// use irpf_engine::config::EngineSettings;
/// use irpf_engine::models::PaymentPeriods;
///
/// let settings: EngineSettings = serde_yaml::from_str("payment_periods: 12").unwrap();
/// assert_eq!(settings.payment_periods, PaymentPeriods::Twelve);
/// assert_eq!(settings.load_timeout(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Salary payments per year (12 or 14).
    pub payment_periods: PaymentPeriods,
    /// Upper bound on a single rate-table load, in milliseconds.
    pub load_timeout_ms: Option<u64>,
    /// Directory holding `<region>/<year>/` rate tables, relative to the
    /// configuration directory unless absolute.
    pub rates_dir: PathBuf,
}

impl EngineSettings {
    /// Returns the load timeout as a [`Duration`], if one is configured.
    pub fn load_timeout(&self) -> Option<Duration> {
        self.load_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            payment_periods: PaymentPeriods::default(),
            load_timeout_ms: None,
            rates_dir: default_rates_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let settings: EngineSettings = serde_yaml::from_str("{}").unwrap();
        assert_eq!(settings, EngineSettings::default());
        assert_eq!(settings.payment_periods, PaymentPeriods::Fourteen);
        assert_eq!(settings.rates_dir, PathBuf::from("rates"));
    }

    #[test]
    fn test_timeout_is_converted_to_duration() {
        let settings: EngineSettings = serde_yaml::from_str("load_timeout_ms: 1500").unwrap();
        assert_eq!(settings.load_timeout(), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_invalid_payment_periods_fail_to_parse() {
        let result: Result<EngineSettings, _> = serde_yaml::from_str("payment_periods: 13");
        assert!(result.is_err());
    }
}

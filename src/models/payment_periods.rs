//! Salary payment-period configuration.
//!
//! Two divisors are in play when splitting an annual salary: the number of
//! salary disbursements per year ([`PaymentPeriods`], user-configurable) and
//! the fixed number of contribution periods ([`CONTRIBUTION_PERIODS`]). They
//! are independent on purpose; changing one never changes the other.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Number of periods the flat social contributions are spread over.
pub const CONTRIBUTION_PERIODS: u8 = 12;

/// Number of salary disbursements per year.
///
/// # Example
///
/// ```
/// use irpf_engine::models::PaymentPeriods;
///
/// assert_eq!(PaymentPeriods::default(), PaymentPeriods::Fourteen);
/// assert_eq!(PaymentPeriods::try_from(12).unwrap().count(), 12);
/// assert!(PaymentPeriods::try_from(13).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PaymentPeriods {
    /// Twelve monthly payments with the extra payments prorated into them.
    Twelve,
    /// Twelve monthly payments plus two extra payments.
    #[default]
    Fourteen,
}

impl PaymentPeriods {
    /// Returns the number of payments per year.
    pub fn count(self) -> u8 {
        match self {
            PaymentPeriods::Twelve => 12,
            PaymentPeriods::Fourteen => 14,
        }
    }

    /// Returns the number of payments as a divisor.
    pub fn divisor(self) -> Decimal {
        Decimal::from(self.count())
    }
}

impl TryFrom<u8> for PaymentPeriods {
    type Error = EngineError;

    fn try_from(value: u8) -> EngineResult<Self> {
        match value {
            12 => Ok(PaymentPeriods::Twelve),
            14 => Ok(PaymentPeriods::Fourteen),
            other => Err(EngineError::InvalidPaymentPeriods { value: other }),
        }
    }
}

impl From<PaymentPeriods> for u8 {
    fn from(periods: PaymentPeriods) -> Self {
        periods.count()
    }
}

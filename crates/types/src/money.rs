use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A monetary amount in whole major currency units (e.g. whole shillings).
///
/// The payment gateway only accepts whole major units and the backend stores
/// amounts as integers, so this is the one canonical representation used
/// everywhere in the core. Fractional input is truncated toward zero by
/// [`Amount::truncate_from`]; see that method for the policy.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Amount from whole major units.
    pub fn new(major_units: u64) -> Self {
        Self(major_units)
    }

    /// Convert a decimal quantity to whole major units.
    ///
    /// Truncation policy: the fractional part is discarded (truncation toward
    /// zero), so `1234.99` becomes `1234`. Negative input is rejected rather
    /// than truncated to zero.
    pub fn truncate_from(value: Decimal) -> Result<Self, AmountError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(AmountError::Negative(value));
        }
        value
            .trunc()
            .to_u64()
            .map(Amount)
            .ok_or(AmountError::OutOfRange(value))
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    pub fn saturating_add(self, other: Amount) -> Amount {
        Amount(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount(value)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum AmountError {
    #[error("amount must not be negative: {0}")]
    Negative(Decimal),

    #[error("amount exceeds the supported range: {0}")]
    OutOfRange(Decimal),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_truncates_toward_zero() {
        assert_eq!(Amount::truncate_from(dec("1234.99")).unwrap(), Amount::new(1234));
        assert_eq!(Amount::truncate_from(dec("25000.0")).unwrap(), Amount::new(25000));
        assert_eq!(Amount::truncate_from(dec("0.75")).unwrap(), Amount::ZERO);
    }

    #[test]
    fn test_rejects_negative() {
        let err = Amount::truncate_from(dec("-1.00")).unwrap_err();
        assert!(matches!(err, AmountError::Negative(_)));
    }

    #[test]
    fn test_zero_is_not_negative() {
        assert_eq!(Amount::truncate_from(dec("-0.0")).unwrap(), Amount::ZERO);
        assert_eq!(Amount::truncate_from(dec("0")).unwrap(), Amount::ZERO);
    }

    #[test]
    fn test_addition() {
        let a = Amount::new(25_000);
        let b = Amount::new(18_500);
        assert_eq!(a.checked_add(b), Some(Amount::new(43_500)));
        assert_eq!(Amount::new(u64::MAX).checked_add(Amount::new(1)), None);
        assert_eq!(
            Amount::new(u64::MAX).saturating_add(Amount::new(1)),
            Amount::new(u64::MAX)
        );
    }

    #[test]
    fn test_serde_transparent() {
        let amount = Amount::new(25_000);
        assert_eq!(serde_json::to_string(&amount).unwrap(), "25000");
        let back: Amount = serde_json::from_str("25000").unwrap();
        assert_eq!(back, amount);
    }
}

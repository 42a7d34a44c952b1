use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A mobile number in canonical international form: digits only, country
/// prefix, no leading `+`, no national leading zero (`254712345678`).
///
/// This is the only representation ever handed to the payment gateway.
/// Construction goes through [`Msisdn::parse`], which accepts the input
/// shapes users actually type and rejects everything else before any network
/// call is made:
///
/// - `0712345678` / `0112345678`: national form, leading zero replaced by
///   the country prefix
/// - `254712345678`: already canonical, passed through unchanged
/// - `+254712345678`: international form, `+` stripped
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Msisdn(String);

const COUNTRY_PREFIX: &str = "254";
const MIN_INPUT_DIGITS: usize = 10;

impl Msisdn {
    /// Validate and normalize a raw phone number.
    pub fn parse(input: &str) -> Result<Self, PhoneError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PhoneError::Empty);
        }

        let digits = match trimmed.strip_prefix('+') {
            Some(rest) if rest.starts_with(COUNTRY_PREFIX) => rest,
            Some(_) => {
                return Err(PhoneError::UnrecognizedPrefix {
                    prefix: head(trimmed),
                })
            }
            None => trimmed,
        };

        if digits.bytes().any(|b| !b.is_ascii_digit()) {
            return Err(PhoneError::NonNumeric);
        }
        if digits.len() < MIN_INPUT_DIGITS {
            return Err(PhoneError::TooShort {
                length: digits.len(),
            });
        }

        if digits.starts_with("07") || digits.starts_with("01") {
            Ok(Self(format!("{}{}", COUNTRY_PREFIX, &digits[1..])))
        } else if digits.starts_with(COUNTRY_PREFIX) {
            Ok(Self(digits.to_string()))
        } else {
            Err(PhoneError::UnrecognizedPrefix {
                prefix: head(digits),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn head(s: &str) -> String {
    s.chars().take(4).collect()
}

impl fmt::Display for Msisdn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Msisdn {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Msisdn::parse(s)
    }
}

impl TryFrom<String> for Msisdn {
    type Error = PhoneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Msisdn::parse(&value)
    }
}

impl From<Msisdn> for String {
    fn from(value: Msisdn) -> Self {
        value.0
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum PhoneError {
    #[error("phone number is required")]
    Empty,

    #[error("phone number is too short ({length} digits)")]
    TooShort { length: usize },

    #[error("phone number contains non-digit characters")]
    NonNumeric,

    #[error("unrecognized phone number prefix: {prefix}")]
    UnrecognizedPrefix { prefix: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_national_form_is_normalized() {
        assert_eq!(Msisdn::parse("0712345678").unwrap().as_str(), "254712345678");
        assert_eq!(Msisdn::parse("0112345678").unwrap().as_str(), "254112345678");
    }

    #[test]
    fn test_canonical_form_is_unchanged() {
        assert_eq!(Msisdn::parse("254712345678").unwrap().as_str(), "254712345678");
    }

    #[test]
    fn test_plus_prefix_is_stripped() {
        assert_eq!(Msisdn::parse("+254712345678").unwrap().as_str(), "254712345678");
    }

    #[test]
    fn test_short_input_is_rejected() {
        assert_eq!(
            Msisdn::parse("12345"),
            Err(PhoneError::TooShort { length: 5 })
        );
    }

    #[test]
    fn test_empty_and_whitespace_rejected() {
        assert_eq!(Msisdn::parse(""), Err(PhoneError::Empty));
        assert_eq!(Msisdn::parse("   "), Err(PhoneError::Empty));
    }

    #[test]
    fn test_unrecognized_prefix_rejected() {
        assert!(matches!(
            Msisdn::parse("0812345678"),
            Err(PhoneError::UnrecognizedPrefix { .. })
        ));
        assert!(matches!(
            Msisdn::parse("+44712345678"),
            Err(PhoneError::UnrecognizedPrefix { .. })
        ));
    }

    #[test]
    fn test_non_digits_rejected() {
        assert_eq!(Msisdn::parse("07123a5678"), Err(PhoneError::NonNumeric));
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        assert_eq!(
            Msisdn::parse("  0712345678 ").unwrap().as_str(),
            "254712345678"
        );
    }

    #[test]
    fn test_serde_round_trip_enforces_validation() {
        let msisdn: Msisdn = serde_json::from_str("\"0712345678\"").unwrap();
        assert_eq!(msisdn.as_str(), "254712345678");
        assert_eq!(serde_json::to_string(&msisdn).unwrap(), "\"254712345678\"");

        let bad: Result<Msisdn, _> = serde_json::from_str("\"12345\"");
        assert!(bad.is_err());
    }
}

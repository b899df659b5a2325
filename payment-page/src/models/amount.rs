use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount must be a number, got {0:?}")]
    NotANumber(String),

    #[error("amount must be a finite number")]
    NotFinite,
}

/// A payment amount in whole currency units.
///
/// Always finite and non-negative: input is coerced with its absolute value.
/// `Display` renders the bare number (`100`, `99.5`) with no currency symbol
/// and no grouping, which is the form the UPI `am` field expects.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(f64);

impl Amount {
    pub const ZERO: Amount = Amount(0.0);

    /// Amount shown on a fresh page.
    pub const DEFAULT: Amount = Amount(100.0);

    pub fn new(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::NotFinite);
        }
        Ok(Self(value.abs()))
    }

    /// Parse user input. Blank input reads as zero.
    pub fn parse(input: &str) -> Result<Self, AmountError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self::ZERO);
        }

        let value: f64 = trimmed
            .parse()
            .map_err(|_| AmountError::NotANumber(trimmed.to_string()))?;
        Self::new(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Amount in the smallest currency subdivision (paise for INR).
    pub fn to_minor_units(self) -> u64 {
        (self.0 * 100.0).round() as u64
    }
}

impl TryFrom<f64> for Amount {
    type Error = AmountError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_input_is_coerced() {
        assert_eq!(Amount::parse("-250").unwrap().value(), 250.0);
        assert_eq!(Amount::new(-0.0).unwrap().to_string(), "0");
    }

    #[test]
    fn blank_input_is_zero() {
        assert_eq!(Amount::parse("  ").unwrap(), Amount::ZERO);
    }

    #[test]
    fn rejects_garbage_and_non_finite_values() {
        assert_eq!(
            Amount::parse("12abc"),
            Err(AmountError::NotANumber("12abc".to_string()))
        );
        assert_eq!(Amount::parse("inf"), Err(AmountError::NotFinite));
        assert_eq!(Amount::new(f64::NAN), Err(AmountError::NotFinite));
    }

    #[test]
    fn display_has_no_grouping_or_trailing_zeroes() {
        assert_eq!(Amount::new(100.0).unwrap().to_string(), "100");
        assert_eq!(Amount::new(1234567.0).unwrap().to_string(), "1234567");
        assert_eq!(Amount::new(99.5).unwrap().to_string(), "99.5");
    }

    #[test]
    fn minor_units_round_to_nearest_paisa() {
        assert_eq!(Amount::new(250.0).unwrap().to_minor_units(), 25000);
        assert_eq!(Amount::new(19.99).unwrap().to_minor_units(), 1999);
        assert_eq!(Amount::new(0.1 + 0.2).unwrap().to_minor_units(), 30);
    }

    #[test]
    fn deserializes_from_plain_numbers_only() {
        assert_eq!(serde_json::from_str::<Amount>("-42.5").unwrap().value(), 42.5);
        assert!(serde_json::from_str::<Amount>("\"100\"").is_err());
    }
}

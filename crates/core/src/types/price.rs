//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a valid decimal number.
    #[error("price is not a valid number: {0}")]
    Invalid(String),
    /// The price is below zero.
    #[error("price cannot be negative")]
    Negative,
}

/// A non-negative product price.
///
/// Backed by [`rust_decimal::Decimal`] so prices never accumulate binary
/// floating-point error. Presentation formatting (currency symbol, decimal
/// separator) is a view concern and not part of this type.
///
/// ## Parsing
///
/// User input accepts both `.` and `,` as the decimal separator:
///
/// ```
/// use compras_core::Price;
/// use rust_decimal::Decimal;
///
/// let dot = Price::parse("49.90").unwrap();
/// let comma = Price::parse("49,90").unwrap();
/// assert_eq!(dot, comma);
/// assert!(Price::parse("abc").is_err());
/// assert!(Price::parse("-5").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a price from an already-validated decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// Parse a price from user input.
    ///
    /// Both `.` and `,` are accepted as the decimal separator, matching how
    /// users in comma-decimal locales type prices.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, not a number, or negative.
    pub fn parse(input: &str) -> Result<Self, PriceError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        let normalized = trimmed.replace(',', ".");
        let amount = Decimal::from_str(&normalized)
            .map_err(|_| PriceError::Invalid(trimmed.to_owned()))?;

        Self::new(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

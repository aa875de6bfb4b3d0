//! Discount percentage type.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`DiscountPercent`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum DiscountPercentError {
    /// The value is below zero.
    #[error("discount percentage cannot be negative")]
    Negative,
    /// The value is above 100.
    #[error("discount percentage cannot exceed 100")]
    AboveFullPrice,
}

/// A discount expressed as a percentage of a base price.
///
/// ## Constraints
///
/// - Value must lie in the closed range `[0, 100]`
///
/// ## Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use tamarind_core::DiscountPercent;
///
/// assert!(DiscountPercent::new(Decimal::from(10)).is_ok());
/// assert!(DiscountPercent::new(Decimal::from(100)).is_ok());
///
/// assert!(DiscountPercent::new(Decimal::from(-1)).is_err());
/// assert!(DiscountPercent::new(Decimal::from(101)).is_err());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct DiscountPercent(Decimal);

impl DiscountPercent {
    /// No discount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Construct a `DiscountPercent` from a decimal value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative or above 100.
    pub fn new(value: Decimal) -> Result<Self, DiscountPercentError> {
        if value < Decimal::ZERO {
            return Err(DiscountPercentError::Negative);
        }

        if value > Decimal::ONE_HUNDRED {
            return Err(DiscountPercentError::AboveFullPrice);
        }

        Ok(Self(value))
    }

    /// Returns the percentage as a decimal in `[0, 100]`.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Returns the fraction of the base price taken off (`percent / 100`).
    #[must_use]
    pub fn fraction_off(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }
}

impl fmt::Display for DiscountPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<Decimal> for DiscountPercent {
    type Error = DiscountPercentError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

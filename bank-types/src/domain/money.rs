//! Signed decimal money value.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Signed amount of money in kronor.
///
/// Balances may go negative (credit accounts), so unlike a transfer amount
/// this type carries no sign restriction. Use [`Money::positive`] where a
/// caller-supplied amount must be strictly greater than zero.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero kronor.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Wraps a decimal amount without validation.
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Creates a Money value from whole currency units.
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// Creates a Money value that must be strictly positive.
    pub fn positive(amount: Decimal) -> Result<Self, DomainError> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::NonPositiveAmount);
        }
        Ok(Self(amount))
    }

    /// Returns the underlying decimal amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Checked addition.
    pub fn checked_add(&self, other: Money) -> Result<Money, DomainError> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or(DomainError::Overflow)
    }

    /// Checked subtraction. The result may be negative.
    pub fn checked_sub(&self, other: Money) -> Result<Money, DomainError> {
        self.0
            .checked_sub(other.0)
            .map(Money)
            .ok_or(DomainError::Overflow)
    }

    /// Multiplies by a rate or factor (e.g. `0.024` or `1.02`).
    pub fn checked_scale(&self, factor: Decimal) -> Result<Money, DomainError> {
        self.0
            .checked_mul(factor)
            .map(Money)
            .ok_or(DomainError::Overflow)
    }

    /// Returns the negated amount.
    pub fn negate(&self) -> Money {
        Money(-self.0)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "{:.2} kr", rounded)
    }
}

//! Fixed-point money type.
//!
//! [`Money`] wraps a [`Decimal`] so that every salary, deduction and budget
//! amount in the engine is exact. Full precision is kept through every
//! intermediate step; rounding happens only at display time (2 decimal
//! places, half-up) or where a caller asks for a specific scale.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Number of decimal places used when money is displayed.
pub const DISPLAY_SCALE: u32 = 2;

/// A sign-aware, exact monetary amount.
///
/// Addition, subtraction and `Sum` panic on overflow, as the [`Decimal`]
/// operators do. Engine code uses the `checked_*` methods, which
/// report overflow as [`EngineError::InvalidOperation`].
///
/// # Example
///
/// ```
/// use payroll_engine::money::Money;
/// use std::str::FromStr;
///
/// let base = Money::from_str("3200.00").unwrap();
/// let bonus = Money::from_str("150.505").unwrap();
/// assert_eq!((base + bonus).to_string(), "3350.51");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero money.
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Creates money from a mantissa and scale, e.g. `Money::new(320000, 2)` is 3200.00.
    pub fn new(num: i64, scale: u32) -> Self {
        Money(Decimal::new(num, scale))
    }

    /// Wraps an existing decimal amount.
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns the underlying decimal amount at full precision.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is below zero.
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Returns true if the amount is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Rounds to the display scale using round-half-up.
    pub fn round_display(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Adds two amounts, failing on overflow instead of panicking.
    pub fn checked_add(self, other: Money) -> EngineResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or_else(|| overflow("addition"))
    }

    /// Subtracts `other`, failing on overflow instead of panicking.
    pub fn checked_sub(self, other: Money) -> EngineResult<Money> {
        self.0
            .checked_sub(other.0)
            .map(Money)
            .ok_or_else(|| overflow("subtraction"))
    }

    /// Multiplies by a plain factor such as hours or a rate.
    pub fn checked_mul(self, factor: Decimal) -> EngineResult<Money> {
        self.0
            .checked_mul(factor)
            .map(Money)
            .ok_or_else(|| overflow("multiplication"))
    }

    /// Divides by a plain divisor, keeping full precision.
    ///
    /// A zero divisor yields [`EngineError::InvalidOperation`].
    pub fn checked_div(self, divisor: Decimal) -> EngineResult<Money> {
        if divisor.is_zero() {
            return Err(division_by_zero());
        }
        self.0
            .checked_div(divisor)
            .map(Money)
            .ok_or_else(|| overflow("division"))
    }

    /// Returns `self / other` rounded half-up to `scale` decimal places.
    ///
    /// A zero divisor yields [`EngineError::InvalidOperation`].
    ///
    /// ```
    /// use payroll_engine::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let ratio = Money::new(250, 0).ratio_to(Money::new(1000, 0), 4).unwrap();
    /// assert_eq!(ratio, Decimal::new(2500, 4));
    /// assert!(Money::new(250, 0).ratio_to(Money::ZERO, 4).is_err());
    /// ```
    pub fn ratio_to(self, other: Money, scale: u32) -> EngineResult<Decimal> {
        if other.is_zero() {
            return Err(division_by_zero());
        }
        let ratio = self
            .0
            .checked_div(other.0)
            .ok_or_else(|| overflow("division"))?;
        Ok(ratio.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero))
    }
}

fn overflow(operation: &str) -> EngineError {
    EngineError::InvalidOperation {
        message: format!("monetary {} overflowed", operation),
    }
}

fn division_by_zero() -> EngineError {
    EngineError::InvalidOperation {
        message: "division by zero".to_string(),
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.round_display().0)
    }
}

impl FromStr for Money {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Money)
            .map_err(|e| EngineError::validation("amount", format!("'{}' is not a number: {}", s, e)))
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

/// # Panics
///
/// Panics on overflow. Use [`Money::checked_add`] where that can happen.
impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

/// # Panics
///
/// Panics on overflow.
impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

/// # Panics
///
/// Panics on overflow. Use [`Money::checked_sub`] where that can happen.
impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

/// # Panics
///
/// Panics if the running total overflows.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + *m)
    }
}

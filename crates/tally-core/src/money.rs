//! # Money Module
//!
//! Provides the `Money` type for handling ringgit amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floating point:                                                   │
//! │    10.10 + 5.20 = 15.299999999999999  ❌                                │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Sen                                              │
//! │    1010 sen + 520 sen = 1530 sen  → RM15.30                             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! The persisted blobs store amounts as plain decimal numbers of ringgit
//! (`10.5`), matching data written by the web version of the app.
//! Conversion happens only at the serde boundary; all arithmetic is in sen.
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//!
//! let price = Money::from_sen(1099); // RM10.99
//! let total = price + Money::from_sen(500);
//! assert_eq!(total.to_string(), "RM15.99");
//! ```

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use crate::types::TaxRate;
use crate::CURRENCY_SYMBOL;

// =============================================================================
// Money Type
// =============================================================================

/// Largest magnitude accepted from decimal input: RM1,000,000,000.00.
///
/// Keyed entries top out far below this; the bound applies to stored
/// documents so that summing a whole meal stays within `i64`.
pub const MAX_AMOUNT_SEN: i64 = 100_000_000_000;

/// A monetary value in sen (1/100 ringgit).
///
/// ## Where Money is Used
/// ```text
/// Entry "5.5" ──► EntryBuffer::parse() ──► items: Vec<Money>
///                                              │
///                                              ▼
///                          compute_totals ──► Totals { subtotal, sst, svc, grand }
///                                              │
///                                              ▼
///                                    Displayed as "RM5.50"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from sen.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let price = Money::from_sen(1099); // RM10.99
    /// assert_eq!(price.sen(), 1099);
    /// ```
    #[inline]
    pub const fn from_sen(sen: i64) -> Self {
        Money(sen)
    }

    /// Converts a decimal ringgit amount, rounding half away from zero to
    /// the nearest sen.
    ///
    /// Returns `None` for NaN, infinities and magnitudes above
    /// [`MAX_AMOUNT_SEN`].
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(10.5), Some(Money::from_sen(1050)));
    /// assert_eq!(Money::from_decimal(0.93), Some(Money::from_sen(93)));
    /// assert_eq!(Money::from_decimal(f64::NAN), None);
    /// assert_eq!(Money::from_decimal(9.2e16), None);
    /// ```
    pub fn from_decimal(ringgit: f64) -> Option<Self> {
        if !ringgit.is_finite() {
            return None;
        }
        let sen = (ringgit * 100.0).round();
        if sen.abs() > MAX_AMOUNT_SEN as f64 {
            return None;
        }
        Some(Money(sen as i64))
    }

    /// Returns the value as decimal ringgit (for serialization only).
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in sen.
    #[inline]
    pub const fn sen(&self) -> i64 {
        self.0
    }

    /// Returns the whole ringgit portion.
    #[inline]
    pub const fn ringgit(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the sen portion (always 0-99).
    #[inline]
    pub const fn sen_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Calculates a percentage surcharge, rounding half up to the sen.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`.
    /// The +5000 provides rounding (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    /// use tally_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_sen(1550); // RM15.50
    /// let sst = subtotal.calculate_tax(TaxRate::from_bps(600)); // 6%
    /// assert_eq!(sst.sen(), 93);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 so that large amounts cannot overflow the product
        let tax_sen = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_sen(i64::try_from(tax_sen).unwrap_or(i64::MAX))
    }

    /// Formats the amount with an explicit currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::from_sen(1234).format_with("RM"), "RM12.34");
    /// assert_eq!(Money::from_sen(-5).format_with("$"), "-$0.05");
    /// ```
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.ringgit().abs(),
            self.sen_part()
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders like the display layer: `RM12.34`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(CURRENCY_SYMBOL))
    }
}

/// Saturates at the `i64` bounds instead of overflowing.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ringgit = f64::deserialize(deserializer)?;
        Money::from_decimal(ringgit)
            .ok_or_else(|| de::Error::custom(format!("amount {ringgit} is out of range")))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

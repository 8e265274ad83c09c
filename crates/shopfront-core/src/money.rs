//! # Money Module
//!
//! Provides the `Money` type for handling prices, discounts and totals.
//!
//! ## Integer Minor Units
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Backend JSON          Client memory            Display                 │
//! │  ────────────          ─────────────            ───────                 │
//! │  "price": 199.5  ───►  Money(19950)   ───►  "₹199.50"                   │
//! │                                                                         │
//! │  All arithmetic (line totals, subtotal, discount) is done on the        │
//! │  integer and saturates at the i64 bounds. Floats only appear at the     │
//! │  JSON boundary.                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopfront_core::money::Money;
//!
//! let price = Money::from_cents(19950); // 199.50
//! let line = price * 2;                 // 399.00
//! assert_eq!(line.cents(), 39900);
//! assert_eq!(Money::parse("199.5"), Some(price));
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (paise for INR).
///
/// ## Wire Format
/// The backend speaks plain JSON numbers in major units, so `Serialize`
/// writes `199.5` and `Deserialize` accepts any JSON number, rounding to the
/// nearest minor unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` is -5.50, not -4.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Converts a decimal amount in major units, rounding to the nearest
    /// minor unit. Non-finite input becomes zero.
    pub fn from_decimal(amount: f64) -> Self {
        if !amount.is_finite() {
            return Money::zero();
        }
        Money((amount * 100.0).round() as i64)
    }

    /// Parses user-entered decimal text such as `"199"`, `"199.5"` or
    /// `"-3.25"`.
    ///
    /// More than two fraction digits round half up on the third digit.
    /// Returns `None` for anything that is not a plain decimal number.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// assert_eq!(Money::parse(" 12.5 "), Some(Money::from_cents(1250)));
    /// assert_eq!(Money::parse(".99"), Some(Money::from_cents(99)));
    /// assert_eq!(Money::parse("1.005"), Some(Money::from_cents(101)));
    /// assert_eq!(Money::parse("12abc"), None);
    /// ```
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let (negative, body) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input.strip_prefix('+').unwrap_or(input)),
        };

        let (whole, frac) = match body.split_once('.') {
            Some((w, f)) => (w, f),
            None => (body, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return None;
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return None;
        }

        let major: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };

        let digits: Vec<i64> = frac
            .chars()
            .take(3)
            .map(|c| i64::from(c as u8 - b'0'))
            .collect();
        let tenths = digits.first().copied().unwrap_or(0);
        let hundredths = digits.get(1).copied().unwrap_or(0);
        let round_up = digits.get(2).is_some_and(|&d| d >= 5);

        let cents = major
            .checked_mul(100)?
            .checked_add(tenths * 10 + hundredths + i64::from(round_up))?;

        Some(Money(if negative { -cents } else { cents }))
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the value in major units as a float, for the wire only.
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Rounds to whole major units, half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(19950).round_major(), 200);
    /// assert_eq!(Money::from_cents(19949).round_major(), 199);
    /// ```
    pub const fn round_major(&self) -> i64 {
        if self.0 >= 0 {
            self.0.saturating_add(50) / 100
        } else {
            self.0.saturating_sub(50) / 100
        }
    }

    /// Returns zero.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is less than zero.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Expresses `self` as a percentage of `total`, with two decimals.
    ///
    /// Used for the informational "Discount %" line. A zero or negative
    /// total yields `"0.00"`.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// let discount = Money::from_cents(3000);
    /// let subtotal = Money::from_cents(25000);
    /// assert_eq!(discount.percentage_of(subtotal), "12.00");
    /// ```
    pub fn percentage_of(&self, total: Money) -> String {
        if total.0 <= 0 {
            return "0.00".to_string();
        }
        // Hundredths of a percent, rounded half away from zero
        let scaled = self.0 as i128 * 10_000;
        let total = total.0 as i128;
        let bps = if scaled >= 0 {
            (scaled + total / 2) / total
        } else {
            (scaled - total / 2) / total
        };
        let sign = if bps < 0 { "-" } else { "" };
        let bps = bps.abs();
        format!("{}{}.{:02}", sign, bps / 100, bps % 100)
    }

    /// Formats with a currency symbol and two decimals, e.g. `₹199.00`.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-550).format_with("₹"), "-₹5.50");
    /// ```
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}{}", sign, symbol, self.abs_plain())
    }

    fn abs_plain(&self) -> String {
        format!("{}.{:02}", self.major().abs(), self.cents_part())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal rendering without a currency symbol (`199.00`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}", sign, self.abs_plain())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        if !amount.is_finite() {
            return Err(serde::de::Error::custom("amount must be a finite number"));
        }
        Ok(Money::from_decimal(amount))
    }
}

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
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by a quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(19900).to_string(), "199.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(25000).format_with("₹"), "₹250.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("199"), Some(Money::from_cents(19900)));
        assert_eq!(Money::parse("199.5"), Some(Money::from_cents(19950)));
        assert_eq!(Money::parse("0.01"), Some(Money::from_cents(1)));
        assert_eq!(Money::parse("-3.25"), Some(Money::from_cents(-325)));
        assert_eq!(Money::parse("2.999"), Some(Money::from_cents(300)));
        assert_eq!(Money::parse(""), None);
        assert_eq!(Money::parse("."), None);
        assert_eq!(Money::parse("abc"), None);
        assert_eq!(Money::parse("1.2.3"), None);
    }

    #[test]
    fn test_wire_format() {
        let price: Money = serde_json::from_str("199.5").unwrap();
        assert_eq!(price.cents(), 19950);
        assert_eq!(serde_json::to_string(&price).unwrap(), "199.5");

        let whole: Money = serde_json::from_str("250").unwrap();
        assert_eq!(whole.cents(), 25000);

        // Float noise from the backend rounds to the nearest paisa
        let noisy: Money = serde_json::from_str("0.30000000000000004").unwrap();
        assert_eq!(noisy.cents(), 30);
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_cents(i64::MAX / 2);

        assert_eq!((huge * 3).cents(), i64::MAX);
        assert_eq!(huge.multiply_quantity(i64::from(u32::MAX)).cents(), i64::MAX);
        assert_eq!((huge + huge + huge).cents(), i64::MAX);
        assert_eq!((Money::from_cents(i64::MIN) - huge).cents(), i64::MIN);

        let mut total = huge;
        total += huge;
        total += huge;
        assert_eq!(total.cents(), i64::MAX);
        assert_eq!(Money::from_cents(i64::MAX).round_major(), i64::MAX / 100);
    }

    #[test]
    fn test_percentage_of() {
        let sub = Money::from_cents(25000);
        assert_eq!(Money::from_cents(3000).percentage_of(sub), "12.00");
        assert_eq!(Money::from_cents(1).percentage_of(Money::from_cents(300)), "0.33");
        assert_eq!(Money::from_cents(100).percentage_of(Money::zero()), "0.00");
    }

    #[test]
    fn test_round_major() {
        assert_eq!(Money::from_cents(19900).round_major(), 199);
        assert_eq!(Money::from_cents(19950).round_major(), 200);
        assert_eq!(Money::from_cents(49).round_major(), 0);
    }
}

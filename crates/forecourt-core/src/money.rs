//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A shift summary adds dozens of payment columns; any drift shows up    │
//! │  as a phantom shortage that the dealer will chase for hours.           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹14,500.00 is stored as 1_450_000 paise (i64)                        │
//! │    Sums are exact, shortage = calculated − actual is exact             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use forecourt_core::money::Money;
//!
//! // Create from paise (preferred)
//! let cash = Money::from_paise(500_000); // ₹5,000.00
//!
//! // Arithmetic operations
//! let upi = Money::from_paise(900_000);
//! let actual = cash + upi;               // ₹14,000.00
//! assert_eq!(actual.paise(), 1_400_000);
//!
//! // NEVER construct from floats - no such method exists.
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in paise (the smallest currency unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: Shortage/excess math needs negative values
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// Every rupee amount in the system flows through this type: payment
/// columns on a reading, product rates, invoice values, and the
/// calculated/actual proceeds that a shift summary compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    ///
    /// ## Example
    /// ```rust
    /// use forecourt_core::money::Money;
    ///
    /// let rate = Money::from_paise(10_000); // ₹100.00 per litre
    /// assert_eq!(rate.paise(), 10_000);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use forecourt_core::money::Money;
    ///
    /// let rate = Money::from_rupees(100);
    /// assert_eq!(rate.paise(), 10_000);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Parses rupee text from a form field, treating blank or unparseable
    /// input as zero.
    ///
    /// Persisted numeric fields arrive as text from form submissions. The
    /// boundary parses defensively so the pure functions stay strictly
    /// numeric-typed; an attendant leaving the UPI column blank means zero
    /// UPI sales, not an error.
    ///
    /// ## Example
    /// ```rust
    /// use forecourt_core::money::Money;
    ///
    /// assert_eq!(Money::parse_lenient("5000").paise(), 500_000);
    /// assert_eq!(Money::parse_lenient("12.5").paise(), 1_250);
    /// assert_eq!(Money::parse_lenient(""), Money::zero());
    /// assert_eq!(Money::parse_lenient("n/a"), Money::zero());
    /// ```
    pub fn parse_lenient(input: &str) -> Self {
        Money(parse_scaled(input, 100).unwrap_or(0))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and debugging. Use frontend formatting for actual UI
/// display to handle digit grouping properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Negation (shortage ↔ excess sign flips in display code).
impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Summation over payment columns and per-attendant folds.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Shared Fixed-Point Parsing
// =============================================================================

/// Parses decimal text into a scaled integer (e.g. "12.5" at scale 100 → 1250).
///
/// Accepts an optional leading sign, truncates extra fractional digits, and
/// pads missing ones. Returns `None` for blank or non-numeric input; the
/// lenient wrappers on each value type map that to zero.
pub(crate) fn parse_scaled(input: &str, scale: i64) -> Option<i64> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    let (negative, s) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !frac_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let int_value: i64 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().ok()?
    };

    // Number of fractional digits the scale carries (100 → 2, 1000 → 3)
    let mut digits = 0u32;
    let mut remaining = scale;
    while remaining > 1 {
        remaining /= 10;
        digits += 1;
    }

    let mut frac_value: i64 = 0;
    let mut consumed = 0u32;
    for b in frac_part.bytes().take(digits as usize) {
        frac_value = frac_value * 10 + i64::from(b - b'0');
        consumed += 1;
    }
    while consumed < digits {
        frac_value *= 10;
        consumed += 1;
    }

    let value = int_value.checked_mul(scale)?.checked_add(frac_value)?;
    Some(if negative { -value } else { value })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(1_450_000);
        assert_eq!(money.paise(), 1_450_000);
        assert_eq!(money.rupees(), 14_500);
        assert_eq!(money.paise_part(), 0);
    }

    #[test]
    fn test_from_rupees() {
        assert_eq!(Money::from_rupees(100).paise(), 10_000);
        assert_eq!(Money::from_rupees(-5).paise(), -500);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_paise(1099)), "₹10.99");
        assert_eq!(format!("{}", Money::from_paise(500)), "₹5.00");
        assert_eq!(format!("{}", Money::from_paise(-550)), "-₹5.50");
        assert_eq!(format!("{}", Money::from_paise(0)), "₹0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        assert_eq!((-a).paise(), -1000);

        let mut acc = Money::zero();
        acc += a;
        acc -= b;
        assert_eq!(acc.paise(), 500);
    }

    #[test]
    fn test_sum() {
        let columns = [
            Money::from_paise(500_000),
            Money::zero(),
            Money::from_paise(900_000),
            Money::zero(),
        ];
        let total: Money = columns.into_iter().sum();
        assert_eq!(total.paise(), 1_400_000);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_paise(100).is_positive());
        assert!(Money::from_paise(-100).is_negative());
        assert_eq!(Money::from_paise(-100).abs().paise(), 100);
    }

    #[test]
    fn test_parse_lenient_valid() {
        assert_eq!(Money::parse_lenient("5000").paise(), 500_000);
        assert_eq!(Money::parse_lenient("5000.25").paise(), 500_025);
        assert_eq!(Money::parse_lenient("12.5").paise(), 1_250);
        assert_eq!(Money::parse_lenient(".75").paise(), 75);
        assert_eq!(Money::parse_lenient("-3.25").paise(), -325);
        assert_eq!(Money::parse_lenient(" 42 ").paise(), 4_200);
        // Extra fractional digits are truncated, not rounded
        assert_eq!(Money::parse_lenient("1.999").paise(), 199);
    }

    #[test]
    fn test_parse_lenient_garbage_is_zero() {
        assert_eq!(Money::parse_lenient(""), Money::zero());
        assert_eq!(Money::parse_lenient("   "), Money::zero());
        assert_eq!(Money::parse_lenient("n/a"), Money::zero());
        assert_eq!(Money::parse_lenient("12,50"), Money::zero());
        assert_eq!(Money::parse_lenient("."), Money::zero());
        assert_eq!(Money::parse_lenient("--5"), Money::zero());
    }
}

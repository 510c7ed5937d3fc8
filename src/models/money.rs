//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) so every projection, split and
//! allocation is exact integer arithmetic. Provides safe arithmetic
//! operations, rounding helpers and formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use cashplan::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Clamp negative amounts to zero
    pub fn non_negative(self) -> Self {
        self.max(Self::zero())
    }

    /// Divide by a positive count, rounding up (toward positive infinity)
    ///
    /// Used wherever under-allocating because of rounding is not acceptable.
    pub fn div_ceil(self, divisor: i64) -> Self {
        debug_assert!(divisor > 0, "divisor must be positive");
        let quotient = self.0 / divisor;
        if self.0 % divisor > 0 {
            Self(quotient + 1)
        } else {
            Self(quotient)
        }
    }

    /// Divide by a positive count, rounding down (toward negative infinity)
    pub fn div_floor(self, divisor: i64) -> Self {
        debug_assert!(divisor > 0, "divisor must be positive");
        Self(self.0.div_euclid(divisor))
    }

    /// This amount as a whole percentage of a positive `total`, rounded
    /// half up
    pub fn whole_percent_of(self, total: Money) -> i64 {
        debug_assert!(total.is_positive(), "total must be positive");
        let numerator = self.0 as i128 * 200 + total.0 as i128;
        numerator.div_euclid(total.0 as i128 * 2) as i64
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "10", "R$ 1.234,56",
    /// "1234,5". When both separators appear, the rightmost one is the
    /// decimal separator. A single separator followed by exactly three
    /// digits groups thousands ("R$ 1.234" is 1234.00), and a repeated
    /// separator always groups. More than two decimal digits is an error.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        let (negative, rest) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped.trim_start()),
            None => (false, s),
        };

        // Drop any currency symbol ("$", "R$", "€") ahead of the digits
        let rest = rest.trim_start_matches(|c: char| !c.is_ascii_digit() && c != ',' && c != '.');
        let rest = rest.trim();
        if rest.is_empty() {
            return Err(invalid());
        }

        let last_comma = rest.rfind(',');
        let last_dot = rest.rfind('.');
        let groups_thousands = |pos: usize, sep: char| {
            rest.matches(sep).count() > 1
                || (rest.len() - pos - 1 == 3 && !rest.starts_with('0') && pos > 0)
        };
        let decimal_pos = match (last_comma, last_dot) {
            (Some(c), Some(d)) => Some(c.max(d)),
            (Some(c), None) if !groups_thousands(c, ',') => Some(c),
            (None, Some(d)) if !groups_thousands(d, '.') => Some(d),
            _ => None,
        };

        let (whole_str, frac_str) = match decimal_pos {
            Some(pos) => (&rest[..pos], &rest[pos + 1..]),
            None => (rest, ""),
        };

        let whole_digits: String = whole_str.chars().filter(|c| *c != '.' && *c != ',').collect();
        if !whole_digits.chars().all(|c| c.is_ascii_digit())
            || !frac_str.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let units: i64 = if whole_digits.is_empty() {
            0
        } else {
            whole_digits.parse().map_err(|_| invalid())?
        };

        let cents: i64 = match frac_str.len() {
            0 => 0,
            1 => frac_str.parse::<i64>().map_err(|_| invalid())? * 10,
            2 => frac_str.parse().map_err(|_| invalid())?,
            _ => return Err(invalid()),
        };

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -total } else { total }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.units().abs(), self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, self.units(), self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

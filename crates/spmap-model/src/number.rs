//! Mixed integer/decimal quantities.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::ParseValueError;

/// A quantity that is an integer when the source text has no decimal
/// point, and an arbitrary-precision decimal otherwise.
///
/// Forest acreage and resource-pile quantities have historically been
/// written both ways; preserving the distinction keeps output byte-stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Number {
    Whole(i64),
    Decimal(Decimal),
}

impl Number {
    /// Whether this equals the given integer, regardless of representation.
    pub fn is_integer(self, value: i64) -> bool {
        match self {
            Number::Whole(n) => n == value,
            Number::Decimal(d) => d == Decimal::from(value),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Whole(value)
    }
}

impl FromStr for Number {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Tolerate grouping separators in hand-edited files.
        let cleaned: String = s.chars().filter(|&c| c != ',').collect();
        if cleaned.contains('.') {
            cleaned
                .parse::<Decimal>()
                .map(Number::Decimal)
                .map_err(|_| ParseValueError::new("number", s, "an integer or decimal"))
        } else {
            cleaned
                .parse::<i64>()
                .map(Number::Whole)
                .map_err(|_| ParseValueError::new("number", s, "an integer or decimal"))
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Whole(n) => write!(f, "{}", n),
            Number::Decimal(d) => write!(f, "{}", d),
        }
    }
}

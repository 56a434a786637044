//! Currency amounts in minor units
//!
//! Amounts arrive as decimal strings in major units ("9.99") and are stored
//! as an integer count of cents (999). The conversion is done with exact
//! decimal arithmetic so that no binary floating point ever touches money.

use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Number of minor units in one major unit
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Reasons a major-unit string cannot become a stored amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    /// The input is not a decimal number, or too large to store
    #[error("amount is not a decimal number")]
    NotANumber,

    /// The input rounds to zero cents or below
    #[error("amount must be greater than zero")]
    NotPositive,
}

/// A positive amount of money stored as whole cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Cents(i64);

impl Cents {
    /// Wrap a raw cent count. Returns `None` unless it is strictly positive.
    pub fn new(cents: i64) -> Option<Self> {
        (cents > 0).then_some(Self(cents))
    }

    /// Parse a major-unit decimal string and convert it to cents.
    ///
    /// The value is multiplied by 100 and rounded half-to-even at the cent
    /// boundary, so `"9.99"` becomes `999` and `"0.125"` becomes `12`.
    ///
    /// # Errors
    ///
    /// [`AmountError::NotANumber`] if the string is not a decimal (optional
    /// sign, at most 15 integer digits and 32 fraction digits, optional
    /// exponent of at most two digits) or does not fit in `i64` cents, and
    /// [`AmountError::NotPositive`] if the rounded result is not above zero.
    pub fn from_major_units(input: &str) -> Result<Self, AmountError> {
        let input = input.trim();
        if !decimal_pattern().is_match(input) {
            return Err(AmountError::NotANumber);
        }

        let major = BigDecimal::from_str(input).map_err(|_| AmountError::NotANumber)?;
        let minor = (major * BigDecimal::from(MINOR_UNITS_PER_MAJOR))
            .with_scale_round(0, RoundingMode::HalfEven);

        // A positive exponent can still push the value past i64
        let cents = minor.to_i64().ok_or(AmountError::NotANumber)?;
        Self::new(cents).ok_or(AmountError::NotPositive)
    }

    /// The raw cent count
    pub fn get(self) -> i64 {
        self.0
    }

    /// Render the amount in major units with two decimals, e.g. `"9.99"`
    pub fn to_major_string(self) -> String {
        format!(
            "{}.{:02}",
            self.0 / MINOR_UNITS_PER_MAJOR,
            self.0 % MINOR_UNITS_PER_MAJOR
        )
    }
}

impl TryFrom<i64> for Cents {
    type Error = AmountError;

    fn try_from(cents: i64) -> Result<Self, Self::Error> {
        Self::new(cents).ok_or(AmountError::NotPositive)
    }
}

impl From<Cents> for i64 {
    fn from(cents: Cents) -> Self {
        cents.0
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.to_major_string())
    }
}

fn decimal_pattern() -> &'static Regex {
    static DECIMAL_REGEX: OnceLock<Regex> = OnceLock::new();
    DECIMAL_REGEX.get_or_init(|| {
        Regex::new(r"^[+-]?(?:[0-9]{1,15}(?:\.[0-9]{0,32})?|\.[0-9]{1,32})(?:[eE][+-]?[0-9]{1,2})?$").unwrap()
    })
}

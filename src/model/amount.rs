//! Amount type for handling the monetary value typed into an expense.
//!
//! Expense amounts are kept as the text the user entered. This module provides the `Amount` type
//! which wraps `Decimal` and parses that text, tolerating a leading currency symbol and commas.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

/// The currency symbol used when nothing else has been configured.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₱";

/// Represents how amounts should be written for display.
///
/// # Examples
///  - `AmountFormat{ symbol: "₱", commas: false }` -> `-₱60000.00`
///  - `AmountFormat{ symbol: "₱", commas: true }` -> `-₱60,000.00`
///  - `AmountFormat{ symbol: "", commas: false }` -> `-60000.00`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AmountFormat {
    /// The currency symbol written in front of the number.
    symbol: String,
    /// Whether commas are written as thousands separators.
    commas: bool,
}

impl Default for AmountFormat {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            commas: false,
        }
    }
}

impl AmountFormat {
    pub fn new(symbol: impl Into<String>, commas: bool) -> Self {
        Self {
            symbol: symbol.into(),
            commas,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn commas(&self) -> bool {
        self.commas
    }
}

/// Represents a monetary amount.
///
/// Parsing is forgiving about presentation: surrounding whitespace, a single leading currency
/// symbol and thousands separators are all accepted. An empty string parses as zero.
///
/// # Examples
///
/// ```
/// # use expense_tracker::model::Amount;
/// # use std::str::FromStr;
/// let a = Amount::from_str("₱1,250.50").unwrap();
/// let b = Amount::from_str("1250.5").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "1250.50");
/// ```
///
/// Text that is not a number can still be turned into an amount for the purpose of totals:
/// ```
/// # use expense_tracker::model::Amount;
/// assert!(Amount::lenient("lots").is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    value: Decimal,
}

impl Amount {
    pub const ZERO: Amount = Amount {
        value: Decimal::ZERO,
    };

    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Parses `s`, treating anything that cannot be parsed as zero.
    pub fn lenient(s: &str) -> Self {
        Amount::from_str(s).unwrap_or_default()
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.value.is_sign_negative() && !self.is_zero()
    }

    /// Writes the amount with two decimal places using `format`.
    pub fn display(&self, format: &AmountFormat) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let num = self.value.abs().round_dp(2);
        if format.commas {
            format!(
                "{sign}{}{}",
                format.symbol,
                format_num::format_num!(",.2", num.to_f64().unwrap_or_default())
            )
        } else {
            format!("{sign}{}{num:.2}", format.symbol)
        }
    }
}

/// An error that can occur when parsing strings into `Amount` values.
pub struct AmountError(rust_decimal::Error);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

fn strip_symbol(s: &str) -> &str {
    match s.chars().next() {
        Some(c) if !c.is_alphanumeric() && !matches!(c, '.' | '-' | '+') => {
            s[c.len_utf8()..].trim_start()
        }
        _ => s,
    }
}

fn invalid(s: &str) -> AmountError {
    AmountError(rust_decimal::Error::ErrorString(format!("Invalid amount '{s}'")))
}

/// Parses an unsigned number. Plain decimals are exact; exponent notation and floats that do not
/// fit a `Decimal` go through `f64`, saturating at the largest representable value.
fn parse_unsigned(s: &str) -> Result<Decimal, AmountError> {
    let e = match Decimal::from_str(s) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };
    if let Ok(value) = Decimal::from_scientific(s) {
        return Ok(value);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() => Ok(Decimal::from_f64(f).unwrap_or(if f.abs() < 1.0 {
            Decimal::ZERO
        } else {
            Decimal::MAX
        })),
        _ => Err(AmountError(e)),
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Amount::default());
        }

        let (mut negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let signed = rest.len() != trimmed.len();
        let mut unsigned = strip_symbol(rest.trim_start());

        // The sign may come before or after a currency symbol, "-₱5" or "₱-5", but only once.
        if let Some(after) = unsigned.strip_prefix('-') {
            if signed {
                return Err(invalid(s));
            }
            negative = true;
            unsigned = after;
        }
        if unsigned.starts_with(['-', '+']) {
            return Err(invalid(s));
        }

        let value = parse_unsigned(&unsigned.replace(',', ""))?;
        Ok(Amount::new(if negative { -value } else { value }))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.value.round_dp(2))
    }
}

impl Add for Amount {
    type Output = Amount;

    /// Saturates at `Decimal::MAX` or `Decimal::MIN` instead of overflowing.
    fn add(self, rhs: Self) -> Self::Output {
        Amount::new(self.value.checked_add(rhs.value).unwrap_or(
            if rhs.value.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            },
        ))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_plain() {
        let amount = Amount::from_str("3.50").unwrap();
        assert_eq!(amount.value(), dec("3.50"));
    }

    #[test]
    fn test_parse_integer() {
        let amount = Amount::from_str("12").unwrap();
        assert_eq!(amount.value(), dec("12"));
    }

    #[test]
    fn test_parse_with_peso_sign() {
        let amount = Amount::from_str("₱50.00").unwrap();
        assert_eq!(amount.value(), dec("50.00"));
    }

    #[test]
    fn test_parse_with_dollar_sign() {
        let amount = Amount::from_str("$50.00").unwrap();
        assert_eq!(amount.value(), dec("50.00"));
    }

    #[test]
    fn test_parse_negative_before_symbol() {
        let amount = Amount::from_str("-₱50.00").unwrap();
        assert_eq!(amount.value(), dec("-50.00"));
    }

    #[test]
    fn test_parse_negative_after_symbol() {
        let amount = Amount::from_str("₱-50.00").unwrap();
        assert_eq!(amount.value(), dec("-50.00"));
    }

    #[test]
    fn test_parse_empty_string() {
        let amount = Amount::from_str("").unwrap();
        assert_eq!(amount.value(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_whitespace() {
        let amount = Amount::from_str("  ₱ 50.00  ").unwrap();
        assert_eq!(amount.value(), dec("50.00"));
    }

    #[test]
    fn test_parse_with_commas() {
        let amount = Amount::from_str("1,234,567.89").unwrap();
        assert_eq!(amount.value(), dec("1234567.89"));
    }

    #[test]
    fn test_parse_garbage_is_error() {
        assert!(Amount::from_str("abc").is_err());
        assert!(Amount::from_str("12abc").is_err());
        assert!(Amount::from_str("₱").is_err());
    }

    #[test]
    fn test_parse_rejects_repeated_sign() {
        assert!(Amount::from_str("-$-5").is_err());
        assert!(Amount::from_str("+-5").is_err());
        assert!(Amount::from_str("--5").is_err());
        assert!(Amount::from_str("$+5").is_err());
        assert_eq!(Amount::from_str("+5").unwrap().value(), dec("5"));
    }

    #[test]
    fn test_parse_exponent() {
        assert_eq!(Amount::from_str("1e3").unwrap().value(), dec("1000"));
        assert_eq!(Amount::from_str("-2.5e2").unwrap().value(), dec("-250"));
    }

    #[test]
    fn test_parse_beyond_decimal_range_saturates() {
        assert_eq!(Amount::from_str("1e40").unwrap().value(), Decimal::MAX);
        assert_eq!(Amount::from_str("-1e40").unwrap().value(), Decimal::MIN);
        assert!(Amount::from_str("inf").is_err());
        assert!(Amount::from_str("NaN").is_err());
    }

    #[test]
    fn test_lenient_commas_and_trailing_text() {
        // Commas are thousands separators, not the end of the number.
        assert_eq!(Amount::lenient("1,000").value(), dec("1000"));
        // A number followed by other text is not a number.
        assert!(Amount::lenient("12abc").is_zero());
    }

    #[test]
    fn test_add_saturates() {
        let max = Amount::new(Decimal::MAX);
        let one = Amount::from_str("1").unwrap();
        assert_eq!((max + one).value(), Decimal::MAX);
        assert_eq!(
            (max + one + Amount::new(-Decimal::ONE)).value(),
            dec("79228162514264337593543950334")
        );
        let min = Amount::new(Decimal::MIN);
        assert_eq!((min + Amount::new(-Decimal::ONE)).value(), Decimal::MIN);
    }

    #[test]
    fn test_lenient_garbage_is_zero() {
        assert!(Amount::lenient("abc").is_zero());
        assert!(Amount::lenient("").is_zero());
        assert_eq!(Amount::lenient("4.25").value(), dec("4.25"));
    }

    #[test]
    fn test_display_two_places() {
        assert_eq!(Amount::from_str("12").unwrap().to_string(), "12.00");
        assert_eq!(Amount::from_str("3.5").unwrap().to_string(), "3.50");
        assert_eq!(Amount::from_str("-0.125").unwrap().to_string(), "-0.12");
    }

    #[test]
    fn test_display_with_format() {
        let amount = Amount::from_str("-60000").unwrap();
        let peso = AmountFormat::default();
        assert_eq!(amount.display(&peso), "-₱60000.00");

        let commas = AmountFormat::new("$", true);
        assert_eq!(amount.display(&commas), "-$60,000.00");

        let bare = AmountFormat::new("", false);
        assert_eq!(Amount::ZERO.display(&bare), "0.00");
    }

    #[test]
    fn test_sum() {
        let total: Amount = ["3.50", "12", "nope", ""]
            .iter()
            .map(|s| Amount::lenient(s))
            .sum();
        assert_eq!(total.value(), dec("15.50"));
    }

    #[test]
    fn test_serialize() {
        let amount = Amount::from_str("15.5").unwrap();
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"15.50\"");
    }

    #[test]
    fn test_deserialize() {
        let amount: Amount = serde_json::from_str("\"₱15.50\"").unwrap();
        assert_eq!(amount.value(), dec("15.50"));
    }
}

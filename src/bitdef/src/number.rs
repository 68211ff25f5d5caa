//! Free-form number input
//!
//! Input is treated as hexadecimal when it contains any of the letters
//! `a-f`/`A-F` or starts with `0x`/`0X`, even without a prefix (`1A` is 26).
//! Everything else, and any hex attempt that fails, falls back to decimal.

use num_bigint::BigUint;
use num_traits::{Num, Zero};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumberError {
    #[error("no number given")]
    Empty,

    #[error("not a hexadecimal or decimal number: {0:?}")]
    Unrecognized(String),
}

/// Base a number was read in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Decimal,
    Hexadecimal,
}

impl Radix {
    pub fn name(&self) -> &'static str {
        match self {
            Radix::Decimal => "decimal",
            Radix::Hexadecimal => "hexadecimal",
        }
    }
}

/// An interpreted number and the base it was read in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Number {
    value: BigUint,
    radix: Radix,
}

impl Number {
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn radix(&self) -> Radix {
        self.radix
    }

    pub fn into_value(self) -> BigUint {
        self.value
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&summary(&self.value))
    }
}

/// `DEC: 163 | HEX: 0xA3`
pub(crate) fn summary(value: &BigUint) -> String {
    format!("DEC: {} | HEX: 0x{:X}", value, value)
}

/// Parse `raw` as hexadecimal or decimal
pub fn parse_number(raw: &str) -> Result<Number, NumberError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(NumberError::Empty);
    }

    if looks_hexadecimal(text) {
        if let Some(value) = read_hex(text) {
            return Ok(Number {
                value,
                radix: Radix::Hexadecimal,
            });
        }
    }

    BigUint::from_str_radix(text, 10)
        .map(|value| Number {
            value,
            radix: Radix::Decimal,
        })
        .map_err(|_| NumberError::Unrecognized(text.to_string()))
}

/// Interpret `raw` as a number, falling back to zero when it is not one
pub fn interpret(raw: &str) -> BigUint {
    match parse_number(raw) {
        Ok(number) => number.into_value(),
        Err(err) => {
            tracing::warn!(%err, "using 0 for unreadable number");
            BigUint::zero()
        }
    }
}

fn looks_hexadecimal(text: &str) -> bool {
    text.starts_with("0x")
        || text.starts_with("0X")
        || text.chars().any(|c| c.is_ascii_hexdigit() && !c.is_ascii_digit())
}

/// Base-16 reader accepting an optional `0x`/`0X` prefix
fn read_hex(text: &str) -> Option<BigUint> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if digits.starts_with('+') {
        return None;
    }
    BigUint::from_str_radix(digits, 16).ok()
}

//! Exact decimal currency amounts.
//!
//! Budgets are kept as a whole number of cents so that `100000.50` survives a
//! round trip through the store without binary floating-point drift.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A currency amount with two fractional digits, stored as cents.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
  pub const fn from_cents(cents: i64) -> Self { Self(cents) }

  pub const fn cents(self) -> i64 { self.0 }

  /// Whole currency units plus cents, e.g. `Money::new(100_000, 50)`.
  pub fn new(units: i64, cents: u8) -> Result<Self> {
    if cents > 99 {
      return Err(Error::InvalidMoney(format!("{units}.{cents}")));
    }
    let sign = if units < 0 { -1 } else { 1 };
    units
      .checked_mul(100)
      .and_then(|u| u.checked_add(sign * i64::from(cents)))
      .map(Self)
      .ok_or_else(|| Error::InvalidMoney(format!("{units}.{cents:02}")))
  }
}

impl FromStr for Money {
  type Err = Error;

  /// Accepts `1234`, `1234.5` and `1234.56`, with an optional leading `-`.
  fn from_str(s: &str) -> Result<Self> {
    let invalid = || Error::InvalidMoney(s.to_owned());
    let trimmed = s.trim();

    let (negative, digits) = match trimmed.strip_prefix('-') {
      Some(rest) => (true, rest),
      None => (false, trimmed),
    };

    let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
    if whole.is_empty()
      || frac.len() > 2
      || !whole.bytes().all(|b| b.is_ascii_digit())
      || !frac.bytes().all(|b| b.is_ascii_digit())
    {
      return Err(invalid());
    }

    let units: i64 = whole.parse().map_err(|_| invalid())?;
    let cents: i64 = match frac.len() {
      0 => 0,
      1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
      _ => frac.parse().map_err(|_| invalid())?,
    };

    let total = units
      .checked_mul(100)
      .and_then(|u| u.checked_add(cents))
      .ok_or_else(invalid)?;

    Ok(Self(if negative { -total } else { total }))
  }
}

impl fmt::Display for Money {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let sign = if self.0 < 0 { "-" } else { "" };
    let abs = self.0.unsigned_abs();
    write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
  }
}

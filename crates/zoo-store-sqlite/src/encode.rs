//! Encoding and decoding helpers between domain types and SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC text with millisecond
//! precision (`2024-05-01T09:30:00.000Z`), the same shape SQLite's
//! `strftime('%Y-%m-%dT%H:%M:%fZ')` produces, so string order is time order.
//! Money is stored as integer cents and sex as its one-letter code.

use std::cmp::Ordering;

use chrono::{DateTime, Datelike as _, SecondsFormat, Utc};
use rusqlite::types::{Type, Value};
use zoo_core::{animal::Sex, money::Money};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Where `dt` falls relative to years 0000..=9999, the span in which
/// [`encode_dt`] stays fixed-width and string order matches time order.
fn text_span(dt: DateTime<Utc>) -> Ordering {
  match dt.year() {
    ..0 => Ordering::Less,
    0..=9999 => Ordering::Equal,
    _ => Ordering::Greater,
  }
}

/// Encode the ends of a half-open `[from, until)` range for comparison
/// against stored timestamps.
///
/// A bound outside the fixed-width span either drops out (it excludes
/// nothing storable) or makes the range unsatisfiable, in which case this
/// returns `None`.
pub fn encode_range(
  from: Option<DateTime<Utc>>,
  until: Option<DateTime<Utc>>,
) -> Option<(Option<String>, Option<String>)> {
  let from = match from {
    Some(dt) => match text_span(dt) {
      Ordering::Less => None,
      Ordering::Equal => Some(encode_dt(dt)),
      Ordering::Greater => return None,
    },
    None => None,
  };
  let until = match until {
    Some(dt) => match text_span(dt) {
      Ordering::Less => return None,
      Ordering::Equal => Some(encode_dt(dt)),
      Ordering::Greater => None,
    },
    None => None,
  };
  Some((from, until))
}

// ─── Column values ───────────────────────────────────────────────────────────

pub fn text(s: &str) -> Value { Value::Text(s.to_owned()) }

pub fn opt_text(s: Option<&str>) -> Value {
  s.map_or(Value::Null, text)
}

pub fn int(i: impl Into<i64>) -> Value { Value::Integer(i.into()) }

pub fn opt_int<I: Into<i64>>(i: Option<I>) -> Value {
  i.map_or(Value::Null, |i| Value::Integer(i.into()))
}

pub fn money(m: Option<Money>) -> Value { opt_int(m.map(Money::cents)) }

pub fn sex(s: Sex) -> Value { text(s.code()) }

// ─── Row decoding ────────────────────────────────────────────────────────────

/// Wrap a domain decode failure as a rusqlite conversion error for column
/// `idx`, so it surfaces from `query_row`/`query_map` like any type mismatch.
pub fn column_err(
  idx: usize,
  err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
  rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

pub fn decode_sex(idx: usize, code: &str) -> rusqlite::Result<Sex> {
  code.parse().map_err(|e: zoo_core::Error| column_err(idx, e))
}

pub fn decode_dt_column(idx: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| column_err(idx, e))
}

//! Reporting helpers: registration windows and aggregate counters.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A half-open interval over user registration timestamps. `from` is
/// inclusive, `until` exclusive; a `None` side is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationWindow {
  pub from:  Option<DateTime<Utc>>,
  pub until: Option<DateTime<Utc>>,
}

impl RegistrationWindow {
  /// The unbounded window; matches every user.
  pub fn all() -> Self { Self::default() }

  /// Build a window from calendar dates, both inclusive, as the report screen
  /// takes them: `end` covers the whole of that day.
  pub fn from_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
    let from = start.map(|d| d.and_time(NaiveTime::default()).and_utc());
    let until = end.map(|d| {
      d.checked_add_days(Days::new(1))
        .unwrap_or(NaiveDate::MAX)
        .and_time(NaiveTime::default())
        .and_utc()
    });
    Self { from, until }
  }

  pub fn contains(&self, at: DateTime<Utc>) -> bool {
    self.from.is_none_or(|from| at >= from) && self.until.is_none_or(|until| at < until)
  }
}

/// Row counts shown on the report screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
  pub users:   u64,
  pub zoos:    u64,
  pub animals: u64,
  pub species: u64,
}

//! Countries and the cities that belong to them.

use serde::{Deserialize, Serialize};

use crate::id::{CityId, CountryId};

/// A country. Names are unique across the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
  pub country_id: CountryId,
  pub name:       String,
}

/// A city inside a country. `(name, country_id)` is unique, so two countries
/// may each have a city of the same name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
  pub city_id:    CityId,
  pub name:       String,
  pub country_id: CountryId,
}

/// Insert/update payload for a [`City`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCity {
  pub name:       String,
  pub country_id: CountryId,
}

impl NewCity {
  pub fn new(name: impl Into<String>, country_id: CountryId) -> Self {
    Self { name: name.into(), country_id }
  }
}

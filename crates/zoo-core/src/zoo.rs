//! Zoos.

use serde::{Deserialize, Serialize};

use crate::{
  id::{CityId, ZooId},
  money::Money,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zoo {
  pub zoo_id:        ZooId,
  pub name:          String,
  /// Deleting the city is rejected while any zoo references it.
  pub city_id:       CityId,
  /// Surface in square meters.
  pub area_m2:       Option<i64>,
  pub annual_budget: Option<Money>,
}

/// Insert/update payload for a [`Zoo`]. Updates replace every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewZoo {
  pub name:          String,
  pub city_id:       CityId,
  pub area_m2:       Option<i64>,
  pub annual_budget: Option<Money>,
}

impl NewZoo {
  pub fn new(name: impl Into<String>, city_id: CityId) -> Self {
    Self {
      name: name.into(),
      city_id,
      area_m2: None,
      annual_budget: None,
    }
  }
}

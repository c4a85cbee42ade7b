//! Individual animals held by a zoo.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  id::{AnimalId, SpeciesId, ZooId},
};

/// Sex of an animal; persisted as a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
  #[serde(rename = "M")]
  Male,
  #[serde(rename = "F")]
  Female,
}

impl Sex {
  pub fn code(self) -> &'static str {
    match self {
      Sex::Male => "M",
      Sex::Female => "F",
    }
  }
}

impl FromStr for Sex {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim() {
      "M" | "m" => Ok(Sex::Male),
      "F" | "f" => Ok(Sex::Female),
      other => Err(Error::InvalidSex(other.to_owned())),
    }
  }
}

impl fmt::Display for Sex {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.code())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
  pub animal_id:         AnimalId,
  /// Removing the zoo removes its animals.
  pub zoo_id:            ZooId,
  /// A species cannot be deleted while an animal references it.
  pub species_id:        SpeciesId,
  pub sex:               Sex,
  pub birth_year:        Option<i32>,
  pub country_of_origin: Option<String>,
  pub continent:         Option<String>,
}

/// Insert/update payload for an [`Animal`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAnimal {
  pub zoo_id:            ZooId,
  pub species_id:        SpeciesId,
  pub sex:               Sex,
  pub birth_year:        Option<i32>,
  pub country_of_origin: Option<String>,
  pub continent:         Option<String>,
}

impl NewAnimal {
  pub fn new(zoo_id: ZooId, species_id: SpeciesId, sex: Sex) -> Self {
    Self {
      zoo_id,
      species_id,
      sex,
      birth_year: None,
      country_of_origin: None,
      continent: None,
    }
  }
}

//! Species catalogue.

use serde::{Deserialize, Serialize};

use crate::id::SpeciesId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
  pub species_id:      SpeciesId,
  pub common_name:     String,
  /// Unique across the whole catalogue.
  pub scientific_name: String,
  pub family:          Option<String>,
  pub endangered:      bool,
}

/// Insert/update payload for a [`Species`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSpecies {
  pub common_name:     String,
  pub scientific_name: String,
  pub family:          Option<String>,
  #[serde(default)]
  pub endangered:      bool,
}

impl NewSpecies {
  pub fn new(common_name: impl Into<String>, scientific_name: impl Into<String>) -> Self {
    Self {
      common_name:     common_name.into(),
      scientific_name: scientific_name.into(),
      family:          None,
      endangered:      false,
    }
  }
}

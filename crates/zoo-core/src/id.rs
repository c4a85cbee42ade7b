//! Integer identifiers, one newtype per table.
//!
//! Identifiers are assigned by the store on insert and never reused, so a
//! stale id can only ever miss, never hit a different row.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_type {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(
      Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    )]
    #[serde(transparent)]
    pub struct $name(pub i64);

    impl $name {
      pub fn get(self) -> i64 { self.0 }
    }

    impl From<i64> for $name {
      fn from(raw: i64) -> Self { Self(raw) }
    }

    impl From<$name> for i64 {
      fn from(id: $name) -> Self { id.0 }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
      }
    }
  };
}

id_type!(CountryId);
id_type!(CityId);
id_type!(ZooId);
id_type!(SpeciesId);
id_type!(AnimalId);
id_type!(
  /// Identifier of an access role. The seeded `admin` profile is id 1 and
  /// the self-registration `user` profile is id 2.
  ProfileId
);
id_type!(UserId);

impl ProfileId {
  pub const ADMIN: Self = Self(1);
  pub const USER: Self = Self(2);
}

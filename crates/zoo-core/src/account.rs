//! Access profiles and user accounts.
//!
//! Passwords only ever travel inward: [`NewUser`] carries the plaintext that
//! the store hashes on write, and [`User`] has no credential field at all.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{ProfileId, UserId};

/// An access role such as `admin` or `user`. Which screens a role may reach
/// is decided by the consumer, not by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
  pub profile_id: ProfileId,
  pub name:       String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub user_id:       UserId,
  pub username:      String,
  pub email:         String,
  pub profile_id:    ProfileId,
  /// Assigned by the store when the row is created; never changed afterwards.
  pub registered_at: DateTime<Utc>,
}

/// Insert/update payload for a [`User`]. An update re-hashes `password`.
#[derive(Clone, Serialize, Deserialize)]
pub struct NewUser {
  pub username:   String,
  pub email:      String,
  pub password:   String,
  pub profile_id: ProfileId,
}

impl NewUser {
  pub fn new(
    username: impl Into<String>,
    email: impl Into<String>,
    password: impl Into<String>,
    profile_id: ProfileId,
  ) -> Self {
    Self {
      username: username.into(),
      email: email.into(),
      password: password.into(),
      profile_id,
    }
  }
}

// Keep the plaintext out of logs.
impl std::fmt::Debug for NewUser {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("NewUser")
      .field("username", &self.username)
      .field("email", &self.email)
      .field("password", &"<redacted>")
      .field("profile_id", &self.profile_id)
      .finish()
  }
}

//! The `ZooStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `zoo-store-sqlite`).
//! Consumers (`zoo-cli`, or any screen layer) depend on this abstraction and
//! receive a store instance explicitly; nothing reaches a global connection.
//!
//! Every entity follows the same shape:
//!
//! - `add_*` persists a new row and returns its freshly assigned identifier.
//!   Uniqueness and foreign-key violations fail the call and leave the store
//!   unchanged.
//! - `get_*` returns `None` for an unknown identifier.
//! - `list_*` materialises every row. Cities are ordered by name and profiles
//!   by id; every other listing is in storage order.
//! - `update_*` replaces all mutable fields. An unknown identifier is a silent
//!   no-op, not an error.
//! - `delete_*` removes the row, cascading or being rejected according to the
//!   relationship. An unknown identifier is a silent no-op.

use std::future::Future;

use crate::{
  account::{NewUser, Profile, User},
  animal::{Animal, NewAnimal},
  geo::{City, Country, NewCity},
  id::{AnimalId, CityId, CountryId, ProfileId, SpeciesId, UserId, ZooId},
  report::{Counts, RegistrationWindow},
  species::{NewSpecies, Species},
  zoo::{NewZoo, Zoo},
};

/// Abstraction over a zoo records backend.
///
/// All methods return `Send` futures so a store can be shared across tasks of
/// a multi-threaded runtime.
pub trait ZooStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Countries ─────────────────────────────────────────────────────────

  fn add_country(
    &self,
    name: String,
  ) -> impl Future<Output = Result<CountryId, Self::Error>> + Send + '_;

  fn get_country(
    &self,
    id: CountryId,
  ) -> impl Future<Output = Result<Option<Country>, Self::Error>> + Send + '_;

  fn list_countries(
    &self,
  ) -> impl Future<Output = Result<Vec<Country>, Self::Error>> + Send + '_;

  fn update_country(
    &self,
    id: CountryId,
    name: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Rejected while any city references the country.
  fn delete_country(
    &self,
    id: CountryId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Cities ────────────────────────────────────────────────────────────

  fn add_city(
    &self,
    city: NewCity,
  ) -> impl Future<Output = Result<CityId, Self::Error>> + Send + '_;

  fn get_city(
    &self,
    id: CityId,
  ) -> impl Future<Output = Result<Option<City>, Self::Error>> + Send + '_;

  /// Every city, ordered by name.
  fn list_cities(
    &self,
  ) -> impl Future<Output = Result<Vec<City>, Self::Error>> + Send + '_;

  fn update_city(
    &self,
    id: CityId,
    city: NewCity,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Rejected while any zoo references the city.
  fn delete_city(
    &self,
    id: CityId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Zoos ──────────────────────────────────────────────────────────────

  fn add_zoo(
    &self,
    zoo: NewZoo,
  ) -> impl Future<Output = Result<ZooId, Self::Error>> + Send + '_;

  fn get_zoo(
    &self,
    id: ZooId,
  ) -> impl Future<Output = Result<Option<Zoo>, Self::Error>> + Send + '_;

  fn list_zoos(
    &self,
  ) -> impl Future<Output = Result<Vec<Zoo>, Self::Error>> + Send + '_;

  fn update_zoo(
    &self,
    id: ZooId,
    zoo: NewZoo,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Removes the zoo together with all of its animals.
  fn delete_zoo(
    &self,
    id: ZooId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Species ───────────────────────────────────────────────────────────

  fn add_species(
    &self,
    species: NewSpecies,
  ) -> impl Future<Output = Result<SpeciesId, Self::Error>> + Send + '_;

  fn get_species(
    &self,
    id: SpeciesId,
  ) -> impl Future<Output = Result<Option<Species>, Self::Error>> + Send + '_;

  fn list_species(
    &self,
  ) -> impl Future<Output = Result<Vec<Species>, Self::Error>> + Send + '_;

  fn update_species(
    &self,
    id: SpeciesId,
    species: NewSpecies,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Rejected while any animal references the species.
  fn delete_species(
    &self,
    id: SpeciesId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Animals ───────────────────────────────────────────────────────────

  fn add_animal(
    &self,
    animal: NewAnimal,
  ) -> impl Future<Output = Result<AnimalId, Self::Error>> + Send + '_;

  fn get_animal(
    &self,
    id: AnimalId,
  ) -> impl Future<Output = Result<Option<Animal>, Self::Error>> + Send + '_;

  fn list_animals(
    &self,
  ) -> impl Future<Output = Result<Vec<Animal>, Self::Error>> + Send + '_;

  fn update_animal(
    &self,
    id: AnimalId,
    animal: NewAnimal,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn delete_animal(
    &self,
    id: AnimalId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Profiles ──────────────────────────────────────────────────────────

  fn add_profile(
    &self,
    name: String,
  ) -> impl Future<Output = Result<ProfileId, Self::Error>> + Send + '_;

  fn get_profile(
    &self,
    id: ProfileId,
  ) -> impl Future<Output = Result<Option<Profile>, Self::Error>> + Send + '_;

  /// Every profile, ordered by id.
  fn list_profiles(
    &self,
  ) -> impl Future<Output = Result<Vec<Profile>, Self::Error>> + Send + '_;

  fn update_profile(
    &self,
    id: ProfileId,
    name: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Rejected while any user holds the profile.
  fn delete_profile(
    &self,
    id: ProfileId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Create an account. The password is hashed before it reaches storage and
  /// the registration timestamp is assigned by the store.
  fn add_user(
    &self,
    user: NewUser,
  ) -> impl Future<Output = Result<UserId, Self::Error>> + Send + '_;

  fn get_user(
    &self,
    id: UserId,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  fn list_users(
    &self,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;

  /// Replace username, email, password and profile. The registration
  /// timestamp is kept.
  fn update_user(
    &self,
    id: UserId,
    user: NewUser,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn delete_user(
    &self,
    id: UserId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Look up the account registered under `email`.
  fn user_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  /// Set a new password for `username`. Unknown usernames are a no-op.
  fn change_password<'a>(
    &'a self,
    username: &'a str,
    new_password: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Credentials ───────────────────────────────────────────────────────

  /// `true` iff an account with exactly this username exists and `password`
  /// matches its stored credential.
  fn validate_credentials<'a>(
    &'a self,
    username: &'a str,
    password: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// The profile of the account matching the credential pair, if any.
  fn profile_for_credentials<'a>(
    &'a self,
    username: &'a str,
    password: &'a str,
  ) -> impl Future<Output = Result<Option<ProfileId>, Self::Error>> + Send + 'a;

  // ── Reporting ─────────────────────────────────────────────────────────

  fn count_users(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  fn count_zoos(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  fn count_animals(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  fn count_species(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// All four counters at once.
  fn counts(&self) -> impl Future<Output = Result<Counts, Self::Error>> + Send + '_ {
    async move {
      Ok(Counts {
        users:   self.count_users().await?,
        zoos:    self.count_zoos().await?,
        animals: self.count_animals().await?,
        species: self.count_species().await?,
      })
    }
  }

  /// Users whose registration timestamp falls inside `window`.
  fn list_users_registered_between(
    &self,
    window: RegistrationWindow,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;
}

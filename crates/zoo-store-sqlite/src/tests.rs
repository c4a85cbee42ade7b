//! Integration tests for `SqliteStore` against in-memory and on-disk databases.

use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate, Utc};
use zoo_core::{
  account::NewUser,
  animal::{NewAnimal, Sex},
  geo::NewCity,
  id::{AnimalId, CountryId, ProfileId, SpeciesId, UserId, ZooId},
  money::Money,
  report::{Counts, RegistrationWindow},
  species::NewSpecies,
  store::ZooStore,
  zoo::NewZoo,
};

use crate::{CredentialHasher, Error, SCHEMA_VERSION, SqliteStore};

fn hasher() -> CredentialHasher {
  CredentialHasher::with_cost(8, 1).expect("cheap argon2 params")
}

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory_with(hasher())
    .await
    .expect("in-memory store")
}

/// Country → city → zoo, returning the zoo id.
async fn zoo_in_bogota(s: &SqliteStore) -> ZooId {
  let country = s.add_country("Colombia".into()).await.unwrap();
  let city = s.add_city(NewCity::new("Bogotá", country)).await.unwrap();
  s.add_zoo(NewZoo::new("Zoo1", city)).await.unwrap()
}

async fn lion(s: &SqliteStore) -> SpeciesId {
  s.add_species(NewSpecies::new("Lion", "Panthera leo")).await.unwrap()
}

fn temp_db(name: &str) -> PathBuf {
  let path = std::env::temp_dir().join(format!("zoo-store-{name}-{}.db", std::process::id()));
  remove_db(&path);
  path
}

fn remove_db(path: &Path) {
  for suffix in ["", "-wal", "-shm"] {
    let mut p = path.as_os_str().to_owned();
    p.push(suffix);
    let _ = std::fs::remove_file(p);
  }
}

// ─── Schema & seed ───────────────────────────────────────────────────────────

#[tokio::test]
async fn fresh_store_is_stamped_and_seeded() {
  let s = store().await;
  assert_eq!(s.schema_version().await.unwrap(), SCHEMA_VERSION);

  let profiles = s.list_profiles().await.unwrap();
  let names: Vec<&str> = profiles.iter().map(|p| p.name.as_str()).collect();
  assert_eq!(names, ["admin", "user"]);
  assert_eq!(profiles[0].profile_id, ProfileId::ADMIN);
  assert_eq!(profiles[1].profile_id, ProfileId::USER);

  let users = s.list_users().await.unwrap();
  assert_eq!(users.len(), 1);
  assert_eq!(users[0].username, "admin");
  assert_eq!(users[0].email, "admin@example.com");
  assert_eq!(users[0].profile_id, ProfileId::ADMIN);
}

#[tokio::test]
async fn initialize_schema_is_idempotent() {
  let s = store().await;
  s.add_country("Kenya".into()).await.unwrap();

  s.initialize_schema().await.unwrap();

  assert_eq!(s.list_countries().await.unwrap().len(), 1);
  assert_eq!(s.count_users().await.unwrap(), 1);
  assert_eq!(s.list_profiles().await.unwrap().len(), 2);
}

#[tokio::test]
async fn migrate_schema_discards_everything() {
  let s = store().await;
  let zoo = zoo_in_bogota(&s).await;
  let species = lion(&s).await;
  s.add_animal(NewAnimal::new(zoo, species, Sex::Female)).await.unwrap();
  s.add_user(NewUser::new("keeper", "keeper@zoo.test", "pw", ProfileId::USER))
    .await
    .unwrap();

  s.migrate_schema(SCHEMA_VERSION, SCHEMA_VERSION).await.unwrap();

  assert!(s.list_countries().await.unwrap().is_empty());
  assert_eq!(
    s.counts().await.unwrap(),
    Counts { users: 1, zoos: 0, animals: 0, species: 0 }
  );
  assert!(s.validate_credentials("admin", "admin").await.unwrap());
  assert!(!s.validate_credentials("keeper", "pw").await.unwrap());
}

#[tokio::test]
async fn reopening_a_file_store_keeps_data() {
  let path = temp_db("reopen");

  {
    let s = SqliteStore::open_with(&path, hasher()).await.unwrap();
    s.add_country("Peru".into()).await.unwrap();
  }

  let s = SqliteStore::open_with(&path, hasher()).await.unwrap();
  let countries = s.list_countries().await.unwrap();
  assert_eq!(countries.len(), 1);
  assert_eq!(countries[0].name, "Peru");
  assert_eq!(s.count_users().await.unwrap(), 1);

  drop(s);
  remove_db(&path);
}

#[tokio::test]
async fn newer_schema_version_is_refused() {
  let path = temp_db("too-new");

  {
    let s = SqliteStore::open_with(&path, hasher()).await.unwrap();
    s.conn
      .call(|conn| {
        conn.execute_batch("PRAGMA user_version = 99;")?;
        Ok(())
      })
      .await
      .unwrap();
  }

  let result = SqliteStore::open_with(&path, hasher()).await;
  assert!(matches!(
    result,
    Err(Error::SchemaTooNew { found: 99, supported: SCHEMA_VERSION })
  ));

  remove_db(&path);
}

// ─── Countries & cities ──────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_country_name_is_rejected() {
  let s = store().await;
  s.add_country("Colombia".into()).await.unwrap();

  let err = s.add_country("Colombia".into()).await.unwrap_err();
  assert!(matches!(err, Error::UniqueViolation(_)), "{err}");
  assert_eq!(s.list_countries().await.unwrap().len(), 1);
}

#[tokio::test]
async fn city_names_are_unique_per_country() {
  let s = store().await;
  let colombia = s.add_country("Colombia".into()).await.unwrap();
  let spain = s.add_country("Spain".into()).await.unwrap();

  s.add_city(NewCity::new("Cartagena", colombia)).await.unwrap();
  s.add_city(NewCity::new("Cartagena", spain)).await.unwrap();

  let err = s.add_city(NewCity::new("Cartagena", colombia)).await.unwrap_err();
  assert!(matches!(err, Error::UniqueViolation(_)));
  assert_eq!(s.list_cities().await.unwrap().len(), 2);
}

#[tokio::test]
async fn cities_are_listed_by_name() {
  let s = store().await;
  let country = s.add_country("Colombia".into()).await.unwrap();
  for name in ["Medellín", "Bogotá", "Cali"] {
    s.add_city(NewCity::new(name, country)).await.unwrap();
  }

  let names: Vec<String> = s
    .list_cities()
    .await
    .unwrap()
    .into_iter()
    .map(|c| c.name)
    .collect();
  assert_eq!(names, ["Bogotá", "Cali", "Medellín"]);
}

#[tokio::test]
async fn city_requires_existing_country() {
  let s = store().await;
  let err = s.add_city(NewCity::new("Atlantis", CountryId(404))).await.unwrap_err();
  assert!(matches!(err, Error::ForeignKeyViolation(_)));
  assert!(s.list_cities().await.unwrap().is_empty());
}

#[tokio::test]
async fn country_with_cities_cannot_be_deleted() {
  let s = store().await;
  let country = s.add_country("Colombia".into()).await.unwrap();
  s.add_city(NewCity::new("Bogotá", country)).await.unwrap();

  let err = s.delete_country(country).await.unwrap_err();
  assert!(err.is_constraint_violation());
  assert!(s.get_country(country).await.unwrap().is_some());
}

#[tokio::test]
async fn update_country_replaces_name() {
  let s = store().await;
  let id = s.add_country("Columbia".into()).await.unwrap();
  s.update_country(id, "Colombia".into()).await.unwrap();
  assert_eq!(s.get_country(id).await.unwrap().unwrap().name, "Colombia");
}

// ─── Zoos ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn zoo_roundtrips_area_and_budget() {
  let s = store().await;
  let country = s.add_country("Colombia".into()).await.unwrap();
  let bogota = s.add_city(NewCity::new("Bogotá", country)).await.unwrap();

  let mut input = NewZoo::new("Zoo1", bogota);
  input.area_m2 = Some(5000);
  input.annual_budget = Some("100000.50".parse().unwrap());
  let id = s.add_zoo(input).await.unwrap();

  let zoo = s.get_zoo(id).await.unwrap().unwrap();
  assert_eq!(zoo.zoo_id, id);
  assert_eq!(zoo.name, "Zoo1");
  assert_eq!(zoo.city_id, bogota);
  assert_eq!(zoo.area_m2, Some(5000));
  assert_eq!(zoo.annual_budget, Some(Money::from_cents(10_000_050)));
}

#[tokio::test]
async fn zoo_optional_fields_stay_empty() {
  let s = store().await;
  let id = zoo_in_bogota(&s).await;
  let zoo = s.get_zoo(id).await.unwrap().unwrap();
  assert_eq!(zoo.area_m2, None);
  assert_eq!(zoo.annual_budget, None);
}

#[tokio::test]
async fn zoo_requires_existing_city() {
  let s = store().await;
  let err = s
    .add_zoo(NewZoo::new("Nowhere", zoo_core::id::CityId(9)))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::ForeignKeyViolation(_)));
  assert_eq!(s.count_zoos().await.unwrap(), 0);
}

#[tokio::test]
async fn city_with_zoos_cannot_be_deleted() {
  let s = store().await;
  let zoo = zoo_in_bogota(&s).await;
  let city = s.get_zoo(zoo).await.unwrap().unwrap().city_id;

  let err = s.delete_city(city).await.unwrap_err();
  assert!(matches!(err, Error::ForeignKeyViolation(_)));
  assert!(s.get_city(city).await.unwrap().is_some());
}

#[tokio::test]
async fn update_zoo_replaces_every_field() {
  let s = store().await;
  let id = zoo_in_bogota(&s).await;
  let country = s.add_country("Spain".into()).await.unwrap();
  let madrid = s.add_city(NewCity::new("Madrid", country)).await.unwrap();

  let mut first = NewZoo::new("Zoo1", madrid);
  first.area_m2 = Some(10);
  first.annual_budget = Some(Money::from_cents(1));
  s.update_zoo(id, first).await.unwrap();

  // Full-row replace: omitted optionals are cleared, not kept.
  s.update_zoo(id, NewZoo::new("Zoo Aquarium", madrid)).await.unwrap();

  let zoo = s.get_zoo(id).await.unwrap().unwrap();
  assert_eq!(zoo.name, "Zoo Aquarium");
  assert_eq!(zoo.city_id, madrid);
  assert_eq!(zoo.area_m2, None);
  assert_eq!(zoo.annual_budget, None);
}

#[tokio::test]
async fn update_missing_zoo_is_a_noop() {
  let s = store().await;
  let id = zoo_in_bogota(&s).await;
  let city = s.get_zoo(id).await.unwrap().unwrap().city_id;

  s.update_zoo(ZooId(9999), NewZoo::new("Ghost", city)).await.unwrap();

  assert!(s.get_zoo(ZooId(9999)).await.unwrap().is_none());
  assert_eq!(s.list_zoos().await.unwrap().len(), 1);
}

#[tokio::test]
async fn delete_zoo_twice_is_a_noop() {
  let s = store().await;
  let id = zoo_in_bogota(&s).await;

  s.delete_zoo(id).await.unwrap();
  assert!(s.get_zoo(id).await.unwrap().is_none());

  s.delete_zoo(id).await.unwrap();
  assert_eq!(s.count_zoos().await.unwrap(), 0);
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
  let s = store().await;
  let first = zoo_in_bogota(&s).await;
  let city = s.get_zoo(first).await.unwrap().unwrap().city_id;

  s.delete_zoo(first).await.unwrap();
  let second = s.add_zoo(NewZoo::new("Zoo2", city)).await.unwrap();

  assert!(second > first);
}

// ─── Species & animals ───────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_scientific_name_is_rejected() {
  let s = store().await;
  lion(&s).await;

  let err = s
    .add_species(NewSpecies::new("Lion2", "Panthera leo"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::UniqueViolation(_)));
  assert_eq!(s.count_species().await.unwrap(), 1);
}

#[tokio::test]
async fn species_roundtrip_and_update() {
  let s = store().await;
  let mut input = NewSpecies::new("Snow leopard", "Panthera uncia");
  input.family = Some("Felidae".into());
  input.endangered = true;
  let id = s.add_species(input.clone()).await.unwrap();

  let got = s.get_species(id).await.unwrap().unwrap();
  assert_eq!(got.common_name, input.common_name);
  assert_eq!(got.scientific_name, input.scientific_name);
  assert_eq!(got.family.as_deref(), Some("Felidae"));
  assert!(got.endangered);

  s.update_species(id, NewSpecies::new("Ounce", "Panthera uncia")).await.unwrap();
  let got = s.get_species(id).await.unwrap().unwrap();
  assert_eq!(got.common_name, "Ounce");
  assert_eq!(got.family, None);
  assert!(!got.endangered);
}

#[tokio::test]
async fn update_into_existing_scientific_name_fails_atomically() {
  let s = store().await;
  lion(&s).await;
  let tiger = s.add_species(NewSpecies::new("Tiger", "Panthera tigris")).await.unwrap();

  let err = s
    .update_species(tiger, NewSpecies::new("Tiger", "Panthera leo"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::UniqueViolation(_)));
  assert_eq!(
    s.get_species(tiger).await.unwrap().unwrap().scientific_name,
    "Panthera tigris"
  );
}

#[tokio::test]
async fn animal_references_resolve() {
  let s = store().await;
  let zoo = zoo_in_bogota(&s).await;
  let species = lion(&s).await;

  let mut input = NewAnimal::new(zoo, species, Sex::Male);
  input.birth_year = Some(2015);
  input.country_of_origin = Some("Kenya".into());
  input.continent = Some("Africa".into());
  let id = s.add_animal(input).await.unwrap();

  let animal = s.get_animal(id).await.unwrap().unwrap();
  assert_eq!(animal.animal_id, id);
  assert_eq!(animal.zoo_id, zoo);
  assert_eq!(animal.species_id, species);
  assert_eq!(animal.sex, Sex::Male);
  assert_eq!(animal.birth_year, Some(2015));
  assert_eq!(animal.country_of_origin.as_deref(), Some("Kenya"));
  assert_eq!(animal.continent.as_deref(), Some("Africa"));
}

#[tokio::test]
async fn deleting_zoo_cascades_to_animals() {
  let s = store().await;
  let zoo = zoo_in_bogota(&s).await;
  let species = lion(&s).await;
  let animal = s.add_animal(NewAnimal::new(zoo, species, Sex::Female)).await.unwrap();

  s.delete_zoo(zoo).await.unwrap();

  assert!(s.get_animal(animal).await.unwrap().is_none());
  assert_eq!(s.count_animals().await.unwrap(), 0);
  // The species itself is untouched.
  assert!(s.get_species(species).await.unwrap().is_some());
}

#[tokio::test]
async fn species_in_use_cannot_be_deleted() {
  let s = store().await;
  let zoo = zoo_in_bogota(&s).await;
  let species = lion(&s).await;
  let animal = s.add_animal(NewAnimal::new(zoo, species, Sex::Male)).await.unwrap();

  let err = s.delete_species(species).await.unwrap_err();
  assert!(matches!(err, Error::ForeignKeyViolation(_)));
  assert!(s.get_species(species).await.unwrap().is_some());

  s.delete_animal(animal).await.unwrap();
  s.delete_species(species).await.unwrap();
  assert!(s.get_species(species).await.unwrap().is_none());
}

#[tokio::test]
async fn animal_requires_existing_zoo_and_species() {
  let s = store().await;
  let zoo = zoo_in_bogota(&s).await;
  let species = lion(&s).await;

  let err = s
    .add_animal(NewAnimal::new(ZooId(77), species, Sex::Male))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::ForeignKeyViolation(_)));

  let err = s
    .add_animal(NewAnimal::new(zoo, SpeciesId(77), Sex::Male))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::ForeignKeyViolation(_)));

  assert!(s.list_animals().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_and_delete_animal() {
  let s = store().await;
  let zoo = zoo_in_bogota(&s).await;
  let species = lion(&s).await;
  let id = s.add_animal(NewAnimal::new(zoo, species, Sex::Male)).await.unwrap();

  let mut change = NewAnimal::new(zoo, species, Sex::Female);
  change.birth_year = Some(2020);
  s.update_animal(id, change).await.unwrap();
  let got = s.get_animal(id).await.unwrap().unwrap();
  assert_eq!(got.sex, Sex::Female);
  assert_eq!(got.birth_year, Some(2020));

  s.delete_animal(id).await.unwrap();
  s.delete_animal(id).await.unwrap();
  assert!(s.get_animal(id).await.unwrap().is_none());
  s.delete_animal(AnimalId(12345)).await.unwrap();
}

// ─── Credentials & users ─────────────────────────────────────────────────────

#[tokio::test]
async fn seeded_admin_credentials() {
  let s = store().await;
  assert!(s.validate_credentials("admin", "admin").await.unwrap());
  assert!(!s.validate_credentials("admin", "wrong").await.unwrap());
  assert!(!s.validate_credentials("Admin", "admin").await.unwrap());
  assert!(!s.validate_credentials("nobody", "admin").await.unwrap());

  assert_eq!(
    s.profile_for_credentials("admin", "admin").await.unwrap(),
    Some(ProfileId::ADMIN)
  );
  assert_eq!(s.profile_for_credentials("admin", "nope").await.unwrap(), None);
}

#[tokio::test]
async fn passwords_are_stored_hashed() {
  let s = store().await;
  let (hash, _) = s.stored_credential("admin").await.unwrap().unwrap();
  assert!(hash.starts_with("$argon2id$"));
  assert_ne!(hash, "admin");
}

#[tokio::test]
async fn add_user_and_login() {
  let s = store().await;
  let id = s
    .add_user(NewUser::new("keeper", "keeper@zoo.test", "hunter2", ProfileId::USER))
    .await
    .unwrap();
  assert_ne!(id, UserId(1));

  let user = s.get_user(id).await.unwrap().unwrap();
  assert_eq!(user.username, "keeper");
  assert_eq!(user.email, "keeper@zoo.test");
  assert_eq!(user.profile_id, ProfileId::USER);
  assert!((Utc::now() - user.registered_at).num_seconds().abs() < 60);

  assert_eq!(
    s.profile_for_credentials("keeper", "hunter2").await.unwrap(),
    Some(ProfileId::USER)
  );
}

#[tokio::test]
async fn duplicate_username_or_email_is_rejected() {
  let s = store().await;
  s.add_user(NewUser::new("keeper", "keeper@zoo.test", "pw", ProfileId::USER))
    .await
    .unwrap();

  let err = s
    .add_user(NewUser::new("keeper", "other@zoo.test", "pw", ProfileId::USER))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::UniqueViolation(_)));

  let err = s
    .add_user(NewUser::new("other", "keeper@zoo.test", "pw", ProfileId::USER))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::UniqueViolation(_)));

  assert_eq!(s.count_users().await.unwrap(), 2);
}

#[tokio::test]
async fn user_requires_existing_profile() {
  let s = store().await;
  let err = s
    .add_user(NewUser::new("ghost", "ghost@zoo.test", "pw", ProfileId(42)))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::ForeignKeyViolation(_)));
}

#[tokio::test]
async fn profile_in_use_cannot_be_deleted() {
  let s = store().await;
  let err = s.delete_profile(ProfileId::ADMIN).await.unwrap_err();
  assert!(matches!(err, Error::ForeignKeyViolation(_)));

  let vet = s.add_profile("vet".into()).await.unwrap();
  s.update_profile(vet, "veterinarian".into()).await.unwrap();
  assert_eq!(s.get_profile(vet).await.unwrap().unwrap().name, "veterinarian");
  s.delete_profile(vet).await.unwrap();
  assert!(s.get_profile(vet).await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_profile_name_is_rejected() {
  let s = store().await;
  let err = s.add_profile("admin".into()).await.unwrap_err();
  assert!(matches!(err, Error::UniqueViolation(_)));
  assert_eq!(s.list_profiles().await.unwrap().len(), 2);

  let vet = s.add_profile("vet".into()).await.unwrap();
  let err = s.update_profile(vet, "user".into()).await.unwrap_err();
  assert!(matches!(err, Error::UniqueViolation(_)));
  assert_eq!(s.get_profile(vet).await.unwrap().unwrap().name, "vet");
}

#[tokio::test]
async fn update_user_keeps_registration_time() {
  let s = store().await;
  let id = s
    .add_user(NewUser::new("keeper", "keeper@zoo.test", "old", ProfileId::USER))
    .await
    .unwrap();
  let before = s.get_user(id).await.unwrap().unwrap();

  s.update_user(id, NewUser::new("head", "head@zoo.test", "new", ProfileId::ADMIN))
    .await
    .unwrap();

  let after = s.get_user(id).await.unwrap().unwrap();
  assert_eq!(after.username, "head");
  assert_eq!(after.email, "head@zoo.test");
  assert_eq!(after.profile_id, ProfileId::ADMIN);
  assert_eq!(after.registered_at, before.registered_at);
  assert!(s.validate_credentials("head", "new").await.unwrap());
  assert!(!s.validate_credentials("head", "old").await.unwrap());
  assert!(!s.validate_credentials("keeper", "old").await.unwrap());
}

#[tokio::test]
async fn delete_user() {
  let s = store().await;
  let id = s
    .add_user(NewUser::new("temp", "temp@zoo.test", "pw", ProfileId::USER))
    .await
    .unwrap();
  s.delete_user(id).await.unwrap();
  assert!(s.get_user(id).await.unwrap().is_none());
  assert!(!s.validate_credentials("temp", "pw").await.unwrap());
  s.delete_user(id).await.unwrap();
}

#[tokio::test]
async fn lookup_by_email_and_change_password() {
  let s = store().await;
  let found = s.user_by_email("admin@example.com").await.unwrap().unwrap();
  assert_eq!(found.username, "admin");
  assert!(s.user_by_email("missing@example.com").await.unwrap().is_none());

  s.change_password("admin", "n3w").await.unwrap();
  assert!(s.validate_credentials("admin", "n3w").await.unwrap());
  assert!(!s.validate_credentials("admin", "admin").await.unwrap());

  // Unknown username: silently nothing.
  s.change_password("nobody", "x").await.unwrap();
}

// ─── Reporting ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn counts_reflect_rows() {
  let s = store().await;
  let zoo = zoo_in_bogota(&s).await;
  let species = lion(&s).await;
  s.add_animal(NewAnimal::new(zoo, species, Sex::Male)).await.unwrap();
  s.add_animal(NewAnimal::new(zoo, species, Sex::Female)).await.unwrap();

  assert_eq!(
    s.counts().await.unwrap(),
    Counts { users: 1, zoos: 1, animals: 2, species: 1 }
  );
}

#[tokio::test]
async fn registration_window_filters_users() {
  let s = store().await;
  s.add_user(NewUser::new("keeper", "keeper@zoo.test", "pw", ProfileId::USER))
    .await
    .unwrap();

  let all = s
    .list_users_registered_between(RegistrationWindow::all())
    .await
    .unwrap();
  assert_eq!(all.len(), 2);

  let now = Utc::now();
  let around_now = RegistrationWindow {
    from:  Some(now - Duration::hours(1)),
    until: Some(now + Duration::hours(1)),
  };
  assert_eq!(s.list_users_registered_between(around_now).await.unwrap().len(), 2);

  let future = RegistrationWindow {
    from:  Some(now + Duration::days(1)),
    until: Some(now + Duration::days(2)),
  };
  assert!(s.list_users_registered_between(future).await.unwrap().is_empty());

  let past = RegistrationWindow { from: None, until: Some(now - Duration::days(1)) };
  assert!(s.list_users_registered_between(past).await.unwrap().is_empty());
}

#[tokio::test]
async fn far_future_end_date_covers_everyone() {
  let s = store().await;
  s.add_user(NewUser::new("keeper", "keeper@zoo.test", "pw", ProfileId::USER))
    .await
    .unwrap();

  let last_day = NaiveDate::from_ymd_opt(9999, 12, 31).unwrap();
  let until_end = RegistrationWindow::from_dates(None, Some(last_day));
  assert_eq!(s.list_users_registered_between(until_end).await.unwrap().len(), 2);

  let beyond = NaiveDate::from_ymd_opt(10000, 1, 1).unwrap();
  let after_end = RegistrationWindow::from_dates(Some(beyond), None);
  assert!(s.list_users_registered_between(after_end).await.unwrap().is_empty());
}

#[tokio::test]
async fn window_query_agrees_with_contains() {
  let s = store().await;
  s.add_user(NewUser::new("keeper", "keeper@zoo.test", "pw", ProfileId::USER))
    .await
    .unwrap();
  let users = s.list_users().await.unwrap();
  let now = Utc::now();
  let today = now.date_naive();

  let windows = [
    RegistrationWindow::all(),
    RegistrationWindow::from_dates(Some(today), Some(today)),
    RegistrationWindow::from_dates(None, today.pred_opt()),
    RegistrationWindow::from_dates(today.succ_opt(), None),
    RegistrationWindow::from_dates(None, NaiveDate::from_ymd_opt(9999, 12, 31)),
    RegistrationWindow { from: Some(now - Duration::hours(1)), until: None },
  ];

  for window in windows {
    let mut expected: Vec<UserId> = users
      .iter()
      .filter(|u| window.contains(u.registered_at))
      .map(|u| u.user_id)
      .collect();
    let mut got: Vec<UserId> = s
      .list_users_registered_between(window)
      .await
      .unwrap()
      .into_iter()
      .map(|u| u.user_id)
      .collect();
    expected.sort_by_key(|id| id.get());
    got.sort_by_key(|id| id.get());
    assert_eq!(got, expected, "{window:?}");
  }
}

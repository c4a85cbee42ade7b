//! [`SqliteStore`] — the SQLite implementation of [`ZooStore`].

use std::path::Path;

use rusqlite::{Connection, OptionalExtension as _};
use zoo_core::{
  account::{NewUser, Profile, User},
  animal::{Animal, NewAnimal},
  geo::{City, Country, NewCity},
  id::{AnimalId, CityId, CountryId, ProfileId, SpeciesId, UserId, ZooId},
  report::RegistrationWindow,
  species::{NewSpecies, Species},
  store::ZooStore,
  zoo::{NewZoo, Zoo},
};

use crate::{
  Error, Result,
  credentials::CredentialHasher,
  encode::encode_range,
  record::{self, Record, UserRow},
  schema::{
    DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME, SCHEMA_VERSION,
    SEED_ADMIN, SEED_PROFILES, TABLES,
  },
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A zoo records store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. Construct
/// one at startup and hand it to every consumer that needs it.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
  hasher:          CredentialHasher,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and bring its schema up to date.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    Self::open_with(path, CredentialHasher::default()).await
  }

  /// Like [`SqliteStore::open`], hashing passwords with `hasher`.
  pub async fn open_with(path: impl AsRef<Path>, hasher: CredentialHasher) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    conn
      .call(|conn| {
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        Ok(())
      })
      .await?;
    let store = Self { conn, hasher };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    Self::open_in_memory_with(CredentialHasher::default()).await
  }

  pub async fn open_in_memory_with(hasher: CredentialHasher) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn, hasher };
    store.init_schema().await?;
    Ok(store)
  }

  /// The version recorded in `PRAGMA user_version`.
  pub async fn schema_version(&self) -> Result<i32> {
    Ok(
      self
        .conn
        .call(|conn| Ok(conn.pragma_query_value(None, "user_version", |r| r.get(0))?))
        .await?,
    )
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(())
      })
      .await?;

    match self.schema_version().await? {
      0 => self.initialize_schema().await,
      found if found < SCHEMA_VERSION => self.migrate_schema(found, SCHEMA_VERSION).await,
      found if found == SCHEMA_VERSION => {
        self
          .conn
          .call(|conn| {
            create_tables(conn)?;
            Ok(())
          })
          .await?;
        Ok(())
      }
      found => Err(Error::SchemaTooNew { found, supported: SCHEMA_VERSION }),
    }
  }

  /// Create every table that is missing, seed the default profiles and the
  /// administrator account, and stamp the schema version. Idempotent; runs
  /// as one transaction.
  pub async fn initialize_schema(&self) -> Result<()> {
    let admin_hash = self.hasher.hash(DEFAULT_ADMIN_PASSWORD)?;

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        create_tables(&tx)?;
        seed(&tx, &admin_hash)?;
        tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        tx.commit()?;
        Ok(())
      })
      .await?;

    tracing::info!(version = SCHEMA_VERSION, "initialised zoo schema");
    Ok(())
  }

  /// Upgrade from `old_version` by dropping every table and recreating the
  /// schema from scratch. All stored data is discarded.
  pub async fn migrate_schema(&self, old_version: i32, new_version: i32) -> Result<()> {
    tracing::warn!(
      old_version,
      new_version,
      "schema upgrade drops every table; existing records are discarded"
    );
    let admin_hash = self.hasher.hash(DEFAULT_ADMIN_PASSWORD)?;

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        for table in TABLES.iter().rev() {
          tx.execute_batch(&table.drop_sql())?;
        }
        create_tables(&tx)?;
        seed(&tx, &admin_hash)?;
        tx.pragma_update(None, "user_version", new_version)?;
        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(())
  }

  // ── Generic CRUD over `Record` ────────────────────────────────────────────

  async fn insert_record<R: Record>(&self, draft: &R::Draft) -> Result<i64> {
    let values = R::bind(draft);
    Ok(
      self
        .conn
        .call(move |conn| Ok(record::insert::<R>(conn, values)?))
        .await?,
    )
  }

  async fn get_record<R: Record>(&self, id: i64) -> Result<Option<R>> {
    Ok(
      self
        .conn
        .call(move |conn| Ok(record::get::<R>(conn, id)?))
        .await?,
    )
  }

  async fn list_records<R: Record>(&self) -> Result<Vec<R>> {
    Ok(self.conn.call(|conn| Ok(record::list::<R>(conn)?)).await?)
  }

  async fn update_record<R: Record>(&self, id: i64, draft: &R::Draft) -> Result<()> {
    let values = R::bind(draft);
    let touched = self
      .conn
      .call(move |conn| Ok(record::update::<R>(conn, id, values)?))
      .await?;
    if touched == 0 {
      tracing::debug!(table = R::TABLE.name, id, "update matched no row");
    }
    Ok(())
  }

  async fn delete_record<R: Record>(&self, id: i64) -> Result<()> {
    let touched = self
      .conn
      .call(move |conn| Ok(record::delete::<R>(conn, id)?))
      .await?;
    if touched == 0 {
      tracing::debug!(table = R::TABLE.name, id, "delete matched no row");
    }
    Ok(())
  }

  async fn count_records<R: Record>(&self) -> Result<u64> {
    Ok(self.conn.call(|conn| Ok(record::count::<R>(conn)?)).await?)
  }

  // ── Accounts ──────────────────────────────────────────────────────────────

  fn user_row(&self, user: NewUser) -> Result<UserRow> {
    Ok(UserRow {
      password_hash: self.hasher.hash(&user.password)?,
      username:      user.username,
      email:         user.email,
      profile_id:    user.profile_id,
    })
  }

  /// The stored hash and profile for `username`.
  pub(crate) async fn stored_credential(
    &self,
    username: &str,
  ) -> Result<Option<(String, ProfileId)>> {
    let username = username.to_owned();

    let row: Option<(String, i64)> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT password_hash, profile_id FROM users WHERE username = ?1",
              [username],
              |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .optional()?,
        )
      })
      .await?;

    Ok(row.map(|(hash, profile)| (hash, ProfileId::from(profile))))
  }
}

fn create_tables(conn: &Connection) -> rusqlite::Result<()> {
  for table in TABLES {
    conn.execute_batch(&table.create_sql())?;
  }
  Ok(())
}

fn seed(conn: &Connection, admin_hash: &str) -> rusqlite::Result<()> {
  conn.execute_batch(SEED_PROFILES)?;
  conn.execute(
    SEED_ADMIN,
    rusqlite::params![DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_EMAIL, admin_hash],
  )?;
  Ok(())
}

// ─── ZooStore impl ───────────────────────────────────────────────────────────

impl ZooStore for SqliteStore {
  type Error = Error;

  // ── Countries ─────────────────────────────────────────────────────────────

  async fn add_country(&self, name: String) -> Result<CountryId> {
    Ok(self.insert_record::<Country>(&name).await?.into())
  }

  async fn get_country(&self, id: CountryId) -> Result<Option<Country>> {
    self.get_record(id.get()).await
  }

  async fn list_countries(&self) -> Result<Vec<Country>> { self.list_records().await }

  async fn update_country(&self, id: CountryId, name: String) -> Result<()> {
    self.update_record::<Country>(id.get(), &name).await
  }

  async fn delete_country(&self, id: CountryId) -> Result<()> {
    self.delete_record::<Country>(id.get()).await
  }

  // ── Cities ────────────────────────────────────────────────────────────────

  async fn add_city(&self, city: NewCity) -> Result<CityId> {
    Ok(self.insert_record::<City>(&city).await?.into())
  }

  async fn get_city(&self, id: CityId) -> Result<Option<City>> {
    self.get_record(id.get()).await
  }

  async fn list_cities(&self) -> Result<Vec<City>> { self.list_records().await }

  async fn update_city(&self, id: CityId, city: NewCity) -> Result<()> {
    self.update_record::<City>(id.get(), &city).await
  }

  async fn delete_city(&self, id: CityId) -> Result<()> {
    self.delete_record::<City>(id.get()).await
  }

  // ── Zoos ──────────────────────────────────────────────────────────────────

  async fn add_zoo(&self, zoo: NewZoo) -> Result<ZooId> {
    Ok(self.insert_record::<Zoo>(&zoo).await?.into())
  }

  async fn get_zoo(&self, id: ZooId) -> Result<Option<Zoo>> {
    self.get_record(id.get()).await
  }

  async fn list_zoos(&self) -> Result<Vec<Zoo>> { self.list_records().await }

  async fn update_zoo(&self, id: ZooId, zoo: NewZoo) -> Result<()> {
    self.update_record::<Zoo>(id.get(), &zoo).await
  }

  async fn delete_zoo(&self, id: ZooId) -> Result<()> {
    self.delete_record::<Zoo>(id.get()).await
  }

  // ── Species ───────────────────────────────────────────────────────────────

  async fn add_species(&self, species: NewSpecies) -> Result<SpeciesId> {
    Ok(self.insert_record::<Species>(&species).await?.into())
  }

  async fn get_species(&self, id: SpeciesId) -> Result<Option<Species>> {
    self.get_record(id.get()).await
  }

  async fn list_species(&self) -> Result<Vec<Species>> { self.list_records().await }

  async fn update_species(&self, id: SpeciesId, species: NewSpecies) -> Result<()> {
    self.update_record::<Species>(id.get(), &species).await
  }

  async fn delete_species(&self, id: SpeciesId) -> Result<()> {
    self.delete_record::<Species>(id.get()).await
  }

  // ── Animals ───────────────────────────────────────────────────────────────

  async fn add_animal(&self, animal: NewAnimal) -> Result<AnimalId> {
    Ok(self.insert_record::<Animal>(&animal).await?.into())
  }

  async fn get_animal(&self, id: AnimalId) -> Result<Option<Animal>> {
    self.get_record(id.get()).await
  }

  async fn list_animals(&self) -> Result<Vec<Animal>> { self.list_records().await }

  async fn update_animal(&self, id: AnimalId, animal: NewAnimal) -> Result<()> {
    self.update_record::<Animal>(id.get(), &animal).await
  }

  async fn delete_animal(&self, id: AnimalId) -> Result<()> {
    self.delete_record::<Animal>(id.get()).await
  }

  // ── Profiles ──────────────────────────────────────────────────────────────

  async fn add_profile(&self, name: String) -> Result<ProfileId> {
    Ok(self.insert_record::<Profile>(&name).await?.into())
  }

  async fn get_profile(&self, id: ProfileId) -> Result<Option<Profile>> {
    self.get_record(id.get()).await
  }

  async fn list_profiles(&self) -> Result<Vec<Profile>> { self.list_records().await }

  async fn update_profile(&self, id: ProfileId, name: String) -> Result<()> {
    self.update_record::<Profile>(id.get(), &name).await
  }

  async fn delete_profile(&self, id: ProfileId) -> Result<()> {
    self.delete_record::<Profile>(id.get()).await
  }

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn add_user(&self, user: NewUser) -> Result<UserId> {
    let row = self.user_row(user)?;
    Ok(self.insert_record::<User>(&row).await?.into())
  }

  async fn get_user(&self, id: UserId) -> Result<Option<User>> {
    self.get_record(id.get()).await
  }

  async fn list_users(&self) -> Result<Vec<User>> { self.list_records().await }

  async fn update_user(&self, id: UserId, user: NewUser) -> Result<()> {
    let row = self.user_row(user)?;
    self.update_record::<User>(id.get(), &row).await
  }

  async fn delete_user(&self, id: UserId) -> Result<()> {
    self.delete_record::<User>(id.get()).await
  }

  async fn user_by_email(&self, email: &str) -> Result<Option<User>> {
    let email = email.to_owned();

    let users: Vec<User> = self
      .conn
      .call(move |conn| Ok(record::select_where::<User>(conn, "email = ?1", [email])?))
      .await?;

    Ok(users.into_iter().next())
  }

  async fn change_password(&self, username: &str, new_password: &str) -> Result<()> {
    let hash = self.hasher.hash(new_password)?;
    let username = username.to_owned();

    let touched = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE users SET password_hash = ?1 WHERE username = ?2",
          rusqlite::params![hash, username],
        )?)
      })
      .await?;

    if touched == 0 {
      tracing::debug!("password change for unknown username ignored");
    }
    Ok(())
  }

  // ── Credentials ───────────────────────────────────────────────────────────

  async fn validate_credentials(&self, username: &str, password: &str) -> Result<bool> {
    Ok(self.profile_for_credentials(username, password).await?.is_some())
  }

  async fn profile_for_credentials(
    &self,
    username: &str,
    password: &str,
  ) -> Result<Option<ProfileId>> {
    let Some((hash, profile)) = self.stored_credential(username).await? else {
      return Ok(None);
    };
    Ok(self.hasher.verify(password, &hash).then_some(profile))
  }

  // ── Reporting ─────────────────────────────────────────────────────────────

  async fn count_users(&self) -> Result<u64> { self.count_records::<User>().await }

  async fn count_zoos(&self) -> Result<u64> { self.count_records::<Zoo>().await }

  async fn count_animals(&self) -> Result<u64> { self.count_records::<Animal>().await }

  async fn count_species(&self) -> Result<u64> { self.count_records::<Species>().await }

  async fn list_users_registered_between(
    &self,
    window: RegistrationWindow,
  ) -> Result<Vec<User>> {
    let Some((from, until)) = encode_range(window.from, window.until) else {
      return Ok(Vec::new());
    };

    Ok(
      self
        .conn
        .call(move |conn| {
          Ok(record::select_where::<User>(
            conn,
            "(?1 IS NULL OR registered_at >= ?1) AND (?2 IS NULL OR registered_at < ?2)",
            rusqlite::params![from, until],
          )?)
        })
        .await?,
    )
  }
}

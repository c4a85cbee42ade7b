//! Generic repository over [`TableDef`]s.
//!
//! Each entity implements [`Record`] once: which table it lives in, what its
//! write payload is, how to bind that payload and how to decode a row. The
//! CRUD functions below are written once against the trait and run inside a
//! `tokio_rusqlite` call closure. Every function issues a single statement, so
//! each call is atomic on its own.

use rusqlite::{Connection, OptionalExtension as _, Params, Row, params_from_iter, types::Value};
use zoo_core::{
  account::{Profile, User},
  animal::{Animal, NewAnimal},
  geo::{City, Country, NewCity},
  id::ProfileId,
  money::Money,
  species::{NewSpecies, Species},
  zoo::{NewZoo, Zoo},
};

use crate::{
  encode::{decode_dt_column, decode_sex, int, money, opt_int, opt_text, sex, text},
  schema::{ANIMALS, CITIES, COUNTRIES, PROFILES, SPECIES, TableDef, USERS, ZOOS},
};

pub trait Record: Sized + Send + 'static {
  const TABLE: &'static TableDef;

  /// Insert/update payload.
  type Draft;

  /// Values for the table's writable columns, in declaration order.
  fn bind(draft: &Self::Draft) -> Vec<Value>;

  /// Decode a row selected by [`TableDef::select_sql`]; column 0 is the id.
  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

// ─── Generic CRUD ────────────────────────────────────────────────────────────

/// Insert a row and return its new id.
pub fn insert<R: Record>(conn: &Connection, values: Vec<Value>) -> rusqlite::Result<i64> {
  conn.execute(&R::TABLE.insert_sql(), params_from_iter(values))?;
  Ok(conn.last_insert_rowid())
}

pub fn get<R: Record>(conn: &Connection, id: i64) -> rusqlite::Result<Option<R>> {
  conn
    .query_row(&R::TABLE.get_sql(), [id], R::from_row)
    .optional()
}

pub fn list<R: Record>(conn: &Connection) -> rusqlite::Result<Vec<R>> {
  let mut stmt = conn.prepare(&R::TABLE.list_sql())?;
  let rows = stmt
    .query_map([], R::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

/// Rows matching `clause` (appended after `WHERE`), in storage order.
pub fn select_where<R: Record>(
  conn: &Connection,
  clause: &str,
  params: impl Params,
) -> rusqlite::Result<Vec<R>> {
  let sql = format!("{} WHERE {clause}", R::TABLE.select_sql());
  let mut stmt = conn.prepare(&sql)?;
  let rows = stmt
    .query_map(params, R::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

/// Full-row update. Returns the number of rows touched; zero for an unknown
/// id, which callers treat as success.
pub fn update<R: Record>(
  conn: &Connection,
  id: i64,
  mut values: Vec<Value>,
) -> rusqlite::Result<usize> {
  values.push(Value::Integer(id));
  conn.execute(&R::TABLE.update_sql(), params_from_iter(values))
}

pub fn delete<R: Record>(conn: &Connection, id: i64) -> rusqlite::Result<usize> {
  conn.execute(&R::TABLE.delete_sql(), [id])
}

pub fn count<R: Record>(conn: &Connection) -> rusqlite::Result<u64> {
  let n: i64 = conn.query_row(&R::TABLE.count_sql(), [], |r| r.get(0))?;
  Ok(n.max(0) as u64)
}

// ─── Entities ────────────────────────────────────────────────────────────────

impl Record for Country {
  const TABLE: &'static TableDef = &COUNTRIES;
  type Draft = String;

  fn bind(name: &String) -> Vec<Value> { vec![text(name)] }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Country {
      country_id: row.get::<_, i64>(0)?.into(),
      name:       row.get(1)?,
    })
  }
}

impl Record for City {
  const TABLE: &'static TableDef = &CITIES;
  type Draft = NewCity;

  fn bind(city: &NewCity) -> Vec<Value> {
    vec![text(&city.name), int(city.country_id)]
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(City {
      city_id:    row.get::<_, i64>(0)?.into(),
      name:       row.get(1)?,
      country_id: row.get::<_, i64>(2)?.into(),
    })
  }
}

impl Record for Zoo {
  const TABLE: &'static TableDef = &ZOOS;
  type Draft = NewZoo;

  fn bind(zoo: &NewZoo) -> Vec<Value> {
    vec![
      text(&zoo.name),
      int(zoo.city_id),
      opt_int(zoo.area_m2),
      money(zoo.annual_budget),
    ]
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Zoo {
      zoo_id:        row.get::<_, i64>(0)?.into(),
      name:          row.get(1)?,
      city_id:       row.get::<_, i64>(2)?.into(),
      area_m2:       row.get(3)?,
      annual_budget: row.get::<_, Option<i64>>(4)?.map(Money::from_cents),
    })
  }
}

impl Record for Species {
  const TABLE: &'static TableDef = &SPECIES;
  type Draft = NewSpecies;

  fn bind(species: &NewSpecies) -> Vec<Value> {
    vec![
      text(&species.common_name),
      text(&species.scientific_name),
      opt_text(species.family.as_deref()),
      int(species.endangered),
    ]
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Species {
      species_id:      row.get::<_, i64>(0)?.into(),
      common_name:     row.get(1)?,
      scientific_name: row.get(2)?,
      family:          row.get(3)?,
      endangered:      row.get(4)?,
    })
  }
}

impl Record for Animal {
  const TABLE: &'static TableDef = &ANIMALS;
  type Draft = NewAnimal;

  fn bind(animal: &NewAnimal) -> Vec<Value> {
    vec![
      int(animal.zoo_id),
      int(animal.species_id),
      sex(animal.sex),
      opt_int(animal.birth_year),
      opt_text(animal.country_of_origin.as_deref()),
      opt_text(animal.continent.as_deref()),
    ]
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    let code: String = row.get(3)?;
    Ok(Animal {
      animal_id:         row.get::<_, i64>(0)?.into(),
      zoo_id:            row.get::<_, i64>(1)?.into(),
      species_id:        row.get::<_, i64>(2)?.into(),
      sex:               decode_sex(3, &code)?,
      birth_year:        row.get(4)?,
      country_of_origin: row.get(5)?,
      continent:         row.get(6)?,
    })
  }
}

impl Record for Profile {
  const TABLE: &'static TableDef = &PROFILES;
  type Draft = String;

  fn bind(name: &String) -> Vec<Value> { vec![text(name)] }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Profile {
      profile_id: row.get::<_, i64>(0)?.into(),
      name:       row.get(1)?,
    })
  }
}

/// Stored form of a user: the password is already hashed.
pub struct UserRow {
  pub username:      String,
  pub email:         String,
  pub password_hash: String,
  pub profile_id:    ProfileId,
}

impl Record for User {
  const TABLE: &'static TableDef = &USERS;
  type Draft = UserRow;

  fn bind(user: &UserRow) -> Vec<Value> {
    vec![
      text(&user.username),
      text(&user.email),
      text(&user.password_hash),
      int(user.profile_id),
    ]
  }

  // Column 3 is the password hash, which never leaves the store.
  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    let registered_at: String = row.get(5)?;
    Ok(User {
      user_id:       row.get::<_, i64>(0)?.into(),
      username:      row.get(1)?,
      email:         row.get(2)?,
      profile_id:    row.get::<_, i64>(4)?.into(),
      registered_at: decode_dt_column(5, &registered_at)?,
    })
  }
}

//! Declarative table definitions for the zoo store.
//!
//! Each table is described once as a [`TableDef`]; the DDL and every CRUD
//! statement the repository issues are rendered from that description. The
//! schema version lives in `PRAGMA user_version`.

use std::fmt::Write as _;

/// Version written to `PRAGMA user_version`. Any older non-zero version on
/// disk is upgraded by dropping and recreating every table.
pub const SCHEMA_VERSION: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnDelete {
  /// Deleting the parent deletes the children.
  Cascade,
  /// Deleting the parent fails while children exist.
  Restrict,
}

impl OnDelete {
  fn sql(self) -> &'static str {
    match self {
      OnDelete::Cascade => "CASCADE",
      OnDelete::Restrict => "RESTRICT",
    }
  }
}

#[derive(Debug)]
pub struct Column {
  pub name:     &'static str,
  pub decl:     &'static str,
  /// `false` for columns filled by a `DEFAULT` and never written by inserts
  /// or updates.
  pub writable: bool,
}

impl Column {
  const fn new(name: &'static str, decl: &'static str) -> Self {
    Self { name, decl, writable: true }
  }

  const fn defaulted(name: &'static str, decl: &'static str) -> Self {
    Self { name, decl, writable: false }
  }
}

#[derive(Debug)]
pub struct ForeignKey {
  pub column:    &'static str,
  pub parent:    &'static str,
  pub parent_id: &'static str,
  pub on_delete: OnDelete,
}

#[derive(Debug)]
pub struct TableDef {
  pub name:         &'static str,
  /// `INTEGER PRIMARY KEY AUTOINCREMENT`; ids are never reused.
  pub id:           &'static str,
  pub columns:      &'static [Column],
  pub foreign_keys: &'static [ForeignKey],
  pub unique:       &'static [&'static [&'static str]],
  pub checks:       &'static [&'static str],
  /// `ORDER BY` for listings; `None` keeps storage order.
  pub order_by:     Option<&'static str>,
}

impl TableDef {
  pub fn writable_columns(&self) -> impl Iterator<Item = &'static str> + '_ {
    self.columns.iter().filter(|c| c.writable).map(|c| c.name)
  }

  pub fn create_sql(&self) -> String {
    let mut sql = format!(
      "CREATE TABLE IF NOT EXISTS {} (\n    {} INTEGER PRIMARY KEY AUTOINCREMENT",
      self.name, self.id
    );
    for col in self.columns {
      let _ = write!(sql, ",\n    {} {}", col.name, col.decl);
    }
    for fk in self.foreign_keys {
      let _ = write!(
        sql,
        ",\n    FOREIGN KEY ({}) REFERENCES {}({}) ON UPDATE CASCADE ON DELETE {}",
        fk.column,
        fk.parent,
        fk.parent_id,
        fk.on_delete.sql()
      );
    }
    for key in self.unique {
      let _ = write!(sql, ",\n    UNIQUE ({})", key.join(", "));
    }
    for check in self.checks {
      let _ = write!(sql, ",\n    CHECK ({check})");
    }
    sql.push_str("\n);\n");

    // Child-side indexes keep cascade and restrict checks off full scans.
    for fk in self.foreign_keys {
      let _ = writeln!(
        sql,
        "CREATE INDEX IF NOT EXISTS {table}_{col}_idx ON {table}({col});",
        table = self.name,
        col = fk.column,
      );
    }
    sql
  }

  pub fn drop_sql(&self) -> String { format!("DROP TABLE IF EXISTS {};", self.name) }

  /// `SELECT id, col, ... FROM table` — column 0 is always the id, followed by
  /// every column in declaration order.
  pub fn select_sql(&self) -> String {
    let cols: Vec<&str> = self.columns.iter().map(|c| c.name).collect();
    format!("SELECT {}, {} FROM {}", self.id, cols.join(", "), self.name)
  }

  pub fn get_sql(&self) -> String {
    format!("{} WHERE {} = ?1", self.select_sql(), self.id)
  }

  pub fn list_sql(&self) -> String {
    match self.order_by {
      Some(order) => format!("{} ORDER BY {order}", self.select_sql()),
      None => self.select_sql(),
    }
  }

  pub fn insert_sql(&self) -> String {
    let cols: Vec<&str> = self.writable_columns().collect();
    let params: Vec<String> = (1..=cols.len()).map(|i| format!("?{i}")).collect();
    format!(
      "INSERT INTO {} ({}) VALUES ({})",
      self.name,
      cols.join(", "),
      params.join(", ")
    )
  }

  /// Full-row update; the id binds after the writable columns.
  pub fn update_sql(&self) -> String {
    let sets: Vec<String> = self
      .writable_columns()
      .enumerate()
      .map(|(i, col)| format!("{col} = ?{}", i + 1))
      .collect();
    format!(
      "UPDATE {} SET {} WHERE {} = ?{}",
      self.name,
      sets.join(", "),
      self.id,
      sets.len() + 1
    )
  }

  pub fn delete_sql(&self) -> String {
    format!("DELETE FROM {} WHERE {} = ?1", self.name, self.id)
  }

  pub fn count_sql(&self) -> String { format!("SELECT COUNT(*) FROM {}", self.name) }
}

// ─── Tables ──────────────────────────────────────────────────────────────────

pub const COUNTRIES: TableDef = TableDef {
  name:         "countries",
  id:           "country_id",
  columns:      &[Column::new("name", "TEXT NOT NULL")],
  foreign_keys: &[],
  unique:       &[&["name"]],
  checks:       &[],
  order_by:     None,
};

pub const CITIES: TableDef = TableDef {
  name:         "cities",
  id:           "city_id",
  columns:      &[
    Column::new("name", "TEXT NOT NULL"),
    Column::new("country_id", "INTEGER NOT NULL"),
  ],
  foreign_keys: &[ForeignKey {
    column:    "country_id",
    parent:    "countries",
    parent_id: "country_id",
    on_delete: OnDelete::Restrict,
  }],
  unique:       &[&["name", "country_id"]],
  checks:       &[],
  order_by:     Some("name"),
};

pub const ZOOS: TableDef = TableDef {
  name:         "zoos",
  id:           "zoo_id",
  columns:      &[
    Column::new("name", "TEXT NOT NULL"),
    Column::new("city_id", "INTEGER NOT NULL"),
    Column::new("area_m2", "INTEGER"),
    Column::new("annual_budget_cents", "INTEGER"),
  ],
  foreign_keys: &[ForeignKey {
    column:    "city_id",
    parent:    "cities",
    parent_id: "city_id",
    on_delete: OnDelete::Restrict,
  }],
  unique:       &[],
  checks:       &[],
  order_by:     None,
};

pub const SPECIES: TableDef = TableDef {
  name:         "species",
  id:           "species_id",
  columns:      &[
    Column::new("common_name", "TEXT NOT NULL"),
    Column::new("scientific_name", "TEXT NOT NULL"),
    Column::new("family", "TEXT"),
    Column::new("endangered", "INTEGER NOT NULL DEFAULT 0"),
  ],
  foreign_keys: &[],
  unique:       &[&["scientific_name"]],
  checks:       &["endangered IN (0, 1)"],
  order_by:     None,
};

pub const PROFILES: TableDef = TableDef {
  name:         "profiles",
  id:           "profile_id",
  columns:      &[Column::new("name", "TEXT NOT NULL")],
  foreign_keys: &[],
  unique:       &[&["name"]],
  checks:       &[],
  order_by:     Some("profile_id"),
};

pub const ANIMALS: TableDef = TableDef {
  name:         "animals",
  id:           "animal_id",
  columns:      &[
    Column::new("zoo_id", "INTEGER NOT NULL"),
    Column::new("species_id", "INTEGER NOT NULL"),
    Column::new("sex", "TEXT NOT NULL"),
    Column::new("birth_year", "INTEGER"),
    Column::new("country_of_origin", "TEXT"),
    Column::new("continent", "TEXT"),
  ],
  foreign_keys: &[
    ForeignKey {
      column:    "zoo_id",
      parent:    "zoos",
      parent_id: "zoo_id",
      on_delete: OnDelete::Cascade,
    },
    ForeignKey {
      column:    "species_id",
      parent:    "species",
      parent_id: "species_id",
      on_delete: OnDelete::Restrict,
    },
  ],
  unique:       &[],
  checks:       &["sex IN ('M', 'F')"],
  order_by:     None,
};

pub const USERS: TableDef = TableDef {
  name:         "users",
  id:           "user_id",
  columns:      &[
    Column::new("username", "TEXT NOT NULL"),
    Column::new("email", "TEXT NOT NULL"),
    // argon2id PHC string.
    Column::new("password_hash", "TEXT NOT NULL"),
    Column::new("profile_id", "INTEGER NOT NULL"),
    // Same fixed-width shape as `encode::encode_dt`.
    Column::defaulted(
      "registered_at",
      "TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))",
    ),
  ],
  foreign_keys: &[ForeignKey {
    column:    "profile_id",
    parent:    "profiles",
    parent_id: "profile_id",
    on_delete: OnDelete::Restrict,
  }],
  unique:       &[&["username"], &["email"]],
  checks:       &[],
  order_by:     None,
};

/// Every table in dependency order: parents before children. Drops walk this
/// list in reverse.
pub const TABLES: &[&TableDef] =
  &[&COUNTRIES, &CITIES, &ZOOS, &SPECIES, &PROFILES, &ANIMALS, &USERS];

// ─── Seed data ───────────────────────────────────────────────────────────────

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// Profiles seeded on creation. Self-registration assigns `user`.
pub const SEED_PROFILES: &str = "
INSERT OR IGNORE INTO profiles (profile_id, name) VALUES (1, 'admin'), (2, 'user');
";

/// Seeds the administrator account: `?1` username, `?2` email, `?3` hash.
pub const SEED_ADMIN: &str = "
INSERT OR IGNORE INTO users (username, email, password_hash, profile_id)
VALUES (?1, ?2, ?3, 1)
";

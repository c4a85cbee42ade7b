//! Command-line surface of the `zoo` binary.

use std::{fmt, path::PathBuf};

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use zoo_core::{animal::Sex, money::Money};

#[derive(Parser, Debug)]
#[command(name = "zoo", version, about = "Manage zoo records in a local SQLite store")]
pub struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "zoo.toml")]
  pub config: PathBuf,

  /// Database file; overrides `database_path` from the configuration.
  #[arg(long, env = "ZOO_DATABASE")]
  pub database: Option<PathBuf>,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Create or upgrade the database and print its profiles and counts.
  Init,

  /// Check a username/password pair and print the profile it maps to.
  Login {
    username: String,
    /// Read from stdin when omitted.
    #[arg(long, env = "ZOO_PASSWORD", hide_env_values = true)]
    password: Option<String>,
  },

  /// Change a user's password after checking the current one.
  Passwd {
    username: String,
    /// Read from stdin when omitted.
    #[arg(long)]
    current: Option<String>,
    /// Read from stdin when omitted.
    #[arg(long = "new")]
    new_password: Option<String>,
  },

  /// Find the account registered under an email address.
  Whois { email: String },

  /// Row counts plus the users registered between two dates (YYYY-MM-DD,
  /// both inclusive, either may be omitted).
  Report {
    #[arg(long)]
    from:  Option<NaiveDate>,
    #[arg(long)]
    until: Option<NaiveDate>,
  },

  /// Print every row of a table.
  List { entity: Entity },

  /// Print one row.
  Show { entity: Entity, id: i64 },

  /// Insert a row and print its new id.
  #[command(subcommand)]
  Add(Draft),

  /// Replace every field of an existing row.
  Update {
    id:    i64,
    #[command(subcommand)]
    draft: Draft,
  },

  /// Delete a row. Deleting a missing id is not an error.
  Delete { entity: Entity, id: i64 },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
  Country,
  City,
  Zoo,
  Species,
  Animal,
  Profile,
  User,
}

impl fmt::Display for Entity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Entity::Country => "country",
      Entity::City => "city",
      Entity::Zoo => "zoo",
      Entity::Species => "species",
      Entity::Animal => "animal",
      Entity::Profile => "profile",
      Entity::User => "user",
    };
    f.write_str(name)
  }
}

/// Field values for `add` and `update`. Parsing (numbers, money, sex code)
/// happens here so the store only ever sees typed values.
#[derive(Subcommand, Debug, Clone)]
pub enum Draft {
  Country {
    name: String,
  },
  City {
    name:    String,
    #[arg(long)]
    country: i64,
  },
  Zoo {
    name:   String,
    #[arg(long)]
    city:   i64,
    /// Surface in square meters.
    #[arg(long)]
    area:   Option<i64>,
    /// Annual budget, e.g. `100000.50`.
    #[arg(long)]
    budget: Option<Money>,
  },
  Species {
    common_name:     String,
    scientific_name: String,
    #[arg(long)]
    family:          Option<String>,
    #[arg(long)]
    endangered:      bool,
  },
  Animal {
    #[arg(long)]
    zoo:       i64,
    #[arg(long)]
    species:   i64,
    /// `M` or `F`.
    #[arg(long)]
    sex:       Sex,
    #[arg(long)]
    born:      Option<i32>,
    #[arg(long)]
    origin:    Option<String>,
    #[arg(long)]
    continent: Option<String>,
  },
  Profile {
    name: String,
  },
  User {
    username: String,
    email:    String,
    /// Profile id; defaults to the self-registration `user` profile.
    #[arg(long)]
    profile:  Option<i64>,
    /// Read from stdin when omitted.
    #[arg(long)]
    password: Option<String>,
  },
}

//! Executes parsed commands against any [`ZooStore`].
//!
//! Results are written to `out` as pretty-printed JSON. Input that the store
//! expects to be well-formed (usernames, emails, empty passwords) is checked
//! here before any store call.

use std::io::{self, BufRead as _, Write};

use anyhow::{Context as _, anyhow, ensure};
use serde::Serialize;
use serde_json::{Value, json};
use zoo_core::{
  account::NewUser,
  animal::NewAnimal,
  geo::NewCity,
  id::{AnimalId, CityId, CountryId, ProfileId, SpeciesId, UserId, ZooId},
  report::RegistrationWindow,
  species::NewSpecies,
  store::ZooStore,
  zoo::NewZoo,
};

use crate::cli::{Command, Draft, Entity};

pub async fn execute<S, W>(store: &S, command: Command, out: &mut W) -> anyhow::Result<()>
where
  S: ZooStore,
  W: Write,
{
  match command {
    // Opening the store already created or upgraded the schema; report what
    // it now holds.
    Command::Init => {
      let profiles = store.list_profiles().await?;
      let counts = store.counts().await?;
      write_json(out, &json!({ "profiles": profiles, "counts": counts }))
    }

    Command::Login { username, password } => {
      let password = password_or_prompt(password, "Password")?;
      let profile_id = store
        .profile_for_credentials(&username, &password)
        .await?
        .ok_or_else(|| anyhow!("invalid username or password"))?;
      let profile = store.get_profile(profile_id).await?.map(|p| p.name);
      tracing::info!(%username, %profile_id, "login accepted");
      write_json(
        out,
        &json!({ "username": username, "profile_id": profile_id, "profile": profile }),
      )
    }

    Command::Passwd { username, current, new_password } => {
      let current = password_or_prompt(current, "Current password")?;
      ensure!(
        store.validate_credentials(&username, &current).await?,
        "invalid username or password"
      );
      let new_password = password_or_prompt(new_password, "New password")?;
      ensure!(!new_password.is_empty(), "password must not be empty");
      store.change_password(&username, &new_password).await?;
      tracing::info!(%username, "password changed");
      write_json(out, &json!({ "username": username, "changed": true }))
    }

    Command::Whois { email } => {
      let user = store
        .user_by_email(&email)
        .await?
        .ok_or_else(|| anyhow!("no account registered under {email}"))?;
      write_json(out, &user)
    }

    Command::Report { from, until } => {
      let window = RegistrationWindow::from_dates(from, until);
      let counts = store.counts().await?;
      let users = store.list_users_registered_between(window).await?;
      write_json(out, &json!({ "counts": counts, "users": users }))
    }

    Command::List { entity } => {
      let rows = match entity {
        Entity::Country => serde_json::to_value(store.list_countries().await?)?,
        Entity::City => serde_json::to_value(store.list_cities().await?)?,
        Entity::Zoo => serde_json::to_value(store.list_zoos().await?)?,
        Entity::Species => serde_json::to_value(store.list_species().await?)?,
        Entity::Animal => serde_json::to_value(store.list_animals().await?)?,
        Entity::Profile => serde_json::to_value(store.list_profiles().await?)?,
        Entity::User => serde_json::to_value(store.list_users().await?)?,
      };
      write_json(out, &rows)
    }

    Command::Show { entity, id } => {
      let row = show(store, entity, id)
        .await?
        .ok_or_else(|| anyhow!("{entity} {id} not found"))?;
      write_json(out, &row)
    }

    Command::Add(draft) => {
      let id = add(store, draft).await?;
      write_json(out, &json!({ "id": id }))
    }

    Command::Update { id, draft } => {
      update(store, id, draft).await?;
      write_json(out, &json!({ "id": id, "updated": true }))
    }

    Command::Delete { entity, id } => {
      match entity {
        Entity::Country => store.delete_country(CountryId(id)).await?,
        Entity::City => store.delete_city(CityId(id)).await?,
        Entity::Zoo => store.delete_zoo(ZooId(id)).await?,
        Entity::Species => store.delete_species(SpeciesId(id)).await?,
        Entity::Animal => store.delete_animal(AnimalId(id)).await?,
        Entity::Profile => store.delete_profile(ProfileId(id)).await?,
        Entity::User => store.delete_user(UserId(id)).await?,
      }
      tracing::info!(%entity, id, "deleted");
      write_json(out, &json!({ "id": id, "deleted": true }))
    }
  }
}

async fn show<S: ZooStore>(store: &S, entity: Entity, id: i64) -> anyhow::Result<Option<Value>> {
  let row = match entity {
    Entity::Country => store.get_country(CountryId(id)).await?.map(serde_json::to_value),
    Entity::City => store.get_city(CityId(id)).await?.map(serde_json::to_value),
    Entity::Zoo => store.get_zoo(ZooId(id)).await?.map(serde_json::to_value),
    Entity::Species => store.get_species(SpeciesId(id)).await?.map(serde_json::to_value),
    Entity::Animal => store.get_animal(AnimalId(id)).await?.map(serde_json::to_value),
    Entity::Profile => store.get_profile(ProfileId(id)).await?.map(serde_json::to_value),
    Entity::User => store.get_user(UserId(id)).await?.map(serde_json::to_value),
  };
  Ok(row.transpose()?)
}

async fn add<S: ZooStore>(store: &S, draft: Draft) -> anyhow::Result<i64> {
  let id = match draft {
    Draft::Country { name } => store.add_country(name).await?.get(),
    Draft::City { name, country } => {
      store.add_city(NewCity::new(name, CountryId(country))).await?.get()
    }
    Draft::Zoo { name, city, area, budget } => store
      .add_zoo(NewZoo { name, city_id: CityId(city), area_m2: area, annual_budget: budget })
      .await?
      .get(),
    Draft::Species { common_name, scientific_name, family, endangered } => store
      .add_species(NewSpecies { common_name, scientific_name, family, endangered })
      .await?
      .get(),
    Draft::Animal { zoo, species, sex, born, origin, continent } => store
      .add_animal(NewAnimal {
        zoo_id:            ZooId(zoo),
        species_id:        SpeciesId(species),
        sex,
        birth_year:        born,
        country_of_origin: origin,
        continent,
      })
      .await?
      .get(),
    Draft::Profile { name } => store.add_profile(name).await?.get(),
    Draft::User { username, email, profile, password } => {
      store.add_user(new_user(username, email, profile, password)?).await?.get()
    }
  };
  tracing::info!(id, "added");
  Ok(id)
}

async fn update<S: ZooStore>(store: &S, id: i64, draft: Draft) -> anyhow::Result<()> {
  match draft {
    Draft::Country { name } => store.update_country(CountryId(id), name).await?,
    Draft::City { name, country } => {
      store.update_city(CityId(id), NewCity::new(name, CountryId(country))).await?
    }
    Draft::Zoo { name, city, area, budget } => {
      store
        .update_zoo(
          ZooId(id),
          NewZoo { name, city_id: CityId(city), area_m2: area, annual_budget: budget },
        )
        .await?
    }
    Draft::Species { common_name, scientific_name, family, endangered } => {
      store
        .update_species(
          SpeciesId(id),
          NewSpecies { common_name, scientific_name, family, endangered },
        )
        .await?
    }
    Draft::Animal { zoo, species, sex, born, origin, continent } => {
      store
        .update_animal(AnimalId(id), NewAnimal {
          zoo_id:            ZooId(zoo),
          species_id:        SpeciesId(species),
          sex,
          birth_year:        born,
          country_of_origin: origin,
          continent,
        })
        .await?
    }
    Draft::Profile { name } => store.update_profile(ProfileId(id), name).await?,
    Draft::User { username, email, profile, password } => {
      store
        .update_user(UserId(id), new_user(username, email, profile, password)?)
        .await?
    }
  }
  Ok(())
}

fn new_user(
  username: String,
  email: String,
  profile: Option<i64>,
  password: Option<String>,
) -> anyhow::Result<NewUser> {
  ensure!(
    !username.is_empty() && username.chars().all(|c| c.is_ascii_alphanumeric()),
    "username must be non-empty ASCII letters and digits: {username:?}"
  );
  ensure!(
    email
      .split_once('@')
      .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.')),
    "invalid email address: {email:?}"
  );
  let password = password_or_prompt(password, "Password")?;
  ensure!(!password.is_empty(), "password must not be empty");

  let profile_id = profile.map_or(ProfileId::USER, ProfileId);
  Ok(NewUser::new(username, email, password, profile_id))
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> anyhow::Result<()> {
  serde_json::to_writer_pretty(&mut *out, value)?;
  writeln!(out)?;
  Ok(())
}

/// Use the given password, or read one line from stdin.
fn password_or_prompt(given: Option<String>, label: &str) -> anyhow::Result<String> {
  if let Some(password) = given {
    return Ok(password);
  }
  eprint!("{label}: ");
  io::stderr().flush().ok();
  let mut line = String::new();
  io::stdin()
    .lock()
    .read_line(&mut line)
    .context("failed to read password from stdin")?;
  Ok(
    line
      .trim_end_matches('\n')
      .trim_end_matches('\r')
      .to_string(),
  )
}

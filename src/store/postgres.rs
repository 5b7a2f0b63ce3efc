//! PostgreSQL store built on sqlx. Identifiers are fixed; values are always bound parameters.

use super::Store;
use crate::config::Settings;
use crate::error::{AppError, ConfigError};
use crate::model::{
    Description, Hero, HeroPower, LinkedHeroPower, NewHero, NewHeroPower, NewPower, Power, PowerUpdate, Strength,
};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{ConnectOptions, PgPool, Row};
use std::str::FromStr;

const SELECT_HERO: &str = "SELECT id, name, super_name FROM heroes";
const SELECT_POWER: &str = "SELECT id, name, description FROM powers";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Open a pool sized from settings.
pub async fn connect(settings: &Settings) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.database_url)
        .await?;
    Ok(pool)
}

/// Create the database named in `database_url` if it does not exist, via the `postgres` maintenance database.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url).map_err(|_| {
        AppError::Config(ConfigError::Invalid {
            key: "DATABASE_URL",
            value: database_url.to_string(),
        })
    })?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let invalid = || {
        AppError::Config(ConfigError::Invalid {
            key: "DATABASE_URL",
            value: url.to_string(),
        })
    };
    let scheme_end = url.find("://").ok_or_else(invalid)? + 3;
    let path_start = url[scheme_end..].find('/').ok_or_else(invalid)? + scheme_end + 1;
    let db_name = url[path_start..].split('?').next().unwrap_or("").trim();
    let admin_url = format!("{}postgres", &url[..path_start]);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn hero_from_row(row: &PgRow) -> Result<Hero, AppError> {
    Ok(Hero {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        super_name: row.try_get("super_name")?,
    })
}

fn power_from_row(row: &PgRow) -> Result<Power, AppError> {
    let id: i64 = row.try_get("id")?;
    let description: String = row.try_get("description")?;
    let description =
        Description::new(description).map_err(|e| AppError::Internal(format!("power {}: {}", id, e)))?;
    Ok(Power {
        id,
        name: row.try_get("name")?,
        description,
    })
}

fn hero_power_from_row(row: &PgRow) -> Result<HeroPower, AppError> {
    let id: i64 = row.try_get("id")?;
    let strength: String = row.try_get("strength")?;
    let strength =
        Strength::from_str(&strength).map_err(|e| AppError::Internal(format!("hero power {}: {}", id, e)))?;
    Ok(HeroPower {
        id,
        strength,
        hero_id: row.try_get("hero_id")?,
        power_id: row.try_get("power_id")?,
    })
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn list_heroes(&self) -> Result<Vec<Hero>, AppError> {
        let sql = format!("{} ORDER BY id", SELECT_HERO);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(hero_from_row).collect()
    }

    async fn find_hero(&self, id: i64) -> Result<Option<Hero>, AppError> {
        let sql = format!("{} WHERE id = $1", SELECT_HERO);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(hero_from_row).transpose()
    }

    async fn insert_hero(&self, hero: &NewHero) -> Result<Hero, AppError> {
        let sql = "INSERT INTO heroes (name, super_name) VALUES ($1, $2) RETURNING id, name, super_name";
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query(sql)
            .bind(&hero.name)
            .bind(&hero.super_name)
            .fetch_one(&self.pool)
            .await?;
        hero_from_row(&row)
    }

    async fn list_powers(&self) -> Result<Vec<Power>, AppError> {
        let sql = format!("{} ORDER BY id", SELECT_POWER);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(power_from_row).collect()
    }

    async fn find_power(&self, id: i64) -> Result<Option<Power>, AppError> {
        let sql = format!("{} WHERE id = $1", SELECT_POWER);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(power_from_row).transpose()
    }

    async fn powers_by_ids(&self, ids: &[i64]) -> Result<Vec<Power>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!("{} WHERE id = ANY($1) ORDER BY id", SELECT_POWER);
        tracing::debug!(sql = %sql, ids = ?ids, "query");
        let rows = sqlx::query(&sql).bind(ids).fetch_all(&self.pool).await?;
        rows.iter().map(power_from_row).collect()
    }

    async fn insert_power(&self, power: &NewPower) -> Result<Power, AppError> {
        let sql = "INSERT INTO powers (name, description) VALUES ($1, $2) RETURNING id, name, description";
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query(sql)
            .bind(&power.name)
            .bind(power.description.as_str())
            .fetch_one(&self.pool)
            .await?;
        power_from_row(&row)
    }

    async fn update_power(&self, id: i64, update: &PowerUpdate) -> Result<Option<Power>, AppError> {
        let sql = "UPDATE powers SET name = COALESCE($2, name), description = COALESCE($3, description) \
                   WHERE id = $1 RETURNING id, name, description";
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query(sql)
            .bind(id)
            .bind(update.name.as_deref())
            .bind(update.description.as_ref().map(Description::as_str))
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(power_from_row).transpose()
    }

    async fn hero_powers_for_hero(&self, hero_id: i64) -> Result<Vec<HeroPower>, AppError> {
        let sql = "SELECT id, strength, hero_id, power_id FROM hero_powers WHERE hero_id = $1 ORDER BY id";
        tracing::debug!(sql = %sql, hero_id, "query");
        let rows = sqlx::query(sql).bind(hero_id).fetch_all(&self.pool).await?;
        rows.iter().map(hero_power_from_row).collect()
    }

    async fn insert_hero_power(&self, link: &NewHeroPower) -> Result<Option<LinkedHeroPower>, AppError> {
        // Dropping the transaction before commit rolls it back.
        let mut tx = self.pool.begin().await?;
        let hero = sqlx::query(&format!("{} WHERE id = $1 FOR KEY SHARE", SELECT_HERO))
            .bind(link.hero_id)
            .fetch_optional(&mut *tx)
            .await?;
        let power = sqlx::query(&format!("{} WHERE id = $1 FOR KEY SHARE", SELECT_POWER))
            .bind(link.power_id)
            .fetch_optional(&mut *tx)
            .await?;
        let (Some(hero), Some(power)) = (hero, power) else {
            tracing::debug!(hero_id = link.hero_id, power_id = link.power_id, "hero power references missing row");
            return Ok(None);
        };
        let sql = "INSERT INTO hero_powers (strength, hero_id, power_id) VALUES ($1, $2, $3) \
                   RETURNING id, strength, hero_id, power_id";
        tracing::debug!(sql = %sql, "query (tx)");
        let row = sqlx::query(sql)
            .bind(link.strength.as_str())
            .bind(link.hero_id)
            .bind(link.power_id)
            .fetch_one(&mut *tx)
            .await?;
        let linked = LinkedHeroPower {
            hero_power: hero_power_from_row(&row)?,
            hero: hero_from_row(&hero)?,
            power: power_from_row(&power)?,
        };
        tx.commit().await?;
        Ok(Some(linked))
    }
}

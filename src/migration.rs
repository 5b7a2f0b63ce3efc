//! Linear schema history. Each migration runs once, in version order, inside its own transaction.

use crate::error::AppError;
use sqlx::PgPool;

const MIGRATIONS_TABLE: &str = "_schema_migrations";

#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub version: i64,
    pub name: &'static str,
    pub sql: &'static str,
}

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_heroes",
        sql: r#"
            CREATE TABLE heroes (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                super_name TEXT NOT NULL
            )
        "#,
    },
    Migration {
        version: 2,
        name: "create_powers",
        sql: r#"
            CREATE TABLE powers (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL CHECK (char_length(description) >= 20)
            )
        "#,
    },
    Migration {
        version: 3,
        name: "create_hero_powers",
        sql: r#"
            CREATE TABLE hero_powers (
                id BIGSERIAL PRIMARY KEY,
                strength TEXT NOT NULL CHECK (strength IN ('Strong', 'Weak', 'Average')),
                hero_id BIGINT NOT NULL REFERENCES heroes (id),
                power_id BIGINT NOT NULL REFERENCES powers (id)
            )
        "#,
    },
    Migration {
        version: 4,
        name: "index_hero_powers_hero_id",
        sql: "CREATE INDEX hero_powers_hero_id_idx ON hero_powers (hero_id)",
    },
];

/// Migrations newer than `current`, in order.
pub fn pending(current: i64) -> impl Iterator<Item = &'static Migration> {
    MIGRATIONS.iter().filter(move |m| m.version > current)
}

/// Bring the schema up to the latest version. Returns the number of migrations applied.
pub async fn apply_migrations(pool: &PgPool) -> Result<usize, AppError> {
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            version BIGINT PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        MIGRATIONS_TABLE
    ))
    .execute(pool)
    .await?;

    let (current,): (Option<i64>,) = sqlx::query_as(&format!("SELECT MAX(version) FROM {}", MIGRATIONS_TABLE))
        .fetch_one(pool)
        .await?;
    let current = current.unwrap_or(0);

    let mut applied = 0;
    for migration in pending(current) {
        let mut tx = pool.begin().await?;
        sqlx::query(migration.sql).execute(&mut *tx).await?;
        sqlx::query(&format!("INSERT INTO {} (version, name) VALUES ($1, $2)", MIGRATIONS_TABLE))
            .bind(migration.version)
            .bind(migration.name)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::info!(version = migration.version, name = migration.name, "applied migration");
        applied += 1;
    }
    if applied == 0 {
        tracing::debug!(version = current, "schema up to date");
    }
    Ok(applied)
}

//! Persistence for heroes, powers and hero powers.
//!
//! [`PgStore`] is the production backend; [`MemoryStore`] keeps everything in
//! process and backs the tests and `serve --in-memory`.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{connect, ensure_database_exists, PgStore};

use crate::error::AppError;
use crate::model::{Hero, HeroPower, LinkedHeroPower, NewHero, NewHeroPower, NewPower, Power, PowerUpdate};
use async_trait::async_trait;

#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap round trip used by readiness checks.
    async fn ping(&self) -> Result<(), AppError>;

    async fn list_heroes(&self) -> Result<Vec<Hero>, AppError>;

    async fn find_hero(&self, id: i64) -> Result<Option<Hero>, AppError>;

    async fn insert_hero(&self, hero: &NewHero) -> Result<Hero, AppError>;

    async fn list_powers(&self) -> Result<Vec<Power>, AppError>;

    async fn find_power(&self, id: i64) -> Result<Option<Power>, AppError>;

    /// Batch load for related rows. Unknown ids are ignored.
    async fn powers_by_ids(&self, ids: &[i64]) -> Result<Vec<Power>, AppError>;

    async fn insert_power(&self, power: &NewPower) -> Result<Power, AppError>;

    /// Applies `update` to the power. Returns `None` when the power does not exist.
    async fn update_power(&self, id: i64, update: &PowerUpdate) -> Result<Option<Power>, AppError>;

    /// Links of a hero, ordered by link id.
    async fn hero_powers_for_hero(&self, hero_id: i64) -> Result<Vec<HeroPower>, AppError>;

    /// Inserts a link after confirming both ends exist, atomically. Returns
    /// `None` (and stores nothing) when either the hero or the power is missing.
    async fn insert_hero_power(&self, link: &NewHeroPower) -> Result<Option<LinkedHeroPower>, AppError>;
}

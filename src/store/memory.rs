//! In-process store. Ids are assigned from per-table sequences starting at 1.

use super::Store;
use crate::error::AppError;
use crate::model::{Hero, HeroPower, LinkedHeroPower, NewHero, NewHeroPower, NewPower, Power, PowerUpdate};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct Tables {
    heroes: BTreeMap<i64, Hero>,
    powers: BTreeMap<i64, Power>,
    hero_powers: BTreeMap<i64, HeroPower>,
    last_hero_id: i64,
    last_power_id: i64,
    last_hero_power_id: i64,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.tables
            .read()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables
            .write()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }

    async fn list_heroes(&self) -> Result<Vec<Hero>, AppError> {
        Ok(self.read()?.heroes.values().cloned().collect())
    }

    async fn find_hero(&self, id: i64) -> Result<Option<Hero>, AppError> {
        Ok(self.read()?.heroes.get(&id).cloned())
    }

    async fn insert_hero(&self, hero: &NewHero) -> Result<Hero, AppError> {
        let mut tables = self.write()?;
        tables.last_hero_id += 1;
        let hero = Hero {
            id: tables.last_hero_id,
            name: hero.name.clone(),
            super_name: hero.super_name.clone(),
        };
        tables.heroes.insert(hero.id, hero.clone());
        Ok(hero)
    }

    async fn list_powers(&self) -> Result<Vec<Power>, AppError> {
        Ok(self.read()?.powers.values().cloned().collect())
    }

    async fn find_power(&self, id: i64) -> Result<Option<Power>, AppError> {
        Ok(self.read()?.powers.get(&id).cloned())
    }

    async fn powers_by_ids(&self, ids: &[i64]) -> Result<Vec<Power>, AppError> {
        let tables = self.read()?;
        Ok(tables
            .powers
            .values()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn insert_power(&self, power: &NewPower) -> Result<Power, AppError> {
        let mut tables = self.write()?;
        tables.last_power_id += 1;
        let power = Power {
            id: tables.last_power_id,
            name: power.name.clone(),
            description: power.description.clone(),
        };
        tables.powers.insert(power.id, power.clone());
        Ok(power)
    }

    async fn update_power(&self, id: i64, update: &PowerUpdate) -> Result<Option<Power>, AppError> {
        let mut tables = self.write()?;
        Ok(tables.powers.get_mut(&id).map(|power| {
            power.apply(update);
            power.clone()
        }))
    }

    async fn hero_powers_for_hero(&self, hero_id: i64) -> Result<Vec<HeroPower>, AppError> {
        let tables = self.read()?;
        Ok(tables
            .hero_powers
            .values()
            .filter(|hp| hp.hero_id == hero_id)
            .cloned()
            .collect())
    }

    async fn insert_hero_power(&self, link: &NewHeroPower) -> Result<Option<LinkedHeroPower>, AppError> {
        let mut tables = self.write()?;
        let (Some(hero), Some(power)) = (
            tables.heroes.get(&link.hero_id).cloned(),
            tables.powers.get(&link.power_id).cloned(),
        ) else {
            return Ok(None);
        };
        tables.last_hero_power_id += 1;
        let hero_power = HeroPower {
            id: tables.last_hero_power_id,
            strength: link.strength,
            hero_id: link.hero_id,
            power_id: link.power_id,
        };
        tables.hero_powers.insert(hero_power.id, hero_power.clone());
        Ok(Some(LinkedHeroPower { hero_power, hero, power }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Description, Strength};

    fn power(name: &str) -> NewPower {
        NewPower {
            name: name.into(),
            description: Description::new("a description that is long enough").unwrap(),
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_per_table() {
        let store = MemoryStore::new();
        let a = store.insert_power(&power("a")).await.unwrap();
        let b = store.insert_power(&power("b")).await.unwrap();
        let h = store.insert_hero(&NewHero::new("Ororo Munroe", "Storm")).await.unwrap();
        assert_eq!((a.id, b.id, h.id), (1, 2, 1));
    }

    #[tokio::test]
    async fn link_to_missing_row_stores_nothing() {
        let store = MemoryStore::new();
        let hero = store.insert_hero(&NewHero::new("Jean Grey", "Dark Phoenix")).await.unwrap();
        let link = NewHeroPower {
            strength: Strength::Strong,
            hero_id: hero.id,
            power_id: 42,
        };
        assert!(store.insert_hero_power(&link).await.unwrap().is_none());
        assert!(store.hero_powers_for_hero(hero.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_missing_power_is_none() {
        let store = MemoryStore::new();
        let update = PowerUpdate {
            name: Some("x".into()),
            description: None,
        };
        assert!(store.update_power(7, &update).await.unwrap().is_none());
    }
}

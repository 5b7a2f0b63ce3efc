//! Entity graph serialization with explicit, per-call relation exclusion.
//!
//! Every nested expansion excludes the relation leading back to its parent,
//! so output depth is bounded no matter which entity serialization starts from.

use crate::model::{Hero, HeroPower, Power};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Relations that can be expanded while serializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// `Hero.hero_powers` / `Power.hero_powers`.
    HeroPowers,
    /// `HeroPower.hero`.
    Hero,
    /// `HeroPower.power`.
    Power,
}

/// Entities loaded for a single response.
#[derive(Debug, Default, Clone)]
pub struct Graph {
    heroes: BTreeMap<i64, Hero>,
    powers: BTreeMap<i64, Power>,
    hero_powers: BTreeMap<i64, HeroPower>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_heroes(mut self, heroes: impl IntoIterator<Item = Hero>) -> Self {
        self.heroes.extend(heroes.into_iter().map(|h| (h.id, h)));
        self
    }

    pub fn with_powers(mut self, powers: impl IntoIterator<Item = Power>) -> Self {
        self.powers.extend(powers.into_iter().map(|p| (p.id, p)));
        self
    }

    pub fn with_hero_powers(mut self, links: impl IntoIterator<Item = HeroPower>) -> Self {
        self.hero_powers.extend(links.into_iter().map(|hp| (hp.id, hp)));
        self
    }

    pub fn hero(&self, id: i64) -> Option<&Hero> {
        self.heroes.get(&id)
    }

    pub fn power(&self, id: i64) -> Option<&Power> {
        self.powers.get(&id)
    }

    /// Links of a hero, ordered by link id.
    pub fn hero_powers_of_hero(&self, hero_id: i64) -> impl Iterator<Item = &HeroPower> {
        self.hero_powers.values().filter(move |hp| hp.hero_id == hero_id)
    }

    /// Links of a power, ordered by link id.
    pub fn hero_powers_of_power(&self, power_id: i64) -> impl Iterator<Item = &HeroPower> {
        self.hero_powers.values().filter(move |hp| hp.power_id == power_id)
    }

    /// Powers reached by following each link of the hero. Links whose power
    /// is not loaded are skipped.
    pub fn powers_of_hero(&self, hero_id: i64) -> Vec<&Power> {
        self.hero_powers_of_hero(hero_id)
            .filter_map(|hp| self.power(hp.power_id))
            .collect()
    }
}

pub struct Serializer<'g> {
    graph: &'g Graph,
}

impl<'g> Serializer<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    pub fn hero(&self, hero: &Hero, exclude: &[Relation]) -> Value {
        let mut obj = Map::new();
        obj.insert("id".into(), hero.id.into());
        obj.insert("name".into(), hero.name.clone().into());
        obj.insert("super_name".into(), hero.super_name.clone().into());
        if !exclude.contains(&Relation::HeroPowers) {
            let links = self
                .graph
                .hero_powers_of_hero(hero.id)
                .map(|hp| self.hero_power(hp, &[Relation::Hero]))
                .collect();
            obj.insert("hero_powers".into(), Value::Array(links));
        }
        Value::Object(obj)
    }

    pub fn power(&self, power: &Power, exclude: &[Relation]) -> Value {
        let mut obj = Map::new();
        obj.insert("id".into(), power.id.into());
        obj.insert("name".into(), power.name.clone().into());
        obj.insert("description".into(), power.description.as_str().into());
        if !exclude.contains(&Relation::HeroPowers) {
            let links = self
                .graph
                .hero_powers_of_power(power.id)
                .map(|hp| self.hero_power(hp, &[Relation::Power]))
                .collect();
            obj.insert("hero_powers".into(), Value::Array(links));
        }
        Value::Object(obj)
    }

    pub fn hero_power(&self, hp: &HeroPower, exclude: &[Relation]) -> Value {
        let mut obj = Map::new();
        obj.insert("id".into(), hp.id.into());
        obj.insert("strength".into(), hp.strength.as_str().into());
        obj.insert("hero_id".into(), hp.hero_id.into());
        obj.insert("power_id".into(), hp.power_id.into());
        if !exclude.contains(&Relation::Hero) {
            if let Some(hero) = self.graph.hero(hp.hero_id) {
                obj.insert("hero".into(), self.hero(hero, &[Relation::HeroPowers]));
            }
        }
        if !exclude.contains(&Relation::Power) {
            if let Some(power) = self.graph.power(hp.power_id) {
                obj.insert("power".into(), self.power(power, &[Relation::HeroPowers]));
            }
        }
        Value::Object(obj)
    }
}

/// `GET /heroes/{id}` body: the hero plus the powers reached through its links.
#[derive(Debug, Serialize)]
pub struct HeroDetail<'a> {
    #[serde(flatten)]
    pub hero: &'a Hero,
    pub powers: Vec<&'a Power>,
}

impl<'a> HeroDetail<'a> {
    pub fn from_graph(graph: &'a Graph, hero: &'a Hero) -> Self {
        Self {
            hero,
            powers: graph.powers_of_hero(hero.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Description, Strength};
    use serde_json::json;

    fn graph() -> Graph {
        Graph::new()
            .with_heroes([Hero {
                id: 1,
                name: "Kamala Khan".into(),
                super_name: "Ms. Marvel".into(),
            }])
            .with_powers([
                Power {
                    id: 1,
                    name: "super strength".into(),
                    description: Description::new("gives the wielder super-human strengths").unwrap(),
                },
                Power {
                    id: 2,
                    name: "flight".into(),
                    description: Description::new("gives the wielder the ability to fly").unwrap(),
                },
            ])
            .with_hero_powers([
                HeroPower { id: 5, strength: Strength::Weak, hero_id: 1, power_id: 2 },
                HeroPower { id: 3, strength: Strength::Strong, hero_id: 1, power_id: 1 },
            ])
    }

    #[test]
    fn hero_power_embeds_both_ends_without_back_references() {
        let g = graph();
        let hp = g.hero_powers_of_hero(1).next().unwrap().clone();
        let value = Serializer::new(&g).hero_power(&hp, &[]);
        assert_eq!(
            value,
            json!({
                "id": 3,
                "strength": "Strong",
                "hero_id": 1,
                "power_id": 1,
                "hero": { "id": 1, "name": "Kamala Khan", "super_name": "Ms. Marvel" },
                "power": { "id": 1, "name": "super strength", "description": "gives the wielder super-human strengths" },
            })
        );
    }

    #[test]
    fn hero_expansion_stops_at_power() {
        let g = graph();
        let hero = g.hero(1).unwrap();
        let value = Serializer::new(&g).hero(hero, &[]);
        let links = value["hero_powers"].as_array().unwrap();
        assert_eq!(links.len(), 2);
        for link in links {
            assert!(link.get("hero").is_none());
            assert!(link["power"].get("hero_powers").is_none());
        }
    }

    #[test]
    fn power_expansion_stops_at_hero() {
        let g = graph();
        let power = g.power(2).unwrap();
        let value = Serializer::new(&g).power(power, &[]);
        let link = &value["hero_powers"][0];
        assert!(link.get("power").is_none());
        assert_eq!(link["hero"], json!({ "id": 1, "name": "Kamala Khan", "super_name": "Ms. Marvel" }));
    }

    #[test]
    fn excluding_hero_powers_matches_the_plain_struct() {
        let g = graph();
        let hero = g.hero(1).unwrap();
        let ruled = Serializer::new(&g).hero(hero, &[Relation::HeroPowers]);
        assert_eq!(ruled, serde_json::to_value(hero).unwrap());

        let power = g.power(1).unwrap();
        let ruled = Serializer::new(&g).power(power, &[Relation::HeroPowers]);
        assert_eq!(ruled, serde_json::to_value(power).unwrap());
    }

    #[test]
    fn hero_detail_follows_links_in_order() {
        let g = graph();
        let hero = g.hero(1).unwrap();
        let value = serde_json::to_value(HeroDetail::from_graph(&g, hero)).unwrap();
        assert_eq!(value["super_name"], "Ms. Marvel");
        let names: Vec<_> = value["powers"].as_array().unwrap().iter().map(|p| p["name"].clone()).collect();
        assert_eq!(names, vec![json!("super strength"), json!("flight")]);
    }
}

//! Development sample data: fixed heroes and powers with random links between them.

use crate::error::AppError;
use crate::model::{Description, NewHero, NewHeroPower, NewPower, Strength};
use crate::store::Store;
use rand::seq::SliceRandom;
use rand::Rng;

pub const POWERS: &[(&str, &str)] = &[
    ("super strength", "gives the wielder super-human strengths"),
    ("flight", "gives the wielder the ability to fly through the skies at supersonic speed"),
    ("super human senses", "allows the wielder to use her senses at a super-human level"),
    ("elasticity", "can stretch the human body to extreme lengths"),
];

pub const HEROES: &[(&str, &str)] = &[
    ("Kamala Khan", "Ms. Marvel"),
    ("Doreen Green", "Squirrel Girl"),
    ("Gwen Stacy", "Spider-Gwen"),
    ("Janet Van Dyne", "The Wasp"),
    ("Wanda Maximoff", "Scarlet Witch"),
    ("Carol Danvers", "Captain Marvel"),
    ("Jean Grey", "Dark Phoenix"),
    ("Ororo Munroe", "Storm"),
    ("Kitty Pryde", "Shadowcat"),
    ("Elektra Natchios", "Elektra"),
];

/// Links created per hero, inclusive.
const LINKS_PER_HERO: std::ops::RangeInclusive<usize> = 1..=3;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub powers: usize,
    pub heroes: usize,
    pub hero_powers: usize,
}

/// Insert the sample powers and heroes, then give every hero 1 to 3 random powers.
pub async fn seed<R: Rng + Send>(store: &dyn Store, rng: &mut R) -> Result<SeedReport, AppError> {
    let mut report = SeedReport::default();

    let mut powers = Vec::with_capacity(POWERS.len());
    for (name, description) in POWERS {
        let power = NewPower {
            name: name.to_string(),
            description: Description::new(*description)?,
        };
        powers.push(store.insert_power(&power).await?);
    }
    report.powers = powers.len();

    let mut heroes = Vec::with_capacity(HEROES.len());
    for (name, super_name) in HEROES {
        heroes.push(store.insert_hero(&NewHero::new(*name, *super_name)).await?);
    }
    report.heroes = heroes.len();

    for hero in &heroes {
        for _ in 0..rng.gen_range(LINKS_PER_HERO) {
            let (Some(power), Some(strength)) = (powers.choose(rng), Strength::ALL.choose(rng).copied()) else {
                continue;
            };
            let link = NewHeroPower {
                strength,
                hero_id: hero.id,
                power_id: power.id,
            };
            store
                .insert_hero_power(&link)
                .await?
                .ok_or_else(|| AppError::Internal(format!("seeded hero {} lost its power {}", hero.id, power.id)))?;
            report.hero_powers += 1;
        }
    }

    tracing::info!(
        powers = report.powers,
        heroes = report.heroes,
        hero_powers = report.hero_powers,
        "seeded"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sample_descriptions_satisfy_the_length_rule() {
        for (name, description) in POWERS {
            assert!(Description::new(*description).is_ok(), "{name}");
        }
    }

    #[tokio::test]
    async fn seeds_every_hero_with_one_to_three_powers() {
        let store = MemoryStore::new();
        let mut rng = StdRng::seed_from_u64(7);
        let report = seed(&store, &mut rng).await.unwrap();

        assert_eq!(report.powers, 4);
        assert_eq!(report.heroes, 10);
        assert_eq!(store.list_heroes().await.unwrap().len(), 10);

        let mut total = 0;
        for hero in store.list_heroes().await.unwrap() {
            let links = store.hero_powers_for_hero(hero.id).await.unwrap();
            assert!(LINKS_PER_HERO.contains(&links.len()), "{}: {}", hero.super_name, links.len());
            total += links.len();
        }
        assert_eq!(total, report.hero_powers);
    }

    #[tokio::test]
    async fn same_rng_seed_gives_same_links() {
        let a = MemoryStore::new();
        let b = MemoryStore::new();
        seed(&a, &mut StdRng::seed_from_u64(42)).await.unwrap();
        seed(&b, &mut StdRng::seed_from_u64(42)).await.unwrap();
        for hero in a.list_heroes().await.unwrap() {
            assert_eq!(
                a.hero_powers_for_hero(hero.id).await.unwrap(),
                b.hero_powers_for_hero(hero.id).await.unwrap()
            );
        }
    }
}

//! Entities and the value types that carry their invariants.

mod hero;
mod hero_power;
mod power;

pub use hero::{Hero, NewHero};
pub use hero_power::{HeroPower, LinkedHeroPower, NewHeroPower, Strength};
pub use power::{Description, NewPower, Power, PowerUpdate};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("description must be at least {min} characters")]
    DescriptionTooShort { min: usize },
    #[error("Invalid strength")]
    InvalidStrength,
    #[error("{field} must be a string")]
    NotAString { field: &'static str },
}

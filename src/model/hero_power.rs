use super::{Hero, Power, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strength {
    Strong,
    Weak,
    Average,
}

impl Strength {
    pub const ALL: [Strength; 3] = [Strength::Strong, Strength::Weak, Strength::Average];

    pub fn as_str(self) -> &'static str {
        match self {
            Strength::Strong => "Strong",
            Strength::Weak => "Weak",
            Strength::Average => "Average",
        }
    }
}

impl FromStr for Strength {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strength::ALL
            .into_iter()
            .find(|strength| strength.as_str() == s)
            .ok_or(ValidationError::InvalidStrength)
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroPower {
    pub id: i64,
    pub strength: Strength,
    pub hero_id: i64,
    pub power_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHeroPower {
    pub strength: Strength,
    pub hero_id: i64,
    pub power_id: i64,
}

/// A freshly stored link together with the rows it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedHeroPower {
    pub hero_power: HeroPower,
    pub hero: Hero,
    pub power: Power,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exactly_the_three_levels() {
        assert_eq!("Strong".parse::<Strength>(), Ok(Strength::Strong));
        assert_eq!("Weak".parse::<Strength>(), Ok(Strength::Weak));
        assert_eq!("Average".parse::<Strength>(), Ok(Strength::Average));
        for bad in ["strong", "STRONG", "Invalid", "", " Weak"] {
            assert_eq!(bad.parse::<Strength>(), Err(ValidationError::InvalidStrength), "{bad}");
        }
    }

    #[test]
    fn serializes_as_plain_string() {
        assert_eq!(serde_json::to_value(Strength::Average).unwrap(), serde_json::json!("Average"));
    }
}

use super::ValidationError;
use serde::{Deserialize, Serialize};

/// Power description; always at least [`Description::MIN_CHARS`] characters long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    pub const MIN_CHARS: usize = 20;

    pub fn new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.chars().count() < Self::MIN_CHARS {
            return Err(ValidationError::DescriptionTooShort { min: Self::MIN_CHARS });
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Description {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Description> for String {
    fn from(value: Description) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Power {
    pub id: i64,
    pub name: String,
    pub description: Description,
}

impl Power {
    /// Overwrites the allow-listed fields present in `update`.
    pub fn apply(&mut self, update: &PowerUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPower {
    pub name: String,
    pub description: Description,
}

/// Partial update for a power. Only these fields can change through PATCH.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PowerUpdate {
    pub name: Option<String>,
    pub description: Option<Description>,
}

impl PowerUpdate {
    pub const FIELDS: &'static [&'static str] = &["name", "description"];

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_boundary() {
        assert!(Description::new("a".repeat(19)).is_err());
        assert!(Description::new("a".repeat(20)).is_ok());
    }

    #[test]
    fn description_counts_characters_not_bytes() {
        // 10 two-byte characters: 20 bytes but only 10 characters.
        let err = Description::new("é".repeat(10)).unwrap_err();
        assert_eq!(err.to_string(), "description must be at least 20 characters");
    }

    #[test]
    fn deserializing_enforces_length() {
        let ok: Result<Power, _> = serde_json::from_value(serde_json::json!({
            "id": 2,
            "name": "flight",
            "description": "fly through the skies at supersonic speed",
        }));
        assert!(ok.is_ok());

        let short: Result<Power, _> = serde_json::from_value(serde_json::json!({
            "id": 2,
            "name": "flight",
            "description": "too short",
        }));
        assert!(short.is_err());
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut power = Power {
            id: 1,
            name: "flight".into(),
            description: Description::new("gives the wielder the ability to fly").unwrap(),
        };
        power.apply(&PowerUpdate {
            name: Some("soaring".into()),
            description: None,
        });
        assert_eq!(power.name, "soaring");
        assert_eq!(power.description.as_str(), "gives the wielder the ability to fly");
    }
}

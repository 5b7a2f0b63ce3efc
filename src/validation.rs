//! Request validation: turns raw JSON bodies into typed payloads.

use crate::error::AppError;
use crate::model::{Description, NewHeroPower, NewPower, PowerUpdate, Strength, ValidationError};
use serde_json::{Map, Value};

pub const MISSING_DATA_FIELDS: &str = "Missing data fields";

pub struct RequestValidator;

impl RequestValidator {
    /// Body of `POST /powers`. Both fields are required and must be strings.
    pub fn new_power(body: &Map<String, Value>) -> Result<NewPower, AppError> {
        if !["name", "description"].iter().all(|k| body.contains_key(*k)) {
            return Err(AppError::MissingFields(vec![MISSING_DATA_FIELDS.to_string()]));
        }
        let name = string_field(body, "name")?;
        let description = Description::new(string_field(body, "description")?)?;
        Ok(NewPower { name, description })
    }

    /// Body of `PATCH /powers/{id}`. Only allow-listed keys are accepted; every
    /// failure is reported with the singular envelope.
    pub fn power_update(body: &Map<String, Value>) -> Result<PowerUpdate, AppError> {
        if let Some(key) = body.keys().find(|k| !PowerUpdate::FIELDS.contains(&k.as_str())) {
            return Err(AppError::InvalidUpdate(format!("unknown field '{}'", key)));
        }
        let as_update_error = |e: ValidationError| AppError::InvalidUpdate(e.to_string());
        let name = match body.get("name") {
            Some(_) => Some(string_field(body, "name").map_err(as_update_error)?),
            None => None,
        };
        let description = match body.get("description") {
            Some(_) => {
                let text = string_field(body, "description").map_err(as_update_error)?;
                Some(Description::new(text).map_err(as_update_error)?)
            }
            None => None,
        };
        Ok(PowerUpdate { name, description })
    }

    /// Body of `POST /heropowers`. Checks presence per field, then strength,
    /// then id types. Existence of the referenced rows is left to the store.
    pub fn new_hero_power(body: &Map<String, Value>) -> Result<NewHeroPower, AppError> {
        let missing: Vec<String> = ["strength", "hero_id", "power_id"]
            .iter()
            .filter(|k| !body.contains_key(**k))
            .map(|k| format!("Missing field: {}", k))
            .collect();
        if !missing.is_empty() {
            return Err(AppError::MissingFields(missing));
        }
        let strength: Strength = body
            .get("strength")
            .and_then(Value::as_str)
            .ok_or(ValidationError::InvalidStrength)?
            .parse()?;
        let hero_id = body.get("hero_id").and_then(Value::as_i64).ok_or(AppError::InvalidReference)?;
        let power_id = body.get("power_id").and_then(Value::as_i64).ok_or(AppError::InvalidReference)?;
        Ok(NewHeroPower {
            strength,
            hero_id,
            power_id,
        })
    }
}

fn string_field(body: &Map<String, Value>, field: &'static str) -> Result<String, ValidationError> {
    body.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(ValidationError::NotAString { field })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn new_power_requires_both_fields() {
        let err = RequestValidator::new_power(&obj(json!({ "name": "x" }))).unwrap_err();
        assert!(matches!(err, AppError::MissingFields(ref f) if f == &[MISSING_DATA_FIELDS]));
    }

    #[test]
    fn new_power_rejects_short_description() {
        let err = RequestValidator::new_power(&obj(json!({ "name": "x", "description": "short" }))).unwrap_err();
        assert_eq!(err.to_string(), "description must be at least 20 characters");
    }

    #[test]
    fn new_power_rejects_non_string() {
        let err = RequestValidator::new_power(&obj(json!({ "name": 7, "description": "a".repeat(25) }))).unwrap_err();
        assert_eq!(err.to_string(), "name must be a string");
    }

    #[test]
    fn update_rejects_unknown_keys() {
        let err = RequestValidator::power_update(&obj(json!({ "id": 9 }))).unwrap_err();
        assert!(matches!(err, AppError::InvalidUpdate(ref m) if m == "unknown field 'id'"));
    }

    #[test]
    fn update_with_partial_fields() {
        let update = RequestValidator::power_update(&obj(json!({ "name": "Levitation" }))).unwrap();
        assert_eq!(update.name.as_deref(), Some("Levitation"));
        assert!(update.description.is_none());
        assert!(RequestValidator::power_update(&Map::new()).unwrap().is_empty());
    }

    #[test]
    fn update_rejects_short_description() {
        let err = RequestValidator::power_update(&obj(json!({ "description": "tiny" }))).unwrap_err();
        assert!(matches!(err, AppError::InvalidUpdate(ref m) if m == "description must be at least 20 characters"));
    }

    #[test]
    fn hero_power_lists_every_missing_field() {
        let err = RequestValidator::new_hero_power(&obj(json!({ "hero_id": 1 }))).unwrap_err();
        match err {
            AppError::MissingFields(fields) => {
                assert_eq!(fields, vec!["Missing field: strength", "Missing field: power_id"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn hero_power_checks_strength_before_ids() {
        let err = RequestValidator::new_hero_power(&obj(json!({
            "strength": "Invalid",
            "hero_id": "nope",
            "power_id": null,
        })))
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::InvalidStrength)));
    }

    #[test]
    fn hero_power_rejects_non_integer_ids() {
        let err = RequestValidator::new_hero_power(&obj(json!({
            "strength": "Weak",
            "hero_id": "1",
            "power_id": 2,
        })))
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidReference));
    }
}

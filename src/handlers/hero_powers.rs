//! Hero power creation with up-front strength and reference checks.

use crate::error::AppError;
use crate::extractors::JsonObject;
use crate::serialize::{Graph, Serializer};
use crate::state::AppState;
use crate::validation::RequestValidator;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

pub async fn create_hero_power(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    let link = RequestValidator::new_hero_power(&body)?;
    let linked = state
        .store
        .insert_hero_power(&link)
        .await?
        .ok_or(AppError::InvalidReference)?;
    tracing::info!(
        hero_power_id = linked.hero_power.id,
        hero_id = linked.hero.id,
        power_id = linked.power.id,
        strength = %linked.hero_power.strength,
        "created hero power"
    );

    let graph = Graph::new()
        .with_heroes([linked.hero])
        .with_powers([linked.power])
        .with_hero_powers([linked.hero_power.clone()]);
    let body = Serializer::new(&graph).hero_power(&linked.hero_power, &[]);
    Ok((StatusCode::CREATED, Json(body)))
}

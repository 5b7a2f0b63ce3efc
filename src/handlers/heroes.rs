//! Hero handlers: list and read with derived powers.

use super::parse_id;
use crate::error::AppError;
use crate::serialize::{Graph, HeroDetail};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub const HERO_NOT_FOUND: &str = "Hero not found";

pub async fn list_heroes(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let heroes = state.store.list_heroes().await?;
    Ok((StatusCode::OK, Json(heroes)))
}

pub async fn get_hero(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, HERO_NOT_FOUND)?;
    let hero = state
        .store
        .find_hero(id)
        .await?
        .ok_or_else(|| AppError::NotFound(HERO_NOT_FOUND.into()))?;
    let links = state.store.hero_powers_for_hero(id).await?;
    let mut power_ids: Vec<i64> = links.iter().map(|hp| hp.power_id).collect();
    power_ids.sort_unstable();
    power_ids.dedup();
    let powers = state.store.powers_by_ids(&power_ids).await?;

    let graph = Graph::new().with_powers(powers).with_hero_powers(links);
    let body = serde_json::to_value(HeroDetail::from_graph(&graph, &hero))
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok((StatusCode::OK, Json(body)))
}

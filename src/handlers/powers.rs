//! Power handlers: list, read, create and allow-listed partial update.

use super::parse_id;
use crate::error::AppError;
use crate::extractors::JsonObject;
use crate::state::AppState;
use crate::validation::RequestValidator;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub const POWER_NOT_FOUND: &str = "Power not found";

pub async fn list_powers(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let powers = state.store.list_powers().await?;
    Ok((StatusCode::OK, Json(powers)))
}

pub async fn get_power(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, POWER_NOT_FOUND)?;
    let power = state
        .store
        .find_power(id)
        .await?
        .ok_or_else(|| AppError::NotFound(POWER_NOT_FOUND.into()))?;
    Ok((StatusCode::OK, Json(power)))
}

pub async fn create_power(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    let new_power = RequestValidator::new_power(&body)?;
    let power = state.store.insert_power(&new_power).await?;
    tracing::info!(power_id = power.id, "created power");
    Ok((StatusCode::CREATED, Json(power)))
}

/// PATCH: an unknown id is reported before the body is looked at, so body
/// rejections are deferred until the power is found.
pub async fn update_power(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<JsonObject, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, POWER_NOT_FOUND)?;
    let not_found = || AppError::NotFound(POWER_NOT_FOUND.into());
    let current = state.store.find_power(id).await?.ok_or_else(not_found)?;
    let JsonObject(body) = body.map_err(AppError::into_update_error)?;
    let update = RequestValidator::power_update(&body)?;
    if update.is_empty() {
        return Ok((StatusCode::OK, Json(current)));
    }
    let power = state.store.update_power(id, &update).await?.ok_or_else(not_found)?;
    tracing::info!(power_id = power.id, "updated power");
    Ok((StatusCode::OK, Json(power)))
}

//! Hero, power and hero power routes.

use crate::handlers::{create_hero_power, create_power, get_hero, get_power, list_heroes, list_powers, update_power};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn resource_routes(state: AppState) -> Router {
    Router::new()
        .route("/heroes", get(list_heroes))
        .route("/heroes/:id", get(get_hero))
        .route("/powers", get(list_powers).post(create_power))
        .route("/powers/:id", get(get_power).patch(update_power))
        .route("/heropowers", post(create_hero_power))
        .with_state(state)
}

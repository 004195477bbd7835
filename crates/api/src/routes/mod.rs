pub mod character;
pub mod faction;
pub mod health;
pub mod race;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /races                 list, create
/// /races/{id}            get (with factions and characters), update, delete
///
/// /factions              list, create
/// /factions/{id}         get (with characters), update, delete
///
/// /characters            list, create
/// /characters/{id}       get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/races", race::router())
        .nest("/factions", faction::router())
        .nest("/characters", character::router())
}

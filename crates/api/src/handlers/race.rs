//! Handlers for the `/races` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use warhammer_core::types::DbId;
use warhammer_db::models::race::{CreateRace, Race, RaceDetail, UpdateRace};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::state::AppState;

/// POST /api/v1/races
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateRace>,
) -> AppResult<(StatusCode, Json<Race>)> {
    let race = state.races.create(&input).await?;
    Ok((StatusCode::CREATED, Json(race)))
}

/// GET /api/v1/races
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<RaceDetail>>> {
    let races = state.races.list().await?;
    Ok(Json(races))
}

/// GET /api/v1/races/{id}
///
/// Returns the race with its factions and their characters.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<RaceDetail>> {
    let race = state.races.get_by_id(id).await?;
    Ok(Json(race))
}

/// PUT /api/v1/races/{id}
///
/// Only the fields present in the body are changed.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateRace>,
) -> AppResult<Json<Race>> {
    let race = state.races.update(id, &input).await?;
    Ok(Json(race))
}

/// DELETE /api/v1/races/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    state.races.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

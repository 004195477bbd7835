//! Handlers for the `/factions` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use warhammer_core::types::DbId;
use warhammer_db::models::faction::{CreateFaction, Faction, FactionDetail, UpdateFaction};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::state::AppState;

/// POST /api/v1/factions
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateFaction>,
) -> AppResult<(StatusCode, Json<Faction>)> {
    let faction = state.factions.create(&input).await?;
    Ok((StatusCode::CREATED, Json(faction)))
}

/// GET /api/v1/factions
///
/// Each faction carries its characters.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<FactionDetail>>> {
    let factions = state.factions.list().await?;
    Ok(Json(factions))
}

/// GET /api/v1/factions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<FactionDetail>> {
    let faction = state.factions.get_by_id(id).await?;
    Ok(Json(faction))
}

/// PUT /api/v1/factions/{id}
///
/// Only the fields present in the body are changed.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateFaction>,
) -> AppResult<Json<Faction>> {
    let faction = state.factions.update(id, &input).await?;
    Ok(Json(faction))
}

/// DELETE /api/v1/factions/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    state.factions.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

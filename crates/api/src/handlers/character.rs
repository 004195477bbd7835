//! Handlers for the `/characters` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use warhammer_core::types::DbId;
use warhammer_db::models::character::{Character, CreateCharacter, UpdateCharacter};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::state::AppState;

/// POST /api/v1/characters
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateCharacter>,
) -> AppResult<(StatusCode, Json<Character>)> {
    let character = state.characters.create(&input).await?;
    Ok((StatusCode::CREATED, Json(character)))
}

/// GET /api/v1/characters
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Character>>> {
    let characters = state.characters.list().await?;
    Ok(Json(characters))
}

/// GET /api/v1/characters/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Character>> {
    let character = state.characters.get_by_id(id).await?;
    Ok(Json(character))
}

/// PUT /api/v1/characters/{id}
///
/// Only the fields present in the body are changed.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateCharacter>,
) -> AppResult<Json<Character>> {
    let character = state.characters.update(id, &input).await?;
    Ok(Json(character))
}

/// DELETE /api/v1/characters/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    state.characters.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

use std::sync::Arc;

use warhammer_core::error::CoreError;
use warhammer_core::types::DbId;
use warhammer_core::validation::{validate_name, validate_optional_name};
use warhammer_db::models::race::{CreateRace, Race, RaceDetail, UpdateRace};
use warhammer_db::repositories::RaceRepository;

use crate::error::AppResult;

/// Race operations.
#[derive(Clone)]
pub struct RaceService {
    repo: Arc<dyn RaceRepository>,
}

impl RaceService {
    pub fn new(repo: Arc<dyn RaceRepository>) -> Self {
        Self { repo }
    }

    /// All races with their factions and characters.
    pub async fn list(&self) -> AppResult<Vec<RaceDetail>> {
        Ok(self.repo.list().await?)
    }

    pub async fn get_by_id(&self, id: DbId) -> AppResult<RaceDetail> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound { entity: "Race", id }.into())
    }

    /// Create a race. Rejects a blank name before touching the store.
    pub async fn create(&self, input: &CreateRace) -> AppResult<Race> {
        validate_name(&input.name)?;
        let race = self.repo.create(input).await?;
        tracing::info!(race_id = race.id, name = %race.name, "Race created");
        Ok(race)
    }

    /// Apply a partial update and return the merged row.
    pub async fn update(&self, id: DbId, input: &UpdateRace) -> AppResult<Race> {
        validate_optional_name(input.name.as_deref())?;
        let race = self.repo.update(id, input).await?;
        tracing::info!(race_id = id, "Race updated");
        Ok(race)
    }

    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        self.repo.delete(id).await?;
        tracing::info!(race_id = id, "Race deleted");
        Ok(())
    }
}

use std::sync::Arc;

use warhammer_core::error::CoreError;
use warhammer_core::types::DbId;
use warhammer_core::validation::{validate_name, validate_optional_name};
use warhammer_db::models::character::{Character, CreateCharacter, UpdateCharacter};
use warhammer_db::repositories::CharacterRepository;

use crate::error::AppResult;

/// Character operations.
#[derive(Clone)]
pub struct CharacterService {
    repo: Arc<dyn CharacterRepository>,
}

impl CharacterService {
    pub fn new(repo: Arc<dyn CharacterRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> AppResult<Vec<Character>> {
        Ok(self.repo.list().await?)
    }

    pub async fn get_by_id(&self, id: DbId) -> AppResult<Character> {
        self.repo.find_by_id(id).await?.ok_or_else(|| {
            CoreError::NotFound {
                entity: "Character",
                id,
            }
            .into()
        })
    }

    pub async fn create(&self, input: &CreateCharacter) -> AppResult<Character> {
        validate_name(&input.name)?;
        let character = self.repo.create(input).await?;
        tracing::info!(
            character_id = character.id,
            faction_id = character.faction_id,
            name = %character.name,
            "Character created"
        );
        Ok(character)
    }

    pub async fn update(&self, id: DbId, input: &UpdateCharacter) -> AppResult<Character> {
        validate_optional_name(input.name.as_deref())?;
        let character = self.repo.update(id, input).await?;
        tracing::info!(character_id = id, "Character updated");
        Ok(character)
    }

    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        self.repo.delete(id).await?;
        tracing::info!(character_id = id, "Character deleted");
        Ok(())
    }
}

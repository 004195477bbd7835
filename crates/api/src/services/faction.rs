use std::sync::Arc;

use warhammer_core::error::CoreError;
use warhammer_core::types::DbId;
use warhammer_core::validation::{validate_name, validate_optional_name};
use warhammer_db::models::faction::{CreateFaction, Faction, FactionDetail, UpdateFaction};
use warhammer_db::repositories::FactionRepository;

use crate::error::AppResult;

/// Faction operations.
///
/// The owning race is checked by the store's foreign key, not here.
#[derive(Clone)]
pub struct FactionService {
    repo: Arc<dyn FactionRepository>,
}

impl FactionService {
    pub fn new(repo: Arc<dyn FactionRepository>) -> Self {
        Self { repo }
    }

    /// All factions with their characters.
    pub async fn list(&self) -> AppResult<Vec<FactionDetail>> {
        Ok(self.repo.list().await?)
    }

    pub async fn get_by_id(&self, id: DbId) -> AppResult<FactionDetail> {
        self.repo.find_by_id(id).await?.ok_or_else(|| {
            CoreError::NotFound {
                entity: "Faction",
                id,
            }
            .into()
        })
    }

    pub async fn create(&self, input: &CreateFaction) -> AppResult<Faction> {
        validate_name(&input.name)?;
        let faction = self.repo.create(input).await?;
        tracing::info!(
            faction_id = faction.id,
            race_id = ?faction.race_id,
            name = %faction.name,
            "Faction created"
        );
        Ok(faction)
    }

    pub async fn update(&self, id: DbId, input: &UpdateFaction) -> AppResult<Faction> {
        validate_optional_name(input.name.as_deref())?;
        let faction = self.repo.update(id, input).await?;
        tracing::info!(faction_id = id, "Faction updated");
        Ok(faction)
    }

    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        self.repo.delete(id).await?;
        tracing::info!(faction_id = id, "Faction deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use warhammer_db::error::StoreError;
    use warhammer_db::models::character::CreateCharacter;
    use warhammer_db::models::race::CreateRace;
    use warhammer_db::repositories::{CharacterRepository, InMemoryStore, RaceRepository};

    use super::*;
    use crate::error::AppError;

    fn goffs(race_id: Option<DbId>) -> CreateFaction {
        CreateFaction {
            name: "Goffs".to_string(),
            description: None,
            race_id,
        }
    }

    #[tokio::test]
    async fn faction_detail_lists_its_characters() {
        let store = InMemoryStore::new();
        let service = FactionService::new(Arc::new(store.faction_repo()));

        let faction = service.create(&goffs(None)).await.unwrap();
        store
            .character_repo()
            .create(&CreateCharacter {
                name: "Ghazghkull".to_string(),
                description: None,
                rank: Some("Warboss".to_string()),
                faction_id: faction.id,
            })
            .await
            .unwrap();

        let detail = service.get_by_id(faction.id).await.unwrap();
        assert_eq!(detail.faction, faction);
        assert_eq!(detail.characters.len(), 1);
        assert_eq!(detail.characters[0].rank.as_deref(), Some("Warboss"));
    }

    #[tokio::test]
    async fn unknown_race_is_rejected_by_the_store() {
        let store = InMemoryStore::new();
        let service = FactionService::new(Arc::new(store.faction_repo()));

        let err = service.create(&goffs(Some(7))).await.unwrap_err();

        assert_matches!(err, AppError::Store(StoreError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn race_can_be_assigned_later() {
        let store = InMemoryStore::new();
        let service = FactionService::new(Arc::new(store.faction_repo()));
        let faction = service.create(&goffs(None)).await.unwrap();
        let orks = store
            .race_repo()
            .create(&CreateRace {
                name: "Orks".to_string(),
                description: None,
            })
            .await
            .unwrap();

        let updated = service
            .update(
                faction.id,
                &UpdateFaction {
                    race_id: Some(orks.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.race_id, Some(orks.id));
        assert_eq!(updated.name, "Goffs");
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let service = FactionService::new(Arc::new(InMemoryStore::new().faction_repo()));

        let err = service
            .create(&CreateFaction {
                name: String::new(),
                description: Some("Nameless".to_string()),
                race_id: None,
            })
            .await
            .unwrap_err();

        assert_matches!(err, AppError::Core(CoreError::Validation(_)));
    }
}

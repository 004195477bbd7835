//! In-process implementations of the repository traits.
//!
//! All three repositories share one [`InMemoryStore`] so relationships and
//! constraints behave the way the PostgreSQL schema does: names are unique
//! per table, parents must exist, and referenced parents cannot be deleted.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use warhammer_core::types::DbId;

use crate::error::StoreError;
use crate::models::character::{Character, CreateCharacter, UpdateCharacter};
use crate::models::faction::{CreateFaction, Faction, FactionDetail, UpdateFaction};
use crate::models::race::{CreateRace, Race, RaceDetail, UpdateRace};
use crate::repositories::nesting::{nest_characters, nest_factions};
use crate::repositories::{CharacterRepository, FactionRepository, RaceRepository};

/// Rows keyed by id; iteration order is insertion order.
struct Table<T> {
    rows: BTreeMap<DbId, T>,
    last_id: DbId,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> DbId {
        self.last_id += 1;
        self.last_id
    }
}

#[derive(Default)]
struct Tables {
    races: Table<Race>,
    factions: Table<Faction>,
    characters: Table<Character>,
}

impl Tables {
    fn faction_details(&self, factions: Vec<Faction>) -> Vec<FactionDetail> {
        let characters = self.characters.rows.values().cloned().collect();
        nest_characters(factions, characters)
    }

    fn race_details(&self, races: Vec<Race>) -> Vec<RaceDetail> {
        let factions = self.faction_details(self.factions.rows.values().cloned().collect());
        nest_factions(races, factions)
    }

    fn check_race_exists(&self, race_id: Option<DbId>) -> Result<(), StoreError> {
        match race_id {
            Some(id) if !self.races.rows.contains_key(&id) => {
                Err(fk_violation("fk_factions_race_id"))
            }
            _ => Ok(()),
        }
    }

    fn check_faction_exists(&self, faction_id: DbId) -> Result<(), StoreError> {
        if self.factions.rows.contains_key(&faction_id) {
            Ok(())
        } else {
            Err(fk_violation("fk_characters_faction_id"))
        }
    }
}

fn unique_violation(constraint: &str) -> StoreError {
    StoreError::UniqueViolation {
        constraint: constraint.to_string(),
    }
}

fn fk_violation(constraint: &str) -> StoreError {
    StoreError::ForeignKeyViolation {
        constraint: constraint.to_string(),
    }
}

/// `true` if a row other than `except` already uses `name`.
fn name_taken<'a>(
    mut names: impl Iterator<Item = (&'a DbId, &'a str)>,
    name: &str,
    except: Option<DbId>,
) -> bool {
    names.any(|(id, existing)| existing == name && Some(*id) != except)
}

/// Shared state behind the in-memory repositories. Cloning shares the store.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn race_repo(&self) -> InMemoryRaceRepo {
        InMemoryRaceRepo {
            store: self.clone(),
        }
    }

    pub fn faction_repo(&self) -> InMemoryFactionRepo {
        InMemoryFactionRepo {
            store: self.clone(),
        }
    }

    pub fn character_repo(&self) -> InMemoryCharacterRepo {
        InMemoryCharacterRepo {
            store: self.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Races
// ---------------------------------------------------------------------------

pub struct InMemoryRaceRepo {
    store: InMemoryStore,
}

#[async_trait]
impl RaceRepository for InMemoryRaceRepo {
    async fn list(&self) -> Result<Vec<RaceDetail>, StoreError> {
        let tables = self.store.tables.read().await;
        let races = tables.races.rows.values().cloned().collect();
        Ok(tables.race_details(races))
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<RaceDetail>, StoreError> {
        let tables = self.store.tables.read().await;
        let Some(race) = tables.races.rows.get(&id).cloned() else {
            return Ok(None);
        };
        Ok(tables.race_details(vec![race]).pop())
    }

    async fn create(&self, input: &CreateRace) -> Result<Race, StoreError> {
        let mut tables = self.store.tables.write().await;
        let names = tables.races.rows.iter().map(|(id, r)| (id, r.name.as_str()));
        if name_taken(names, &input.name, None) {
            return Err(unique_violation("uq_races_name"));
        }

        let now = Utc::now();
        let race = Race {
            id: tables.races.next_id(),
            name: input.name.clone(),
            description: input.description.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.races.rows.insert(race.id, race.clone());
        Ok(race)
    }

    async fn update(&self, id: DbId, input: &UpdateRace) -> Result<Race, StoreError> {
        let mut tables = self.store.tables.write().await;
        let mut race = tables
            .races
            .rows
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { entity: "Race", id })?;
        if let Some(name) = &input.name {
            let names = tables.races.rows.iter().map(|(id, r)| (id, r.name.as_str()));
            if name_taken(names, name, Some(id)) {
                return Err(unique_violation("uq_races_name"));
            }
            race.name = name.clone();
        }
        if let Some(description) = &input.description {
            race.description = Some(description.clone());
        }
        race.updated_at = Utc::now();
        tables.races.rows.insert(id, race.clone());
        Ok(race)
    }

    async fn delete(&self, id: DbId) -> Result<(), StoreError> {
        let mut tables = self.store.tables.write().await;
        if tables
            .factions
            .rows
            .values()
            .any(|f| f.race_id == Some(id))
        {
            return Err(fk_violation("fk_factions_race_id"));
        }
        tables.races.rows.remove(&id);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Factions
// ---------------------------------------------------------------------------

pub struct InMemoryFactionRepo {
    store: InMemoryStore,
}

#[async_trait]
impl FactionRepository for InMemoryFactionRepo {
    async fn list(&self) -> Result<Vec<FactionDetail>, StoreError> {
        let tables = self.store.tables.read().await;
        let factions = tables.factions.rows.values().cloned().collect();
        Ok(tables.faction_details(factions))
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<FactionDetail>, StoreError> {
        let tables = self.store.tables.read().await;
        let Some(faction) = tables.factions.rows.get(&id).cloned() else {
            return Ok(None);
        };
        Ok(tables.faction_details(vec![faction]).pop())
    }

    async fn create(&self, input: &CreateFaction) -> Result<Faction, StoreError> {
        let mut tables = self.store.tables.write().await;
        let names = tables.factions.rows.iter().map(|(id, f)| (id, f.name.as_str()));
        if name_taken(names, &input.name, None) {
            return Err(unique_violation("uq_factions_name"));
        }
        tables.check_race_exists(input.race_id)?;

        let now = Utc::now();
        let faction = Faction {
            id: tables.factions.next_id(),
            name: input.name.clone(),
            description: input.description.clone(),
            race_id: input.race_id,
            created_at: now,
            updated_at: now,
        };
        tables.factions.rows.insert(faction.id, faction.clone());
        Ok(faction)
    }

    async fn update(&self, id: DbId, input: &UpdateFaction) -> Result<Faction, StoreError> {
        let mut tables = self.store.tables.write().await;
        let mut faction = tables
            .factions
            .rows
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound {
                entity: "Faction",
                id,
            })?;
        if let Some(name) = &input.name {
            let names = tables.factions.rows.iter().map(|(id, f)| (id, f.name.as_str()));
            if name_taken(names, name, Some(id)) {
                return Err(unique_violation("uq_factions_name"));
            }
            faction.name = name.clone();
        }
        if let Some(race_id) = input.race_id {
            tables.check_race_exists(Some(race_id))?;
            faction.race_id = Some(race_id);
        }
        if let Some(description) = &input.description {
            faction.description = Some(description.clone());
        }
        faction.updated_at = Utc::now();
        tables.factions.rows.insert(id, faction.clone());
        Ok(faction)
    }

    async fn delete(&self, id: DbId) -> Result<(), StoreError> {
        let mut tables = self.store.tables.write().await;
        if tables
            .characters
            .rows
            .values()
            .any(|c| c.faction_id == id)
        {
            return Err(fk_violation("fk_characters_faction_id"));
        }
        tables.factions.rows.remove(&id);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Characters
// ---------------------------------------------------------------------------

pub struct InMemoryCharacterRepo {
    store: InMemoryStore,
}

#[async_trait]
impl CharacterRepository for InMemoryCharacterRepo {
    async fn list(&self) -> Result<Vec<Character>, StoreError> {
        let tables = self.store.tables.read().await;
        Ok(tables.characters.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Character>, StoreError> {
        let tables = self.store.tables.read().await;
        Ok(tables.characters.rows.get(&id).cloned())
    }

    async fn create(&self, input: &CreateCharacter) -> Result<Character, StoreError> {
        let mut tables = self.store.tables.write().await;
        tables.check_faction_exists(input.faction_id)?;

        let now = Utc::now();
        let character = Character {
            id: tables.characters.next_id(),
            name: input.name.clone(),
            description: input.description.clone(),
            rank: input.rank.clone(),
            faction_id: input.faction_id,
            created_at: now,
            updated_at: now,
        };
        tables.characters.rows.insert(character.id, character.clone());
        Ok(character)
    }

    async fn update(&self, id: DbId, input: &UpdateCharacter) -> Result<Character, StoreError> {
        let mut tables = self.store.tables.write().await;
        let mut character = tables
            .characters
            .rows
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound {
                entity: "Character",
                id,
            })?;
        if let Some(faction_id) = input.faction_id {
            tables.check_faction_exists(faction_id)?;
            character.faction_id = faction_id;
        }
        if let Some(name) = &input.name {
            character.name = name.clone();
        }
        if let Some(description) = &input.description {
            character.description = Some(description.clone());
        }
        if let Some(rank) = &input.rank {
            character.rank = Some(rank.clone());
        }
        character.updated_at = Utc::now();
        tables.characters.rows.insert(id, character.clone());
        Ok(character)
    }

    async fn delete(&self, id: DbId) -> Result<(), StoreError> {
        self.store.tables.write().await.characters.rows.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn create_race(name: &str) -> CreateRace {
        CreateRace {
            name: name.to_string(),
            description: None,
        }
    }

    fn create_faction(name: &str, race_id: Option<DbId>) -> CreateFaction {
        CreateFaction {
            name: name.to_string(),
            description: None,
            race_id,
        }
    }

    fn create_character(name: &str, faction_id: DbId) -> CreateCharacter {
        CreateCharacter {
            name: name.to_string(),
            description: None,
            rank: None,
            faction_id,
        }
    }

    #[tokio::test]
    async fn ids_are_assigned_sequentially_per_table() {
        let store = InMemoryStore::new();
        let races = store.race_repo();

        let orks = races.create(&create_race("Orks")).await.unwrap();
        let eldar = races.create(&create_race("Eldar")).await.unwrap();
        let goffs = store
            .faction_repo()
            .create(&create_faction("Goffs", Some(orks.id)))
            .await
            .unwrap();

        assert_eq!(orks.id, 1);
        assert_eq!(eldar.id, 2);
        assert_eq!(goffs.id, 1);
    }

    #[tokio::test]
    async fn duplicate_race_name_is_rejected_without_write() {
        let store = InMemoryStore::new();
        let races = store.race_repo();
        races.create(&create_race("Orks")).await.unwrap();

        let err = races.create(&create_race("Orks")).await.unwrap_err();

        assert_matches!(
            err,
            StoreError::UniqueViolation { ref constraint } if constraint == "uq_races_name"
        );
        assert_eq!(races.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn renaming_onto_existing_name_is_rejected() {
        let store = InMemoryStore::new();
        let factions = store.faction_repo();
        factions.create(&create_faction("Goffs", None)).await.unwrap();
        let bad_moons = factions.create(&create_faction("Bad Moons", None)).await.unwrap();

        let input = UpdateFaction {
            name: Some("Goffs".to_string()),
            ..Default::default()
        };
        let err = factions.update(bad_moons.id, &input).await.unwrap_err();

        assert_matches!(err, StoreError::UniqueViolation { .. });
    }

    #[tokio::test]
    async fn update_of_missing_race_is_not_found_even_with_taken_name() {
        let store = InMemoryStore::new();
        let races = store.race_repo();
        races.create(&create_race("Orks")).await.unwrap();

        let input = UpdateRace {
            name: Some("Orks".to_string()),
            ..Default::default()
        };
        let err = races.update(99, &input).await.unwrap_err();

        assert_matches!(err, StoreError::NotFound { entity: "Race", id: 99 });
    }

    #[tokio::test]
    async fn update_of_missing_faction_is_not_found_even_with_bad_race() {
        let store = InMemoryStore::new();

        let input = UpdateFaction {
            race_id: Some(42),
            ..Default::default()
        };
        let err = store.faction_repo().update(7, &input).await.unwrap_err();

        assert_matches!(
            err,
            StoreError::NotFound {
                entity: "Faction",
                id: 7
            }
        );
    }

    #[tokio::test]
    async fn rejected_update_leaves_row_unchanged() {
        let store = InMemoryStore::new();
        let goffs = store
            .faction_repo()
            .create(&create_faction("Goffs", None))
            .await
            .unwrap();
        let ghaz = store
            .character_repo()
            .create(&create_character("Ghazghkull", goffs.id))
            .await
            .unwrap();

        let input = UpdateCharacter {
            name: Some("Makari".to_string()),
            faction_id: Some(42),
            ..Default::default()
        };
        let err = store.character_repo().update(ghaz.id, &input).await.unwrap_err();

        assert_matches!(err, StoreError::ForeignKeyViolation { .. });
        let stored = store.character_repo().find_by_id(ghaz.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Ghazghkull");
    }

    #[tokio::test]
    async fn renaming_to_own_name_is_allowed() {
        let store = InMemoryStore::new();
        let races = store.race_repo();
        let orks = races.create(&create_race("Orks")).await.unwrap();

        let input = UpdateRace {
            name: Some("Orks".to_string()),
            ..Default::default()
        };
        assert!(races.update(orks.id, &input).await.is_ok());
    }

    #[tokio::test]
    async fn character_requires_existing_faction() {
        let store = InMemoryStore::new();

        let err = store
            .character_repo()
            .create(&create_character("Ghazghkull", 42))
            .await
            .unwrap_err();

        assert_matches!(
            err,
            StoreError::ForeignKeyViolation { ref constraint }
                if constraint == "fk_characters_faction_id"
        );
    }

    #[tokio::test]
    async fn referenced_race_cannot_be_deleted() {
        let store = InMemoryStore::new();
        let orks = store.race_repo().create(&create_race("Orks")).await.unwrap();
        store
            .faction_repo()
            .create(&create_faction("Goffs", Some(orks.id)))
            .await
            .unwrap();

        let err = store.race_repo().delete(orks.id).await.unwrap_err();

        assert_matches!(err, StoreError::ForeignKeyViolation { .. });
        assert!(store.race_repo().find_by_id(orks.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_of_missing_row_succeeds() {
        let store = InMemoryStore::new();
        assert!(store.character_repo().delete(99).await.is_ok());
        assert!(store.faction_repo().delete(99).await.is_ok());
        assert!(store.race_repo().delete(99).await.is_ok());
    }

    #[tokio::test]
    async fn update_of_missing_row_is_not_found() {
        let store = InMemoryStore::new();

        let err = store
            .character_repo()
            .update(5, &UpdateCharacter::default())
            .await
            .unwrap_err();

        assert_matches!(
            err,
            StoreError::NotFound {
                entity: "Character",
                id: 5
            }
        );
    }
}

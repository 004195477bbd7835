//! Repository traits and their implementations.
//!
//! The service tier depends only on the traits below. [`PgRaceRepo`] and
//! friends back them with PostgreSQL; the [`memory`] implementations back
//! them with an in-process store for tests.

use async_trait::async_trait;
use warhammer_core::types::DbId;

use crate::error::StoreError;
use crate::models::character::{Character, CreateCharacter, UpdateCharacter};
use crate::models::faction::{CreateFaction, Faction, FactionDetail, UpdateFaction};
use crate::models::race::{CreateRace, Race, RaceDetail, UpdateRace};

pub mod character_repo;
pub mod faction_repo;
pub mod memory;
pub mod nesting;
pub mod race_repo;

pub use character_repo::PgCharacterRepo;
pub use faction_repo::PgFactionRepo;
pub use memory::{InMemoryCharacterRepo, InMemoryFactionRepo, InMemoryRaceRepo, InMemoryStore};
pub use race_repo::PgRaceRepo;

/// Persistence operations for races.
///
/// Reads return the full subtree: each race with its factions and their
/// characters.
#[async_trait]
pub trait RaceRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<RaceDetail>, StoreError>;

    /// Returns `Ok(None)` when no race has the given `id`.
    async fn find_by_id(&self, id: DbId) -> Result<Option<RaceDetail>, StoreError>;

    async fn create(&self, input: &CreateRace) -> Result<Race, StoreError>;

    /// Merge the `Some` fields of `input` into the stored row and return the
    /// row as stored afterwards.
    async fn update(&self, id: DbId, input: &UpdateRace) -> Result<Race, StoreError>;

    /// Deleting an absent row is not an error.
    async fn delete(&self, id: DbId) -> Result<(), StoreError>;
}

/// Persistence operations for factions. Reads attach each faction's characters.
#[async_trait]
pub trait FactionRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<FactionDetail>, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<FactionDetail>, StoreError>;

    async fn create(&self, input: &CreateFaction) -> Result<Faction, StoreError>;

    async fn update(&self, id: DbId, input: &UpdateFaction) -> Result<Faction, StoreError>;

    async fn delete(&self, id: DbId) -> Result<(), StoreError>;
}

/// Persistence operations for characters.
#[async_trait]
pub trait CharacterRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Character>, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Character>, StoreError>;

    async fn create(&self, input: &CreateCharacter) -> Result<Character, StoreError>;

    async fn update(&self, id: DbId, input: &UpdateCharacter) -> Result<Character, StoreError>;

    async fn delete(&self, id: DbId) -> Result<(), StoreError>;
}

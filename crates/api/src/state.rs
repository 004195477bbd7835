use std::sync::Arc;

use warhammer_db::repositories::{InMemoryStore, PgCharacterRepo, PgFactionRepo, PgRaceRepo};

use crate::config::ServerConfig;
use crate::services::{CharacterService, FactionService, RaceService};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool. `None` when running on the in-memory store.
    pub pool: Option<warhammer_db::DbPool>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    pub races: RaceService,
    pub factions: FactionService,
    pub characters: CharacterService,
}

impl AppState {
    /// Wire the services to PostgreSQL repositories sharing `pool`.
    pub fn postgres(pool: warhammer_db::DbPool, config: Arc<ServerConfig>) -> Self {
        Self {
            races: RaceService::new(Arc::new(PgRaceRepo::new(pool.clone()))),
            factions: FactionService::new(Arc::new(PgFactionRepo::new(pool.clone()))),
            characters: CharacterService::new(Arc::new(PgCharacterRepo::new(pool.clone()))),
            pool: Some(pool),
            config,
        }
    }

    /// Wire the services to an in-process store.
    pub fn in_memory(store: &InMemoryStore, config: Arc<ServerConfig>) -> Self {
        Self {
            races: RaceService::new(Arc::new(store.race_repo())),
            factions: FactionService::new(Arc::new(store.faction_repo())),
            characters: CharacterService::new(Arc::new(store.character_repo())),
            pool: None,
            config,
        }
    }
}

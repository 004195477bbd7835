//! Race entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use warhammer_core::types::{DbId, Timestamp};

use crate::models::faction::FactionDetail;

/// A race row from the `races` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Race {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A race with its factions, each with their characters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaceDetail {
    #[serde(flatten)]
    pub race: Race,
    pub factions: Vec<FactionDetail>,
}

/// DTO for creating a new race.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRace {
    /// Missing names deserialize as empty and are rejected by validation.
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating an existing race. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRace {
    pub name: Option<String>,
    pub description: Option<String>,
}

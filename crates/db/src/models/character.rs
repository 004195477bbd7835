//! Character entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use warhammer_core::types::{DbId, Timestamp};

use crate::models::zero_id_as_none;

/// A character row from the `characters` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Character {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    /// Free-form rank label, e.g. "Warboss".
    pub rank: Option<String>,
    pub faction_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new character.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCharacter {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub rank: Option<String>,
    pub faction_id: DbId,
}

/// DTO for updating an existing character. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCharacter {
    pub name: Option<String>,
    pub description: Option<String>,
    pub rank: Option<String>,
    /// `0` or absent leaves the faction unchanged.
    #[serde(default, deserialize_with = "zero_id_as_none")]
    pub faction_id: Option<DbId>,
}

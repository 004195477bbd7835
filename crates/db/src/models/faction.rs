//! Faction entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use warhammer_core::types::{DbId, Timestamp};

use crate::models::character::Character;
use crate::models::zero_id_as_none;

/// A faction row from the `factions` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Faction {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    /// Owning race, if any.
    pub race_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A faction with its characters attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactionDetail {
    #[serde(flatten)]
    pub faction: Faction,
    pub characters: Vec<Character>,
}

/// DTO for creating a new faction.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFaction {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    /// `0` or absent creates a faction without a race.
    #[serde(default, deserialize_with = "zero_id_as_none")]
    pub race_id: Option<DbId>,
}

/// DTO for updating an existing faction. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFaction {
    pub name: Option<String>,
    pub description: Option<String>,
    /// `0` or absent leaves the race unchanged.
    #[serde(default, deserialize_with = "zero_id_as_none")]
    pub race_id: Option<DbId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_race_id_on_create_means_no_race() {
        let input: CreateFaction =
            serde_json::from_str(r#"{"name": "Goffs", "race_id": 0}"#).unwrap();
        assert_eq!(input.race_id, None);
    }

    #[test]
    fn omitted_race_id_on_create_means_no_race() {
        let input: CreateFaction = serde_json::from_str(r#"{"name": "Goffs"}"#).unwrap();
        assert_eq!(input.race_id, None);
    }

    #[test]
    fn zero_race_id_on_update_leaves_race_unchanged() {
        let input: UpdateFaction =
            serde_json::from_str(r#"{"description": "d", "race_id": 0}"#).unwrap();
        assert_eq!(input.race_id, None);
        assert_eq!(input.description.as_deref(), Some("d"));
    }

    #[test]
    fn nonzero_race_id_is_kept() {
        let input: UpdateFaction = serde_json::from_str(r#"{"race_id": 3}"#).unwrap();
        assert_eq!(input.race_id, Some(3));
    }
}

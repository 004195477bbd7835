//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Races and factions also carry a `*Detail` view with their child
//! collections eagerly attached.

use serde::{Deserialize, Deserializer};
use warhammer_core::types::DbId;

pub mod character;
pub mod faction;
pub mod race;

/// Deserialize an optional reference where `0` means "no reference".
///
/// Use with `#[serde(default, deserialize_with = ...)]` so an omitted field
/// is `None` as well.
pub(crate) fn zero_id_as_none<'de, D>(deserializer: D) -> Result<Option<DbId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<DbId>::deserialize(deserializer)?.filter(|id| *id != 0))
}

//! Assembly of eagerly loaded child collections.
//!
//! Parents and children are fetched in one query per level; these helpers
//! stitch the flat rows back into trees. Children keep their input order.

use std::collections::HashMap;

use warhammer_core::types::DbId;

use crate::models::character::Character;
use crate::models::faction::{Faction, FactionDetail};
use crate::models::race::{Race, RaceDetail};

/// Attach each character to the faction it belongs to.
///
/// Characters whose faction is not in `factions` are dropped.
pub fn nest_characters(factions: Vec<Faction>, characters: Vec<Character>) -> Vec<FactionDetail> {
    let mut by_faction: HashMap<DbId, Vec<Character>> = HashMap::new();
    for character in characters {
        by_faction
            .entry(character.faction_id)
            .or_default()
            .push(character);
    }

    factions
        .into_iter()
        .map(|faction| {
            let characters = by_faction.remove(&faction.id).unwrap_or_default();
            FactionDetail {
                faction,
                characters,
            }
        })
        .collect()
}

/// Attach each faction (with its characters) to its race.
///
/// Factions without a race, or whose race is not in `races`, are dropped.
pub fn nest_factions(races: Vec<Race>, factions: Vec<FactionDetail>) -> Vec<RaceDetail> {
    let mut by_race: HashMap<DbId, Vec<FactionDetail>> = HashMap::new();
    for detail in factions {
        if let Some(race_id) = detail.faction.race_id {
            by_race.entry(race_id).or_default().push(detail);
        }
    }

    races
        .into_iter()
        .map(|race| {
            let factions = by_race.remove(&race.id).unwrap_or_default();
            RaceDetail { race, factions }
        })
        .collect()
}

/// Collect the ids of `rows`, preserving order.
pub(crate) fn ids<T>(rows: &[T], id: impl Fn(&T) -> DbId) -> Vec<DbId> {
    rows.iter().map(id).collect()
}

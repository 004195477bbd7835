//! Request handlers for races, factions and characters.
//!
//! Each submodule provides async handler functions (create, list, get_by_id,
//! update, delete) for a single entity type. Handlers decode the request,
//! delegate to the corresponding service in [`AppState`] and map errors via
//! [`AppError`].
//!
//! [`AppState`]: crate::state::AppState
//! [`AppError`]: crate::error::AppError

pub mod character;
pub mod faction;
pub mod race;

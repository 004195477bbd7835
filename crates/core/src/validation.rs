//! Field validation helpers for race, faction and character payloads.

use crate::error::CoreError;

/// Validate a required name. Blank names are rejected; length is unbounded.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("name cannot be empty".to_string()));
    }
    Ok(())
}

/// Validate a name that is only present when the caller wants it changed.
pub fn validate_optional_name(name: Option<&str>) -> Result<(), CoreError> {
    match name {
        Some(name) => validate_name(name),
        None => Ok(()),
    }
}

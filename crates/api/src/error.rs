use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use warhammer_core::error::CoreError;
use warhammer_db::error::StoreError;

/// Application-level error type for services and HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for persistence
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`]
/// to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `warhammer_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A repository error from `warhammer_db`.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A request body that could not be decoded.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Convenience type alias for service and handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
            },
            AppError::Store(err) => classify_store_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a repository error into an HTTP status, error code, and message.
///
/// - `NotFound` maps to 404.
/// - Unique and foreign key violations map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),
        StoreError::UniqueViolation { .. } | StoreError::ForeignKeyViolation { .. } => {
            (StatusCode::CONFLICT, "CONFLICT", err.to_string())
        }
        StoreError::Database(db_err) => {
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: impl Into<AppError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn validation_is_bad_request() {
        assert_eq!(
            status_of(CoreError::Validation("name cannot be empty".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn undecodable_body_is_bad_request() {
        assert_eq!(
            status_of(AppError::BadRequest("missing field `faction_id`".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn missing_entity_is_not_found() {
        assert_eq!(
            status_of(CoreError::NotFound {
                entity: "Race",
                id: 1
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(StoreError::NotFound {
                entity: "Race",
                id: 1
            }),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn constraint_violations_are_conflicts() {
        assert_eq!(
            status_of(StoreError::UniqueViolation {
                constraint: "uq_races_name".into()
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(StoreError::ForeignKeyViolation {
                constraint: "fk_characters_faction_id".into()
            }),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn database_failures_are_internal() {
        assert_eq!(
            status_of(StoreError::Database(sqlx::Error::PoolTimedOut)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

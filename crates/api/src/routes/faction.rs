//! Route definitions for the `/factions` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::faction;
use crate::state::AppState;

/// Routes mounted at `/factions`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(faction::list).post(faction::create))
        .route(
            "/{id}",
            get(faction::get_by_id)
                .put(faction::update)
                .delete(faction::delete),
        )
}

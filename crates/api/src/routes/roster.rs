use axum::routing::put;
use axum::Router;

use crate::handlers::roster;
use crate::state::AppState;

/// Routes mounted at `/roster`.
///
/// ```text
/// PUT    /{id}/keeper-status    -> update_keeper_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/keeper-status", put(roster::update_keeper_status))
}

//! Route definitions for player keeper costs and rankings.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::players;
use crate::state::AppState;

/// Routes mounted at `/players`.
///
/// ```text
/// PUT    /{id}/keeper-cost    -> set_keeper_cost
/// POST   /ecr                 -> import_ecr
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/keeper-cost", put(players::set_keeper_cost))
        .route("/ecr", post(players::import_ecr))
}

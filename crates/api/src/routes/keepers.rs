//! Route definitions for stateless keeper allocation.

use axum::routing::post;
use axum::Router;

use crate::handlers::keepers;
use crate::state::AppState;

/// Routes mounted at `/keepers`.
///
/// ```text
/// POST   /resolve    -> resolve_keepers
/// POST   /probe      -> probe_keepers
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/resolve", post(keepers::resolve_keepers))
        .route("/probe", post(keepers::probe_keepers))
}

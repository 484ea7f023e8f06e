//! Route definitions for teams and their keepers.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::teams;
use crate::state::AppState;

/// Team routes mounted at `/teams`.
///
/// ```text
/// GET    /                      -> list_teams
/// GET    /{id}/keepers          -> list_team_keepers
/// GET    /{id}/keepers/slots    -> team_keeper_slots
/// GET    /{id}/keepers/review   -> team_keeper_review
/// POST   /{id}/keepers/probe    -> probe_team_keeper
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(teams::list_teams))
        .route("/{id}/keepers", get(teams::list_team_keepers))
        .route("/{id}/keepers/slots", get(teams::team_keeper_slots))
        .route("/{id}/keepers/review", get(teams::team_keeper_review))
        .route("/{id}/keepers/probe", post(teams::probe_team_keeper))
}

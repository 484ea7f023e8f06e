pub mod draft_board;
pub mod health;
pub mod keeper_costs;
pub mod keepers;
pub mod players;
pub mod roster;
pub mod teams;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /teams                                 list teams
/// /teams/{id}/keepers                    roster entries with keeper costs
/// /teams/{id}/keepers/slots              resolved keeper rounds
/// /teams/{id}/keepers/review             pre-commit review
/// /teams/{id}/keepers/probe              conflict probe (POST)
///
/// /keepers/resolve                       resolve ad-hoc candidates (POST)
/// /keepers/probe                         probe ad-hoc allocation (POST)
///
/// /roster/{id}/keeper-status             change keeper status (PUT)
///
/// /keeper-costs/calculate                derive a keeper cost (POST)
///
/// /players/{id}/keeper-cost              store a keeper cost (PUT)
/// /players/ecr                           import consensus ranks (POST)
///
/// /draft-board                           board with keeper placements
/// /draft-board/transfers                 list, record (GET, POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/teams", teams::router())
        .nest("/keepers", keepers::router())
        .nest("/roster", roster::router())
        .nest("/keeper-costs", keeper_costs::router())
        .nest("/players", players::router())
        .nest("/draft-board", draft_board::router())
}

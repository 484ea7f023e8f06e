//! Root-level liveness route.
//!
//! Reports whether the league database answers and how many teams are
//! seeded, along with the keeper settings the server started with.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use sandlot_core::keeper_slots::OverflowPolicy;
use sandlot_core::types::Round;
use sandlot_db::repositories::TeamRepo;

use crate::state::AppState;

#[derive(Serialize)]
pub struct LeagueHealth {
    /// `ok`, or `degraded` when the league database cannot be read.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Seeded teams; `None` when the database is unreachable.
    pub teams: Option<usize>,
    pub keeper_max_round: Round,
    pub overflow_policy: OverflowPolicy,
}

/// GET /health
async fn league_health(State(state): State<AppState>) -> Json<LeagueHealth> {
    let teams = match TeamRepo::list(&state.pool).await {
        Ok(teams) => Some(teams.len()),
        Err(e) => {
            tracing::warn!(error = %e, "League database unreachable");
            None
        }
    };
    let db_healthy = teams.is_some();

    Json(LeagueHealth {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        teams,
        keeper_max_round: state.config.keeper.max_round,
        overflow_policy: state.config.keeper.overflow_policy,
    })
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(league_health))
}

//! Handlers for teams and their stored keeper selections.
//!
//! Every keeper endpoint here reads the team's roster, turns the kept rows
//! into allocation candidates and runs the core allocator with the
//! server's keeper configuration.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use sandlot_core::error::CoreError;
use sandlot_core::keeper_review::review_keeper_selection;
use sandlot_core::keeper_slots::{
    allocate_keeper_slots, probe_conflict, Candidate, KeeperCategory,
};
use sandlot_core::types::DbId;
use sandlot_db::models::roster_player::keeper_candidates;
use sandlot_db::models::team::Team;
use sandlot_db::repositories::{PlayerRepo, RosterPlayerRepo, TeamRepo};
use sandlot_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /teams/{id}/keepers/probe`.
#[derive(Debug, Deserialize)]
pub struct ProbeTeamKeeperRequest {
    pub player_id: DbId,
    /// Category the player would be kept as (default: `keeping`).
    pub category: Option<KeeperCategory>,
}

/// Load a team or fail with 404.
pub(crate) async fn find_team(pool: &DbPool, team_id: DbId) -> AppResult<Team> {
    TeamRepo::find_by_id(pool, team_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Team",
            id: team_id,
        }))
}

/// Allocation candidates for everything `team_id` currently keeps.
pub(crate) async fn team_candidates(pool: &DbPool, team_id: DbId) -> AppResult<Vec<Candidate>> {
    let rows = RosterPlayerRepo::list_for_team(pool, team_id).await?;
    Ok(keeper_candidates(&rows))
}

/// GET /api/v1/teams
pub async fn list_teams(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let teams = TeamRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: teams }))
}

/// GET /api/v1/teams/{id}/keepers
///
/// Every roster entry of the team with its stored keeper cost.
pub async fn list_team_keepers(
    State(state): State<AppState>,
    Path(team_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let team = find_team(&state.pool, team_id).await?;
    let rows = RosterPlayerRepo::list_for_team(&state.pool, team.id).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/teams/{id}/keepers/slots
///
/// Resolve the team's keepers onto distinct rounds.
pub async fn team_keeper_slots(
    State(state): State<AppState>,
    Path(team_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let team = find_team(&state.pool, team_id).await?;
    let candidates = team_candidates(&state.pool, team.id).await?;

    let allocation = allocate_keeper_slots(&candidates, &state.config.keeper);

    tracing::info!(
        team_id,
        candidates = candidates.len(),
        resolved = allocation.resolved.len(),
        errors = allocation.errors.len(),
        has_displacement = allocation.has_displacement,
        "Keeper slots resolved",
    );

    Ok(Json(DataResponse { data: allocation }))
}

/// GET /api/v1/teams/{id}/keepers/review
///
/// Pre-commit review of the team's keepers: allocation plus warnings.
pub async fn team_keeper_review(
    State(state): State<AppState>,
    Path(team_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let team = find_team(&state.pool, team_id).await?;
    let candidates = team_candidates(&state.pool, team.id).await?;

    let review = review_keeper_selection(&candidates, &state.config.keeper)?;

    tracing::debug!(
        team_id,
        warnings = review.warnings.len(),
        is_committable = review.is_committable,
        "Keeper selection reviewed",
    );

    Ok(Json(DataResponse { data: review }))
}

/// POST /api/v1/teams/{id}/keepers/probe
///
/// What would keeping `player_id` do to the team's current keepers? The
/// player's stored cost and rank are used; nothing is written.
pub async fn probe_team_keeper(
    State(state): State<AppState>,
    Path(team_id): Path<DbId>,
    Json(input): Json<ProbeTeamKeeperRequest>,
) -> AppResult<impl IntoResponse> {
    let team = find_team(&state.pool, team_id).await?;
    let player = PlayerRepo::find_by_id(&state.pool, input.player_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Player",
            id: input.player_id,
        }))?;

    let existing: Vec<Candidate> = team_candidates(&state.pool, team.id)
        .await?
        .into_iter()
        .filter(|c| c.id != player.id)
        .collect();
    let allocation = allocate_keeper_slots(&existing, &state.config.keeper);

    let candidate = Candidate {
        id: player.id,
        display_name: player.full_name,
        nominal_round: player.keeper_cost_round,
        quality_rank: player.ecr_rank,
        category: input.category.unwrap_or(KeeperCategory::Standard),
    };
    let probe = probe_conflict(&allocation.resolved, &candidate, &state.config.keeper);

    tracing::debug!(
        team_id,
        player_id = candidate.id,
        collides = probe.collides,
        moved = probe.moved.len(),
        "Keeper conflict probed",
    );

    Ok(Json(DataResponse { data: probe }))
}

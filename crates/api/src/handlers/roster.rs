//! Handlers for roster keeper decisions.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use sandlot_core::error::CoreError;
use sandlot_core::keeper_review::{review_keeper_selection, KeeperReview};
use sandlot_core::keeper_status::validate_keeper_status;
use sandlot_core::types::DbId;
use sandlot_db::models::roster_player::{RosterPlayer, UpdateKeeperStatus};
use sandlot_db::repositories::RosterPlayerRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::teams::team_candidates;
use crate::response::DataResponse;
use crate::state::AppState;

/// The updated roster entry and the team's keeper review after the change.
#[derive(Debug, Serialize)]
pub struct KeeperStatusChange {
    pub roster_player: RosterPlayer,
    pub review: KeeperReview,
}

/// PUT /api/v1/roster/{id}/keeper-status
///
/// Change whether (and how) a rostered player is kept. The change is saved
/// even when it makes the selection uncommittable; the returned review
/// carries the warnings.
pub async fn update_keeper_status(
    State(state): State<AppState>,
    Path(roster_player_id): Path<DbId>,
    Json(input): Json<UpdateKeeperStatus>,
) -> AppResult<impl IntoResponse> {
    validate_keeper_status(&input.keeper_status)?;

    let roster_player =
        RosterPlayerRepo::update_keeper_status(&state.pool, roster_player_id, &input.keeper_status)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "RosterPlayer",
                id: roster_player_id,
            }))?;

    let candidates = team_candidates(&state.pool, roster_player.team_id).await?;
    let review = review_keeper_selection(&candidates, &state.config.keeper)?;

    tracing::info!(
        roster_player_id,
        team_id = roster_player.team_id,
        keeper_status = %roster_player.keeper_status,
        is_committable = review.is_committable,
        "Keeper status updated",
    );

    Ok(Json(DataResponse {
        data: KeeperStatusChange {
            roster_player,
            review,
        },
    }))
}

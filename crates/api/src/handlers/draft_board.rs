//! Draft board: pick ownership after recorded transfers, with every
//! team's keepers placed on its picks.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use validator::Validate;
use sandlot_core::draft_board::{DraftBoard, KeeperPlacement, Pick, DRAFT_ROUNDS};
use sandlot_core::error::CoreError;
use sandlot_core::keeper_slots::{allocate_keeper_slots, AllocationError};
use sandlot_core::types::DbId;
use sandlot_db::models::draft_pick_transfer::{CreateDraftPickTransfer, DraftPickTransfer};
use sandlot_db::models::team::Team;
use sandlot_db::repositories::{DraftPickTransferRepo, RosterPlayerRepo, TeamRepo};
use sandlot_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct TeamPickCount {
    pub team: String,
    pub picks: usize,
}

#[derive(Debug, Serialize)]
pub struct TeamKeepers {
    pub team_id: DbId,
    pub team_name: String,
    pub placements: Vec<KeeperPlacement>,
    /// Keepers that could not be given a round.
    pub errors: Vec<AllocationError>,
}

#[derive(Debug, Serialize)]
pub struct DraftBoardView {
    pub board: DraftBoard,
    pub pick_counts: Vec<TeamPickCount>,
    pub keepers: Vec<TeamKeepers>,
}

#[derive(Debug, Serialize)]
pub struct RecordedTransfer {
    pub transfer: DraftPickTransfer,
    pub pick: Option<Pick>,
}

// ---------------------------------------------------------------------------
// Board loading
// ---------------------------------------------------------------------------

fn team_name(teams: &[Team], team_id: DbId) -> AppResult<&str> {
    teams
        .iter()
        .find(|t| t.id == team_id)
        .map(|t| t.name.as_str())
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Team",
            id: team_id,
        }))
}

/// Fresh board in draft-position order with every recorded transfer
/// replayed onto it.
async fn load_board(pool: &DbPool) -> AppResult<(DraftBoard, Vec<Team>)> {
    let teams = TeamRepo::list(pool).await?;
    let order = teams.iter().map(|t| t.name.clone()).collect();
    let mut board = DraftBoard::new(order, DRAFT_ROUNDS)?;

    for transfer in DraftPickTransferRepo::list(pool).await? {
        let from = team_name(&teams, transfer.from_team_id)?;
        let to = team_name(&teams, transfer.to_team_id)?;
        board
            .transfer_pick(transfer.round, transfer.slot, from, to)
            .map_err(|e| {
                AppError::InternalError(format!(
                    "Recorded transfer {} no longer applies: {e}",
                    transfer.id
                ))
            })?;
    }

    Ok((board, teams))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/draft-board
pub async fn get_draft_board(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let (board, teams) = load_board(&state.pool).await?;
    let kept = RosterPlayerRepo::list_kept(&state.pool).await?;

    let keepers = teams
        .iter()
        .map(|team| {
            let candidates: Vec<_> = kept
                .iter()
                .filter(|row| row.team_id == team.id)
                .filter_map(|row| row.to_candidate())
                .collect();
            let allocation = allocate_keeper_slots(&candidates, &state.config.keeper);
            TeamKeepers {
                team_id: team.id,
                team_name: team.name.clone(),
                placements: board.place_keepers(&team.name, &allocation),
                errors: allocation.errors,
            }
        })
        .collect();

    let pick_counts = board
        .owner_pick_counts()
        .into_iter()
        .map(|(team, picks)| TeamPickCount { team, picks })
        .collect();

    Ok(Json(DataResponse {
        data: DraftBoardView {
            board,
            pick_counts,
            keepers,
        },
    }))
}

/// GET /api/v1/draft-board/transfers
pub async fn list_transfers(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let transfers = DraftPickTransferRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: transfers }))
}

/// POST /api/v1/draft-board/transfers
///
/// Move a pick between teams. The transfer is checked against the current
/// board before it is recorded; a pick the sender does not hold is a 409.
pub async fn create_transfer(
    State(state): State<AppState>,
    Json(input): Json<CreateDraftPickTransfer>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if input.from_team_id == input.to_team_id {
        return Err(AppError::BadRequest(
            "from_team_id and to_team_id must differ".into(),
        ));
    }

    let (mut board, teams) = load_board(&state.pool).await?;
    let from = team_name(&teams, input.from_team_id)?;
    let to = team_name(&teams, input.to_team_id)?;

    let slot = match (input.slot, input.original_team_id) {
        (Some(slot), _) => {
            board.transfer_pick(input.round, slot, from, to)?;
            slot
        }
        (None, Some(original_team_id)) => {
            let original = team_name(&teams, original_team_id)?;
            board.transfer_by_original_owner(input.round, original, from, to)?
        }
        (None, None) => board.transfer_worst_pick(input.round, from, to)?,
    };

    let transfer = DraftPickTransferRepo::create(
        &state.pool,
        input.round,
        slot,
        input.from_team_id,
        input.to_team_id,
        input.note.as_deref(),
    )
    .await?;

    tracing::info!(
        transfer_id = transfer.id,
        round = input.round,
        slot,
        from = %from,
        to = %to,
        "Draft pick transferred",
    );

    let pick = board.pick(input.round, slot).cloned();

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: RecordedTransfer { transfer, pick },
        }),
    ))
}

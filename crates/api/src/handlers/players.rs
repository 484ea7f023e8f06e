//! Handlers for player keeper costs and consensus ranks.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;
use sandlot_core::ecr::EcrIndex;
use sandlot_core::error::CoreError;
use sandlot_core::keeper_cost::{should_overwrite, KeeperCostSource};
use sandlot_core::types::DbId;
use sandlot_db::models::player::{EcrImportSummary, ImportEcrRequest, UpdateKeeperCost};
use sandlot_db::repositories::PlayerRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// PUT /api/v1/players/{id}/keeper-cost
///
/// Store a keeper cost. A stored `manual` cost is only replaced by another
/// `manual` cost; anything else gets 409.
pub async fn set_keeper_cost(
    State(state): State<AppState>,
    Path(player_id): Path<DbId>,
    Json(input): Json<UpdateKeeperCost>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let source = KeeperCostSource::parse(&input.source).ok_or_else(|| {
        CoreError::Validation(format!("Unknown keeper cost source: '{}'", input.source))
    })?;

    let player = PlayerRepo::find_by_id(&state.pool, player_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Player",
            id: player_id,
        }))?;

    let existing = player
        .keeper_cost_source
        .as_deref()
        .and_then(KeeperCostSource::parse);
    let manual_conflict = || {
        AppError::Core(CoreError::Conflict(format!(
            "{} has a manual keeper cost; only a manual cost can replace it",
            player.full_name
        )))
    };
    if !should_overwrite(existing, source) {
        return Err(manual_conflict());
    }

    let label = input
        .label
        .clone()
        .unwrap_or_else(|| format!("Rd {}", input.round));
    let updated = PlayerRepo::set_keeper_cost(&state.pool, player_id, input.round, &label, source)
        .await?
        .ok_or_else(manual_conflict)?;

    tracing::info!(
        player_id,
        round = input.round,
        source = source.as_str(),
        "Keeper cost stored",
    );

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/players/ecr
///
/// Refresh consensus ranks from a ranking export. Players the export does
/// not match keep their current rank.
pub async fn import_ecr(
    State(state): State<AppState>,
    Json(input): Json<ImportEcrRequest>,
) -> AppResult<impl IntoResponse> {
    let index = EcrIndex::from_entries(input.rankings.iter().map(|e| (e.name.as_str(), e.rank)));
    if index.is_empty() {
        return Err(AppError::BadRequest("rankings must not be empty".into()));
    }

    let players = PlayerRepo::list(&state.pool).await?;
    let mut updated = 0;
    let mut unmatched = 0;

    for player in &players {
        match index.lookup(&player.full_name, None) {
            Some(rank) if Some(rank) != player.ecr_rank => {
                PlayerRepo::update_ecr_rank(&state.pool, player.id, Some(rank)).await?;
                updated += 1;
            }
            Some(_) => {}
            None => unmatched += 1,
        }
    }

    tracing::info!(
        ranked = index.len(),
        players = players.len(),
        updated,
        unmatched,
        "ECR import applied",
    );

    Ok(Json(DataResponse {
        data: EcrImportSummary {
            players_checked: players.len(),
            updated,
            unmatched,
        },
    }))
}

//! Keeper cost calculation.

use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use sandlot_core::keeper_cost::{
    calculate_keeper_cost, trace_acquisition, Acquisition, AcquisitionEvent, KeeperCost,
    KeeperCostInput,
};
use sandlot_core::keeper_slots::KeeperCategory;
use sandlot_core::types::{DbId, Round};
use validator::Validate;

use crate::error::AppResult;
use crate::response::DataResponse;

/// Request body for `POST /keeper-costs/calculate`.
#[derive(Debug, Deserialize, Validate)]
pub struct CalculateKeeperCostRequest {
    /// Default: `keeping`.
    pub category: Option<KeeperCategory>,
    #[validate(range(min = 1))]
    pub ecr_rank: Option<i32>,
    /// The player's season history, oldest first.
    #[serde(default)]
    pub history: Vec<AcquisitionEvent>,
    pub current_team_id: DbId,
    #[serde(default)]
    pub kept_last_season: bool,
    #[validate(range(min = 1, max = 27))]
    pub last_draft_round: Option<Round>,
}

#[derive(Debug, Serialize)]
pub struct KeeperCostCalculation {
    pub acquisition: Acquisition,
    pub cost: KeeperCost,
}

/// POST /api/v1/keeper-costs/calculate
///
/// Derive a keeper's nominal round from its history and consensus rank.
/// Nothing is stored; use `PUT /players/{id}/keeper-cost` to save a result.
pub async fn calculate(
    Json(input): Json<CalculateKeeperCostRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let acquisition = trace_acquisition(&input.history, input.current_team_id);
    let cost = calculate_keeper_cost(&KeeperCostInput {
        category: input.category.unwrap_or(KeeperCategory::Standard),
        ecr_rank: input.ecr_rank,
        acquisition,
        kept_last_season: input.kept_last_season,
        last_draft_round: input.last_draft_round,
    });

    Ok(Json(DataResponse {
        data: KeeperCostCalculation { acquisition, cost },
    }))
}

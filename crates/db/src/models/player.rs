//! Player model and keeper-cost DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use sandlot_core::types::{DbId, Round, Timestamp};

/// A row from the `players` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Player {
    pub id: DbId,
    pub full_name: String,
    pub mlb_team: Option<String>,
    pub positions: Option<String>,
    pub ecr_rank: Option<i32>,
    pub keeper_cost_round: Option<Round>,
    pub keeper_cost_label: Option<String>,
    pub keeper_cost_source: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a player.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePlayer {
    #[validate(length(min = 1))]
    pub full_name: String,
    pub mlb_team: Option<String>,
    pub positions: Option<String>,
    #[validate(range(min = 1))]
    pub ecr_rank: Option<i32>,
}

/// DTO for storing a keeper cost on a player.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateKeeperCost {
    #[validate(range(min = 1, max = 27))]
    pub round: Round,
    pub label: Option<String>,
    /// One of the keeper cost source names (`manual`, `draft`, ...).
    pub source: String,
}

/// One row of an imported consensus ranking.
#[derive(Debug, Clone, Deserialize)]
pub struct EcrEntry {
    pub name: String,
    pub rank: i32,
}

/// DTO for refreshing consensus ranks from a ranking export.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportEcrRequest {
    pub rankings: Vec<EcrEntry>,
}

/// Outcome of an ECR import.
#[derive(Debug, Clone, Serialize)]
pub struct EcrImportSummary {
    pub players_checked: usize,
    pub updated: usize,
    pub unmatched: usize,
}

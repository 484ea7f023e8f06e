//! Draft pick transfer ledger.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use sandlot_core::types::{DbId, Round, Timestamp};

/// A row from the `draft_pick_transfers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DraftPickTransfer {
    pub id: DbId,
    pub round: Round,
    pub slot: i32,
    pub from_team_id: DbId,
    pub to_team_id: DbId,
    pub note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request to move a pick between teams.
///
/// With `slot` the exact pick moves. With `original_team_id` the pick that
/// team started with moves. With neither, `from_team_id`'s worst pick in
/// the round moves.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDraftPickTransfer {
    #[validate(range(min = 1, max = 27))]
    pub round: Round,
    #[validate(range(min = 1))]
    pub slot: Option<i32>,
    pub original_team_id: Option<DbId>,
    pub from_team_id: DbId,
    pub to_team_id: DbId,
    pub note: Option<String>,
}

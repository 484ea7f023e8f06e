//! Team entity model.

use serde::Serialize;
use sqlx::FromRow;
use sandlot_core::types::{DbId, Timestamp};

/// A row from the `teams` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Team {
    pub id: DbId,
    pub name: String,
    /// Slot the team picks from in every round.
    pub draft_position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

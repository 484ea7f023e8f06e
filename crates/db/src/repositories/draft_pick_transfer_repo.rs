//! Repository for the `draft_pick_transfers` ledger.

use sqlx::PgPool;
use sandlot_core::types::{DbId, Round};

use crate::models::draft_pick_transfer::DraftPickTransfer;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, round, slot, from_team_id, to_team_id, note, created_at, updated_at";

/// Provides append and replay access to pick transfers.
pub struct DraftPickTransferRepo;

impl DraftPickTransferRepo {
    /// Record a transfer of an already resolved pick.
    pub async fn create(
        pool: &PgPool,
        round: Round,
        slot: i32,
        from_team_id: DbId,
        to_team_id: DbId,
        note: Option<&str>,
    ) -> Result<DraftPickTransfer, sqlx::Error> {
        let query = format!(
            "INSERT INTO draft_pick_transfers (round, slot, from_team_id, to_team_id, note) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DraftPickTransfer>(&query)
            .bind(round)
            .bind(slot)
            .bind(from_team_id)
            .bind(to_team_id)
            .bind(note)
            .fetch_one(pool)
            .await
    }

    /// All transfers in the order they were recorded.
    pub async fn list(pool: &PgPool) -> Result<Vec<DraftPickTransfer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM draft_pick_transfers ORDER BY id ASC");
        sqlx::query_as::<_, DraftPickTransfer>(&query)
            .fetch_all(pool)
            .await
    }
}

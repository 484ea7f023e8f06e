//! Repository for the `roster_players` table and the joined keeper view.

use sqlx::PgPool;
use sandlot_core::keeper_status::KEEPER_STATUS_NOT_KEEPING;
use sandlot_core::types::DbId;

use crate::models::roster_player::{CreateRosterPlayer, KeeperRow, RosterPlayer};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, team_id, player_id, keeper_status, created_at, updated_at";

/// Columns of the roster/player join read as [`KeeperRow`].
const KEEPER_COLUMNS: &str = "\
    rp.id AS roster_player_id, rp.team_id, rp.player_id, p.full_name, \
    rp.keeper_status, p.ecr_rank, p.keeper_cost_round, p.keeper_cost_label, \
    p.keeper_cost_source";

/// Provides CRUD operations for roster entries.
pub struct RosterPlayerRepo;

impl RosterPlayerRepo {
    /// Add a player to a team's roster, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRosterPlayer,
    ) -> Result<RosterPlayer, sqlx::Error> {
        let query = format!(
            "INSERT INTO roster_players (team_id, player_id, keeper_status) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RosterPlayer>(&query)
            .bind(input.team_id)
            .bind(input.player_id)
            .bind(
                input
                    .keeper_status
                    .as_deref()
                    .unwrap_or(KEEPER_STATUS_NOT_KEEPING),
            )
            .fetch_one(pool)
            .await
    }

    /// Find a roster entry by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<RosterPlayer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roster_players WHERE id = $1");
        sqlx::query_as::<_, RosterPlayer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Change a roster entry's keeper status.
    ///
    /// Returns `None` if no roster entry with the given ID exists.
    pub async fn update_keeper_status(
        pool: &PgPool,
        id: DbId,
        keeper_status: &str,
    ) -> Result<Option<RosterPlayer>, sqlx::Error> {
        let query = format!(
            "UPDATE roster_players SET keeper_status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RosterPlayer>(&query)
            .bind(id)
            .bind(keeper_status)
            .fetch_optional(pool)
            .await
    }

    /// Every roster entry of a team, joined with its player.
    pub async fn list_for_team(
        pool: &PgPool,
        team_id: DbId,
    ) -> Result<Vec<KeeperRow>, sqlx::Error> {
        let query = format!(
            "SELECT {KEEPER_COLUMNS} \
             FROM roster_players rp \
             JOIN players p ON p.id = rp.player_id \
             WHERE rp.team_id = $1 \
             ORDER BY p.keeper_cost_round ASC NULLS LAST, p.ecr_rank ASC NULLS LAST, rp.id ASC"
        );
        sqlx::query_as::<_, KeeperRow>(&query)
            .bind(team_id)
            .fetch_all(pool)
            .await
    }

    /// Kept roster entries across the whole league, grouped by team.
    pub async fn list_kept(pool: &PgPool) -> Result<Vec<KeeperRow>, sqlx::Error> {
        let query = format!(
            "SELECT {KEEPER_COLUMNS} \
             FROM roster_players rp \
             JOIN players p ON p.id = rp.player_id \
             WHERE rp.keeper_status <> $1 \
             ORDER BY rp.team_id ASC, rp.id ASC"
        );
        sqlx::query_as::<_, KeeperRow>(&query)
            .bind(KEEPER_STATUS_NOT_KEEPING)
            .fetch_all(pool)
            .await
    }
}

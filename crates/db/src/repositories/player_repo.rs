//! Repository for the `players` table.

use sqlx::PgPool;
use sandlot_core::keeper_cost::KeeperCostSource;
use sandlot_core::types::{DbId, Round};

use crate::models::player::{CreatePlayer, Player};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, full_name, mlb_team, positions, ecr_rank, \
    keeper_cost_round, keeper_cost_label, keeper_cost_source, \
    created_at, updated_at";

/// Provides CRUD operations for players.
pub struct PlayerRepo;

impl PlayerRepo {
    /// Insert a new player, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePlayer) -> Result<Player, sqlx::Error> {
        let query = format!(
            "INSERT INTO players (full_name, mlb_team, positions, ecr_rank) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Player>(&query)
            .bind(&input.full_name)
            .bind(&input.mlb_team)
            .bind(&input.positions)
            .bind(input.ecr_rank)
            .fetch_one(pool)
            .await
    }

    /// Find a player by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Player>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM players WHERE id = $1");
        sqlx::query_as::<_, Player>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all players ordered by ID ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Player>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM players ORDER BY id ASC");
        sqlx::query_as::<_, Player>(&query).fetch_all(pool).await
    }

    /// Store a keeper cost on a player.
    ///
    /// A cost whose source is `manual` is only replaced by another manual
    /// cost. Returns `None` when the player does not exist or the stored
    /// manual cost blocked the write.
    pub async fn set_keeper_cost(
        pool: &PgPool,
        id: DbId,
        round: Round,
        label: &str,
        source: KeeperCostSource,
    ) -> Result<Option<Player>, sqlx::Error> {
        let query = format!(
            "UPDATE players SET \
                keeper_cost_round = $2, \
                keeper_cost_label = $3, \
                keeper_cost_source = $4 \
             WHERE id = $1 \
               AND (keeper_cost_source IS DISTINCT FROM 'manual' OR $4 = 'manual') \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Player>(&query)
            .bind(id)
            .bind(round)
            .bind(label)
            .bind(source.as_str())
            .fetch_optional(pool)
            .await?;
        if updated.is_none() {
            tracing::debug!(
                player_id = id,
                source = source.as_str(),
                "Keeper cost not written (missing player or manual cost)"
            );
        }
        Ok(updated)
    }

    /// Set a player's consensus rank. Returns `true` if a row was updated.
    pub async fn update_ecr_rank(
        pool: &PgPool,
        id: DbId,
        ecr_rank: Option<i32>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE players SET ecr_rank = $2 WHERE id = $1")
            .bind(id)
            .bind(ecr_rank)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

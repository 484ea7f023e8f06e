//! Repository for the `teams` table.

use sqlx::PgPool;
use sandlot_core::types::DbId;

use crate::models::team::Team;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, draft_position, created_at, updated_at";

/// Provides read operations for teams.
pub struct TeamRepo;

impl TeamRepo {
    /// Find a team by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams WHERE id = $1");
        sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a team by name (case-sensitive).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams WHERE name = $1");
        sqlx::query_as::<_, Team>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all teams in draft order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams ORDER BY draft_position ASC");
        sqlx::query_as::<_, Team>(&query).fetch_all(pool).await
    }
}

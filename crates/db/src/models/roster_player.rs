//! Roster entries and the joined keeper view used by the allocator.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sandlot_core::keeper_slots::{Candidate, KeeperCategory};
use sandlot_core::types::{DbId, Round, Timestamp};

/// A row from the `roster_players` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RosterPlayer {
    pub id: DbId,
    pub team_id: DbId,
    pub player_id: DbId,
    pub keeper_status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a player to a roster.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRosterPlayer {
    pub team_id: DbId,
    pub player_id: DbId,
    /// Defaults to `not-keeping`.
    pub keeper_status: Option<String>,
}

/// DTO for changing a roster entry's keeper status.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateKeeperStatus {
    pub keeper_status: String,
}

/// A roster entry joined with its player, as read for keeper decisions.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct KeeperRow {
    pub roster_player_id: DbId,
    pub team_id: DbId,
    pub player_id: DbId,
    pub full_name: String,
    pub keeper_status: String,
    pub ecr_rank: Option<i32>,
    pub keeper_cost_round: Option<Round>,
    pub keeper_cost_label: Option<String>,
    pub keeper_cost_source: Option<String>,
}

impl KeeperRow {
    /// The allocator's view of this row. `None` unless the player is being
    /// kept in some form.
    pub fn to_candidate(&self) -> Option<Candidate> {
        let category = KeeperCategory::from_status(&self.keeper_status)?;
        Some(Candidate {
            id: self.player_id,
            display_name: self.full_name.clone(),
            nominal_round: self.keeper_cost_round,
            quality_rank: self.ecr_rank,
            category,
        })
    }
}

/// Candidates for every kept row in `rows`.
pub fn keeper_candidates(rows: &[KeeperRow]) -> Vec<Candidate> {
    rows.iter().filter_map(KeeperRow::to_candidate).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str) -> KeeperRow {
        KeeperRow {
            roster_player_id: 1,
            team_id: 2,
            player_id: 3,
            full_name: "Gunnar Henderson".to_string(),
            keeper_status: status.to_string(),
            ecr_rank: Some(14),
            keeper_cost_round: Some(4),
            keeper_cost_label: Some("Drafted Rd 4".to_string()),
            keeper_cost_source: Some("draft".to_string()),
        }
    }

    #[test]
    fn kept_row_maps_to_candidate() {
        let candidate = row("keeping").to_candidate().unwrap();
        assert_eq!(candidate.id, 3);
        assert_eq!(candidate.nominal_round, Some(4));
        assert_eq!(candidate.quality_rank, Some(14));
        assert_eq!(candidate.category, KeeperCategory::Standard);
    }

    #[test]
    fn seventh_and_minors_keep_their_category() {
        assert_eq!(
            row("keeping-7th").to_candidate().unwrap().category,
            KeeperCategory::Seventh
        );
        assert_eq!(
            row("keeping-na").to_candidate().unwrap().category,
            KeeperCategory::Minors
        );
    }

    #[test]
    fn not_keeping_is_skipped() {
        let rows = vec![row("not-keeping"), row("keeping")];
        assert!(rows[0].to_candidate().is_none());
        assert_eq!(keeper_candidates(&rows).len(), 1);
    }
}

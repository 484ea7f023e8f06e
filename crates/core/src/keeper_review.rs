//! Pre-commit review of a roster's keeper selections.
//!
//! Runs the round allocator and turns everything that would block a clean
//! draft into user-facing warnings, so the roster screen can show them before
//! keepers are locked in for the season.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::keeper_slots::{allocate_keeper_slots, AllocationResult, Candidate, KeeperCategory, SlotConfig};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Regular keepers per roster, not counting the seventh keeper.
pub const MAX_STANDARD_KEEPERS: usize = 6;

/// Seventh keepers per roster.
pub const MAX_SEVENTH_KEEPERS: usize = 1;

/// Minor-league keepers per roster, one per reserved NA round.
pub const MAX_MINORS_KEEPERS: usize = 4;

/// Lead-in for capacity overflow warnings.
pub const CAPACITY_WARNING_PREFIX: &str = "Cannot keep this many players in adjacent rounds";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    CapacityOverflow,
    MissingCost,
    TooManyKeepers,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeeperWarning {
    pub kind: WarningKind,
    /// The keeper the warning is about; `None` for roster-wide limits.
    pub candidate_id: Option<DbId>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeeperReview {
    pub allocation: AllocationResult,
    pub warnings: Vec<KeeperWarning>,
    pub is_committable: bool,
}

// ---------------------------------------------------------------------------
// Review
// ---------------------------------------------------------------------------

/// Reject a selection that lists the same player twice. The allocator
/// assumes unique ids.
pub fn validate_unique_candidates(candidates: &[Candidate]) -> Result<(), CoreError> {
    let mut seen = HashSet::with_capacity(candidates.len());
    for candidate in candidates {
        if !seen.insert(candidate.id) {
            return Err(CoreError::Validation(format!(
                "Duplicate keeper: {} (id {}) is listed more than once",
                candidate.display_name, candidate.id
            )));
        }
    }
    Ok(())
}

/// Review one roster's keeper selections.
pub fn review_keeper_selection(
    candidates: &[Candidate],
    config: &SlotConfig,
) -> Result<KeeperReview, CoreError> {
    validate_unique_candidates(candidates)?;

    let allocation = allocate_keeper_slots(candidates, config);
    let mut warnings = Vec::new();

    for c in candidates
        .iter()
        .filter(|c| c.category.is_regular() && !c.is_eligible())
    {
        warnings.push(KeeperWarning {
            kind: WarningKind::MissingCost,
            candidate_id: Some(c.id),
            message: format!("{} has no keeper cost round yet", c.display_name),
        });
    }

    for (category, limit, label) in [
        (KeeperCategory::Standard, MAX_STANDARD_KEEPERS, "regular keepers"),
        (KeeperCategory::Seventh, MAX_SEVENTH_KEEPERS, "seventh keepers"),
        (KeeperCategory::Minors, MAX_MINORS_KEEPERS, "NA keepers"),
    ] {
        let count = candidates.iter().filter(|c| c.category == category).count();
        if count > limit {
            warnings.push(KeeperWarning {
                kind: WarningKind::TooManyKeepers,
                candidate_id: None,
                message: format!("{count} {label} selected; the limit is {limit}"),
            });
        }
    }

    warnings.extend(allocation.errors.iter().map(|e| KeeperWarning {
        kind: WarningKind::CapacityOverflow,
        candidate_id: Some(e.candidate_id),
        message: format!("{CAPACITY_WARNING_PREFIX}: {}", e.message),
    }));

    Ok(KeeperReview {
        is_committable: warnings.is_empty(),
        allocation,
        warnings,
    })
}

//! Keeper round allocation with same-round conflict resolution.
//!
//! Every kept player nominally costs one draft round. When two keepers on a
//! roster cost the same round, the better-ranked one keeps it and the other
//! moves to the next open round, which may in turn push a third keeper
//! further down. The cascade is driven by one occupancy set filled in
//! priority order, never by recursion.
//!
//! All functions are pure: callers pass plain values and get plain values
//! back, so concurrent requests never share state.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::keeper_status::{
    KEEPER_STATUS_KEEPING, KEEPER_STATUS_KEEPING_7TH, KEEPER_STATUS_KEEPING_NA,
};
use crate::types::{DbId, Round};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// First draft round.
pub const FIRST_ROUND: Round = 1;

/// Last draft round a regular keeper may occupy. The rounds after it are
/// the reserved NA rounds, which this allocator never hands out.
pub const MAX_KEEPER_ROUND: Round = 23;

/// Sort value for keepers without a consensus rank. Larger than any real
/// rank, so an unranked keeper never wins a tie against a ranked one.
pub const UNRANKED: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Which keeper population a candidate belongs to.
///
/// `Standard` and `Seventh` are both regular keepers and compete for the
/// same rounds. `Minors` keepers sit in the reserved NA pool and are
/// excluded from allocation entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeeperCategory {
    #[serde(rename = "keeping")]
    Standard,
    #[serde(rename = "keeping-7th")]
    Seventh,
    #[serde(rename = "keeping-na")]
    Minors,
}

impl KeeperCategory {
    /// Map a stored keeper status to a category. `not-keeping` and unknown
    /// values have no category.
    pub fn from_status(status: &str) -> Option<Self> {
        match status {
            KEEPER_STATUS_KEEPING => Some(Self::Standard),
            KEEPER_STATUS_KEEPING_7TH => Some(Self::Seventh),
            KEEPER_STATUS_KEEPING_NA => Some(Self::Minors),
            _ => None,
        }
    }

    /// The keeper status string stored for this category.
    pub fn as_status(self) -> &'static str {
        match self {
            Self::Standard => KEEPER_STATUS_KEEPING,
            Self::Seventh => KEEPER_STATUS_KEEPING_7TH,
            Self::Minors => KEEPER_STATUS_KEEPING_NA,
        }
    }

    /// Whether keepers of this category take part in round allocation.
    pub fn is_regular(self) -> bool {
        !matches!(self, Self::Minors)
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// What happens to a keeper whose forward search runs past the last round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowPolicy {
    /// Report a capacity error and leave the keeper unplaced.
    #[default]
    Reject,
    /// Fall back to the nearest open round below the nominal one; report a
    /// capacity error only when no such round exists.
    StackBackward,
}

impl OverflowPolicy {
    pub const ALL_NAMES: &'static [&'static str] = &["reject", "stack-backward"];

    /// Parse the configuration value (`reject` or `stack-backward`).
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value.trim() {
            "reject" => Ok(Self::Reject),
            "stack-backward" => Ok(Self::StackBackward),
            other => Err(CoreError::Validation(format!(
                "Unknown overflow policy: '{}'. Valid policies: {}",
                other,
                Self::ALL_NAMES.join(", ")
            ))),
        }
    }
}

/// Bounds and policy for one allocation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotConfig {
    /// Last round a regular keeper may occupy.
    pub max_round: Round,
    pub overflow_policy: OverflowPolicy,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            max_round: MAX_KEEPER_ROUND,
            overflow_policy: OverflowPolicy::Reject,
        }
    }
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// A keeper submitted for round allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: DbId,
    /// Used in diagnostics only, never in ordering.
    pub display_name: String,
    /// Round the keeper costs before conflicts are resolved.
    pub nominal_round: Option<Round>,
    /// Consensus rank; lower is better.
    pub quality_rank: Option<i32>,
    pub category: KeeperCategory,
}

impl Candidate {
    /// Regular category with a usable nominal round.
    pub fn is_eligible(&self) -> bool {
        self.category.is_regular() && self.nominal_round.is_some_and(|r| r >= FIRST_ROUND)
    }

    /// Allocation priority: cheaper round first, then better rank, then id.
    fn priority(&self) -> (Round, i32, DbId) {
        (
            self.nominal_round.unwrap_or(Round::MAX),
            self.quality_rank.unwrap_or(UNRANKED),
            self.id,
        )
    }
}

/// A keeper with the round it actually occupies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub effective_round: Round,
    /// The nominal round, present only when the keeper was moved off it.
    pub displaced_from: Option<Round>,
}

impl ResolvedCandidate {
    pub fn is_displaced(&self) -> bool {
        self.displaced_from.is_some()
    }
}

/// A keeper that could not be placed within the round bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationError {
    pub candidate_id: DbId,
    pub display_name: String,
    pub nominal_round: Round,
    pub message: String,
}

/// Outcome of one allocation run.
///
/// `resolved` is sorted by `effective_round` (unique per run). `errors` are
/// in allocation priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub resolved: Vec<ResolvedCandidate>,
    pub errors: Vec<AllocationError>,
    pub has_displacement: bool,
}

impl AllocationResult {
    /// The placement of the keeper with the given id, if it was placed.
    pub fn find(&self, id: DbId) -> Option<&ResolvedCandidate> {
        self.resolved.iter().find(|r| r.candidate.id == id)
    }

    /// The keeper occupying `round`, if any.
    pub fn at_round(&self, round: Round) -> Option<&ResolvedCandidate> {
        self.resolved.iter().find(|r| r.effective_round == round)
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Keep only the candidates that compete for rounds.
pub fn filter_eligible(candidates: &[Candidate]) -> Vec<&Candidate> {
    candidates.iter().filter(|c| c.is_eligible()).collect()
}

/// Sort candidates into allocation priority.
///
/// The order is total: ties on round and rank fall back to the id, so the
/// input order never matters.
pub fn order_candidates(mut candidates: Vec<&Candidate>) -> Vec<&Candidate> {
    candidates.sort_by_key(|c| c.priority());
    candidates
}

/// Rounds already handed out during one run.
struct RoundOccupancy {
    taken: BTreeSet<Round>,
    max_round: Round,
}

impl RoundOccupancy {
    fn new(max_round: Round) -> Self {
        Self {
            taken: BTreeSet::new(),
            max_round,
        }
    }

    /// Claim the first open round in `nominal..=max_round`.
    fn claim_forward(&mut self, nominal: Round) -> Option<Round> {
        let round = (nominal..=self.max_round).find(|r| !self.taken.contains(r))?;
        self.taken.insert(round);
        Some(round)
    }

    /// Claim the nearest open round below `nominal`, never above `max_round`.
    fn claim_backward(&mut self, nominal: Round) -> Option<Round> {
        let upper = nominal.min(self.max_round.saturating_add(1));
        let round = (FIRST_ROUND..upper)
            .rev()
            .find(|r| !self.taken.contains(r))?;
        self.taken.insert(round);
        Some(round)
    }
}

/// Assign every eligible keeper a round, resolving same-round conflicts.
///
/// Keepers are walked in priority order and each takes the first open
/// round at or after its nominal round. A keeper that cannot be placed by
/// `max_round` is reported in `errors` (or stacked backward, depending on
/// the policy) and does not hold any round.
pub fn allocate_keeper_slots(candidates: &[Candidate], config: &SlotConfig) -> AllocationResult {
    let ordered = order_candidates(filter_eligible(candidates));
    if ordered.is_empty() {
        return AllocationResult::default();
    }

    let mut occupancy = RoundOccupancy::new(config.max_round);
    let mut resolved = Vec::with_capacity(ordered.len());
    let mut errors = Vec::new();

    for candidate in ordered {
        let Some(nominal) = candidate.nominal_round else {
            continue;
        };

        let claimed = occupancy
            .claim_forward(nominal)
            .or_else(|| match config.overflow_policy {
                OverflowPolicy::Reject => None,
                OverflowPolicy::StackBackward => occupancy.claim_backward(nominal),
            });

        match claimed {
            Some(effective_round) => resolved.push(ResolvedCandidate {
                candidate: candidate.clone(),
                effective_round,
                displaced_from: (effective_round != nominal).then_some(nominal),
            }),
            None => errors.push(capacity_error(candidate, nominal, config)),
        }
    }

    resolved.sort_by_key(|r| r.effective_round);
    let has_displacement = resolved.iter().any(ResolvedCandidate::is_displaced);

    AllocationResult {
        resolved,
        errors,
        has_displacement,
    }
}

fn capacity_error(candidate: &Candidate, nominal: Round, config: &SlotConfig) -> AllocationError {
    let max = config.max_round;
    let message = if nominal > max {
        format!(
            "{} costs Rd {nominal}, past the last keeper round (Rd {max})",
            candidate.display_name
        )
    } else {
        match config.overflow_policy {
            OverflowPolicy::Reject => format!(
                "{} cannot be kept at Rd {nominal}: no open round between Rd {nominal} and Rd {max} \
                 (keepers are limited to {max} rounds)",
                candidate.display_name
            ),
            OverflowPolicy::StackBackward => format!(
                "{} cannot be kept at Rd {nominal}: every round from Rd {FIRST_ROUND} to Rd {max} \
                 is already taken (keepers are limited to {max} rounds)",
                candidate.display_name
            ),
        }
    };

    AllocationError {
        candidate_id: candidate.id,
        display_name: candidate.display_name.clone(),
        nominal_round: nominal,
        message,
    }
}

// ---------------------------------------------------------------------------
// Conflict probe
// ---------------------------------------------------------------------------

/// The keeper left holding the probed keeper's nominal round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictPartner {
    pub id: DbId,
    pub display_name: String,
    pub effective_round: Round,
}

impl From<&ResolvedCandidate> for ConflictPartner {
    fn from(r: &ResolvedCandidate) -> Self {
        Self {
            id: r.candidate.id,
            display_name: r.candidate.display_name.clone(),
            effective_round: r.effective_round,
        }
    }
}

/// An existing keeper whose round would change. `to_round` is `None` when
/// the keeper would be pushed out of the round bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundMove {
    pub id: DbId,
    pub display_name: String,
    pub from_round: Round,
    pub to_round: Option<Round>,
}

/// What adding one keeper to an existing allocation would do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictProbe {
    pub candidate_id: DbId,
    pub nominal_round: Option<Round>,
    /// `None` when the keeper is ineligible or would overflow.
    pub resolved_round: Option<Round>,
    /// Another keeper holds the nominal round. A nominal round past
    /// `max_round` is reported through `overflow` only.
    pub collides: bool,
    pub conflict_partner: Option<ConflictPartner>,
    pub overflow: Option<AllocationError>,
    pub moved: Vec<RoundMove>,
}

/// Answer "what happens if this keeper is added?" without touching
/// `existing`.
///
/// The full allocation is recomputed over existing-plus-new in scratch
/// space, so a better-ranked newcomer can push existing keepers down; those
/// moves are listed in `moved`. `candidate` must not share an id with any
/// keeper in `existing`.
pub fn probe_conflict(
    existing: &[ResolvedCandidate],
    candidate: &Candidate,
    config: &SlotConfig,
) -> ConflictProbe {
    let mut scratch: Vec<Candidate> = existing.iter().map(|r| r.candidate.clone()).collect();
    scratch.push(candidate.clone());
    let outcome = allocate_keeper_slots(&scratch, config);

    let placed = outcome.find(candidate.id);
    let overflow = outcome
        .errors
        .iter()
        .find(|e| e.candidate_id == candidate.id)
        .cloned();

    let within_bound = candidate
        .nominal_round
        .is_some_and(|round| round <= config.max_round);
    let collides = candidate.is_eligible()
        && within_bound
        && (overflow.is_some() || placed.is_some_and(ResolvedCandidate::is_displaced));

    let conflict_partner = if collides {
        candidate
            .nominal_round
            .and_then(|round| outcome.at_round(round))
            .filter(|r| r.candidate.id != candidate.id)
            .map(ConflictPartner::from)
    } else {
        None
    };

    let moved = existing
        .iter()
        .filter_map(|before| {
            let to_round = outcome
                .find(before.candidate.id)
                .map(|after| after.effective_round);
            (to_round != Some(before.effective_round)).then(|| RoundMove {
                id: before.candidate.id,
                display_name: before.candidate.display_name.clone(),
                from_round: before.effective_round,
                to_round,
            })
        })
        .collect();

    ConflictProbe {
        candidate_id: candidate.id,
        nominal_round: candidate.nominal_round,
        resolved_round: placed.map(|r| r.effective_round),
        collides,
        conflict_partner,
        overflow,
        moved,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Keeper cost derivation.
//!
//! Works out the round a keeper nominally costs before any same-round
//! conflict is resolved (see [`crate::keeper_slots`]). Drafted players cost
//! their draft round, free-agent pickups cost the last keeper round, and
//! players kept for a second season cost the round their consensus rank
//! implies.

use serde::{Deserialize, Serialize};

use crate::keeper_slots::{KeeperCategory, FIRST_ROUND, MAX_KEEPER_ROUND};
use crate::types::{DbId, Round};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Teams in the league; one consensus-rank round spans this many players.
pub const LEAGUE_TEAMS: i32 = 12;

/// Round charged for players picked up off waivers or free agency.
pub const FREE_AGENT_ROUND: Round = MAX_KEEPER_ROUND;

/// Consensus rank at or above which a dropped-and-reacquired player cannot
/// be kept at the free-agent round (the top five rounds).
pub const DROP_PROTECTION_MAX_RANK: i32 = 60;

/// Convert a consensus rank to its keeper round: `ceil(rank / 12)`, capped
/// at the last keeper round. Ranks below 1 count as unranked.
pub fn ecr_to_round(rank: i32) -> Round {
    if rank < 1 {
        return MAX_KEEPER_ROUND;
    }
    ((rank - 1) / LEAGUE_TEAMS + 1).clamp(FIRST_ROUND, MAX_KEEPER_ROUND)
}

/// A usable consensus rank; zero and negative ranks mean unranked.
fn ranked(rank: Option<i32>) -> Option<i32> {
    rank.filter(|r| *r >= 1)
}

/// Keeper round for an optional rank; unranked players cost the last round.
fn ecr_round_or_last(rank: Option<i32>) -> Round {
    ranked(rank).map(ecr_to_round).unwrap_or(MAX_KEEPER_ROUND)
}

// ---------------------------------------------------------------------------
// Acquisition history
// ---------------------------------------------------------------------------

/// One event in a player's season history, in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AcquisitionEvent {
    Draft { round: Round, team: DbId },
    FreeAgentPickup { team: DbId },
    Drop { team: DbId },
    Trade { from_team: DbId, to_team: DbId },
}

/// How the current team got the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcquisitionMethod {
    Drafted,
    FreeAgentPickup,
    Traded,
    Unknown,
}

/// What the player's keeper contract is based on. Trades carry the
/// contract over; a drop voids it and the next pickup starts a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContractOrigin {
    Draft { round: Round },
    FreeAgentPickup,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acquisition {
    pub method: AcquisitionMethod,
    pub contract_origin: ContractOrigin,
    pub dropped_and_reacquired: bool,
}

/// Walk a player's history to find how `current_team` acquired them and
/// what their contract is based on.
pub fn trace_acquisition(chain: &[AcquisitionEvent], current_team: DbId) -> Acquisition {
    let mut contract_origin = ContractOrigin::Unknown;
    let mut was_dropped = false;

    for event in chain {
        match event {
            AcquisitionEvent::Draft { round, .. } => {
                contract_origin = ContractOrigin::Draft { round: *round };
            }
            AcquisitionEvent::FreeAgentPickup { .. } => {
                contract_origin = ContractOrigin::FreeAgentPickup;
            }
            AcquisitionEvent::Drop { .. } => {
                was_dropped = true;
                contract_origin = ContractOrigin::Unknown;
            }
            AcquisitionEvent::Trade { .. } => {}
        }
    }

    let method = chain
        .iter()
        .rev()
        .find_map(|event| match event {
            AcquisitionEvent::Draft { team, .. } if *team == current_team => {
                Some(AcquisitionMethod::Drafted)
            }
            AcquisitionEvent::FreeAgentPickup { team } if *team == current_team => {
                Some(AcquisitionMethod::FreeAgentPickup)
            }
            AcquisitionEvent::Trade { to_team, .. } if *to_team == current_team => {
                Some(AcquisitionMethod::Traded)
            }
            _ => None,
        })
        .unwrap_or(AcquisitionMethod::Unknown);

    let dropped_and_reacquired = was_dropped
        && matches!(
            method,
            AcquisitionMethod::FreeAgentPickup | AcquisitionMethod::Traded
        );

    Acquisition {
        method,
        contract_origin,
        dropped_and_reacquired,
    }
}

// ---------------------------------------------------------------------------
// Cost calculation
// ---------------------------------------------------------------------------

/// Where a stored keeper cost came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeeperCostSource {
    /// Verified by hand; automated runs never overwrite it.
    Manual,
    Draft,
    FreeAgent,
    Ecr,
    DropProtection,
}

impl KeeperCostSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Draft => "draft",
            Self::FreeAgent => "free-agent",
            Self::Ecr => "ecr",
            Self::DropProtection => "drop-protection",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "manual" => Some(Self::Manual),
            "draft" => Some(Self::Draft),
            "free-agent" => Some(Self::FreeAgent),
            "ecr" => Some(Self::Ecr),
            "drop-protection" => Some(Self::DropProtection),
            _ => None,
        }
    }
}

/// Whether a cost from `incoming` may replace one stored from `existing`.
///
/// Manually verified costs are only ever replaced by another manual entry.
pub fn should_overwrite(existing: Option<KeeperCostSource>, incoming: KeeperCostSource) -> bool {
    existing != Some(KeeperCostSource::Manual) || incoming == KeeperCostSource::Manual
}

/// Everything the cost rules look at for one keeper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeeperCostInput {
    pub category: KeeperCategory,
    pub ecr_rank: Option<i32>,
    pub acquisition: Acquisition,
    /// The player was kept by this roster going into last season.
    pub kept_last_season: bool,
    /// Round the player went in last season's draft, used when the
    /// acquisition could not be traced.
    pub last_draft_round: Option<Round>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeeperCost {
    /// `None` for minors keepers, which carry no regular cost.
    pub round: Option<Round>,
    pub label: Option<String>,
    pub source: Option<KeeperCostSource>,
    /// Human-readable trail of the rules applied.
    pub reasons: Vec<String>,
}

impl KeeperCost {
    fn priced(round: Round, source: KeeperCostSource, reasons: Vec<String>) -> Self {
        let label = match source {
            KeeperCostSource::Draft => format!("Drafted Rd {round}"),
            KeeperCostSource::FreeAgent => format!("FA - Rd {round}"),
            KeeperCostSource::DropProtection => format!("Protected Rd {round}"),
            KeeperCostSource::Ecr | KeeperCostSource::Manual => format!("ECR Rd {round}"),
        };
        Self {
            round: Some(round),
            label: Some(label),
            source: Some(source),
            reasons,
        }
    }
}

/// Calculate the nominal keeper round for one player.
pub fn calculate_keeper_cost(input: &KeeperCostInput) -> KeeperCost {
    let ecr_rank = ranked(input.ecr_rank);
    let ecr_round = ecr_round_or_last(ecr_rank);

    match input.category {
        KeeperCategory::Minors => {
            return KeeperCost {
                round: None,
                label: None,
                source: None,
                reasons: vec!["NA keeper: no regular cost".to_string()],
            };
        }
        KeeperCategory::Seventh => {
            let reason = match ecr_rank {
                Some(rank) => format!("7th keeper: always ECR cost, ECR {rank} -> Rd {ecr_round}"),
                None => format!("7th keeper: no ECR rank -> Rd {MAX_KEEPER_ROUND}"),
            };
            return KeeperCost::priced(ecr_round, KeeperCostSource::Ecr, vec![reason]);
        }
        KeeperCategory::Standard => {}
    }

    let acquisition = &input.acquisition;
    let pickup_contract = acquisition.contract_origin == ContractOrigin::FreeAgentPickup;
    let mut reasons = vec![describe_acquisition(acquisition)];

    // A pickup starts a fresh contract, even for a player kept last season.
    let second_year = input.kept_last_season && !pickup_contract;
    if input.kept_last_season {
        reasons.push("kept last season".to_string());
    } else {
        reasons.push("first year keeper".to_string());
    }

    let draft_round = match acquisition.contract_origin {
        ContractOrigin::Draft { round } => Some(round),
        ContractOrigin::FreeAgentPickup => None,
        ContractOrigin::Unknown => input.last_draft_round,
    };

    let (mut round, mut source) = if second_year {
        match ecr_rank {
            Some(rank) => reasons.push(format!("2nd+ year -> ECR {rank} -> Rd {ecr_round}")),
            None => reasons.push(format!("2nd+ year -> no ECR rank -> Rd {MAX_KEEPER_ROUND}")),
        }
        (ecr_round, KeeperCostSource::Ecr)
    } else {
        match draft_round {
            Some(r) if !pickup_contract => {
                reasons.push(format!("1st year, drafted -> Rd {r}"));
                (r, KeeperCostSource::Draft)
            }
            _ => {
                reasons.push(format!("1st year, free agent -> Rd {FREE_AGENT_ROUND}"));
                (FREE_AGENT_ROUND, KeeperCostSource::FreeAgent)
            }
        }
    };

    if acquisition.dropped_and_reacquired || pickup_contract {
        if let Some(rank) = ecr_rank.filter(|r| *r <= DROP_PROTECTION_MAX_RANK) {
            let protected = draft_round.map_or(ecr_round, |d| d.min(ecr_round));
            if round == FREE_AGENT_ROUND && protected < FREE_AGENT_ROUND {
                reasons.push(format!(
                    "drop protection: ECR {rank} is top {DROP_PROTECTION_MAX_RANK}, \
                     cannot keep at Rd {FREE_AGENT_ROUND} -> Rd {protected}"
                ));
                round = protected;
                source = KeeperCostSource::DropProtection;
            }
        }
    }

    KeeperCost::priced(round, source, reasons)
}

fn describe_acquisition(acquisition: &Acquisition) -> String {
    match (acquisition.method, acquisition.contract_origin) {
        (AcquisitionMethod::Drafted, ContractOrigin::Draft { round }) => {
            format!("drafted Rd {round}")
        }
        (AcquisitionMethod::Drafted, _) => "drafted".to_string(),
        (AcquisitionMethod::FreeAgentPickup, _) => "free agent pickup".to_string(),
        (AcquisitionMethod::Traded, ContractOrigin::Draft { round }) => {
            format!("traded (originally drafted Rd {round})")
        }
        (AcquisitionMethod::Traded, ContractOrigin::FreeAgentPickup) => {
            "traded (originally a free agent pickup)".to_string()
        }
        (AcquisitionMethod::Traded, ContractOrigin::Unknown) => "traded".to_string(),
        (AcquisitionMethod::Unknown, _) => "unknown acquisition".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

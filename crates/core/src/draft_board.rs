//! Snake draft board: pick ownership, pick transfers, keeper placement.
//!
//! Slot `n` always belongs to the team at draft position `n`; what changes
//! from round to round is the direction of play. Odd rounds pick slots
//! 1 -> N, even rounds N -> 1.

use serde::Serialize;

use crate::error::CoreError;
use crate::keeper_slots::AllocationResult;
use crate::types::{DbId, Round};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Rounds on the board, including the reserved NA rounds.
pub const DRAFT_ROUNDS: Round = 27;

/// First of the reserved minor-league rounds.
pub const FIRST_NA_ROUND: Round = 24;

/// Whether `round` is one of the reserved NA rounds.
pub fn is_na_round(round: Round) -> bool {
    (FIRST_NA_ROUND..=DRAFT_ROUNDS).contains(&round)
}

/// Slots of one round in the order they are picked.
pub fn pick_sequence(round: Round, teams: i32) -> Vec<i32> {
    if round % 2 == 1 {
        (1..=teams).collect()
    } else {
        (1..=teams).rev().collect()
    }
}

/// Overall pick number (1-based) of `slot` in `round`.
pub fn overall_pick_number(round: Round, slot: i32, teams: i32) -> i32 {
    let position = if round % 2 == 1 { slot } else { teams - slot + 1 };
    (round - 1) * teams + position
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pick {
    pub round: Round,
    pub slot: i32,
    pub original_owner: String,
    pub current_owner: String,
    /// Every owner the pick has had, oldest first.
    pub path: Vec<String>,
}

impl Pick {
    pub fn is_traded(&self) -> bool {
        self.original_owner != self.current_owner
    }
}

/// Where a resolved keeper lands on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeeperPlacement {
    pub candidate_id: DbId,
    pub display_name: String,
    pub round: Round,
    /// `None` when the owner holds no pick in `round`.
    pub slot: Option<i32>,
    pub displaced_from: Option<Round>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftBoard {
    order: Vec<String>,
    rounds: Round,
    /// `picks[round - 1][slot - 1]`.
    picks: Vec<Vec<Pick>>,
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

impl DraftBoard {
    /// Fresh board where every team owns its own slot in every round.
    pub fn new(order: Vec<String>, rounds: Round) -> Result<Self, CoreError> {
        if order.is_empty() {
            return Err(CoreError::Validation(
                "Draft order must list at least one team".to_string(),
            ));
        }
        if rounds < 1 {
            return Err(CoreError::Validation(format!(
                "Draft must have at least one round (got {rounds})"
            )));
        }
        for (i, name) in order.iter().enumerate() {
            if order[..i].contains(name) {
                return Err(CoreError::Validation(format!(
                    "Team '{name}' appears twice in the draft order"
                )));
            }
        }

        let picks = (1..=rounds)
            .map(|round| {
                order
                    .iter()
                    .zip(1..)
                    .map(|(owner, slot)| Pick {
                        round,
                        slot,
                        original_owner: owner.clone(),
                        current_owner: owner.clone(),
                        path: vec![owner.clone()],
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            order,
            rounds,
            picks,
        })
    }

    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn rounds(&self) -> Round {
        self.rounds
    }

    pub fn teams(&self) -> i32 {
        self.order.len() as i32
    }

    pub fn round_picks(&self, round: Round) -> Option<&[Pick]> {
        let index = usize::try_from(round).ok()?.checked_sub(1)?;
        self.picks.get(index).map(Vec::as_slice)
    }

    pub fn pick(&self, round: Round, slot: i32) -> Option<&Pick> {
        let index = usize::try_from(slot).ok()?.checked_sub(1)?;
        self.round_picks(round)?.get(index)
    }

    fn pick_mut(&mut self, round: Round, slot: i32) -> Option<&mut Pick> {
        let r = usize::try_from(round).ok()?.checked_sub(1)?;
        let s = usize::try_from(slot).ok()?.checked_sub(1)?;
        self.picks.get_mut(r)?.get_mut(s)
    }

    /// Slots `owner` currently holds in `round`, ascending.
    pub fn owner_slots(&self, owner: &str, round: Round) -> Vec<i32> {
        self.round_picks(round)
            .unwrap_or_default()
            .iter()
            .filter(|p| p.current_owner == owner)
            .map(|p| p.slot)
            .collect()
    }

    /// The latest pick `owner` holds in `round`: the highest slot in odd
    /// rounds, the lowest in even rounds.
    pub fn worst_pick(&self, owner: &str, round: Round) -> Option<i32> {
        let slots = self.owner_slots(owner, round);
        if round % 2 == 1 {
            slots.last().copied()
        } else {
            slots.first().copied()
        }
    }

    /// Move the pick at (`round`, `slot`) from `from` to `to`.
    pub fn transfer_pick(
        &mut self,
        round: Round,
        slot: i32,
        from: &str,
        to: &str,
    ) -> Result<(), CoreError> {
        if !self.order.iter().any(|o| o == to) {
            return Err(CoreError::Validation(format!(
                "Team '{to}' is not in the draft order"
            )));
        }
        let pick = self.pick_mut(round, slot).ok_or_else(|| {
            CoreError::Validation(format!("Round {round} slot {slot} is not on the board"))
        })?;
        if pick.current_owner != from {
            return Err(CoreError::Conflict(format!(
                "Round {round} slot {slot} (orig: {}) is owned by {}, not {from}",
                pick.original_owner, pick.current_owner
            )));
        }
        pick.current_owner = to.to_string();
        pick.path.push(to.to_string());
        Ok(())
    }

    /// Move `from`'s worst pick in `round` to `to`. A trade that names a
    /// round but not a slot always means the worst pick.
    pub fn transfer_worst_pick(
        &mut self,
        round: Round,
        from: &str,
        to: &str,
    ) -> Result<i32, CoreError> {
        let slot = self.worst_pick(from, round).ok_or_else(|| {
            CoreError::Conflict(format!("{from} has no pick in round {round}"))
        })?;
        self.transfer_pick(round, slot, from, to)?;
        Ok(slot)
    }

    /// Move the round-`round` pick originally owned by `original_owner`,
    /// currently held by `from`, to `to`.
    pub fn transfer_by_original_owner(
        &mut self,
        round: Round,
        original_owner: &str,
        from: &str,
        to: &str,
    ) -> Result<i32, CoreError> {
        let slot = self
            .round_picks(round)
            .unwrap_or_default()
            .iter()
            .find(|p| p.original_owner == original_owner && p.current_owner == from)
            .map(|p| p.slot)
            .ok_or_else(|| {
                CoreError::Conflict(format!(
                    "Cannot find round {round} pick originally from {original_owner} \
                     currently owned by {from}"
                ))
            })?;
        self.transfer_pick(round, slot, from, to)?;
        Ok(slot)
    }

    /// Picks held per team, in draft order.
    pub fn owner_pick_counts(&self) -> Vec<(String, usize)> {
        self.order
            .iter()
            .map(|owner| {
                let count = self
                    .picks
                    .iter()
                    .flatten()
                    .filter(|p| &p.current_owner == owner)
                    .count();
                (owner.clone(), count)
            })
            .collect()
    }

    /// Put each of `owner`'s resolved keepers on the worst pick `owner`
    /// holds in the keeper's effective round.
    pub fn place_keepers(&self, owner: &str, allocation: &AllocationResult) -> Vec<KeeperPlacement> {
        allocation
            .resolved
            .iter()
            .map(|r| KeeperPlacement {
                candidate_id: r.candidate.id,
                display_name: r.candidate.display_name.clone(),
                round: r.effective_round,
                slot: self.worst_pick(owner, r.effective_round),
                displaced_from: r.displaced_from,
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Well-known keeper status constants.
//!
//! These must match the CHECK constraint on `roster_players.keeper_status`.

/// Regular keeper.
pub const KEEPER_STATUS_KEEPING: &str = "keeping";

/// The seventh keeper slot, always priced at the consensus-rank round.
pub const KEEPER_STATUS_KEEPING_7TH: &str = "keeping-7th";

/// Minor-league keeper held in the reserved NA rounds.
pub const KEEPER_STATUS_KEEPING_NA: &str = "keeping-na";

/// The player is on the roster but not being kept.
pub const KEEPER_STATUS_NOT_KEEPING: &str = "not-keeping";

/// All recognized keeper statuses.
pub const ALL_KEEPER_STATUSES: &[&str] = &[
    KEEPER_STATUS_KEEPING,
    KEEPER_STATUS_KEEPING_7TH,
    KEEPER_STATUS_KEEPING_NA,
    KEEPER_STATUS_NOT_KEEPING,
];

/// Validate that the given value is a recognized keeper status.
pub fn validate_keeper_status(status: &str) -> Result<(), crate::error::CoreError> {
    if ALL_KEEPER_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(crate::error::CoreError::Validation(format!(
            "Unknown keeper status: '{}'. Valid statuses: {}",
            status,
            ALL_KEEPER_STATUSES.join(", ")
        )))
    }
}

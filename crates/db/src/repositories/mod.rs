//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod draft_pick_transfer_repo;
pub mod player_repo;
pub mod roster_player_repo;
pub mod team_repo;

pub use draft_pick_transfer_repo::DraftPickTransferRepo;
pub use player_repo::PlayerRepo;
pub use roster_player_repo::RosterPlayerRepo;
pub use team_repo::TeamRepo;

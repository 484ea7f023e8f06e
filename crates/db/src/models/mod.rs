//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the writes the API accepts

pub mod draft_pick_transfer;
pub mod player;
pub mod roster_player;
pub mod team;

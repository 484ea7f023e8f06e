pub mod draft_board;
pub mod keeper_costs;
pub mod keepers;
pub mod players;
pub mod roster;
pub mod teams;

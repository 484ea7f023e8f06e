//! Domain logic for the Sandlot keeper hub.
//!
//! Everything in this crate is pure: no database, no HTTP, no clock. The
//! `db` and `api` crates feed it plain values and render what it returns.

pub mod draft_board;
pub mod ecr;
pub mod error;
pub mod keeper_cost;
pub mod keeper_review;
pub mod keeper_slots;
pub mod keeper_status;
pub mod types;

//! Route definitions for the draft board.

use axum::routing::get;
use axum::Router;

use crate::handlers::draft_board;
use crate::state::AppState;

/// Routes mounted at `/draft-board`.
///
/// ```text
/// GET    /              -> get_draft_board
/// GET    /transfers     -> list_transfers
/// POST   /transfers     -> create_transfer
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(draft_board::get_draft_board))
        .route(
            "/transfers",
            get(draft_board::list_transfers).post(draft_board::create_transfer),
        )
}

use axum::routing::post;
use axum::Router;

use crate::handlers::keeper_costs;
use crate::state::AppState;

/// Routes mounted at `/keeper-costs`.
///
/// ```text
/// POST   /calculate    -> calculate
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/calculate", post(keeper_costs::calculate))
}

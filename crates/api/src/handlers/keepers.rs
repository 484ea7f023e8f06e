//! Stateless keeper allocation endpoints.
//!
//! The caller supplies the candidates directly, so these work for what-if
//! screens before anything is saved to a roster.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use sandlot_core::error::CoreError;
use sandlot_core::keeper_review::validate_unique_candidates;
use sandlot_core::keeper_slots::{
    allocate_keeper_slots, probe_conflict, Candidate, OverflowPolicy, ResolvedCandidate,
    SlotConfig,
};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /keepers/resolve`.
#[derive(Debug, Deserialize)]
pub struct ResolveKeepersRequest {
    pub candidates: Vec<Candidate>,
    /// Overrides the server's configured policy for this request.
    pub overflow_policy: Option<OverflowPolicy>,
}

/// Request body for `POST /keepers/probe`.
#[derive(Debug, Deserialize)]
pub struct ProbeKeepersRequest {
    /// A previous allocation's `resolved` list.
    pub existing: Vec<ResolvedCandidate>,
    pub candidate: Candidate,
    pub overflow_policy: Option<OverflowPolicy>,
}

fn slot_config(state: &AppState, overflow_policy: Option<OverflowPolicy>) -> SlotConfig {
    let mut config = state.config.keeper;
    if let Some(policy) = overflow_policy {
        config.overflow_policy = policy;
    }
    config
}

/// POST /api/v1/keepers/resolve
///
/// Resolve an ad-hoc keeper list onto distinct rounds.
pub async fn resolve_keepers(
    State(state): State<AppState>,
    Json(input): Json<ResolveKeepersRequest>,
) -> AppResult<impl IntoResponse> {
    validate_unique_candidates(&input.candidates)?;

    let config = slot_config(&state, input.overflow_policy);
    let allocation = allocate_keeper_slots(&input.candidates, &config);

    tracing::info!(
        candidates = input.candidates.len(),
        resolved = allocation.resolved.len(),
        errors = allocation.errors.len(),
        overflow_policy = ?config.overflow_policy,
        "Ad-hoc keeper slots resolved",
    );

    Ok(Json(DataResponse { data: allocation }))
}

/// POST /api/v1/keepers/probe
///
/// Probe one candidate against a previously resolved keeper list.
pub async fn probe_keepers(
    State(state): State<AppState>,
    Json(input): Json<ProbeKeepersRequest>,
) -> AppResult<impl IntoResponse> {
    let existing: Vec<Candidate> = input.existing.iter().map(|r| r.candidate.clone()).collect();
    validate_unique_candidates(&existing)?;
    if existing.iter().any(|c| c.id == input.candidate.id) {
        return Err(CoreError::Validation(format!(
            "{} (id {}) is already in the existing keeper list",
            input.candidate.display_name, input.candidate.id
        ))
        .into());
    }

    let config = slot_config(&state, input.overflow_policy);
    let probe = probe_conflict(&input.existing, &input.candidate, &config);

    Ok(Json(DataResponse { data: probe }))
}

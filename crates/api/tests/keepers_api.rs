//! HTTP-level integration tests for the keeper endpoints.
//!
//! Players and roster entries are created through the repository layer,
//! then the allocation, review, probe and cost endpoints are exercised
//! through the full router.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, build_test_app_with_config, get, post_json, put_json, test_config};
use serde_json::json;
use sqlx::PgPool;
use sandlot_core::keeper_cost::KeeperCostSource;
use sandlot_core::keeper_review::CAPACITY_WARNING_PREFIX;
use sandlot_core::keeper_slots::OverflowPolicy;
use sandlot_db::models::player::CreatePlayer;
use sandlot_db::models::roster_player::{CreateRosterPlayer, RosterPlayer};
use sandlot_db::repositories::{PlayerRepo, RosterPlayerRepo, TeamRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn team_id(pool: &PgPool, name: &str) -> i64 {
    TeamRepo::find_by_name(pool, name).await.unwrap().unwrap().id
}

/// Create a player with a stored cost and put them on `team_id`'s roster.
async fn rostered(
    pool: &PgPool,
    team_id: i64,
    name: &str,
    cost_round: Option<i32>,
    ecr_rank: Option<i32>,
    status: &str,
) -> RosterPlayer {
    let player = PlayerRepo::create(
        pool,
        &CreatePlayer {
            full_name: name.to_string(),
            mlb_team: None,
            positions: None,
            ecr_rank,
        },
    )
    .await
    .unwrap();
    if let Some(round) = cost_round {
        PlayerRepo::set_keeper_cost(pool, player.id, round, &format!("Rd {round}"), KeeperCostSource::Draft)
            .await
            .unwrap()
            .unwrap();
    }
    RosterPlayerRepo::create(
        pool,
        &CreateRosterPlayer {
            team_id,
            player_id: player.id,
            keeper_status: Some(status.to_string()),
        },
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_teams_in_draft_order(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/teams").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let teams = json["data"].as_array().unwrap();
    assert_eq!(teams.len(), 12);
    assert_eq!(teams[0]["name"], "Pudge");
    assert_eq!(teams[0]["draft_position"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_team_returns_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/teams/999999/keepers/slots").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Slot allocation from stored keepers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn team_slots_cascade_same_round_keepers(pool: PgPool) {
    let team = team_id(&pool, "Tom").await;
    let ace = rostered(&pool, team, "Ace", Some(5), Some(10), "keeping").await;
    let backup = rostered(&pool, team, "Backup", Some(5), Some(30), "keeping").await;
    let next = rostered(&pool, team, "Next", Some(6), Some(50), "keeping-7th").await;
    rostered(&pool, team, "Bench", Some(2), Some(5), "not-keeping").await;
    rostered(&pool, team, "Prospect", None, Some(400), "keeping-na").await;

    let app = build_test_app(pool);
    let response = get(app, &format!("/api/v1/teams/{team}/keepers/slots")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let resolved = json["data"]["resolved"].as_array().unwrap();
    let placed: Vec<(i64, i64)> = resolved
        .iter()
        .map(|r| {
            (
                r["id"].as_i64().unwrap(),
                r["effective_round"].as_i64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        placed,
        vec![(ace.player_id, 5), (backup.player_id, 6), (next.player_id, 7)]
    );
    assert!(resolved[0]["displaced_from"].is_null());
    assert_eq!(resolved[1]["displaced_from"], 5);
    assert_eq!(resolved[2]["displaced_from"], 6);
    assert_eq!(json["data"]["has_displacement"], true);
    assert!(json["data"]["errors"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn team_review_reports_capacity_overflow(pool: PgPool) {
    let team = team_id(&pool, "Greasy").await;
    rostered(&pool, team, "Late One", Some(22), Some(200), "keeping").await;
    rostered(&pool, team, "Late Two", Some(22), Some(210), "keeping").await;
    let overflow = rostered(&pool, team, "Last Call", Some(23), Some(220), "keeping").await;

    let app = build_test_app(pool);
    let response = get(app, &format!("/api/v1/teams/{team}/keepers/review")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["is_committable"], false);
    assert_eq!(data["allocation"]["resolved"].as_array().unwrap().len(), 2);

    let warnings = data["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["kind"], "capacity_overflow");
    assert_eq!(warnings[0]["candidate_id"], overflow.player_id);
    assert!(warnings[0]["message"]
        .as_str()
        .unwrap()
        .starts_with(CAPACITY_WARNING_PREFIX));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stack_backward_policy_places_overflow_earlier(pool: PgPool) {
    let team = team_id(&pool, "Mike").await;
    rostered(&pool, team, "Late One", Some(22), Some(200), "keeping").await;
    rostered(&pool, team, "Late Two", Some(22), Some(210), "keeping").await;
    let overflow = rostered(&pool, team, "Last Call", Some(23), Some(220), "keeping").await;

    let mut config = test_config();
    config.keeper.overflow_policy = OverflowPolicy::StackBackward;
    let app = build_test_app_with_config(pool, config);
    let response = get(app, &format!("/api/v1/teams/{team}/keepers/slots")).await;

    let json = body_json(response).await;
    let resolved = json["data"]["resolved"].as_array().unwrap();
    assert_eq!(resolved.len(), 3);
    assert!(json["data"]["errors"].as_array().unwrap().is_empty());

    let last_call = resolved
        .iter()
        .find(|r| r["id"].as_i64() == Some(overflow.player_id))
        .unwrap();
    assert_eq!(last_call["effective_round"], 21);
    assert_eq!(last_call["displaced_from"], 23);
}

// ---------------------------------------------------------------------------
// Conflict probe against a team
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn probe_reports_partner_and_moves(pool: PgPool) {
    let team = team_id(&pool, "Chris").await;
    let incumbent = rostered(&pool, team, "Incumbent", Some(5), Some(40), "keeping").await;
    let other = rostered(&pool, team, "Star", Some(5), Some(3), "not-keeping").await;
    let weak = rostered(&pool, team, "Depth", Some(5), Some(90), "not-keeping").await;

    // A better-ranked newcomer takes Rd 5 and pushes the incumbent down.
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/teams/{team}/keepers/probe"),
        json!({ "player_id": other.player_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let probe = &json["data"];
    assert_eq!(probe["resolved_round"], 5);
    assert_eq!(probe["collides"], false);
    let moved = probe["moved"].as_array().unwrap();
    assert_eq!(moved.len(), 1);
    assert_eq!(moved[0]["id"], incumbent.player_id);
    assert_eq!(moved[0]["from_round"], 5);
    assert_eq!(moved[0]["to_round"], 6);

    // A worse-ranked newcomer is the one displaced.
    let app = build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/teams/{team}/keepers/probe"),
        json!({ "player_id": weak.player_id, "category": "keeping" }),
    )
    .await;
    let json = body_json(response).await;
    let probe = &json["data"];
    assert_eq!(probe["collides"], true);
    assert_eq!(probe["resolved_round"], 6);
    assert_eq!(probe["conflict_partner"]["id"], incumbent.player_id);
    assert!(probe["moved"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn probe_unknown_player_returns_404(pool: PgPool) {
    let team = team_id(&pool, "Alex").await;
    let app = build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/teams/{team}/keepers/probe"),
        json!({ "player_id": 999999 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Ad-hoc allocation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn resolve_ad_hoc_candidates(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/keepers/resolve",
        json!({
            "candidates": [
                { "id": 1, "display_name": "A", "nominal_round": 22, "quality_rank": 1, "category": "keeping" },
                { "id": 2, "display_name": "B", "nominal_round": 22, "quality_rank": 2, "category": "keeping" },
                { "id": 3, "display_name": "C", "nominal_round": 23, "quality_rank": 3, "category": "keeping" },
                { "id": 4, "display_name": "D", "nominal_round": null, "quality_rank": null, "category": "keeping-na" }
            ]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["resolved"].as_array().unwrap().len(), 2);
    let errors = data["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["candidate_id"], 3);
    let message = errors[0]["message"].as_str().unwrap();
    assert!(message.contains("Rd 23"));
    assert!(message.contains("limited to 23 rounds"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn resolve_rejects_duplicate_ids(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/keepers/resolve",
        json!({
            "candidates": [
                { "id": 7, "display_name": "A", "nominal_round": 3, "quality_rank": 1, "category": "keeping" },
                { "id": 7, "display_name": "A", "nominal_round": 4, "quality_rank": 1, "category": "keeping" }
            ]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ad_hoc_probe_rejects_candidate_already_kept(pool: PgPool) {
    let app = build_test_app(pool);
    let kept = json!({
        "id": 1, "display_name": "A", "nominal_round": 5, "quality_rank": 1,
        "category": "keeping", "effective_round": 5, "displaced_from": null
    });
    let response = post_json(
        app,
        "/api/v1/keepers/probe",
        json!({
            "existing": [kept],
            "candidate": { "id": 1, "display_name": "A", "nominal_round": 5, "quality_rank": 1, "category": "keeping" }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Keeper status changes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn keeper_status_change_returns_review(pool: PgPool) {
    let team = team_id(&pool, "Sean").await;
    let entry = rostered(&pool, team, "Maybe Keeper", Some(9), Some(100), "not-keeping").await;

    let app = build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/roster/{}/keeper-status", entry.id),
        json!({ "keeper_status": "keeping" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["roster_player"]["keeper_status"], "keeping");
    assert_eq!(json["data"]["review"]["is_committable"], true);
    assert_eq!(
        json["data"]["review"]["allocation"]["resolved"][0]["effective_round"],
        9
    );

    let app = build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/roster/{}/keeper-status", entry.id),
        json!({ "keeper_status": "maybe" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = build_test_app(pool);
    let response = put_json(
        app,
        "/api/v1/roster/999999/keeper-status",
        json!({ "keeper_status": "keeping" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Keeper costs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn calculate_drafted_keeper_cost(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/keeper-costs/calculate",
        json!({
            "ecr_rank": 100,
            "history": [{ "type": "draft", "round": 4, "team": 3 }],
            "current_team_id": 3
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let cost = &json["data"]["cost"];
    assert_eq!(cost["round"], 4);
    assert_eq!(cost["label"], "Drafted Rd 4");
    assert_eq!(cost["source"], "draft");
    assert_eq!(json["data"]["acquisition"]["method"], "drafted");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn calculate_applies_drop_protection(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/keeper-costs/calculate",
        json!({
            "ecr_rank": 30,
            "history": [
                { "type": "draft", "round": 2, "team": 1 },
                { "type": "drop", "team": 1 },
                { "type": "free_agent_pickup", "team": 5 }
            ],
            "current_team_id": 5
        }),
    )
    .await;

    let json = body_json(response).await;
    let cost = &json["data"]["cost"];
    assert_eq!(cost["round"], 3);
    assert_eq!(cost["source"], "drop-protection");
    assert_eq!(cost["label"], "Protected Rd 3");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn calculate_rejects_non_positive_rank(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/keeper-costs/calculate",
        json!({ "ecr_rank": 0, "current_team_id": 3 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn calculate_handles_largest_rank(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/keeper-costs/calculate",
        json!({ "category": "keeping-7th", "ecr_rank": i32::MAX, "current_team_id": 3 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["cost"]["round"], 23);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn manual_keeper_cost_is_protected(pool: PgPool) {
    let team = team_id(&pool, "Bob").await;
    let entry = rostered(&pool, team, "Ruled Player", None, Some(15), "keeping").await;
    let uri = format!("/api/v1/players/{}/keeper-cost", entry.player_id);

    let app = build_test_app(pool.clone());
    let response = put_json(
        app,
        &uri,
        json!({ "round": 8, "label": "Commissioner ruling", "source": "manual" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["keeper_cost_round"], 8);
    assert_eq!(json["data"]["keeper_cost_source"], "manual");

    let app = build_test_app(pool.clone());
    let response = put_json(app, &uri, json!({ "round": 2, "source": "ecr" })).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let app = build_test_app(pool.clone());
    let response = put_json(app, &uri, json!({ "round": 40, "source": "manual" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = build_test_app(pool);
    let response = put_json(app, &uri, json!({ "round": 4, "source": "guess" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ecr_import_updates_matched_players(pool: PgPool) {
    let team = team_id(&pool, "Web").await;
    let ohtani = rostered(&pool, team, "Shohei Ohtani", None, Some(5), "keeping").await;
    rostered(&pool, team, "Nobody Ranked", None, None, "keeping").await;

    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/players/ecr",
        json!({ "rankings": [{ "name": "S. Ohtani", "rank": 1 }, { "name": "Aaron Judge", "rank": 2 }] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["players_checked"], 2);
    assert_eq!(json["data"]["updated"], 1);
    assert_eq!(json["data"]["unmatched"], 1);

    let stored = PlayerRepo::find_by_id(&pool, ohtani.player_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.ecr_rank, Some(1));
}

/// Integration tests for the team endpoints

mod common;

use axum::http::{Method, StatusCode};
use common::TestContext;
use issuedeck_shared::models::team::{TeamMember, TeamRole};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_create_team_makes_caller_owner() {
    let ctx = TestContext::new().await.unwrap();

    let (status, team) = ctx
        .send(Method::POST, "/api/teams", Some(json!({ "name": "  Platform  " })))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", team);
    assert_eq!(team["name"], "Platform");
    assert_eq!(team["ownerId"], ctx.user.id.to_string());

    let team_id = Uuid::parse_str(team["id"].as_str().unwrap()).unwrap();
    let members = TeamMember::list_by_team(&ctx.db, team_id).await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].user_id, ctx.user.id);
    assert_eq!(members[0].role, TeamRole::Owner);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_create_team_requires_name() {
    let ctx = TestContext::new().await.unwrap();

    for body in [json!({}), json!({ "name": "" }), json!({ "name": "   " })] {
        let (status, response) = ctx.send(Method::POST, "/api/teams", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", response);
    }

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_list_teams_with_counts() {
    let ctx = TestContext::new().await.unwrap();
    let (_, other_token) = ctx.other_user().await.unwrap();

    // Provisions "Personal Team" with one project
    let (status, _) = ctx
        .send(Method::POST, "/api/issues", Some(json!({ "title": "First" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    ctx.send(Method::POST, "/api/teams", Some(json!({ "name": "Second" })))
        .await;

    common::send(
        &ctx.app,
        Method::POST,
        "/api/teams",
        Some(&other_token),
        Some(json!({ "name": "Not mine" })),
    )
    .await;

    let (status, teams) = ctx.send(Method::GET, "/api/teams", None).await;
    assert_eq!(status, StatusCode::OK);

    let teams = teams.as_array().unwrap();
    assert_eq!(teams.len(), 2);

    assert_eq!(teams[0]["name"], "Personal Team");
    assert_eq!(teams[0]["_count"]["members"], 1);
    assert_eq!(teams[0]["_count"]["projects"], 1);

    assert_eq!(teams[1]["name"], "Second");
    assert_eq!(teams[1]["_count"]["projects"], 0);

    ctx.cleanup().await.unwrap();
}

mod common;

use anyhow::{Context, Result};
use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

/// Register, log in, publish a court, review it as someone else, and delete it
#[tokio::test]
async fn court_lifecycle() -> Result<()> {
    let app = TestApp::new()?;

    let (status, body) = app.register("alice1", "a@x.com", "Passw0rd!").await?;
    assert_eq!(status, StatusCode::CREATED);
    let alice_id = body["data"]["id"].as_str().context("alice id")?.to_string();

    let (status, body) = app.login("a@x.com", "Passw0rd!").await?;
    assert_eq!(status, StatusCode::OK);
    let alice_token = body["data"]["token"].as_str().context("alice token")?.to_string();

    let (status, body) = app
        .post(
            "/courts",
            Some(&alice_token),
            json!({
                "name": "Court1",
                "description": "Synthetic grass, five a side",
                "location": "Miraflores",
                "address": "Calle 1",
                "price": 50
            }),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["user_id"], alice_id.as_str());
    let court = body["data"]["id"].as_i64().context("court id")?;
    let court_path = format!("/courts/{}", court);

    let bob = app.signup("bob_2").await?;
    let (status, _) = app
        .post(
            &format!("{}/reviews", court_path),
            Some(&bob.token),
            json!({ "rating": 4, "comment": "ok" }),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.get(&court_path, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["rating"], 4.0);
    assert_eq!(body["data"]["num_reviews"], 1);

    let (status, _) = app.put(&court_path, Some(&bob.token), json!({ "name": "Bob's now" })).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.delete(&court_path, Some(&alice_token)).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get(&court_path, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get(&format!("{}/reviews", court_path), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(app.store.review_rows_for_court(court).await, 0);

    Ok(())
}

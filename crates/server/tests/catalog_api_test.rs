//! # Catalog API Tests
//!
//! End-to-end tests for the user, tool and recommendation endpoints against a
//! seeded database.

mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::{json, Value};

fn titles(body: &Value) -> Vec<String> {
    body["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["Title"].as_str().unwrap_or_default().to_string())
        .collect()
}

fn ids(body: &Value) -> Vec<i64> {
    body["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_root_and_health() -> anyhow::Result<()> {
    let app = TestApp::spawn().await?;

    let root = app.client.get(app.url("/")).send().await?;
    assert_eq!(root.status(), StatusCode::OK);
    assert_eq!(root.text().await?, "toolrec server is running.");

    let health = app.client.get(app.url("/health")).send().await?;
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(health.text().await?, "OK");
    Ok(())
}

#[tokio::test]
async fn test_list_tools_in_catalog_order() -> anyhow::Result<()> {
    let app = TestApp::spawn().await?;

    let response = app.client.get(app.url("/tools")).send().await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await?;

    assert_eq!(body["data_unavailable"], json!(false));
    assert_eq!(ids(&body), vec![1, 2, 3, 4]);
    assert_eq!(titles(&body), vec!["Scalpel", "Clamp", "Retractor", "Clamp"]);
    assert_eq!(body["rows"][0]["Category"], json!("Cutting"));
    assert_eq!(body["rows"][0]["Price"], json!("12.50"));
    Ok(())
}

#[tokio::test]
async fn test_list_tools_by_category() -> anyhow::Result<()> {
    let app = TestApp::spawn().await?;

    let body: Value = app
        .client
        .get(app.url("/tools?category=Holding"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(ids(&body), vec![2, 3, 4]);

    let body: Value = app
        .client
        .get(app.url("/tools?category=holding"))
        .send()
        .await?
        .json()
        .await?;
    assert!(body["rows"].as_array().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_list_and_get_users() -> anyhow::Result<()> {
    let app = TestApp::spawn().await?;

    let body: Value = app.client.get(app.url("/users")).send().await?.json().await?;
    let mut user_ids: Vec<&str> = body["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["userID"].as_str().unwrap())
        .collect();
    user_ids.sort();
    assert_eq!(user_ids, vec!["U1", "U2", "U3"]);

    let response = app.client.get(app.url("/users/U3")).send().await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await?;
    assert_eq!(body["result"]["previousPurchases"], json!("Scalpel|Retractor"));

    let response = app.client.get(app.url("/users/nobody")).send().await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_recommendations_exclude_purchased_titles() -> anyhow::Result<()> {
    let app = TestApp::spawn().await?;

    // Every tool titled "Clamp" is excluded, not just the first.
    let body: Value = app
        .client
        .get(app.url("/recommendations/U1"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(ids(&body), vec![1, 3]);

    let body: Value = app
        .client
        .get(app.url("/recommendations/U2"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(ids(&body), vec![1, 2, 3, 4]);

    let body: Value = app
        .client
        .get(app.url("/recommendations/U3"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(titles(&body), vec!["Clamp", "Clamp"]);
    Ok(())
}

#[tokio::test]
async fn test_recommendations_for_unknown_user_are_empty() -> anyhow::Result<()> {
    let app = TestApp::spawn().await?;

    let response = app.client.get(app.url("/recommendations/U404")).send().await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await?;
    assert!(body["rows"].as_array().unwrap().is_empty());
    assert_eq!(body["data_unavailable"], json!(false));
    Ok(())
}

#[tokio::test]
async fn test_add_user_is_visible_to_later_reads() -> anyhow::Result<()> {
    let app = TestApp::spawn().await?;

    // Prime the cache before the write.
    let before: Value = app.client.get(app.url("/users")).send().await?.json().await?;
    assert_eq!(before["rows"].as_array().unwrap().len(), 3);

    let response = app
        .client
        .post(app.url("/users"))
        .json(&json!({
            "userID": "U4",
            "userCategory": "Nurse",
            "experienceLevel": "Beginner",
            "previousPurchases": ["Scalpel", "Clamp"]
        }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await?;
    assert_eq!(body["result"]["previousPurchases"], json!("Scalpel|Clamp"));

    let after: Value = app.client.get(app.url("/users")).send().await?.json().await?;
    assert_eq!(after["rows"].as_array().unwrap().len(), 4);

    let recommended: Value = app
        .client
        .get(app.url("/recommendations/U4"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(ids(&recommended), vec![3]);
    Ok(())
}

#[tokio::test]
async fn test_add_user_duplicate_id_conflicts() -> anyhow::Result<()> {
    let app = TestApp::spawn().await?;

    let response = app
        .client
        .post(app.url("/users"))
        .json(&json!({ "userID": "U1", "previousPurchases": ["Scalpel"] }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = response.json().await?;
    assert!(body["error"].as_str().unwrap().contains("U1"));

    // The original row is untouched.
    let user: Value = app.client.get(app.url("/users/U1")).send().await?.json().await?;
    assert_eq!(user["result"]["previousPurchases"], json!("Clamp"));
    Ok(())
}

#[tokio::test]
async fn test_add_user_validation_failures() -> anyhow::Result<()> {
    let app = TestApp::spawn().await?;

    let missing_id = app
        .client
        .post(app.url("/users"))
        .json(&json!({ "userID": "  ", "previousPurchases": ["Scalpel"] }))
        .send()
        .await?;
    assert_eq!(missing_id.status(), StatusCode::BAD_REQUEST);

    let missing_purchases = app
        .client
        .post(app.url("/users"))
        .json(&json!({ "userID": "U9", "previousPurchases": [""] }))
        .send()
        .await?;
    assert_eq!(missing_purchases.status(), StatusCode::BAD_REQUEST);

    let users: Value = app.client.get(app.url("/users")).send().await?.json().await?;
    assert_eq!(users["rows"].as_array().unwrap().len(), 3);
    Ok(())
}

//! Chat API integration tests
//!
//! Sending, history, inbox aggregation and profile lookups over HTTP.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::auth_helpers::create_test_user;
use crate::common::database::{message_count, seed_product, seed_user};
use crate::common::server::TestApp;
use crate::{assert_contains, assert_error_body};

#[tokio::test]
async fn test_send_message_returns_created_message() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app.pool, "alice").await;
    let bob = create_test_user(&app.pool, "bob").await;
    let bike = seed_product(&app.pool, bob.id, "Road bike", 250.0).await;

    let (status, body) = app
        .post(
            "/api/chat/messages",
            &alice.token,
            json!({ "receiverId": bob.id, "message": "Is the bike available?", "productId": bike }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["sender_id"], alice.id);
    assert_eq!(body["receiver_id"], bob.id);
    assert_eq!(body["message"], "Is the bike available?");
    assert_eq!(body["is_read"], false);
    assert_eq!(body["sender_name"], "alice");
    assert_eq!(body["receiver_name"], "bob");
    assert_eq!(body["product_id"], bike);
    assert_eq!(body["product_title"], "Road bike");
    assert_eq!(body["product_price"], 250.0);
}

#[tokio::test]
async fn test_send_without_product_omits_listing_fields() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app.pool, "alice").await;
    let bob = create_test_user(&app.pool, "bob").await;

    let (status, body) = app
        .post("/api/chat/messages", &alice.token, json!({ "receiverId": bob.id, "message": "hi" }))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["product_id"].is_null());
    assert!(body.get("product_title").is_none());
}

#[tokio::test]
async fn test_send_requires_receiver_and_message() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app.pool, "alice").await;
    let bob = create_test_user(&app.pool, "bob").await;

    for payload in [
        json!({ "message": "hi" }),
        json!({ "receiverId": bob.id }),
        json!({ "receiverId": bob.id, "message": "" }),
        json!({ "receiverId": bob.id, "message": "   \n" }),
    ] {
        let response = app.post("/api/chat/messages", &alice.token, payload).await;
        assert_contains!(response.1["error"].as_str().unwrap(), "required");
        assert_error_body!(response, StatusCode::BAD_REQUEST);
    }

    assert_eq!(message_count(&app.pool).await, 0);
}

#[tokio::test]
async fn test_cannot_message_yourself() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app.pool, "alice").await;

    let response = app
        .post("/api/chat/messages", &alice.token, json!({ "receiverId": alice.id, "message": "me" }))
        .await;
    assert_error_body!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_receiver_is_not_found() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app.pool, "alice").await;

    let response = app
        .post("/api/chat/messages", &alice.token, json!({ "receiverId": 999, "message": "hello?" }))
        .await;
    assert_error_body!(response, StatusCode::NOT_FOUND);
    assert_eq!(message_count(&app.pool).await, 0);
}

#[tokio::test]
async fn test_unknown_product_is_rejected() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app.pool, "alice").await;
    let bob = create_test_user(&app.pool, "bob").await;

    let response = app
        .post(
            "/api/chat/messages",
            &alice.token,
            json!({ "receiverId": bob.id, "message": "hi", "productId": 4242 }),
        )
        .await;
    assert_error_body!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app.pool, "alice").await;

    let response = app
        .post("/api/chat/messages", &alice.token, json!({ "receiverId": "bob", "message": 5 }))
        .await;
    assert_error_body!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_history_is_chronological_and_marks_read() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app.pool, "alice").await;
    let bob = create_test_user(&app.pool, "bob").await;

    for (from, to, text) in [(&alice, &bob, "one"), (&bob, &alice, "two"), (&bob, &alice, "three")] {
        let (status, _) = app
            .post("/api/chat/messages", &from.token, json!({ "receiverId": to.id, "message": text }))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, inbox) = app.get("/api/chat/conversations", &alice.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(inbox[0]["unread_count"], 2);

    let (status, history) = app.get(&format!("/api/chat/messages/{}", bob.id), &alice.token).await;
    assert_eq!(status, StatusCode::OK);
    let bodies: Vec<&str> = history.as_array().unwrap().iter().map(|m| m["message"].as_str().unwrap()).collect();
    assert_eq!(bodies, vec!["one", "two", "three"]);

    let (_, inbox) = app.get("/api/chat/conversations", &alice.token).await;
    assert_eq!(inbox[0]["unread_count"], 0);

    // Alice's own message is still unread for Bob
    let (_, bob_inbox) = app.get("/api/chat/conversations", &bob.token).await;
    assert_eq!(bob_inbox[0]["unread_count"], 1);
}

#[tokio::test]
async fn test_history_rejects_bad_ids() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app.pool, "alice").await;

    let response = app.get("/api/chat/messages/abc", &alice.token).await;
    assert_error_body!(response, StatusCode::BAD_REQUEST);

    let response = app.get("/api/chat/messages/0", &alice.token).await;
    assert_error_body!(response, StatusCode::BAD_REQUEST);

    let response = app.get("/api/chat/messages/999", &alice.token).await;
    assert_error_body!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_history_with_stranger_is_empty() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app.pool, "alice").await;
    let carol = seed_user(&app.pool, "carol", None).await;

    let (status, history) = app.get(&format!("/api/chat/messages/{}", carol), &alice.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history, json!([]));
}

#[tokio::test]
async fn test_inbox_orders_by_latest_activity() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app.pool, "alice").await;
    let bob = create_test_user(&app.pool, "bob").await;
    let carol = create_test_user(&app.pool, "carol").await;

    app.post("/api/chat/messages", &bob.token, json!({ "receiverId": alice.id, "message": "from bob" }))
        .await;
    app.post("/api/chat/messages", &carol.token, json!({ "receiverId": alice.id, "message": "from carol" }))
        .await;
    app.post("/api/chat/messages", &alice.token, json!({ "receiverId": bob.id, "message": "back to bob" }))
        .await;

    let (status, inbox) = app.get("/api/chat/conversations", &alice.token).await;
    assert_eq!(status, StatusCode::OK);

    let inbox = inbox.as_array().unwrap();
    assert_eq!(inbox.len(), 2);
    assert_eq!(inbox[0]["other_user_id"], bob.id);
    assert_eq!(inbox[0]["other_user_name"], "bob");
    assert_eq!(inbox[0]["last_message"], "back to bob");
    assert_eq!(inbox[0]["unread_count"], 1);
    assert_eq!(inbox[1]["other_user_id"], carol.id);
    assert_eq!(inbox[1]["last_message"], "from carol");
}

#[tokio::test]
async fn test_empty_inbox() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app.pool, "alice").await;

    let (status, inbox) = app.get("/api/chat/conversations", &alice.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(inbox, json!([]));
}

#[tokio::test]
async fn test_user_profile() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app.pool, "alice").await;
    let bob = seed_user(&app.pool, "Bob Smith", None).await;
    let carol = seed_user(&app.pool, "carol", Some("https://cdn.example.com/carol.png")).await;

    let (status, profile) = app.get(&format!("/api/chat/user/{}", bob), &alice.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["username"], "Bob Smith");
    assert!(profile["profile_picture_url"].is_null());
    assert_eq!(
        profile["avatar"],
        "https://ui-avatars.com/api/?name=Bob%20Smith&background=eb8f0d&color=fff"
    );

    let (_, profile) = app.get(&format!("/api/chat/user/{}", carol), &alice.token).await;
    assert_eq!(profile["avatar"], "https://cdn.example.com/carol.png");

    let response = app.get("/api/chat/user/999", &alice.token).await;
    assert_error_body!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app.pool, "alice").await;

    let response = app.get("/api/nothing-here", &alice.token).await;
    assert_error_body!(response, StatusCode::NOT_FOUND);
}

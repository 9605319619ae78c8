//! Database migration tests
//!
//! Tests to ensure migrations run correctly and database schema is valid

use marketchat::backend::server::config::run_migrations;

use crate::common::database::{create_test_pool, seed_user};

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let pool = create_test_pool().await;
    let result = run_migrations(&pool).await;
    assert!(result.is_ok(), "Migrations should run successfully twice");
}

#[tokio::test]
async fn test_tables_exist() {
    let pool = create_test_pool().await;

    for table in ["users", "products", "messages"] {
        let result = sqlx::query(&format!("SELECT 1 FROM {} LIMIT 1", table))
            .execute(&pool)
            .await;
        assert!(result.is_ok(), "{} table should exist", table);
    }
}

#[tokio::test]
async fn test_self_message_rejected_by_schema() {
    let pool = create_test_pool().await;
    let alice = seed_user(&pool, "alice", None).await;

    let result = sqlx::query(
        "INSERT INTO messages (sender_id, receiver_id, message, created_at) VALUES (?1, ?1, 'hi', '2024-03-01T12:00:00.000000Z')",
    )
    .bind(alice)
    .execute(&pool)
    .await;

    assert!(result.is_err(), "sender and receiver must differ");
}

#[tokio::test]
async fn test_messages_default_to_unread() {
    let pool = create_test_pool().await;
    let alice = seed_user(&pool, "alice", None).await;
    let bob = seed_user(&pool, "bob", None).await;

    sqlx::query(
        "INSERT INTO messages (sender_id, receiver_id, message, created_at) VALUES (?1, ?2, 'hi', '2024-03-01T12:00:00.000000Z')",
    )
    .bind(alice)
    .bind(bob)
    .execute(&pool)
    .await
    .unwrap();

    let is_read: i64 = sqlx::query_scalar("SELECT is_read FROM messages").fetch_one(&pool).await.unwrap();
    assert_eq!(is_read, 0);
}

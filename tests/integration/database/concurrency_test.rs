//! Concurrent access against a file-backed WAL database

use marketchat::backend::messaging::db;
use marketchat::shared::messaging::SendMessageRequest;

use crate::common::database::{seed_user, FileDatabase};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_history_marks_each_message_once() {
    let database = FileDatabase::new().await;
    let pool = database.pool.clone();
    let alice = seed_user(&pool, "alice", None).await;
    let bob = seed_user(&pool, "bob", None).await;

    for n in 0..20 {
        let new_message = SendMessageRequest::new(alice, format!("offer {}", n), None)
            .validate(bob)
            .unwrap();
        db::insert_message(&pool, &new_message).await.unwrap();
    }

    let readers: Vec<_> = (0..8)
        .map(|_| {
            let pool = pool.clone();
            tokio::spawn(async move { db::fetch_history_and_mark_read(&pool, alice, bob).await })
        })
        .collect();

    let mut seen_unread = 0;
    for reader in readers {
        let history = reader.await.unwrap().expect("history fetch failed under contention");
        assert_eq!(history.len(), 20);
        seen_unread += history.iter().filter(|m| !m.is_read).count();
    }

    // every message was reported unread by exactly one reader
    assert_eq!(seen_unread, 20);

    let still_unread: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages WHERE is_read = 0")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(still_unread, 0);

    let conversations = db::list_conversations(&pool, alice).await.unwrap();
    assert_eq!(conversations[0].unread_count, 0);
}

//! Message store
//!
//! Persistence for direct messages. Conversations are never stored; the inbox
//! is derived from the `messages` table on every request.

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::shared::messaging::{
    avatar_url, ChatMessage, ConversationSummary, MessageId, NewMessage, ProductId, UserId,
};

/// Timestamps are stored as fixed-width RFC 3339 text so that ordering by
/// `created_at` is chronological.
fn timestamp_text(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn message_from_row(row: &SqliteRow) -> Result<ChatMessage, sqlx::Error> {
    Ok(ChatMessage {
        id: row.try_get("id")?,
        sender_id: row.try_get("sender_id")?,
        receiver_id: row.try_get("receiver_id")?,
        message: row.try_get("message")?,
        product_id: row.try_get("product_id")?,
        is_read: row.try_get("is_read")?,
        created_at: row.try_get("created_at")?,
        sender_name: row.try_get("sender_name")?,
        sender_picture: row.try_get("sender_picture")?,
        receiver_name: row.try_get("receiver_name")?,
        receiver_picture: row.try_get("receiver_picture")?,
        product_title: row.try_get("product_title")?,
        product_price: row.try_get("product_price")?,
    })
}

/// Persist a new message stamped with the current time.
pub async fn insert_message(pool: &SqlitePool, new_message: &NewMessage) -> Result<ChatMessage, sqlx::Error> {
    insert_message_at(pool, new_message, Utc::now()).await
}

/// Persist a message with an explicit creation time, returning the enriched row.
pub async fn insert_message_at(
    pool: &SqlitePool,
    new_message: &NewMessage,
    created_at: DateTime<Utc>,
) -> Result<ChatMessage, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO messages (sender_id, receiver_id, message, product_id, is_read, created_at)
        VALUES (?1, ?2, ?3, ?4, 0, ?5)
        "#,
    )
    .bind(new_message.sender_id)
    .bind(new_message.receiver_id)
    .bind(&new_message.body)
    .bind(new_message.product_id)
    .bind(timestamp_text(created_at))
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    tracing::debug!(
        "Stored message {} from {} to {}",
        id,
        new_message.sender_id,
        new_message.receiver_id
    );

    get_message_by_id(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
}

/// Get a single message with participant and listing details
pub async fn get_message_by_id(pool: &SqlitePool, message_id: MessageId) -> Result<Option<ChatMessage>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT m.id, m.sender_id, m.receiver_id, m.message, m.product_id, m.is_read, m.created_at,
               sender.username AS sender_name, sender.profile_picture_url AS sender_picture,
               receiver.username AS receiver_name, receiver.profile_picture_url AS receiver_picture,
               p.title AS product_title, p.price AS product_price
        FROM messages m
        JOIN users sender ON sender.id = m.sender_id
        JOIN users receiver ON receiver.id = m.receiver_id
        LEFT JOIN products p ON p.id = m.product_id
        WHERE m.id = ?1
        "#,
    )
    .bind(message_id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(message_from_row).transpose()
}

/// Whether a product listing with this ID exists
pub async fn product_exists(pool: &SqlitePool, product_id: ProductId) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM products WHERE id = ?1")
        .bind(product_id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

/// Full history between `user_id` and `other_user_id`, oldest first.
///
/// Every unread message from `other_user_id` to `user_id` is marked read in
/// the same transaction. The returned records carry the read flags as they
/// were before this call.
pub async fn fetch_history_and_mark_read(
    pool: &SqlitePool,
    user_id: UserId,
    other_user_id: UserId,
) -> Result<Vec<ChatMessage>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    // Writing first takes the write lock up front.
    let marked: Vec<MessageId> = sqlx::query_scalar(
        r#"
        UPDATE messages
        SET is_read = 1
        WHERE sender_id = ?1 AND receiver_id = ?2 AND is_read = 0
        RETURNING id
        "#,
    )
    .bind(other_user_id)
    .bind(user_id)
    .fetch_all(&mut *tx)
    .await?;

    let rows = sqlx::query(
        r#"
        SELECT m.id, m.sender_id, m.receiver_id, m.message, m.product_id, m.is_read, m.created_at,
               sender.username AS sender_name, sender.profile_picture_url AS sender_picture,
               receiver.username AS receiver_name, receiver.profile_picture_url AS receiver_picture,
               p.title AS product_title, p.price AS product_price
        FROM messages m
        JOIN users sender ON sender.id = m.sender_id
        JOIN users receiver ON receiver.id = m.receiver_id
        LEFT JOIN products p ON p.id = m.product_id
        WHERE (m.sender_id = ?1 AND m.receiver_id = ?2)
           OR (m.sender_id = ?2 AND m.receiver_id = ?1)
        ORDER BY m.created_at ASC, m.id ASC
        "#,
    )
    .bind(user_id)
    .bind(other_user_id)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;

    if !marked.is_empty() {
        tracing::debug!(
            "Marked {} messages from {} to {} as read",
            marked.len(),
            other_user_id,
            user_id
        );
    }

    rows.iter()
        .map(|row| {
            let mut message = message_from_row(row)?;
            if marked.contains(&message.id) {
                message.is_read = false;
            }
            Ok(message)
        })
        .collect()
}

/// Inbox for `user_id`: one entry per counterparty, most recent first.
pub async fn list_conversations(pool: &SqlitePool, user_id: UserId) -> Result<Vec<ConversationSummary>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        WITH mine AS (
            SELECT m.id, m.message, m.created_at,
                   CASE WHEN m.sender_id = ?1 THEN m.receiver_id ELSE m.sender_id END AS other_user_id,
                   CASE WHEN m.receiver_id = ?1 AND m.is_read = 0 THEN 1 ELSE 0 END AS unread
            FROM messages m
            WHERE m.sender_id = ?1 OR m.receiver_id = ?1
        ),
        ranked AS (
            SELECT other_user_id, id, message, created_at,
                   ROW_NUMBER() OVER (
                       PARTITION BY other_user_id ORDER BY created_at DESC, id DESC
                   ) AS rn,
                   SUM(unread) OVER (PARTITION BY other_user_id) AS unread_count
            FROM mine
        )
        SELECT r.other_user_id, u.username AS other_user_name,
               u.profile_picture_url AS other_user_picture,
               r.created_at AS last_message_time, r.message AS last_message,
               r.unread_count
        FROM ranked r
        JOIN users u ON u.id = r.other_user_id
        WHERE r.rn = 1
        ORDER BY r.created_at DESC, r.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            let other_user_name: String = row.try_get("other_user_name")?;
            let other_user_picture: Option<String> = row.try_get("other_user_picture")?;
            Ok(ConversationSummary {
                other_user_id: row.try_get("other_user_id")?,
                other_user_avatar: avatar_url(&other_user_name, other_user_picture.as_deref()),
                other_user_name,
                other_user_picture,
                last_message_time: row.try_get("last_message_time")?,
                last_message: row.try_get("last_message")?,
                unread_count: row.try_get("unread_count")?,
            })
        })
        .collect()
}

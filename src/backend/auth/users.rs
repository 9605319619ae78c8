/**
 * User Lookups
 *
 * Users are owned by the account service. The messaging service reads them
 * to verify token subjects and to decorate messages with names and pictures.
 */

use sqlx::SqlitePool;

use crate::shared::messaging::{UserId, UserSummary};

/// User row as stored in the `users` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub profile_picture_url: Option<String>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        UserSummary::new(user.id, user.username, user.profile_picture_url)
    }
}

/// Get user by ID
pub async fn get_user_by_id(pool: &SqlitePool, user_id: UserId) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, profile_picture_url
        FROM users
        WHERE id = ?1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Whether a user with this ID exists
pub async fn user_exists(pool: &SqlitePool, user_id: UserId) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM users WHERE id = ?1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

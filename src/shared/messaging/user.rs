//! User display info
//!
//! Users are owned by the account service; the messaging service only reads
//! their name and picture to decorate messages and conversations.

use serde::{Deserialize, Serialize};

use super::UserId;

/// Base URL of the initials-avatar service used when a user has no picture
pub const GENERATED_AVATAR_BASE: &str = "https://ui-avatars.com/api/";

/// Public profile of a chat participant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub profile_picture_url: Option<String>,
    /// Resolved picture, see [`avatar_url`]
    pub avatar: String,
}

impl UserSummary {
    pub fn new(id: UserId, username: String, profile_picture_url: Option<String>) -> Self {
        let avatar = avatar_url(&username, profile_picture_url.as_deref());
        Self {
            id,
            username,
            profile_picture_url,
            avatar,
        }
    }
}

/// Picture to show for a user: their own if set, otherwise generated initials.
pub fn avatar_url(name: &str, picture_url: Option<&str>) -> String {
    match picture_url {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => format!(
            "{}?name={}&background=eb8f0d&color=fff",
            GENERATED_AVATAR_BASE,
            urlencoding::encode(name)
        ),
    }
}

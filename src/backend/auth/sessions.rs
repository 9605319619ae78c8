/**
 * Bearer Token Verification
 *
 * Tokens are issued by the account service as HS256 JWTs whose `sub` claim is
 * the numeric user id. This service only verifies them; `create_token` exists
 * for tooling and tests that need a token signed with the shared secret.
 */

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::shared::messaging::UserId;

/// Lifetime of tokens minted by [`create_token`]
pub const TOKEN_TTL_DAYS: i64 = 30;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Username, when the issuer includes it
    #[serde(default)]
    pub username: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

impl Claims {
    /// Numeric user id carried in `sub`
    pub fn user_id(&self) -> Option<UserId> {
        self.sub.parse::<UserId>().ok().filter(|id| *id > 0)
    }
}

/// Create a signed token for a user
pub fn create_token(
    user_id: UserId,
    username: Option<String>,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let exp = now + Duration::days(TOKEN_TTL_DAYS);

    let claims = Claims {
        sub: user_id.to_string(),
        username,
        exp: exp.timestamp().max(0) as u64,
        iat: now.timestamp().max(0) as u64,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
}

/// Verify signature and expiry, returning the decoded claims
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &key, &Validation::default())?;
    Ok(token_data.claims)
}

/// Token from an `Authorization: Bearer <token>` header value
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

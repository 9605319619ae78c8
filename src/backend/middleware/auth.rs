/**
 * Authentication Middleware
 *
 * Protects the chat API. The bearer token is verified against the shared
 * secret, its subject must be a positive user id, and that user must exist.
 * Anything else short-circuits with 401 before a handler runs.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::{bearer_token, user_exists, verify_token};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::messaging::UserId;

/// Authenticated user data extracted from the token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: Option<String>,
}

/// Verify a raw token and resolve the user it names.
pub async fn authenticate(app_state: &AppState, token: &str) -> Result<AuthenticatedUser, BackendError> {
    let claims = verify_token(token, &app_state.jwt_secret).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        BackendError::unauthorized("Invalid or expired token")
    })?;

    let user_id = claims.user_id().ok_or_else(|| {
        tracing::warn!("Token subject is not a user id: {}", claims.sub);
        BackendError::unauthorized("Invalid or expired token")
    })?;

    if !user_exists(&app_state.db_pool, user_id).await? {
        tracing::warn!("Token for unknown user {}", user_id);
        return Err(BackendError::unauthorized("Invalid or expired token"));
    }

    Ok(AuthenticatedUser {
        user_id,
        username: claims.username,
    })
}

/// Authentication middleware
///
/// Attaches an [`AuthenticatedUser`] to the request extensions on success.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| {
            tracing::warn!("Missing or malformed Authorization header");
            BackendError::unauthorized("Access token required")
        })?
        .to_string();

    let user = authenticate(&app_state, &token).await?;
    tracing::debug!("Authenticated user {}", user.user_id);

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Axum extractor for the user set by [`auth_middleware`]
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthorized("Access token required")
            })
    }
}

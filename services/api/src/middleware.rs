//! Authentication middleware for bearer session validation

use axum::{
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::error;
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

/// Authenticated caller, resolved from the session token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i32,
    pub username: String,
    /// The session token that authenticated this request (used by logout)
    pub token: Uuid,
}

/// Authentication middleware
///
/// Resolves `Authorization: Bearer <token>` to a live session and stashes
/// the caller in the request extensions. Any failure short-circuits with
/// 401 before the handler runs.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized)?;

    let token = Uuid::parse_str(token).map_err(|_| ApiError::Unauthorized)?;

    let session = state
        .session_repository
        .find_valid(token)
        .await
        .map_err(|e| {
            error!("Failed to resolve session: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::Unauthorized)?;

    let user = state
        .user_repository
        .find_by_id(session.user_id)
        .await
        .map_err(|e| {
            error!("Failed to load session user: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::Unauthorized)?;

    req.extensions_mut().insert(AuthUser {
        id: user.id,
        username: user.username,
        token,
    });

    Ok(next.run(req).await)
}

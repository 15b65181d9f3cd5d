use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use model::entities::{session, user};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use tracing::{debug, trace, warn};

use crate::errors::ApiError;
use crate::schemas::AppState;

/// The authenticated operator, inserted into request extensions by
/// [`require_session`] for handlers that need it.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: i32,
    pub username: String,
}

/// The raw bearer token of the validated session.
#[derive(Clone, Debug)]
pub struct SessionToken(pub String);

/// Session middleware: every request through here must carry a bearer token
/// that matches a live, unexpired session row.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    trace!("Validating session for {} {}", req.method(), req.uri().path());
    let token = extract_bearer(req.headers())?.to_string();

    let session_model = session::Entity::find()
        .filter(session::Column::Token.eq(token.as_str()))
        .one(&state.db)
        .await?
        .ok_or_else(|| {
            warn!("Rejected request with unknown session token");
            ApiError::Unauthorized("Invalid or expired session".to_string())
        })?;

    if session_model.expires_at < Utc::now() {
        warn!(
            "Rejected request with expired session for user {}",
            session_model.user_id
        );
        return Err(ApiError::Unauthorized(
            "Invalid or expired session".to_string(),
        ));
    }

    let user_model = user::Entity::find_by_id(session_model.user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid or expired session".to_string()))?;

    debug!("Session validated for user: {}", user_model.username);
    req.extensions_mut().insert(CurrentUser {
        id: user_model.id,
        username: user_model.username,
    });
    req.extensions_mut().insert(SessionToken(token));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

    let header = header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Malformed authorization header".to_string()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Malformed authorization header".to_string()))?
        .trim();

    if token.is_empty() {
        return Err(ApiError::Unauthorized(
            "Malformed authorization header".to_string(),
        ));
    }

    Ok(token)
}

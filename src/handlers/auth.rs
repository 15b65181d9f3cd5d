use crate::errors::ApiError;
use crate::handlers::users::UserResponse;
use crate::middleware::SessionToken;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{extract::State, http::StatusCode, response::Json, Extension};
use chrono::{DateTime, Duration, Utc};
use model::entities::{session, user};
use rand::RngCore;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for logging in
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for registering a new account
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Response body for a successful login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub user: UserResponse,
    /// Opaque session token; presented as `Authorization: Bearer <token>`
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

// Opaque 256-bit session token, hex encoded.
fn generate_token() -> String {
    let mut rng = rand::rng();
    let mut buf = [0u8; 32];
    rng.fill_bytes(&mut buf);
    hex::encode(buf)
}

/// Log in with username and password
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid username or password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    trace!("Entering login function");
    debug!("Login attempt for username: {}", request.username);

    let user_model = user::Entity::find()
        .filter(user::Column::Username.eq(request.username.as_str()))
        .one(&state.db)
        .await?
        .ok_or_else(|| {
            warn!("Login failed: unknown username '{}'", request.username);
            ApiError::Unauthorized("Invalid username or password".to_string())
        })?;

    let password_ok = bcrypt::verify(&request.password, &user_model.password_hash)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    if !password_ok {
        warn!("Login failed: wrong password for '{}'", request.username);
        return Err(ApiError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    let now = Utc::now();
    let expires_at = now + Duration::seconds(state.session_ttl_secs);
    let session_model = session::ActiveModel {
        token: Set(generate_token()),
        user_id: Set(user_model.id),
        created_at: Set(now),
        expires_at: Set(expires_at),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!("Login successful for user: {}", user_model.username);
    let response = ApiResponse {
        data: LoginResponse {
            user: UserResponse::from(user_model),
            token: session_model.token,
            expires_at: session_model.expires_at,
        },
        message: "Login successful".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registration successful", body = ApiResponse<UserResponse>),
        (status = 409, description = "User already exists", body = ErrorResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    trace!("Entering register function");
    debug!("Registration attempt for username: {}", request.username);
    request.validate()?;

    // Check if the user already exists
    let existing = user::Entity::find()
        .filter(user::Column::Username.eq(request.username.as_str()))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        warn!(
            "Registration rejected: username '{}' already exists",
            request.username
        );
        return Err(ApiError::Conflict("User already exists".to_string()));
    }

    let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let user_model = user::ActiveModel {
        username: Set(request.username.clone()),
        password_hash: Set(password_hash),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(|db_error| {
        // A concurrent registration can still lose the race to the unique
        // index between the existence check and the insert.
        match ApiError::from(db_error) {
            ApiError::Conflict(_) => ApiError::Conflict("User already exists".to_string()),
            other => other,
        }
    })?;

    info!("Registration successful for user: {}", user_model.username);
    let response = ApiResponse {
        data: UserResponse::from(user_model),
        message: "Registration successful".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Log out, revoking the presented session
#[utoipa::path(
    post,
    path = "/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Logout successful", body = ApiResponse<String>),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, token))]
pub async fn logout(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    trace!("Entering logout function");

    session::Entity::delete_many()
        .filter(session::Column::Token.eq(token.as_str()))
        .exec(&state.db)
        .await?;

    info!("Session revoked");
    let response = ApiResponse {
        data: "Session revoked".to_string(),
        message: "Logout successful".to_string(),
        success: true,
    };
    Ok(Json(response))
}

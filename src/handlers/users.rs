use crate::errors::ApiError;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::entities::user;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for creating a new user
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    /// Username (must be unique)
    #[validate(length(min = 1))]
    pub username: String,
    /// Plaintext password; stored only as a bcrypt hash
    #[validate(length(min = 1))]
    pub password: String,
}

/// Request body for replacing a user's credentials
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateUserRequest {
    /// New username (must be unique)
    #[serde(rename = "newUsername")]
    #[validate(length(min = 1))]
    pub new_username: String,
    /// New plaintext password; stored only as a bcrypt hash
    #[serde(rename = "newPassword")]
    #[validate(length(min = 1))]
    pub new_password: String,
}

/// User response model. The password hash is never serialized.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
        }
    }
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = ApiResponse<UserResponse>),
        (status = 409, description = "Username already exists", body = ErrorResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    trace!("Entering create_user function");
    debug!("Creating user with username: {}", request.username);
    request.validate()?;

    let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let new_user = user::ActiveModel {
        username: Set(request.username.clone()),
        password_hash: Set(password_hash),
        ..Default::default()
    };

    trace!("Attempting to insert new user into database");
    let user_model = new_user.insert(&state.db).await.map_err(|db_error| {
        error!("Failed to create user '{}': {}", request.username, db_error);
        // The unique index on username applies here too; a violation maps
        // to a conflict with the same message the register path uses.
        match ApiError::from(db_error) {
            ApiError::Conflict(_) => {
                ApiError::Conflict(format!("Username '{}' already exists", request.username))
            }
            other => other,
        }
    })?;

    info!(
        "User created successfully with ID: {}, username: {}",
        user_model.id, user_model.username
    );
    let response = ApiResponse {
        data: UserResponse::from(user_model),
        message: "User created successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "Users retrieved successfully", body = ApiResponse<Vec<UserResponse>>),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_users(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, ApiError> {
    trace!("Entering get_users function");
    debug!("Fetching all users from database");

    let users = user::Entity::find().all(&state.db).await.map_err(|db_error| {
        error!("Failed to retrieve users from database: {}", db_error);
        ApiError::from(db_error)
    })?;

    let user_count = users.len();
    debug!("Retrieved {} users from database", user_count);

    let user_responses: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    info!("Successfully retrieved {} users", user_count);
    let response = ApiResponse {
        data: user_responses,
        message: "Users retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Replace a user's credentials
#[utoipa::path(
    put,
    path = "/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = ApiResponse<UserResponse>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Username already exists", body = ErrorResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn update_user(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    trace!("Entering update_user function for user_id: {}", user_id);
    debug!("Updating user with ID: {}", user_id);
    request.validate()?;

    trace!("Looking up existing user with ID: {}", user_id);
    let existing_user = user::Entity::find_by_id(user_id)
        .one(&state.db)
        .await
        .map_err(|db_error| {
            error!(
                "Failed to lookup user with ID {} for update: {}",
                user_id, db_error
            );
            ApiError::from(db_error)
        })?
        .ok_or_else(|| {
            warn!("User with ID {} not found for update", user_id);
            ApiError::NotFound(format!("User with ID {user_id} not found"))
        })?;

    debug!("Found existing user: {}", existing_user.username);
    let password_hash = bcrypt::hash(&request.new_password, bcrypt::DEFAULT_COST)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let mut user_active: user::ActiveModel = existing_user.into();
    user_active.username = Set(request.new_username.clone());
    user_active.password_hash = Set(password_hash);

    trace!("Attempting to update user in database");
    let updated_user = user_active.update(&state.db).await.map_err(|db_error| {
        error!("Failed to update user with ID {}: {}", user_id, db_error);
        match ApiError::from(db_error) {
            ApiError::Conflict(_) => {
                ApiError::Conflict(format!("Username '{}' already exists", request.new_username))
            }
            other => other,
        }
    })?;

    info!("User with ID {} updated successfully", user_id);
    let response = ApiResponse {
        data: UserResponse::from(updated_user),
        message: "User updated successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "User deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_user(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    trace!("Entering delete_user function for user_id: {}", user_id);
    debug!("Attempting to delete user with ID: {}", user_id);

    let delete_result = user::Entity::delete_by_id(user_id)
        .exec(&state.db)
        .await
        .map_err(|db_error| {
            error!("Failed to delete user with ID {}: {}", user_id, db_error);
            ApiError::from(db_error)
        })?;

    debug!(
        "Delete operation completed. Rows affected: {}",
        delete_result.rows_affected
    );
    if delete_result.rows_affected == 0 {
        warn!(
            "User with ID {} not found for deletion (no rows affected)",
            user_id
        );
        return Err(ApiError::NotFound(format!(
            "User with ID {user_id} not found"
        )));
    }

    info!("User with ID {} deleted successfully", user_id);
    let response = ApiResponse {
        data: format!("User {} deleted", user_id),
        message: "User deleted successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

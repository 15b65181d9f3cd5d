use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Lifetime of newly minted login sessions, in seconds
    pub session_ttl_secs: i64,
}

/// API response wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error kind code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::products::create_product,
        crate::handlers::products::get_products,
        crate::handlers::products::update_product,
        crate::handlers::products::delete_product,
        crate::handlers::stock::adjust_stock,
        crate::handlers::users::create_user,
        crate::handlers::users::get_users,
        crate::handlers::users::update_user,
        crate::handlers::users::delete_user,
        crate::handlers::auth::login,
        crate::handlers::auth::register,
        crate::handlers::auth::logout,
    ),
    components(
        schemas(
            ApiResponse<crate::handlers::products::ProductResponse>,
            ApiResponse<Vec<crate::handlers::products::ProductResponse>>,
            ApiResponse<crate::handlers::users::UserResponse>,
            ApiResponse<Vec<crate::handlers::users::UserResponse>>,
            ApiResponse<crate::handlers::auth::LoginResponse>,
            ApiResponse<String>,
            ErrorResponse,
            HealthResponse,
            crate::handlers::products::CreateProductRequest,
            crate::handlers::products::UpdateProductRequest,
            crate::handlers::products::ProductResponse,
            crate::handlers::stock::AdjustStockRequest,
            crate::handlers::users::CreateUserRequest,
            crate::handlers::users::UpdateUserRequest,
            crate::handlers::users::UserResponse,
            crate::handlers::auth::LoginRequest,
            crate::handlers::auth::RegisterRequest,
            crate::handlers::auth::LoginResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "products", description = "Product catalog and stock endpoints"),
        (name = "users", description = "Operator account endpoints"),
        (name = "auth", description = "Login, registration and session endpoints"),
    ),
    info(
        title = "Stockrust API",
        description = "Inventory Management API - products, stock adjustments and operator accounts",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;

use crate::schemas::AppState;
use anyhow::Result;
use sea_orm::Database;

/// Initialize application state against a specific database URL
pub async fn initialize_app_state_with_url(database_url: &str) -> Result<AppState> {
    tracing::info!("Connecting to database: {}", database_url);
    let db = Database::connect(database_url).await?;

    Ok(AppState {
        db,
        session_ttl_secs: get_session_ttl_secs(),
    })
}

/// Get database URL from environment or use default
pub fn get_database_url() -> String {
    dotenvy::dotenv().ok();
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://stockrust.db".to_string())
}

/// Get bind address from environment or use default
pub fn get_bind_address() -> String {
    std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string())
}

/// Session lifetime in seconds, default 24 hours
pub fn get_session_ttl_secs() -> i64 {
    std::env::var("SESSION_TTL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(86_400)
}

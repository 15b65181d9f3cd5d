#[cfg(test)]
pub mod test_utils {
    use crate::router::create_router;
    use crate::schemas::{ApiResponse, AppState};
    use axum::http::HeaderValue;
    use axum::Router;
    use axum_test::TestServer;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Credentials of the operator account seeded into every test database.
    pub const TEST_USERNAME: &str = "test_admin";
    pub const TEST_PASSWORD: &str = "test_admin_password";

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        // Run migrations
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    /// Create AppState for testing, with one seeded operator account
    pub async fn setup_test_app_state() -> AppState {
        let db = setup_test_db().await;

        // Minimum bcrypt cost keeps the test suite fast
        let password_hash =
            bcrypt::hash(TEST_PASSWORD, 4).expect("Failed to hash test password");
        let test_user = model::entities::user::ActiveModel {
            username: Set(TEST_USERNAME.to_string()),
            password_hash: Set(password_hash),
            ..Default::default()
        };
        test_user
            .insert(&db)
            .await
            .expect("Failed to create test user");

        AppState {
            db,
            session_ttl_secs: 3600,
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub async fn setup_test_app() -> Router {
        let _ = init_test_tracing();

        let state = setup_test_app_state().await;
        create_router(state)
    }

    /// Create a ready-to-use test server
    pub async fn setup_test_server() -> TestServer {
        TestServer::new(setup_test_app().await).expect("Failed to start test server")
    }

    /// Log in as the seeded operator and return the session token
    pub async fn login_token(server: &TestServer) -> String {
        let response = server
            .post("/login")
            .json(&serde_json::json!({
                "username": TEST_USERNAME,
                "password": TEST_PASSWORD,
            }))
            .await;
        response.assert_status_ok();
        let body: ApiResponse<serde_json::Value> = response.json();
        body.data["token"]
            .as_str()
            .expect("Login response missing token")
            .to_string()
    }

    /// Build an `Authorization: Bearer <token>` header value
    pub fn bearer(token: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {token}")).expect("Invalid token")
    }
}

use crate::handlers::{
    auth::{login, logout, register},
    health::health_check,
    products::{create_product, delete_product, get_products, update_product},
    stock::adjust_stock,
    users::{create_user, delete_user, get_users, update_user},
};
use crate::middleware::require_session;
use crate::schemas::{ApiDoc, AppState};
use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use axum_prometheus::metrics_exporter_prometheus::PrometheusHandle;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::OnceLock;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // `PrometheusMetricLayer::pair()` installs a process-global metrics recorder,
    // which can only be set once per process. Memoize it so repeated calls
    // (e.g. one router per integration test) reuse the same recorder and handle.
    static METRICS: OnceLock<(PrometheusMetricLayer<'static>, PrometheusHandle)> = OnceLock::new();
    let (prometheus_layer, metric_handle) =
        METRICS.get_or_init(PrometheusMetricLayer::pair).clone();

    // Everything touching products or users requires a live session.
    let protected = Router::new()
        // Product CRUD routes
        .route("/products", post(create_product))
        .route("/products", get(get_products))
        .route("/products/:product_id", put(update_product))
        .route("/products/:product_id", delete(delete_product))
        // Stock adjustments (buy/sell)
        .route("/products/:product_id/adjustments", post(adjust_stock))
        // User CRUD routes
        .route("/users", post(create_user))
        .route("/users", get(get_users))
        .route("/users/:user_id", put(update_user))
        .route("/users/:user_id", delete(delete_user))
        // Session revocation
        .route("/logout", post(logout))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Authentication
        .route("/login", post(login))
        .route("/register", post(register))
        // Prometheus metrics
        .route("/metrics", get(|| async move { metric_handle.render() }))
        .merge(protected)
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .layer(prometheus_layer)
        .with_state(state)
}

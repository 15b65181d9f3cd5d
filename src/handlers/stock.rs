use crate::errors::ApiError;
use crate::handlers::products::ProductResponse;
use crate::middleware::CurrentUser;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use inventory::StockDirection;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for a stock adjustment (a buy or a sell)
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct AdjustStockRequest {
    /// Number of units to move (non-negative)
    #[validate(range(min = 0))]
    pub delta: i32,
    /// "increase" for a buy, "decrease" for a sell
    #[schema(value_type = String, example = "decrease")]
    pub direction: StockDirection,
}

/// Adjust a product's stock quantity
///
/// Both directions execute as a single UPDATE statement; a decrease carries a
/// `quantity >= delta` guard so the stock can never go negative, even under
/// concurrent adjustments.
#[utoipa::path(
    post,
    path = "/products/{product_id}/adjustments",
    tag = "products",
    params(
        ("product_id" = i32, Path, description = "Product ID"),
    ),
    request_body = AdjustStockRequest,
    responses(
        (status = 200, description = "Stock adjusted successfully", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 422, description = "Insufficient stock", body = ErrorResponse),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, operator))]
pub async fn adjust_stock(
    Path(product_id): Path<i32>,
    State(state): State<AppState>,
    Extension(operator): Extension<CurrentUser>,
    Json(request): Json<AdjustStockRequest>,
) -> Result<Json<ApiResponse<ProductResponse>>, ApiError> {
    trace!("Entering adjust_stock function for product_id: {}", product_id);
    debug!(
        "Adjusting stock for product {}: {} units, {:?}",
        product_id, request.delta, request.direction
    );
    request.validate()?;

    let receipt = inventory::adjust(&state.db, product_id, request.delta, request.direction).await?;

    info!(
        "Stock adjusted for product {} by operator {} (user {}): quantity now {}",
        product_id, operator.username, operator.id, receipt.product.quantity
    );
    let response = ApiResponse {
        data: ProductResponse::from(receipt.product),
        message: receipt.message,
        success: true,
    };
    Ok(Json(response))
}

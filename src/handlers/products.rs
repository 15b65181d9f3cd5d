use crate::errors::ApiError;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::entities::product;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for creating a new product
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateProductRequest {
    /// Product name
    pub name: String,
    /// Product description
    pub description: String,
    /// Product category
    pub category: String,
    /// Unit price (non-negative)
    pub price: Decimal,
    /// Initial stock quantity (non-negative)
    #[validate(range(min = 0))]
    pub quantity: i32,
}

/// Request body for replacing a product. Every field is resent on each
/// update, even when only the quantity changes.
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateProductRequest {
    /// Product name
    pub name: String,
    /// Product description
    pub description: String,
    /// Product category
    pub category: String,
    /// Unit price (non-negative)
    pub price: Decimal,
    /// Stock quantity (non-negative)
    #[validate(range(min = 0))]
    pub quantity: i32,
}

/// Product response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: Decimal,
    pub quantity: i32,
}

impl From<product::Model> for ProductResponse {
    fn from(model: product::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            category: model.category,
            price: model.price,
            quantity: model.quantity,
        }
    }
}

fn ensure_price_non_negative(price: &Decimal) -> Result<(), ApiError> {
    if price.is_sign_negative() {
        return Err(ApiError::Validation(
            "price must be non-negative".to_string(),
        ));
    }
    Ok(())
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created successfully", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProductResponse>>), ApiError> {
    trace!("Entering create_product function");
    debug!(
        "Creating product with name: {}, category: {}, quantity: {}",
        request.name, request.category, request.quantity
    );
    request.validate()?;
    ensure_price_non_negative(&request.price)?;

    let new_product = product::ActiveModel {
        name: Set(request.name.clone()),
        description: Set(request.description.clone()),
        category: Set(request.category.clone()),
        price: Set(request.price),
        quantity: Set(request.quantity),
        ..Default::default()
    };

    trace!("Attempting to insert new product into database");
    let product_model = new_product.insert(&state.db).await.map_err(|db_error| {
        error!("Failed to create product '{}': {}", request.name, db_error);
        ApiError::from(db_error)
    })?;

    info!(
        "Product created successfully with ID: {}, name: {}",
        product_model.id, product_model.name
    );
    let response = ApiResponse {
        data: ProductResponse::from(product_model),
        message: "Product created successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get all products
#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    responses(
        (status = 200, description = "Products retrieved successfully", body = ApiResponse<Vec<ProductResponse>>),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_products(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ProductResponse>>>, ApiError> {
    trace!("Entering get_products function");
    debug!("Fetching all products from database");

    let products = product::Entity::find().all(&state.db).await.map_err(|db_error| {
        error!("Failed to retrieve products from database: {}", db_error);
        ApiError::from(db_error)
    })?;

    let product_count = products.len();
    debug!("Retrieved {} products from database", product_count);

    let product_responses: Vec<ProductResponse> =
        products.into_iter().map(ProductResponse::from).collect();

    info!("Successfully retrieved {} products", product_count);
    let response = ApiResponse {
        data: product_responses,
        message: "Products retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Replace a product
#[utoipa::path(
    put,
    path = "/products/{product_id}",
    tag = "products",
    params(
        ("product_id" = i32, Path, description = "Product ID"),
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated successfully", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_product(
    Path(product_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<ApiResponse<ProductResponse>>, ApiError> {
    trace!("Entering update_product function for product_id: {}", product_id);
    debug!("Replacing product with ID: {}", product_id);
    request.validate()?;
    ensure_price_non_negative(&request.price)?;

    // Full-record replacement: look up the row, then overwrite every field.
    trace!("Looking up existing product with ID: {}", product_id);
    let existing_product = product::Entity::find_by_id(product_id)
        .one(&state.db)
        .await
        .map_err(|db_error| {
            error!(
                "Failed to lookup product with ID {} for update: {}",
                product_id, db_error
            );
            ApiError::from(db_error)
        })?
        .ok_or_else(|| {
            warn!("Product with ID {} not found for update", product_id);
            ApiError::NotFound(format!("Product with ID {product_id} not found"))
        })?;

    debug!("Found existing product: {}", existing_product.name);
    let mut product_active: product::ActiveModel = existing_product.into();
    product_active.name = Set(request.name.clone());
    product_active.description = Set(request.description.clone());
    product_active.category = Set(request.category.clone());
    product_active.price = Set(request.price);
    product_active.quantity = Set(request.quantity);

    trace!("Attempting to update product in database");
    let updated_product = product_active.update(&state.db).await.map_err(|db_error| {
        error!("Failed to update product with ID {}: {}", product_id, db_error);
        ApiError::from(db_error)
    })?;

    info!("Product with ID {} updated successfully", product_id);
    let response = ApiResponse {
        data: ProductResponse::from(updated_product),
        message: "Product updated successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/products/{product_id}",
    tag = "products",
    params(
        ("product_id" = i32, Path, description = "Product ID"),
    ),
    responses(
        (status = 200, description = "Product deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_product(
    Path(product_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    trace!("Entering delete_product function for product_id: {}", product_id);
    debug!("Attempting to delete product with ID: {}", product_id);

    let delete_result = product::Entity::delete_by_id(product_id)
        .exec(&state.db)
        .await
        .map_err(|db_error| {
            error!("Failed to delete product with ID {}: {}", product_id, db_error);
            ApiError::from(db_error)
        })?;

    debug!(
        "Delete operation completed. Rows affected: {}",
        delete_result.rows_affected
    );
    if delete_result.rows_affected == 0 {
        warn!(
            "Product with ID {} not found for deletion (no rows affected)",
            product_id
        );
        return Err(ApiError::NotFound(format!(
            "Product with ID {product_id} not found"
        )));
    }

    info!("Product with ID {} deleted successfully", product_id);
    let response = ApiResponse {
        data: format!("Product {} deleted", product_id),
        message: "Product deleted successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

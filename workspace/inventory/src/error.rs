use thiserror::Error;

/// Error types for the stock adjustment module
#[derive(Error, Debug)]
pub enum InventoryError {
    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// The referenced product does not exist
    #[error("Product with ID {0} not found")]
    ProductNotFound(i32),

    /// A decrease would drive the quantity below zero
    #[error("Insufficient stock for {name}. Only {available} units available.")]
    InsufficientStock { name: String, available: i32 },

    /// The requested delta is negative
    #[error("Adjustment delta must be non-negative, got {0}")]
    NegativeDelta(i32),
}

/// Type alias for Result with InventoryError
pub type Result<T> = std::result::Result<T, InventoryError>;

use model::entities::product;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::{InventoryError, Result};

/// Direction of a stock adjustment: a buy increases stock, a sell decreases it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockDirection {
    Increase,
    Decrease,
}

/// Outcome of a successful adjustment: the product row as persisted, plus a
/// confirmation message naming the quantity moved and the product.
#[derive(Debug, Clone)]
pub struct AdjustmentReceipt {
    pub product: product::Model,
    pub message: String,
}

/// Apply a quantity change to a single product and persist the result.
///
/// Both directions are issued as one UPDATE statement so concurrent
/// adjustments serialize at the store. Decreases carry a `quantity >= delta`
/// guard in the statement itself; an interleaved decrease can therefore never
/// drive the quantity negative.
#[instrument(skip(db))]
pub async fn adjust(
    db: &DatabaseConnection,
    product_id: i32,
    delta: i32,
    direction: StockDirection,
) -> Result<AdjustmentReceipt> {
    if delta < 0 {
        return Err(InventoryError::NegativeDelta(delta));
    }

    debug!(
        "Adjusting product {} by {} units ({:?})",
        product_id, delta, direction
    );

    let update = match direction {
        StockDirection::Increase => {
            product::Entity::update_many()
                .col_expr(
                    product::Column::Quantity,
                    Expr::col(product::Column::Quantity).add(delta),
                )
                .filter(product::Column::Id.eq(product_id))
                .exec(db)
                .await?
        }
        StockDirection::Decrease => {
            product::Entity::update_many()
                .col_expr(
                    product::Column::Quantity,
                    Expr::col(product::Column::Quantity).sub(delta),
                )
                .filter(product::Column::Id.eq(product_id))
                .filter(product::Column::Quantity.gte(delta))
                .exec(db)
                .await?
        }
    };

    if update.rows_affected == 0 {
        // Either the product is missing or the guard rejected the decrease;
        // re-read the row to tell the two apart.
        return match product::Entity::find_by_id(product_id).one(db).await? {
            None => {
                warn!("Product {} not found for adjustment", product_id);
                Err(InventoryError::ProductNotFound(product_id))
            }
            Some(current) => {
                warn!(
                    "Rejected decrease of {} units on '{}': only {} available",
                    delta, current.name, current.quantity
                );
                Err(InventoryError::InsufficientStock {
                    name: current.name,
                    available: current.quantity,
                })
            }
        };
    }

    let updated = product::Entity::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(InventoryError::ProductNotFound(product_id))?;

    let message = match direction {
        StockDirection::Increase => {
            format!("Successfully bought {} units of {}.", delta, updated.name)
        }
        StockDirection::Decrease => {
            format!("Successfully sold {} units of {}.", delta, updated.name)
        }
    };
    debug!(
        "Product {} quantity now {} after adjustment",
        updated.id, updated.quantity
    );

    Ok(AdjustmentReceipt {
        product: updated,
        message,
    })
}

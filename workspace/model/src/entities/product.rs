use sea_orm::entity::prelude::*;

/// A product tracked by the inventory.
///
/// `quantity` is the stock on hand and must never go negative. It is only
/// mutated through full-record replacement or the stock adjustment service,
/// which issues a conditional update so concurrent decreases cannot drive it
/// below zero.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Unit price; non-negative, two decimal places.
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub price: Decimal,
    /// Stock on hand; invariant: `quantity >= 0`.
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

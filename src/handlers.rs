pub mod auth;
pub mod health;
pub mod products;
pub mod stock;
pub mod users;

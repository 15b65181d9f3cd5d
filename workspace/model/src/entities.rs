//! This file serves as the root for all SeaORM entity modules.
//! The data models for the inventory service live here: products, operator
//! accounts, and the server-side sessions that authenticate them.

pub mod product;
pub mod session;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::product::Entity as Product;
    pub use super::session::Entity as Session;
    pub use super::user::Entity as User;
}

#[cfg(test)]
mod test {
    use chrono::{Duration, Utc};
    use migration::{Migrator, MigratorTrait};
    use rust_decimal::Decimal;
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr,
        EntityTrait, QueryFilter, Set,
    };

    use super::*;
    use prelude::*;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        let db = Database::connect("sqlite::memory:").await?;

        // Enable foreign keys
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    #[tokio::test]
    async fn test_entity_integration() -> Result<(), DbErr> {
        let db = setup_db().await?;

        // Create users
        let alice = user::ActiveModel {
            username: Set("alice".to_string()),
            password_hash: Set("$2b$12$abcdefghijklmnopqrstuv".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let bob = user::ActiveModel {
            username: Set("bob".to_string()),
            password_hash: Set("$2b$12$vutsrqponmlkjihgfedcba".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Create products
        let scones = product::ActiveModel {
            name: Set("Scones".to_string()),
            description: Set("Fresh baked scones".to_string()),
            category: Set("Bakery".to_string()),
            price: Set(Decimal::new(1250, 2)), // 12.50
            quantity: Set(40),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let juice = product::ActiveModel {
            name: Set("Orange Juice".to_string()),
            description: Set("1L carton".to_string()),
            category: Set("Beverages".to_string()),
            price: Set(Decimal::new(899, 2)), // 8.99
            quantity: Set(0),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Open a session for alice
        let now = Utc::now();
        let session = session::ActiveModel {
            token: Set("deadbeefcafebabe".to_string()),
            user_id: Set(alice.id),
            created_at: Set(now),
            expires_at: Set(now + Duration::hours(24)),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Read back and verify data
        let users = User::find().all(&db).await?;
        assert_eq!(users.len(), 2);
        assert!(users.iter().any(|u| u.username == "alice"));
        assert!(users.iter().any(|u| u.username == "bob"));

        let products = Product::find().all(&db).await?;
        assert_eq!(products.len(), 2);
        assert!(products.iter().any(|p| p.id == scones.id && p.quantity == 40));
        assert!(products.iter().any(|p| p.id == juice.id && p.quantity == 0));

        let sessions = Session::find()
            .filter(session::Column::UserId.eq(alice.id))
            .all(&db)
            .await?;
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].token, "deadbeefcafebabe");

        // Deleting a user cascades to their sessions
        User::delete_by_id(alice.id).exec(&db).await?;
        let sessions = Session::find_by_id(session.id).one(&db).await?;
        assert!(sessions.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_username_unique_at_store_level() -> Result<(), DbErr> {
        let db = setup_db().await?;

        user::ActiveModel {
            username: Set("alice".to_string()),
            password_hash: Set("hash-one".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // The unique index applies to every insert path, not just /register.
        let duplicate = user::ActiveModel {
            username: Set("alice".to_string()),
            password_hash: Set("hash-two".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await;

        assert!(duplicate.is_err());
        assert_eq!(User::find().all(&db).await?.len(), 1);

        Ok(())
    }
}

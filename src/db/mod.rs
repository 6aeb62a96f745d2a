pub mod image_items;
pub mod matches;
pub mod portfolio;
pub mod price_items;
pub mod quotations;
pub mod reviews;
pub mod users;

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Create a SeaORM database connection pool for `database_url`.
pub async fn create_pool(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

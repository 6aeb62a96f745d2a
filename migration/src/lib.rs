pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users_table;
mod m20250301_000002_create_matches_table;
mod m20250301_000003_create_quotations_table;
mod m20250301_000004_create_portfolios_table;
mod m20250301_000005_create_portfolio_items_tables;
mod m20250301_000006_create_reviews_table;
mod m20250302_000001_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users_table::Migration),
            Box::new(m20250301_000002_create_matches_table::Migration),
            Box::new(m20250301_000003_create_quotations_table::Migration),
            Box::new(m20250301_000004_create_portfolios_table::Migration),
            Box::new(m20250301_000005_create_portfolio_items_tables::Migration),
            Box::new(m20250301_000006_create_reviews_table::Migration),
            Box::new(m20250302_000001_add_indexes::Migration),
        ]
    }
}

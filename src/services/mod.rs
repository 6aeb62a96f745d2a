//! Request workflows. Every public operation here runs inside one database
//! transaction. An error returned before the commit drops the transaction,
//! which rolls it back.

pub mod matches;
pub mod portfolios;
pub mod quotations;
pub mod reviews;

use sea_orm::{AccessMode, DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};

/// Open a transaction for a listing or lookup that writes nothing.
pub(crate) async fn begin_read_only(db: &DatabaseConnection) -> Result<DatabaseTransaction, DbErr> {
    db.begin_with_config(None, Some(AccessMode::ReadOnly)).await
}

//! Database configuration module for the debt ledger.
//!
//! This module handles database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust models.
//! Foreign keys are declared without cascade rules: child rows must be removed
//! explicitly before their parent.

use crate::entities::{
    Debt, DebtImage, Debtor, DebtorImage, DebtorPhone, Notification, Payment, PaymentHistory,
    Seller,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use tracing::{debug, info};

/// Establishes a connection to the database at `database_url`.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to database at {}", database_url);
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates one table from its entity definition, skipping it if it already exists.
async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Creates all ledger tables, parents before children.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, Seller).await?;
    create_table(db, &schema, Debtor).await?;
    create_table(db, &schema, DebtorPhone).await?;
    create_table(db, &schema, DebtorImage).await?;
    create_table(db, &schema, Debt).await?;
    create_table(db, &schema, DebtImage).await?;
    create_table(db, &schema, Payment).await?;
    create_table(db, &schema, PaymentHistory).await?;
    create_table(db, &schema, Notification).await?;

    info!("Ledger tables ensured");
    Ok(())
}

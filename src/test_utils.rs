//! Shared test utilities for the debt ledger.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        access::Actor,
        debt::{self, DebtDetail, NewDebt, NewPayment},
        debtor::{self, NewDebtor},
        seller,
    },
    entities::{self, DebtorPhone},
    errors::Result,
};
use chrono::{DateTime, Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a seller named `name` with email `<name>@example.com`.
pub async fn create_test_seller(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::seller::Model> {
    seller::create_seller(db, name.to_string(), format!("{name}@example.com")).await
}

/// Sets up a database with one seller.
/// Returns (db, seller) for common test scenarios.
pub async fn setup_with_seller() -> Result<(DatabaseConnection, entities::seller::Model)> {
    let db = setup_test_db().await?;
    let seller = create_test_seller(&db, "seller").await?;
    Ok((db, seller))
}

/// Creates a test debtor with sensible defaults.
///
/// # Defaults
/// * `address`: `"Test street 1"`
/// * `phones`: `["+100"]`
/// * `images`: `["debtor.png"]`
pub async fn create_test_debtor(
    db: &DatabaseConnection,
    seller_id: i64,
    name: &str,
) -> Result<entities::debtor::Model> {
    create_custom_debtor(db, seller_id, name, "Test street 1").await
}

/// Creates a test debtor with a custom address.
pub async fn create_custom_debtor(
    db: &DatabaseConnection,
    seller_id: i64,
    name: &str,
    address: &str,
) -> Result<entities::debtor::Model> {
    let record = debtor::create_debtor(
        db,
        seller_id,
        NewDebtor {
            name: name.to_string(),
            address: address.to_string(),
            note: None,
            phones: vec!["+100".to_string()],
            images: vec!["debtor.png".to_string()],
        },
    )
    .await?;
    Ok(record.debtor)
}

/// Creates a debt through the core API with one installment per amount,
/// due 30, 60, 90... days from now, and one image.
pub async fn create_test_debt(
    db: &DatabaseConnection,
    debtor_id: i64,
    seller_id: i64,
    amounts: &[i64],
) -> Result<DebtDetail> {
    let now = Utc::now();
    let payments = amounts
        .iter()
        .zip(1_i64..)
        .map(|(amount, month)| NewPayment {
            amount: *amount,
            date: now + Duration::days(30 * month),
        })
        .collect();

    debt::create_debt(
        db,
        debtor_id,
        NewDebt {
            product_name: "Test product".to_string(),
            note: None,
            payments,
            images: vec!["receipt.png".to_string()],
        },
        &Actor::seller(seller_id),
    )
    .await
}

/// Inserts a bare debt row without payments.
pub async fn insert_test_debt(
    db: &DatabaseConnection,
    debtor_id: i64,
    product_name: &str,
) -> Result<entities::debt::Model> {
    let debt = entities::debt::ActiveModel {
        debtor_id: Set(debtor_id),
        product_name: Set(product_name.to_string()),
        note: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    debt.insert(db).await.map_err(Into::into)
}

/// Inserts a payment row directly, bypassing validation and history.
pub async fn insert_test_payment(
    db: &DatabaseConnection,
    debt_id: i64,
    amount: i64,
    date: DateTime<Utc>,
    is_active: bool,
) -> Result<entities::payment::Model> {
    let payment = entities::payment::ActiveModel {
        debt_id: Set(debt_id),
        amount: Set(amount),
        date: Set(date),
        is_active: Set(is_active),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    payment.insert(db).await.map_err(Into::into)
}

/// Inserts a sent notification row directly.
pub async fn insert_test_notification(
    db: &DatabaseConnection,
    debtor_id: i64,
    seller_id: i64,
    message: &str,
) -> Result<entities::notification::Model> {
    let notification = entities::notification::ActiveModel {
        debtor_id: Set(debtor_id),
        seller_id: Set(seller_id),
        message: Set(message.to_string()),
        is_sended: Set(true),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    notification.insert(db).await.map_err(Into::into)
}

/// Counts the phone rows of a debtor.
pub async fn count_debtor_phones(db: &DatabaseConnection, debtor_id: i64) -> Result<u64> {
    DebtorPhone::find()
        .filter(entities::debtor_phone::Column::DebtorId.eq(debtor_id))
        .count(db)
        .await
        .map_err(Into::into)
}

//! Seller business logic - Registration and lookup of seller accounts.

use crate::{
    entities::{Seller, seller},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};

/// Registers a new seller after trimming and validating name and email.
///
/// # Errors
/// Returns an error if:
/// - The name or email is empty or whitespace-only
/// - The email is already taken or the insert fails
pub async fn create_seller(
    db: &DatabaseConnection,
    name: String,
    email: String,
) -> Result<seller::Model> {
    if name.trim().is_empty() {
        return Err(Error::bad_input("Seller name cannot be empty"));
    }
    if email.trim().is_empty() {
        return Err(Error::bad_input("Seller email cannot be empty"));
    }

    let seller = seller::ActiveModel {
        name: Set(name.trim().to_string()),
        email: Set(email.trim().to_lowercase()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    seller.insert(db).await.map_err(Into::into)
}

/// Finds a seller by its unique ID.
pub async fn get_seller_by_id<C>(db: &C, seller_id: i64) -> Result<Option<seller::Model>>
where
    C: ConnectionTrait,
{
    Seller::find_by_id(seller_id)
        .one(db)
        .await
        .map_err(Into::into)
}

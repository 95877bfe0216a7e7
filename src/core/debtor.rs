//! Debtor business logic - Handles all debtor-related operations.
//!
//! Debtors are created together with their phones and images, listed per seller with
//! their outstanding balance, and destroyed by an explicit, ordered cascade over every
//! dependent table. Every multi-step mutation runs inside a single store transaction so
//! readers never observe a half-updated debtor graph.

use crate::{
    core::{
        access::{Actor, ensure_can_manage},
        balance,
        debt::{DebtDetail, load_debt_details},
        pagination::{Page, Pagination},
        search::{contains_ignore_case, search_term},
        seller::get_seller_by_id,
    },
    entities::{
        Debt, DebtImage, Debtor, DebtorImage, DebtorPhone, Notification, Payment, PaymentHistory,
        debt, debt_image, debtor, debtor_image, debtor_phone, notification, payment,
        payment_history,
    },
    errors::{Error, Result},
};
use sea_orm::{
    Condition, Order, PaginatorTrait, QueryOrder, QuerySelect, Set, TransactionTrait,
    prelude::*,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, error, info, instrument};

/// Payload for registering a debtor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewDebtor {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Partial update of a debtor.
///
/// Phones and images are replaced wholesale: the existing rows are always deleted,
/// and new ones are created only from a non-empty list. Leaving `phones` out (or
/// sending an empty list) therefore leaves the debtor without phones.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DebtorUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub star: Option<bool>,
    #[serde(default)]
    pub phones: Option<Vec<String>>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
}

/// Column a debtor listing can be sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtorSortField {
    #[default]
    CreatedAt,
    Name,
    Address,
    Star,
}

impl DebtorSortField {
    const fn column(self) -> debtor::Column {
        match self {
            Self::CreatedAt => debtor::Column::CreatedAt,
            Self::Name => debtor::Column::Name,
            Self::Address => debtor::Column::Address,
            Self::Star => debtor::Column::Star,
        }
    }
}

/// Sort direction, newest/largest first by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl From<SortOrder> for Order {
    fn from(value: SortOrder) -> Self {
        match value {
            SortOrder::Asc => Self::Asc,
            SortOrder::Desc => Self::Desc,
        }
    }
}

/// Search, sort and pagination options for [`list_debtors`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DebtorFilter {
    /// Case-insensitive substring matched against name and address
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort_by: Option<DebtorSortField>,
    #[serde(default)]
    pub sort_order: Option<SortOrder>,
    #[serde(flatten)]
    pub pagination: Pagination,
}

/// A debtor with its contact rows, as returned by create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebtorRecord {
    pub debtor: debtor::Model,
    pub phones: Vec<debtor_phone::Model>,
    pub images: Vec<debtor_image::Model>,
}

/// One row of a debtor listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebtorSummary {
    pub debtor: debtor::Model,
    pub phones: Vec<debtor_phone::Model>,
    /// Sum of active payments across all debts
    pub total_debt: i128,
}

/// Everything known about one debtor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebtorDetail {
    pub debtor: debtor::Model,
    pub phones: Vec<debtor_phone::Model>,
    pub images: Vec<debtor_image::Model>,
    pub debts: Vec<DebtDetail>,
    /// Sum of every payment (active or settled) across all debts
    pub total_amount: i128,
    /// Sum of active payments across all debts
    pub total_debt: i128,
}

/// Fetches a debtor or fails with [`Error::NotFound`].
pub(crate) async fn find_debtor<C>(db: &C, debtor_id: i64) -> Result<debtor::Model>
where
    C: ConnectionTrait,
{
    Debtor::find_by_id(debtor_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "Debtor",
            id: debtor_id,
        })
}

/// Trims every entry and rejects blank ones.
pub(crate) fn clean_names(values: Vec<String>, what: &str) -> Result<Vec<String>> {
    values
        .into_iter()
        .map(|value| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Err(Error::bad_input(format!("{what} cannot be empty")))
            } else {
                Ok(trimmed.to_string())
            }
        })
        .collect()
}

fn required(value: &str, what: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::bad_input(format!("Debtor {what} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

fn normalize_note(note: Option<String>) -> Option<String> {
    note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

async fn insert_contacts<C>(
    db: &C,
    debtor_id: i64,
    phones: Vec<String>,
    images: Vec<String>,
) -> Result<(Vec<debtor_phone::Model>, Vec<debtor_image::Model>)>
where
    C: ConnectionTrait,
{
    let mut phone_rows = Vec::with_capacity(phones.len());
    for phone_number in phones {
        let phone = debtor_phone::ActiveModel {
            debtor_id: Set(debtor_id),
            phone_number: Set(phone_number),
            ..Default::default()
        };
        phone_rows.push(phone.insert(db).await?);
    }

    let mut image_rows = Vec::with_capacity(images.len());
    for name in images {
        let image = debtor_image::ActiveModel {
            debtor_id: Set(debtor_id),
            name: Set(name),
            ..Default::default()
        };
        image_rows.push(image.insert(db).await?);
    }

    Ok((phone_rows, image_rows))
}

/// Registers a debtor for `seller_id` together with its phones and images.
///
/// # Errors
/// Returns an error if:
/// - The name or address is blank, or any phone/image entry is blank
/// - The seller does not exist
/// - Any insert fails (nothing is written in that case)
#[instrument(skip(db, new_debtor), fields(name = %new_debtor.name))]
pub async fn create_debtor(
    db: &DatabaseConnection,
    seller_id: i64,
    new_debtor: NewDebtor,
) -> Result<DebtorRecord> {
    let name = required(&new_debtor.name, "name")?;
    let address = required(&new_debtor.address, "address")?;
    let phones = clean_names(new_debtor.phones, "Phone number")?;
    let images = clean_names(new_debtor.images, "Image name")?;

    if get_seller_by_id(db, seller_id).await?.is_none() {
        return Err(Error::NotFound {
            entity: "Seller",
            id: seller_id,
        });
    }

    let txn = db.begin().await?;
    let now = chrono::Utc::now();

    let debtor = debtor::ActiveModel {
        seller_id: Set(seller_id),
        name: Set(name),
        address: Set(address),
        note: Set(normalize_note(new_debtor.note)),
        star: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let (phones, images) = insert_contacts(&txn, debtor.id, phones, images).await?;

    txn.commit().await?;
    info!(debtor_id = debtor.id, "Debtor created");

    Ok(DebtorRecord {
        debtor,
        phones,
        images,
    })
}

fn seller_condition(seller_id: i64, search: Option<&str>) -> Condition {
    let mut condition = Condition::all().add(debtor::Column::SellerId.eq(seller_id));

    if let Some(search) = search_term(search) {
        condition = condition.add(
            Condition::any()
                .add(contains_ignore_case(debtor::Column::Name, search))
                .add(contains_ignore_case(debtor::Column::Address, search)),
        );
    }

    condition
}

pub(crate) async fn phones_by_debtor<C>(
    db: &C,
    debtor_ids: &[i64],
) -> Result<HashMap<i64, Vec<debtor_phone::Model>>>
where
    C: ConnectionTrait,
{
    let mut grouped: HashMap<i64, Vec<debtor_phone::Model>> = HashMap::new();
    if debtor_ids.is_empty() {
        return Ok(grouped);
    }

    let phones = DebtorPhone::find()
        .filter(debtor_phone::Column::DebtorId.is_in(debtor_ids.iter().copied()))
        .order_by_asc(debtor_phone::Column::Id)
        .all(db)
        .await?;
    for phone in phones {
        grouped.entry(phone.debtor_id).or_default().push(phone);
    }
    Ok(grouped)
}

async fn active_totals_by_debtor<C>(db: &C, debtor_ids: &[i64]) -> Result<HashMap<i64, i128>>
where
    C: ConnectionTrait,
{
    let mut totals = HashMap::new();
    if debtor_ids.is_empty() {
        return Ok(totals);
    }

    let debts = Debt::find()
        .filter(debt::Column::DebtorId.is_in(debtor_ids.iter().copied()))
        .all(db)
        .await?;
    if debts.is_empty() {
        return Ok(totals);
    }
    let debtor_of_debt: HashMap<i64, i64> = debts.iter().map(|d| (d.id, d.debtor_id)).collect();

    let payments = Payment::find()
        .filter(payment::Column::DebtId.is_in(debtor_of_debt.keys().copied()))
        .filter(payment::Column::IsActive.eq(true))
        .all(db)
        .await?;

    let mut grouped: HashMap<i64, Vec<payment::Model>> = HashMap::new();
    for payment in payments {
        if let Some(debtor_id) = debtor_of_debt.get(&payment.debt_id) {
            grouped.entry(*debtor_id).or_default().push(payment);
        }
    }
    for (debtor_id, payments) in &grouped {
        totals.insert(*debtor_id, balance::active_total(payments));
    }
    Ok(totals)
}

/// Lists a seller's debtors, each annotated with its outstanding `total_debt`.
///
/// `total` on the returned page counts every matching debtor, ignoring pagination.
pub async fn list_debtors(
    db: &DatabaseConnection,
    seller_id: i64,
    filter: &DebtorFilter,
) -> Result<Page<DebtorSummary>> {
    let condition = seller_condition(seller_id, filter.search.as_deref());
    let order: Order = filter.sort_order.unwrap_or_default().into();

    let debtors = Debtor::find()
        .filter(condition.clone())
        .order_by(filter.sort_by.unwrap_or_default().column(), order.clone())
        .order_by(debtor::Column::Id, order)
        .offset(filter.pagination.offset())
        .limit(filter.pagination.limit)
        .all(db)
        .await
        .inspect_err(|e| error!("Error fetching debtors: {}", e))?;

    let total = Debtor::find().filter(condition).count(db).await?;

    let ids: Vec<i64> = debtors.iter().map(|d| d.id).collect();
    let mut phones = phones_by_debtor(db, &ids).await?;
    let totals = active_totals_by_debtor(db, &ids).await?;

    let items = debtors
        .into_iter()
        .map(|debtor| DebtorSummary {
            phones: phones.remove(&debtor.id).unwrap_or_default(),
            total_debt: totals.get(&debtor.id).copied().unwrap_or(0),
            debtor,
        })
        .collect();

    debug!(seller_id, total, "Debtors listed");
    Ok(Page::new(items, total, filter.pagination))
}

/// Loads one debtor with its contacts, debts, payment schedules and totals.
///
/// # Errors
/// Returns [`Error::NotFound`] if the debtor does not exist and [`Error::Forbidden`]
/// if `actor` neither owns it nor has an elevated role.
pub async fn get_debtor(
    db: &DatabaseConnection,
    debtor_id: i64,
    actor: &Actor,
) -> Result<DebtorDetail> {
    let debtor = find_debtor(db, debtor_id).await?;
    ensure_can_manage(debtor.seller_id, actor)?;

    let phones = DebtorPhone::find()
        .filter(debtor_phone::Column::DebtorId.eq(debtor_id))
        .order_by_asc(debtor_phone::Column::Id)
        .all(db)
        .await?;
    let images = DebtorImage::find()
        .filter(debtor_image::Column::DebtorId.eq(debtor_id))
        .order_by_asc(debtor_image::Column::Id)
        .all(db)
        .await?;
    let debts = Debt::find()
        .filter(debt::Column::DebtorId.eq(debtor_id))
        .order_by_asc(debt::Column::CreatedAt)
        .order_by_asc(debt::Column::Id)
        .all(db)
        .await?;

    let debts = load_debt_details(db, debts).await?;
    let total_amount = debts.iter().map(|d| d.total_payments).sum();
    let total_debt = debts.iter().map(DebtDetail::active_total).sum();

    Ok(DebtorDetail {
        debtor,
        phones,
        images,
        debts,
        total_amount,
        total_debt,
    })
}

/// Flips the debtor's favorite flag and returns the updated row.
pub async fn toggle_star(
    db: &DatabaseConnection,
    debtor_id: i64,
    actor: &Actor,
) -> Result<debtor::Model> {
    let debtor = find_debtor(db, debtor_id).await?;
    ensure_can_manage(debtor.seller_id, actor)?;

    let star = !debtor.star;
    let mut active: debtor::ActiveModel = debtor.into();
    active.star = Set(star);
    active.updated_at = Set(chrono::Utc::now());
    active.update(db).await.map_err(Into::into)
}

/// Updates a debtor's scalar fields and replaces its phone and image sets.
///
/// Existing phones and images are always deleted; rows are recreated only from
/// a non-empty list in `update`. All of it runs in one transaction.
///
/// # Errors
/// Returns an error if:
/// - The debtor does not exist, or `actor` may not manage it
/// - A supplied name/address/phone/image is blank
/// - Any statement fails (the transaction is rolled back)
#[instrument(skip(db, update))]
pub async fn update_debtor(
    db: &DatabaseConnection,
    debtor_id: i64,
    update: DebtorUpdate,
    actor: &Actor,
) -> Result<DebtorRecord> {
    let debtor = find_debtor(db, debtor_id).await?;
    ensure_can_manage(debtor.seller_id, actor)?;

    let name = update.name.as_deref().map(|n| required(n, "name")).transpose()?;
    let address = update
        .address
        .as_deref()
        .map(|a| required(a, "address"))
        .transpose()?;
    let phones = clean_names(update.phones.unwrap_or_default(), "Phone number")?;
    let images = clean_names(update.images.unwrap_or_default(), "Image name")?;

    let txn = db.begin().await?;

    DebtorPhone::delete_many()
        .filter(debtor_phone::Column::DebtorId.eq(debtor_id))
        .exec(&txn)
        .await?;
    DebtorImage::delete_many()
        .filter(debtor_image::Column::DebtorId.eq(debtor_id))
        .exec(&txn)
        .await?;

    let mut active: debtor::ActiveModel = debtor.into();
    if let Some(name) = name {
        active.name = Set(name);
    }
    if let Some(address) = address {
        active.address = Set(address);
    }
    if update.note.is_some() {
        active.note = Set(normalize_note(update.note));
    }
    if let Some(star) = update.star {
        active.star = Set(star);
    }
    active.updated_at = Set(chrono::Utc::now());
    let debtor = active.update(&txn).await?;

    let (phones, images) = insert_contacts(&txn, debtor_id, phones, images).await?;

    txn.commit().await?;
    info!(
        debtor_id,
        phones = phones.len(),
        images = images.len(),
        "Debtor updated"
    );

    Ok(DebtorRecord {
        debtor,
        phones,
        images,
    })
}

/// Deletes a debtor and every row that references it, in one transaction.
///
/// Order: per debt its payment history, payments and images; then the debts;
/// then the debtor's images, phones and notifications; finally the debtor.
///
/// # Errors
/// Returns [`Error::NotFound`], [`Error::Forbidden`], or [`Error::Database`] when any
/// delete fails, in which case nothing is removed.
#[instrument(skip(db))]
pub async fn delete_debtor(db: &DatabaseConnection, debtor_id: i64, actor: &Actor) -> Result<()> {
    let debtor = find_debtor(db, debtor_id).await?;
    ensure_can_manage(debtor.seller_id, actor)?;

    let txn = db.begin().await?;

    let debts = Debt::find()
        .filter(debt::Column::DebtorId.eq(debtor_id))
        .all(&txn)
        .await?;

    for debt in &debts {
        PaymentHistory::delete_many()
            .filter(payment_history::Column::DebtId.eq(debt.id))
            .exec(&txn)
            .await?;
        Payment::delete_many()
            .filter(payment::Column::DebtId.eq(debt.id))
            .exec(&txn)
            .await?;
        DebtImage::delete_many()
            .filter(debt_image::Column::DebtId.eq(debt.id))
            .exec(&txn)
            .await?;
    }

    Debt::delete_many()
        .filter(debt::Column::DebtorId.eq(debtor_id))
        .exec(&txn)
        .await?;
    DebtorImage::delete_many()
        .filter(debtor_image::Column::DebtorId.eq(debtor_id))
        .exec(&txn)
        .await?;
    DebtorPhone::delete_many()
        .filter(debtor_phone::Column::DebtorId.eq(debtor_id))
        .exec(&txn)
        .await?;
    Notification::delete_many()
        .filter(notification::Column::DebtorId.eq(debtor_id))
        .exec(&txn)
        .await?;
    Debtor::delete_by_id(debtor_id).exec(&txn).await?;

    txn.commit()
        .await
        .inspect_err(|e| error!("Error deleting debtor {}: {}", debtor_id, e))?;
    info!(debtor_id, debts = debts.len(), "Debtor deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::access::Role;
    use crate::test_utils::*;
    use chrono::{Duration, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_debtor_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_debtor(
            &db,
            1,
            NewDebtor {
                name: "   ".to_string(),
                address: "Main st".to_string(),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::BadInput { .. })));

        let result = create_debtor(
            &db,
            1,
            NewDebtor {
                name: "Bob".to_string(),
                address: "Main st".to_string(),
                phones: vec![" ".to_string()],
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::BadInput { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_debtor_requires_existing_seller() -> Result<()> {
        let db = setup_test_db().await?;
        let result = create_debtor(
            &db,
            404,
            NewDebtor {
                name: "Bob".to_string(),
                address: "Main st".to_string(),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(
            result,
            Err(Error::NotFound {
                entity: "Seller",
                id: 404
            })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_debtor_with_contacts() -> Result<()> {
        let (db, seller) = setup_with_seller().await?;

        let record = create_debtor(
            &db,
            seller.id,
            NewDebtor {
                name: " Bob ".to_string(),
                address: "Main st 1".to_string(),
                note: Some("  ".to_string()),
                phones: vec!["+111".to_string(), "+222".to_string()],
                images: vec!["bob.png".to_string()],
            },
        )
        .await?;

        assert_eq!(record.debtor.name, "Bob");
        assert_eq!(record.debtor.seller_id, seller.id);
        assert!(record.debtor.note.is_none());
        assert!(!record.debtor.star);
        assert_eq!(record.phones.len(), 2);
        assert_eq!(record.images[0].name, "bob.png");
        Ok(())
    }

    #[tokio::test]
    async fn test_total_debt_counts_only_active_payments() -> Result<()> {
        let (db, seller) = setup_with_seller().await?;
        let debtor = create_test_debtor(&db, seller.id, "D1").await?;
        let now = Utc::now();

        let t1 = insert_test_debt(&db, debtor.id, "T1").await?;
        insert_test_payment(&db, t1.id, 100, now + Duration::days(1), true).await?;
        let t2 = insert_test_debt(&db, debtor.id, "T2").await?;
        insert_test_payment(&db, t2.id, 50, now + Duration::days(2), false).await?;

        let page = list_debtors(&db, seller.id, &DebtorFilter::default()).await?;
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].total_debt, 100);

        let detail = get_debtor(&db, debtor.id, &Actor::seller(seller.id)).await?;
        assert_eq!(detail.total_debt, 100);
        assert_eq!(detail.total_amount, 150);
        let first = detail.debts.iter().find(|d| d.debt.id == t1.id).unwrap();
        let second = detail.debts.iter().find(|d| d.debt.id == t2.id).unwrap();
        assert_eq!(first.next_payment.as_ref().unwrap().amount, 100);
        assert!(second.next_payment.is_none());
        assert_eq!(second.total_payments, 50);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_debtors_search_is_case_insensitive() -> Result<()> {
        let (db, seller) = setup_with_seller().await?;
        create_custom_debtor(&db, seller.id, "Alice Walker", "Green Road").await?;
        create_custom_debtor(&db, seller.id, "Bob Stone", "Harbor LANE").await?;
        create_custom_debtor(&db, seller.id, "Carol", "Main").await?;

        let by_name = DebtorFilter {
            search: Some("ALICE".to_string()),
            ..Default::default()
        };
        let page = list_debtors(&db, seller.id, &by_name).await?;
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].debtor.name, "Alice Walker");

        let by_address = DebtorFilter {
            search: Some("lane".to_string()),
            ..Default::default()
        };
        let page = list_debtors(&db, seller.id, &by_address).await?;
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].debtor.name, "Bob Stone");
        Ok(())
    }

    #[tokio::test]
    async fn test_list_debtors_search_matches_wildcards_literally() -> Result<()> {
        let (db, seller) = setup_with_seller().await?;
        create_custom_debtor(&db, seller.id, "Alice", "Green Road").await?;
        create_custom_debtor(&db, seller.id, "Bob 100% paid", "Harbor Lane").await?;

        let percent = DebtorFilter {
            search: Some("%".to_string()),
            ..Default::default()
        };
        let page = list_debtors(&db, seller.id, &percent).await?;
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].debtor.name, "Bob 100% paid");

        let underscore = DebtorFilter {
            search: Some("_".to_string()),
            ..Default::default()
        };
        assert_eq!(list_debtors(&db, seller.id, &underscore).await?.total, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_debtors_search_folds_ascii_only() -> Result<()> {
        let (db, seller) = setup_with_seller().await?;
        create_custom_debtor(&db, seller.id, "Émile Ünal", "Rue Haute").await?;

        let search = |term: &str| DebtorFilter {
            search: Some(term.to_string()),
            ..Default::default()
        };
        assert_eq!(list_debtors(&db, seller.id, &search("Émile")).await?.total, 1);
        assert_eq!(list_debtors(&db, seller.id, &search("ÉMILE")).await?.total, 1);
        assert_eq!(list_debtors(&db, seller.id, &search("ünal")).await?.total, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_debtors_is_scoped_to_seller() -> Result<()> {
        let (db, seller) = setup_with_seller().await?;
        let other = create_test_seller(&db, "other").await?;
        create_test_debtor(&db, seller.id, "Mine").await?;
        create_test_debtor(&db, other.id, "Theirs").await?;

        let page = list_debtors(&db, seller.id, &DebtorFilter::default()).await?;
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].debtor.name, "Mine");
        Ok(())
    }

    #[tokio::test]
    async fn test_list_debtors_pagination_and_sort() -> Result<()> {
        let (db, seller) = setup_with_seller().await?;
        for name in ["a", "b", "c", "d", "e"] {
            create_test_debtor(&db, seller.id, name).await?;
        }

        let first = DebtorFilter {
            sort_by: Some(DebtorSortField::Name),
            sort_order: Some(SortOrder::Asc),
            pagination: Pagination::new(1, 2),
            ..Default::default()
        };
        let page = list_debtors(&db, seller.id, &first).await?;
        let names: Vec<_> = page.items.iter().map(|s| s.debtor.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(page.total, 5);
        assert_eq!(page.page, Some(1));
        assert_eq!(page.limit, Some(2));

        let last = DebtorFilter {
            pagination: Pagination::new(3, 2),
            ..first
        };
        let page = list_debtors(&db, seller.id, &last).await?;
        let names: Vec<_> = page.items.iter().map(|s| s.debtor.name.as_str()).collect();
        assert_eq!(names, ["e"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_debtor_not_found_and_forbidden() -> Result<()> {
        let (db, seller) = setup_with_seller().await?;
        let debtor = create_test_debtor(&db, seller.id, "D").await?;

        let missing = get_debtor(&db, 999, &Actor::seller(seller.id)).await;
        assert!(matches!(missing, Err(Error::NotFound { .. })));

        let denied = get_debtor(&db, debtor.id, &Actor::seller(seller.id + 1)).await;
        assert!(matches!(denied, Err(Error::Forbidden { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_star() -> Result<()> {
        let (db, seller) = setup_with_seller().await?;
        let debtor = create_test_debtor(&db, seller.id, "D").await?;
        let actor = Actor::seller(seller.id);

        assert!(toggle_star(&db, debtor.id, &actor).await?.star);
        assert!(!toggle_star(&db, debtor.id, &actor).await?.star);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_replaces_phone_set() -> Result<()> {
        let (db, seller) = setup_with_seller().await?;
        let debtor = create_test_debtor(&db, seller.id, "D").await?;

        let record = update_debtor(
            &db,
            debtor.id,
            DebtorUpdate {
                name: Some("Renamed".to_string()),
                phones: Some(vec!["+999".to_string(), "+888".to_string()]),
                ..Default::default()
            },
            &Actor::seller(seller.id),
        )
        .await?;

        assert_eq!(record.debtor.name, "Renamed");
        assert_eq!(record.debtor.address, debtor.address);
        let stored: Vec<String> = DebtorPhone::find()
            .filter(debtor_phone::Column::DebtorId.eq(debtor.id))
            .all(&db)
            .await?
            .into_iter()
            .map(|p| p.phone_number)
            .collect();
        assert_eq!(stored.len(), 2);
        assert!(stored.contains(&"+999".to_string()));
        assert!(!stored.contains(&"+100".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_without_phones_clears_them() -> Result<()> {
        let (db, seller) = setup_with_seller().await?;
        let debtor = create_test_debtor(&db, seller.id, "D").await?;
        assert_eq!(count_debtor_phones(&db, debtor.id).await?, 1);

        let record = update_debtor(
            &db,
            debtor.id,
            DebtorUpdate {
                note: Some("moved".to_string()),
                phones: Some(Vec::new()),
                ..Default::default()
            },
            &Actor::seller(seller.id),
        )
        .await?;

        assert!(record.phones.is_empty());
        assert!(record.images.is_empty());
        assert_eq!(record.debtor.note.as_deref(), Some("moved"));
        assert_eq!(count_debtor_phones(&db, debtor.id).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_with_omitted_lists_clears_phones_and_images() -> Result<()> {
        let (db, seller) = setup_with_seller().await?;
        let debtor = create_test_debtor(&db, seller.id, "D").await?;

        let record = update_debtor(
            &db,
            debtor.id,
            DebtorUpdate {
                phones: None,
                images: None,
                ..Default::default()
            },
            &Actor::seller(seller.id),
        )
        .await?;

        assert!(record.phones.is_empty());
        assert!(record.images.is_empty());
        assert_eq!(record.debtor.name, "D");
        assert_eq!(count_debtor_phones(&db, debtor.id).await?, 0);
        let images = DebtorImage::find()
            .filter(debtor_image::Column::DebtorId.eq(debtor.id))
            .count(&db)
            .await?;
        assert_eq!(images, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_replaces_image_set() -> Result<()> {
        let (db, seller) = setup_with_seller().await?;
        let debtor = create_test_debtor(&db, seller.id, "D").await?;

        let record = update_debtor(
            &db,
            debtor.id,
            DebtorUpdate {
                images: Some(vec!["front.png".to_string(), "back.png".to_string()]),
                ..Default::default()
            },
            &Actor::seller(seller.id),
        )
        .await?;

        assert_eq!(record.images.len(), 2);
        let stored: Vec<String> = DebtorImage::find()
            .filter(debtor_image::Column::DebtorId.eq(debtor.id))
            .all(&db)
            .await?
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(stored.len(), 2);
        assert!(stored.contains(&"front.png".to_string()));
        assert!(!stored.contains(&"debtor.png".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_forbidden_leaves_debtor_untouched() -> Result<()> {
        let (db, seller) = setup_with_seller().await?;
        let debtor = create_test_debtor(&db, seller.id, "D").await?;

        let result = update_debtor(
            &db,
            debtor.id,
            DebtorUpdate::default(),
            &Actor::seller(seller.id + 1),
        )
        .await;
        assert!(matches!(result, Err(Error::Forbidden { .. })));
        assert_eq!(count_debtor_phones(&db, debtor.id).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_debtor_removes_every_dependent_row() -> Result<()> {
        let (db, seller) = setup_with_seller().await?;
        let debtor = create_test_debtor(&db, seller.id, "D").await?;
        let debt = create_test_debt(&db, debtor.id, seller.id, &[100, 200]).await?;
        insert_test_notification(&db, debtor.id, seller.id, "hello").await?;

        delete_debtor(&db, debtor.id, &Actor::seller(seller.id)).await?;

        assert!(Debtor::find_by_id(debtor.id).one(&db).await?.is_none());
        assert_eq!(
            Debt::find()
                .filter(debt::Column::DebtorId.eq(debtor.id))
                .count(&db)
                .await?,
            0
        );
        assert_eq!(
            Payment::find()
                .filter(payment::Column::DebtId.eq(debt.debt.id))
                .count(&db)
                .await?,
            0
        );
        assert_eq!(
            PaymentHistory::find()
                .filter(payment_history::Column::DebtId.eq(debt.debt.id))
                .count(&db)
                .await?,
            0
        );
        assert_eq!(
            DebtImage::find()
                .filter(debt_image::Column::DebtId.eq(debt.debt.id))
                .count(&db)
                .await?,
            0
        );
        assert_eq!(
            DebtorImage::find()
                .filter(debtor_image::Column::DebtorId.eq(debtor.id))
                .count(&db)
                .await?,
            0
        );
        assert_eq!(count_debtor_phones(&db, debtor.id).await?, 0);
        assert_eq!(
            Notification::find()
                .filter(notification::Column::DebtorId.eq(debtor.id))
                .count(&db)
                .await?,
            0
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_delete_rolls_back_every_step() -> Result<()> {
        let (db, seller) = setup_with_seller().await?;
        let debtor = create_test_debtor(&db, seller.id, "D").await?;
        let debt = create_test_debt(&db, debtor.id, seller.id, &[100, 200]).await?;
        insert_test_notification(&db, debtor.id, seller.id, "hello").await?;

        // Payment history and payments are deleted before the debt images step fails.
        db.execute_unprepared("DROP TABLE debt_images").await?;

        let result = delete_debtor(&db, debtor.id, &Actor::seller(seller.id)).await;
        assert!(matches!(result, Err(Error::Database(_))));

        assert!(Debtor::find_by_id(debtor.id).one(&db).await?.is_some());
        let payments = Payment::find()
            .filter(payment::Column::DebtId.eq(debt.debt.id))
            .count(&db)
            .await?;
        assert_eq!(payments, 2);
        let history = PaymentHistory::find()
            .filter(payment_history::Column::DebtId.eq(debt.debt.id))
            .count(&db)
            .await?;
        assert_eq!(history, 2);
        assert_eq!(count_debtor_phones(&db, debtor.id).await?, 1);
        let notifications = Notification::find()
            .filter(notification::Column::DebtorId.eq(debtor.id))
            .count(&db)
            .await?;
        assert_eq!(notifications, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_debtor_by_other_seller_is_forbidden() -> Result<()> {
        let (db, owner) = setup_with_seller().await?;
        let intruder = create_test_seller(&db, "intruder").await?;
        let debtor = create_test_debtor(&db, owner.id, "D2").await?;
        create_test_debt(&db, debtor.id, owner.id, &[10]).await?;

        let result = delete_debtor(&db, debtor.id, &Actor::seller(intruder.id)).await;
        assert!(matches!(result, Err(Error::Forbidden { .. })));

        assert!(Debtor::find_by_id(debtor.id).one(&db).await?.is_some());
        assert_eq!(count_debtor_phones(&db, debtor.id).await?, 1);
        assert_eq!(
            Debt::find()
                .filter(debt::Column::DebtorId.eq(debtor.id))
                .count(&db)
                .await?,
            1
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_admin_can_delete_any_debtor() -> Result<()> {
        let (db, owner) = setup_with_seller().await?;
        let debtor = create_test_debtor(&db, owner.id, "D").await?;
        let admin = Actor {
            id: 10_000,
            role: Role::Admin,
        };

        delete_debtor(&db, debtor.id, &admin).await?;
        assert!(Debtor::find_by_id(debtor.id).one(&db).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_debtor_is_not_found() -> Result<()> {
        let (db, seller) = setup_with_seller().await?;
        let result = delete_debtor(&db, 12345, &Actor::seller(seller.id)).await;
        assert!(matches!(
            result,
            Err(Error::NotFound {
                entity: "Debtor",
                ..
            })
        ));
        Ok(())
    }
}

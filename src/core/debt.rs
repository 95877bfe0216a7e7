//! Debt business logic - Debts and their payment schedules.
//!
//! A debt is recorded together with every scheduled installment. Each installment
//! also gets a `"scheduled"` entry in the payment history so the audit trail starts
//! with the original schedule.

use crate::{
    core::{
        access::{Actor, ensure_can_manage},
        balance,
        debtor::{clean_names, find_debtor},
        payment::history_entry,
    },
    entities::{Debt, DebtImage, Payment, debt, debt_image, debtor, payment, payment_history},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, instrument};

/// One installment of a new debt.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewPayment {
    /// Amount in minor units, must be positive
    pub amount: i64,
    /// Due date
    pub date: DateTimeUtc,
}

/// Payload for recording a debt.
#[derive(Debug, Clone, Deserialize)]
pub struct NewDebt {
    pub product_name: String,
    #[serde(default)]
    pub note: Option<String>,
    pub payments: Vec<NewPayment>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// A debt with its schedule and the aggregates derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebtDetail {
    pub debt: debt::Model,
    /// Installments ordered by due date
    pub payments: Vec<payment::Model>,
    pub images: Vec<debt_image::Model>,
    /// Sum of every installment, active or settled
    pub total_payments: i128,
    /// Earliest active installment
    pub next_payment: Option<payment::Model>,
}

impl DebtDetail {
    /// Builds the detail view, ordering the schedule by due date.
    #[must_use]
    pub fn new(
        debt: debt::Model,
        mut payments: Vec<payment::Model>,
        images: Vec<debt_image::Model>,
    ) -> Self {
        payments.sort_by_key(|p| (p.date, p.id));
        let total_payments = balance::total_payments(&payments);
        let next_payment = balance::next_payment(&payments).cloned();
        Self {
            debt,
            payments,
            images,
            total_payments,
            next_payment,
        }
    }

    /// Sum of the installments still outstanding.
    #[must_use]
    pub fn active_total(&self) -> i128 {
        balance::active_total(&self.payments)
    }
}

/// Loads payments and images for `debts` with two queries and builds their details.
pub(crate) async fn load_debt_details<C>(db: &C, debts: Vec<debt::Model>) -> Result<Vec<DebtDetail>>
where
    C: ConnectionTrait,
{
    if debts.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i64> = debts.iter().map(|d| d.id).collect();

    let mut payments: HashMap<i64, Vec<payment::Model>> = HashMap::new();
    for payment in Payment::find()
        .filter(payment::Column::DebtId.is_in(ids.iter().copied()))
        .all(db)
        .await?
    {
        payments.entry(payment.debt_id).or_default().push(payment);
    }

    let mut images: HashMap<i64, Vec<debt_image::Model>> = HashMap::new();
    for image in DebtImage::find()
        .filter(debt_image::Column::DebtId.is_in(ids))
        .order_by_asc(debt_image::Column::Id)
        .all(db)
        .await?
    {
        images.entry(image.debt_id).or_default().push(image);
    }

    Ok(debts
        .into_iter()
        .map(|debt| {
            let schedule = payments.remove(&debt.id).unwrap_or_default();
            let pictures = images.remove(&debt.id).unwrap_or_default();
            DebtDetail::new(debt, schedule, pictures)
        })
        .collect())
}

/// Fetches a debt or fails with [`Error::NotFound`].
pub(crate) async fn find_debt<C>(db: &C, debt_id: i64) -> Result<debt::Model>
where
    C: ConnectionTrait,
{
    Debt::find_by_id(debt_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "Debt",
            id: debt_id,
        })
}

/// Fetches the debtor a debt belongs to and checks that `actor` may manage it.
pub(crate) async fn authorize_debt<C>(
    db: &C,
    debt: &debt::Model,
    actor: &Actor,
) -> Result<debtor::Model>
where
    C: ConnectionTrait,
{
    let debtor = find_debtor(db, debt.debtor_id).await?;
    ensure_can_manage(debtor.seller_id, actor)?;
    Ok(debtor)
}

/// Records a debt for a debtor with its installments and images.
///
/// # Errors
/// Returns an error if:
/// - The debtor does not exist, or `actor` may not manage it
/// - The product name is blank, the schedule is empty, or an amount is not positive
/// - Any insert fails (nothing is written in that case)
#[instrument(skip(db, new_debt), fields(product = %new_debt.product_name))]
pub async fn create_debt(
    db: &DatabaseConnection,
    debtor_id: i64,
    new_debt: NewDebt,
    actor: &Actor,
) -> Result<DebtDetail> {
    let product_name = new_debt.product_name.trim().to_string();
    if product_name.is_empty() {
        return Err(Error::bad_input("Product name cannot be empty"));
    }
    if new_debt.payments.is_empty() {
        return Err(Error::bad_input("A debt needs at least one payment"));
    }
    if let Some(invalid) = new_debt.payments.iter().find(|p| p.amount <= 0) {
        return Err(Error::bad_input(format!(
            "Payment amount must be positive, got {}",
            invalid.amount
        )));
    }
    let image_names = clean_names(new_debt.images, "Image name")?;

    let debtor = find_debtor(db, debtor_id).await?;
    ensure_can_manage(debtor.seller_id, actor)?;

    let txn = db.begin().await?;
    let now = chrono::Utc::now();

    let debt = debt::ActiveModel {
        debtor_id: Set(debtor_id),
        product_name: Set(product_name),
        note: Set(new_debt.note.filter(|n| !n.trim().is_empty())),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let mut payments = Vec::with_capacity(new_debt.payments.len());
    for scheduled in new_debt.payments {
        let payment = payment::ActiveModel {
            debt_id: Set(debt.id),
            amount: Set(scheduled.amount),
            date: Set(scheduled.date),
            is_active: Set(true),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        history_entry(&payment, payment_history::ACTION_SCHEDULED, now)
            .insert(&txn)
            .await?;
        payments.push(payment);
    }

    let mut images = Vec::with_capacity(image_names.len());
    for name in image_names {
        let image = debt_image::ActiveModel {
            debt_id: Set(debt.id),
            name: Set(name),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        images.push(image);
    }

    txn.commit().await?;
    info!(debt_id = debt.id, debtor_id, "Debt created");

    Ok(DebtDetail::new(debt, payments, images))
}

/// Loads one debt with its schedule, images and aggregates.
pub async fn get_debt(db: &DatabaseConnection, debt_id: i64, actor: &Actor) -> Result<DebtDetail> {
    let debt = find_debt(db, debt_id).await?;
    authorize_debt(db, &debt, actor).await?;

    let mut details = load_debt_details(db, vec![debt]).await?;
    details.pop().ok_or(Error::NotFound {
        entity: "Debt",
        id: debt_id,
    })
}

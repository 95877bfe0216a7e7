//! Payment business logic - Settling installments and reading the audit trail.
//!
//! Settling never deletes anything: the installment is flagged inactive and a
//! `"settled"` row is appended to the payment history in the same transaction.

use crate::{
    core::{
        access::Actor,
        debt::{authorize_debt, find_debt},
    },
    entities::{Payment, PaymentHistory, payment, payment_history},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};
use tracing::{info, instrument};

/// Builds the history row describing `payment` at the moment of `action`.
pub(crate) fn history_entry(
    payment: &payment::Model,
    action: &str,
    now: DateTime<Utc>,
) -> payment_history::ActiveModel {
    payment_history::ActiveModel {
        debt_id: Set(payment.debt_id),
        payment_id: Set(payment.id),
        amount: Set(payment.amount),
        date: Set(payment.date),
        action: Set(action.to_string()),
        created_at: Set(now),
        ..Default::default()
    }
}

/// Marks an active installment as paid and records it in the history.
///
/// # Errors
/// Returns an error if:
/// - The payment or its debt/debtor does not exist
/// - `actor` may not manage the owning debtor
/// - The payment is already settled
#[instrument(skip(db))]
pub async fn settle_payment(
    db: &DatabaseConnection,
    payment_id: i64,
    actor: &Actor,
) -> Result<payment::Model> {
    let payment = Payment::find_by_id(payment_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "Payment",
            id: payment_id,
        })?;
    let debt = find_debt(db, payment.debt_id).await?;
    authorize_debt(db, &debt, actor).await?;

    let txn = db.begin().await?;

    // Guarded on the flag: a settle that lost a race affects no rows.
    let flipped = Payment::update_many()
        .col_expr(payment::Column::IsActive, Expr::value(false))
        .filter(payment::Column::Id.eq(payment_id))
        .filter(payment::Column::IsActive.eq(true))
        .exec(&txn)
        .await?;
    if flipped.rows_affected == 0 {
        return Err(Error::bad_input(format!(
            "Payment {payment_id} is already settled"
        )));
    }

    let settled = payment::Model {
        is_active: false,
        ..payment
    };
    history_entry(&settled, payment_history::ACTION_SETTLED, Utc::now())
        .insert(&txn)
        .await?;

    txn.commit().await?;
    info!(payment_id, debt_id = settled.debt_id, "Payment settled");
    Ok(settled)
}

/// Returns the audit trail of a debt, oldest entry first.
pub async fn get_payment_history(
    db: &DatabaseConnection,
    debt_id: i64,
    actor: &Actor,
) -> Result<Vec<payment_history::Model>> {
    let debt = find_debt(db, debt_id).await?;
    authorize_debt(db, &debt, actor).await?;

    PaymentHistory::find()
        .filter(payment_history::Column::DebtId.eq(debt_id))
        .order_by_asc(payment_history::Column::CreatedAt)
        .order_by_asc(payment_history::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

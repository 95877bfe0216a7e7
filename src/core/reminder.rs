//! Payment reminders - Periodic job recording notifications for upcoming installments.
//!
//! Every run looks for active payments due between now and `lead_days` ahead and
//! records one notification per payment on the debtor, attributed to the debtor's
//! seller. Reminders carry the payment id, and a payment that already has one is
//! skipped, so repeated runs inside the lead window do not pile up duplicates.

use crate::{
    config::settings::ReminderConfig,
    entities::{Debt, Debtor, Notification, Payment, debt, debtor, notification, payment},
    errors::{Error, Result},
};
use chrono::{DateTime, Duration, Utc};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use serde::Serialize;
use std::{collections::HashMap, future::Future};
use tracing::{debug, error, info, instrument};

/// Outcome of one reminder run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReminderReport {
    /// Notifications written
    pub created: usize,
    /// Payments that already had a reminder
    pub skipped: usize,
}

/// Message text of the reminder for `payment` of `debt`.
#[must_use]
pub fn reminder_message(payment: &payment::Model, debt: &debt::Model) -> String {
    format!(
        "Payment of {} for \"{}\" is due on {}",
        payment.amount,
        debt.product_name,
        payment.date.format("%Y-%m-%d")
    )
}

/// Records reminders for every active payment due within `lead_days` of `now`.
///
/// # Errors
/// Returns [`Error::BadInput`] for a negative lead window and [`Error::Database`]
/// if a query or insert fails.
#[instrument(skip(db))]
pub async fn send_due_reminders(
    db: &DatabaseConnection,
    now: DateTime<Utc>,
    lead_days: i64,
) -> Result<ReminderReport> {
    if lead_days < 0 {
        return Err(Error::bad_input("Reminder lead days cannot be negative"));
    }
    let until = now + Duration::days(lead_days);

    let due = Payment::find()
        .filter(payment::Column::IsActive.eq(true))
        .filter(payment::Column::Date.between(now, until))
        .order_by_asc(payment::Column::Date)
        .order_by_asc(payment::Column::Id)
        .find_also_related(Debt)
        .all(db)
        .await?;

    let debtor_ids: Vec<i64> = due
        .iter()
        .filter_map(|(_, debt)| debt.as_ref().map(|d| d.debtor_id))
        .collect();
    let debtors: HashMap<i64, debtor::Model> = if debtor_ids.is_empty() {
        HashMap::new()
    } else {
        Debtor::find()
            .filter(debtor::Column::Id.is_in(debtor_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|d| (d.id, d))
            .collect()
    };

    let mut report = ReminderReport::default();
    for (payment, debt) in &due {
        let Some(debt) = debt else { continue };
        let Some(debtor) = debtors.get(&debt.debtor_id) else {
            continue;
        };

        let existing = Notification::find()
            .filter(notification::Column::PaymentId.eq(payment.id))
            .count(db)
            .await?;
        if existing > 0 {
            report.skipped += 1;
            continue;
        }

        notification::ActiveModel {
            debtor_id: Set(debtor.id),
            seller_id: Set(debtor.seller_id),
            payment_id: Set(Some(payment.id)),
            message: Set(reminder_message(payment, debt)),
            is_sended: Set(true),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        debug!(payment_id = payment.id, debtor_id = debtor.id, "Reminder recorded");
        report.created += 1;
    }

    Ok(report)
}

/// Runs [`send_due_reminders`] every `config.interval_secs` until `shutdown` resolves.
///
/// A failed run is logged and the loop keeps going.
pub async fn run_reminder_loop<F>(db: &DatabaseConnection, config: &ReminderConfig, shutdown: F)
where
    F: Future<Output = ()>,
{
    let mut ticker =
        tokio::time::interval(std::time::Duration::from_secs(config.interval_secs.max(1)));
    tokio::pin!(shutdown);

    info!(
        interval_secs = config.interval_secs,
        lead_days = config.lead_days,
        "Payment reminder loop started"
    );
    loop {
        tokio::select! {
            () = &mut shutdown => {
                info!("Payment reminder loop stopped");
                break;
            }
            _ = ticker.tick() => {
                match send_due_reminders(db, Utc::now(), config.lead_days).await {
                    Ok(report) => info!(
                        created = report.created,
                        skipped = report.skipped,
                        "Reminder run finished"
                    ),
                    Err(e) => error!("Reminder run failed: {}", e),
                }
            }
        }
    }
}

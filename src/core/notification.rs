//! Notification business logic - Messages sellers record about their debtors.
//!
//! Two listing modes are supported: every notification of one debtor (oldest
//! first), or a seller-wide summary pairing each debtor with its most recent
//! notification. Delivery itself happens elsewhere; rows are stamped as sent on
//! creation.

use crate::{
    core::{
        access::{Actor, ensure_can_manage},
        debtor::{find_debtor, phones_by_debtor},
        pagination::{Page, Pagination},
        search::{contains_ignore_case, search_term},
    },
    entities::{Debtor, Notification, debtor, debtor_phone, notification},
    errors::{Error, Result},
};
use sea_orm::{
    Condition, PaginatorTrait, QueryOrder, QuerySelect, Set,
    prelude::*,
    sea_query::Query,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, instrument};

/// Payload for recording a notification.
#[derive(Debug, Clone, Deserialize)]
pub struct NewNotification {
    pub debtor_id: i64,
    pub message: String,
}

/// Which debtors the seller-wide summary includes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum NotificationScope {
    /// Every debtor of the seller
    #[default]
    All,
    /// Only debtors with at least one notification
    #[serde(alias = "Sended")]
    Sent,
}

/// Search, scope and pagination options for the listing operations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationFilter {
    /// Case-insensitive substring matched against the message (debtor-scoped listing)
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub scope: NotificationScope,
    #[serde(flatten)]
    pub pagination: Pagination,
}

/// Every notification of one debtor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebtorNotifications {
    pub debtor_name: String,
    pub notifications: Page<notification::Model>,
}

/// A debtor paired with its most recent notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatestNotification {
    pub debtor: debtor::Model,
    pub phones: Vec<debtor_phone::Model>,
    pub latest: Option<notification::Model>,
}

/// A notification together with the debtor it is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationDetail {
    pub notification: notification::Model,
    pub debtor: debtor::Model,
}

fn clean_message(message: &str) -> Result<String> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Err(Error::bad_input("Notification message cannot be empty"));
    }
    Ok(trimmed.to_string())
}

async fn find_notification<C>(db: &C, notification_id: i64) -> Result<notification::Model>
where
    C: ConnectionTrait,
{
    Notification::find_by_id(notification_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "Notification",
            id: notification_id,
        })
}

/// Records a sent notification for a debtor, attributed to `actor`.
///
/// # Errors
/// Returns an error if the message is blank, the debtor does not exist, or
/// `actor` may not manage the debtor.
#[instrument(skip(db, new_notification), fields(debtor_id = new_notification.debtor_id))]
pub async fn create_notification(
    db: &DatabaseConnection,
    new_notification: NewNotification,
    actor: &Actor,
) -> Result<notification::Model> {
    let message = clean_message(&new_notification.message)?;
    let debtor = find_debtor(db, new_notification.debtor_id).await?;
    ensure_can_manage(debtor.seller_id, actor)?;

    let notification = notification::ActiveModel {
        debtor_id: Set(debtor.id),
        seller_id: Set(actor.id),
        message: Set(message),
        is_sended: Set(true),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(notification_id = notification.id, "Notification created");
    Ok(notification)
}

/// Lists one debtor's notifications, oldest first.
///
/// The debtor must belong to `seller_id`; otherwise the call fails with
/// [`Error::NotFound`] so foreign debtors are indistinguishable from missing ones.
pub async fn list_debtor_notifications(
    db: &DatabaseConnection,
    debtor_id: i64,
    seller_id: i64,
    filter: &NotificationFilter,
) -> Result<DebtorNotifications> {
    let debtor = Debtor::find()
        .filter(debtor::Column::Id.eq(debtor_id))
        .filter(debtor::Column::SellerId.eq(seller_id))
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "Debtor",
            id: debtor_id,
        })?;

    let mut condition = Condition::all().add(notification::Column::DebtorId.eq(debtor_id));
    if let Some(search) = search_term(filter.search.as_deref()) {
        condition = condition.add(contains_ignore_case(notification::Column::Message, search));
    }

    let notifications = Notification::find()
        .filter(condition.clone())
        .order_by_asc(notification::Column::CreatedAt)
        .order_by_asc(notification::Column::Id)
        .offset(filter.pagination.offset())
        .limit(filter.pagination.limit)
        .all(db)
        .await?;
    let total = Notification::find().filter(condition).count(db).await?;

    Ok(DebtorNotifications {
        debtor_name: debtor.name,
        notifications: Page::new(notifications, total, filter.pagination),
    })
}

/// Lists a seller's debtors (newest first), each with its most recent notification.
///
/// With [`NotificationScope::Sent`] only debtors that have at least one
/// notification are returned, and `total` counts only those.
pub async fn list_latest_notifications(
    db: &DatabaseConnection,
    seller_id: i64,
    filter: &NotificationFilter,
) -> Result<Page<LatestNotification>> {
    let mut condition = Condition::all().add(debtor::Column::SellerId.eq(seller_id));
    if filter.scope == NotificationScope::Sent {
        condition = condition.add(
            debtor::Column::Id.in_subquery(
                Query::select()
                    .column(notification::Column::DebtorId)
                    .from(Notification)
                    .to_owned(),
            ),
        );
    }

    let debtors = Debtor::find()
        .filter(condition.clone())
        .order_by_desc(debtor::Column::CreatedAt)
        .order_by_desc(debtor::Column::Id)
        .offset(filter.pagination.offset())
        .limit(filter.pagination.limit)
        .all(db)
        .await?;
    let total = Debtor::find().filter(condition).count(db).await?;

    let ids: Vec<i64> = debtors.iter().map(|d| d.id).collect();
    let mut phones = phones_by_debtor(db, &ids).await?;

    let mut latest: HashMap<i64, notification::Model> = HashMap::new();
    if !ids.is_empty() {
        let notifications = Notification::find()
            .filter(notification::Column::DebtorId.is_in(ids))
            .order_by_desc(notification::Column::CreatedAt)
            .order_by_desc(notification::Column::Id)
            .all(db)
            .await?;
        for notification in notifications {
            latest.entry(notification.debtor_id).or_insert(notification);
        }
    }

    let items = debtors
        .into_iter()
        .map(|debtor| LatestNotification {
            phones: phones.remove(&debtor.id).unwrap_or_default(),
            latest: latest.remove(&debtor.id),
            debtor,
        })
        .collect();

    Ok(Page::new(items, total, filter.pagination))
}

/// Loads one notification with its debtor.
pub async fn get_notification(
    db: &DatabaseConnection,
    notification_id: i64,
    actor: &Actor,
) -> Result<NotificationDetail> {
    let notification = find_notification(db, notification_id).await?;
    let debtor = find_debtor(db, notification.debtor_id).await?;
    if notification.seller_id != actor.id {
        ensure_can_manage(debtor.seller_id, actor)?;
    }

    Ok(NotificationDetail {
        notification,
        debtor,
    })
}

/// Replaces the message text of a notification.
///
/// Only the seller who recorded the notification may edit it.
#[instrument(skip(db, message))]
pub async fn update_notification_message(
    db: &DatabaseConnection,
    notification_id: i64,
    message: &str,
    actor: &Actor,
) -> Result<notification::Model> {
    let notification = find_notification(db, notification_id).await?;
    if notification.seller_id != actor.id {
        return Err(Error::Forbidden {
            message: "Access denied".to_string(),
        });
    }
    let message = clean_message(message)?;

    let mut active: notification::ActiveModel = notification.into();
    active.message = Set(message);
    active.update(db).await.map_err(Into::into)
}

/// Deletes every notification of a debtor and returns how many were removed.
///
/// # Errors
/// Returns [`Error::NotFound`] if the debtor does not exist and [`Error::Forbidden`]
/// unless `actor` owns the debtor or has an elevated role.
#[instrument(skip(db))]
pub async fn delete_debtor_notifications(
    db: &DatabaseConnection,
    debtor_id: i64,
    actor: &Actor,
) -> Result<u64> {
    let debtor = find_debtor(db, debtor_id).await?;
    ensure_can_manage(debtor.seller_id, actor)?;

    let result = Notification::delete_many()
        .filter(notification::Column::DebtorId.eq(debtor_id))
        .exec(db)
        .await?;

    info!(debtor_id, deleted = result.rows_affected, "Notifications deleted");
    Ok(result.rows_affected)
}

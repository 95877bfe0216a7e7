//! Notification handlers - create, list, fetch, edit and clear notifications.

use super::{AppState, log_failure};
use crate::{
    core::{
        access::Actor,
        notification::{
            self, DebtorNotifications, LatestNotification, NewNotification, NotificationDetail,
            NotificationFilter,
        },
    },
    entities::notification as notification_entity,
    errors::Result,
    response::{ApiResponse, PageMeta},
};
use serde::Serialize;

/// Payload of [`find_all`]: either one debtor's notifications or the seller-wide summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NotificationListing {
    /// Notifications of a single debtor, oldest first
    Debtor {
        debtor_name: String,
        notifications: Vec<notification_entity::Model>,
    },
    /// Each debtor with its most recent notification
    Latest(Vec<LatestNotification>),
}

/// Records a notification for a debtor.
pub async fn create(
    state: &AppState,
    actor: &Actor,
    payload: NewNotification,
) -> Result<ApiResponse<notification_entity::Model>> {
    let created = notification::create_notification(&state.database, payload, actor)
        .await
        .inspect_err(|e| log_failure("notification::create", e))?;
    Ok(ApiResponse::success(created, "Notification created", 201))
}

/// Lists notifications of `debtor_id` when given, otherwise the latest one per debtor.
pub async fn find_all(
    state: &AppState,
    actor: &Actor,
    debtor_id: Option<i64>,
    filter: &NotificationFilter,
) -> Result<ApiResponse<NotificationListing>> {
    let (listing, meta) = if let Some(debtor_id) = debtor_id {
        let DebtorNotifications {
            debtor_name,
            notifications,
        } = notification::list_debtor_notifications(&state.database, debtor_id, actor.id, filter)
            .await
            .inspect_err(|e| log_failure("notification::find_all", e))?;
        let meta = PageMeta {
            total: notifications.total,
            page: notifications.page,
            limit: notifications.limit,
        };
        (
            NotificationListing::Debtor {
                debtor_name,
                notifications: notifications.items,
            },
            meta,
        )
    } else {
        let page = notification::list_latest_notifications(&state.database, actor.id, filter)
            .await
            .inspect_err(|e| log_failure("notification::find_all", e))?;
        let meta = PageMeta {
            total: page.total,
            page: page.page,
            limit: page.limit,
        };
        (NotificationListing::Latest(page.items), meta)
    };

    Ok(ApiResponse::success(listing, "Notifications fetched", 200).with_meta(meta))
}

/// Fetches one notification with its debtor.
pub async fn find_one(
    state: &AppState,
    actor: &Actor,
    notification_id: i64,
) -> Result<ApiResponse<NotificationDetail>> {
    let detail = notification::get_notification(&state.database, notification_id, actor)
        .await
        .inspect_err(|e| log_failure("notification::find_one", e))?;
    Ok(ApiResponse::success(detail, "Notification fetched", 200))
}

/// Edits the message of a notification.
pub async fn update(
    state: &AppState,
    actor: &Actor,
    notification_id: i64,
    message: &str,
) -> Result<ApiResponse<notification_entity::Model>> {
    let updated =
        notification::update_notification_message(&state.database, notification_id, message, actor)
            .await
            .inspect_err(|e| log_failure("notification::update", e))?;
    Ok(ApiResponse::success(updated, "Notification updated", 200))
}

/// Deletes every notification of a debtor.
pub async fn remove(state: &AppState, actor: &Actor, debtor_id: i64) -> Result<ApiResponse<u64>> {
    let deleted = notification::delete_debtor_notifications(&state.database, debtor_id, actor)
        .await
        .inspect_err(|e| log_failure("notification::remove", e))?;
    Ok(ApiResponse::success(deleted, "Notifications deleted", 200))
}

//! Debtor handlers - create, list, fetch, star, update and delete debtors.

use super::{AppState, log_failure};
use crate::{
    core::{
        access::Actor,
        debtor::{
            self, DebtorDetail, DebtorFilter, DebtorRecord, DebtorSummary, DebtorUpdate,
            NewDebtor,
        },
    },
    entities::debtor as debtor_entity,
    errors::Result,
    response::ApiResponse,
};

/// Registers a debtor owned by the acting seller.
pub async fn create(
    state: &AppState,
    actor: &Actor,
    payload: NewDebtor,
) -> Result<ApiResponse<DebtorRecord>> {
    let record = debtor::create_debtor(&state.database, actor.id, payload)
        .await
        .inspect_err(|e| log_failure("debtor::create", e))?;
    Ok(ApiResponse::success(record, "Debtor created", 201))
}

/// Lists the acting seller's debtors with their outstanding totals.
pub async fn find_all(
    state: &AppState,
    actor: &Actor,
    filter: &DebtorFilter,
) -> Result<ApiResponse<Vec<DebtorSummary>>> {
    let page = debtor::list_debtors(&state.database, actor.id, filter)
        .await
        .inspect_err(|e| log_failure("debtor::find_all", e))?;
    Ok(ApiResponse::page(page, "Debtors retrieved successfully"))
}

/// Fetches one debtor with debts and totals.
pub async fn find_one(
    state: &AppState,
    actor: &Actor,
    debtor_id: i64,
) -> Result<ApiResponse<DebtorDetail>> {
    let detail = debtor::get_debtor(&state.database, debtor_id, actor)
        .await
        .inspect_err(|e| log_failure("debtor::find_one", e))?;
    Ok(ApiResponse::success(detail, "Debtor fetched successfully", 200))
}

/// Flips the favorite flag.
pub async fn toggle_star(
    state: &AppState,
    actor: &Actor,
    debtor_id: i64,
) -> Result<ApiResponse<debtor_entity::Model>> {
    let updated = debtor::toggle_star(&state.database, debtor_id, actor)
        .await
        .inspect_err(|e| log_failure("debtor::toggle_star", e))?;
    Ok(ApiResponse::success(updated, "Debtor star updated", 200))
}

/// Applies a partial update, replacing phones and images.
pub async fn update(
    state: &AppState,
    actor: &Actor,
    debtor_id: i64,
    payload: DebtorUpdate,
) -> Result<ApiResponse<DebtorRecord>> {
    let record = debtor::update_debtor(&state.database, debtor_id, payload, actor)
        .await
        .inspect_err(|e| log_failure("debtor::update", e))?;
    Ok(ApiResponse::success(record, "Debtor updated", 200))
}

/// Deletes a debtor and everything that references it.
pub async fn remove(state: &AppState, actor: &Actor, debtor_id: i64) -> Result<ApiResponse<()>> {
    debtor::delete_debtor(&state.database, debtor_id, actor)
        .await
        .inspect_err(|e| log_failure("debtor::remove", e))?;
    Ok(ApiResponse::success((), "Debtor deleted", 200))
}

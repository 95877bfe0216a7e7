//! Debt handlers - record debts, fetch them, settle installments.

use super::{AppState, log_failure};
use crate::{
    core::{
        access::Actor,
        debt::{self, DebtDetail, NewDebt},
        payment,
    },
    entities::{payment as payment_entity, payment_history},
    errors::Result,
    response::ApiResponse,
};

/// Records a debt with its payment schedule.
pub async fn create(
    state: &AppState,
    actor: &Actor,
    debtor_id: i64,
    payload: NewDebt,
) -> Result<ApiResponse<DebtDetail>> {
    let detail = debt::create_debt(&state.database, debtor_id, payload, actor)
        .await
        .inspect_err(|e| log_failure("debt::create", e))?;
    Ok(ApiResponse::success(detail, "Debt created", 201))
}

/// Fetches one debt with its schedule and totals.
pub async fn find_one(
    state: &AppState,
    actor: &Actor,
    debt_id: i64,
) -> Result<ApiResponse<DebtDetail>> {
    let detail = debt::get_debt(&state.database, debt_id, actor)
        .await
        .inspect_err(|e| log_failure("debt::find_one", e))?;
    Ok(ApiResponse::success(detail, "Debt fetched successfully", 200))
}

/// Marks an installment as paid.
pub async fn settle_payment(
    state: &AppState,
    actor: &Actor,
    payment_id: i64,
) -> Result<ApiResponse<payment_entity::Model>> {
    let settled = payment::settle_payment(&state.database, payment_id, actor)
        .await
        .inspect_err(|e| log_failure("debt::settle_payment", e))?;
    Ok(ApiResponse::success(settled, "Payment settled", 200))
}

/// Returns the audit trail of a debt.
pub async fn history(
    state: &AppState,
    actor: &Actor,
    debt_id: i64,
) -> Result<ApiResponse<Vec<payment_history::Model>>> {
    let history = payment::get_payment_history(&state.database, debt_id, actor)
        .await
        .inspect_err(|e| log_failure("debt::history", e))?;
    Ok(ApiResponse::success(history, "Payment history fetched", 200))
}

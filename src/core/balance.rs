//! Balance aggregation over payment schedules.
//!
//! Amounts are stored as `i64` minor units and summed into `i128`, so totals
//! never overflow or pick up floating point error.

use crate::entities::payment;

/// Sum of every payment amount, active or settled.
#[must_use]
pub fn total_payments<'a, I>(payments: I) -> i128
where
    I: IntoIterator<Item = &'a payment::Model>,
{
    payments
        .into_iter()
        .map(|payment| i128::from(payment.amount))
        .sum()
}

/// Sum of the amounts still outstanding.
#[must_use]
pub fn active_total<'a, I>(payments: I) -> i128
where
    I: IntoIterator<Item = &'a payment::Model>,
{
    payments
        .into_iter()
        .filter(|payment| payment.is_active)
        .map(|payment| i128::from(payment.amount))
        .sum()
}

/// The active payment with the earliest due date; ties go to the lowest id.
#[must_use]
pub fn next_payment<'a, I>(payments: I) -> Option<&'a payment::Model>
where
    I: IntoIterator<Item = &'a payment::Model>,
{
    payments
        .into_iter()
        .filter(|payment| payment.is_active)
        .min_by_key(|payment| (payment.date, payment.id))
}

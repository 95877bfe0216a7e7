//! Core business logic - framework-agnostic ledger operations.
//!
//! Every function takes the database handle explicitly; nothing here holds
//! global state.

/// Ownership and role checks
pub mod access;
/// Aggregation over payment schedules
pub mod balance;
/// Debts and their payment schedules
pub mod debt;
/// Debtors: create, list, update, cascade delete
pub mod debtor;
/// Notifications about debtors
pub mod notification;
/// Page/limit handling
pub mod pagination;
/// Settling payments and the payment history
pub mod payment;
/// Periodic payment reminders
pub mod reminder;
/// Literal, case-insensitive text search
pub mod search;
/// Seller accounts
pub mod seller;

//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the ledger tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod debt;
pub mod debt_image;
pub mod debtor;
pub mod debtor_image;
pub mod debtor_phone;
pub mod notification;
pub mod payment;
pub mod payment_history;
pub mod seller;

// Re-export specific types to avoid conflicts
pub use debt::{Column as DebtColumn, Entity as Debt, Model as DebtModel};
pub use debt_image::{Column as DebtImageColumn, Entity as DebtImage, Model as DebtImageModel};
pub use debtor::{Column as DebtorColumn, Entity as Debtor, Model as DebtorModel};
pub use debtor_image::{
    Column as DebtorImageColumn, Entity as DebtorImage, Model as DebtorImageModel,
};
pub use debtor_phone::{
    Column as DebtorPhoneColumn, Entity as DebtorPhone, Model as DebtorPhoneModel,
};
pub use notification::{
    Column as NotificationColumn, Entity as Notification, Model as NotificationModel,
};
pub use payment::{Column as PaymentColumn, Entity as Payment, Model as PaymentModel};
pub use payment_history::{
    Column as PaymentHistoryColumn, Entity as PaymentHistory, Model as PaymentHistoryModel,
};
pub use seller::{Column as SellerColumn, Entity as Seller, Model as SellerModel};

//! Domain types for the transaction ledger.

pub mod ledger;
pub mod month;
pub mod transaction;

pub use ledger::Ledger;
pub use month::{MonthKey, ParseMonthKeyError};
pub use transaction::{Category, Transaction};

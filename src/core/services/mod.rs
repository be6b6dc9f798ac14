pub mod report_service;
pub mod transaction_service;

pub use report_service::{PeriodSummary, ReportService};
pub use transaction_service::TransactionService;

use uuid::Uuid;

use crate::errors::StoreError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("no transaction with id {0} in the current snapshot")]
    UnknownTransaction(Uuid),
}

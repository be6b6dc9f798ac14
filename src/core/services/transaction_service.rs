//! Business logic helpers for mutating the ledger.

use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::ledger::{Ledger, Transaction};
use crate::storage::StorageBackend;

/// Validated CRUD over the store, addressed by session-scoped transaction
/// ids rather than raw file positions. Callers observe a mutation by
/// reloading the ledger; no operation returns the updated sequence.
pub struct TransactionService;

impl TransactionService {
    /// Appends a new transaction and returns its identifier.
    pub fn add(store: &dyn StorageBackend, record: Transaction) -> ServiceResult<Uuid> {
        let id = record.id;
        store.append(&record)?;
        Ok(id)
    }

    /// Replaces the transaction identified by `id`, resolving it to a file
    /// position against the snapshot it was read from.
    pub fn update(
        store: &dyn StorageBackend,
        snapshot: &Ledger,
        id: Uuid,
        record: Transaction,
    ) -> ServiceResult<()> {
        let index = snapshot
            .position_of(id)
            .ok_or(ServiceError::UnknownTransaction(id))?;
        store.replace_at(index, &record)?;
        Ok(())
    }

    /// Removes the transaction identified by `id`, returning the removed
    /// record. Positions after it shift up on the next load.
    pub fn remove(
        store: &dyn StorageBackend,
        snapshot: &Ledger,
        id: Uuid,
    ) -> ServiceResult<Transaction> {
        let index = snapshot
            .position_of(id)
            .ok_or(ServiceError::UnknownTransaction(id))?;
        let removed = snapshot
            .get(index)
            .cloned()
            .ok_or(ServiceError::UnknownTransaction(id))?;
        store.delete_at(index)?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Category;
    use crate::storage::CsvStore;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (CsvStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = CsvStore::new(temp.path().join("transactions.csv"));
        (store, temp)
    }

    fn sample(description: &str, amount: i64) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            Category::Food,
            description,
            Decimal::from(amount),
        )
    }

    #[test]
    fn update_fails_for_unknown_id() {
        let (store, _guard) = store_with_temp_dir();
        let snapshot = store.load().unwrap();
        let err = TransactionService::update(&store, &snapshot, Uuid::new_v4(), sample("x", -1))
            .expect_err("update must fail for unknown id");
        assert!(matches!(err, ServiceError::UnknownTransaction(_)));
    }

    #[test]
    fn remove_returns_deleted_transaction() {
        let (store, _guard) = store_with_temp_dir();
        TransactionService::add(&store, sample("Groceries", -1200)).unwrap();
        TransactionService::add(&store, sample("Bus", -300)).unwrap();

        let snapshot = store.load().unwrap();
        let id = snapshot.get(0).unwrap().id;
        let removed = TransactionService::remove(&store, &snapshot, id).unwrap();
        assert_eq!(removed.description, "Groceries");

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.get(0).unwrap().description, "Bus");
    }

    #[test]
    fn update_changes_exactly_one_position() {
        let (store, _guard) = store_with_temp_dir();
        TransactionService::add(&store, sample("Groceries", -1200)).unwrap();
        TransactionService::add(&store, sample("Bus", -300)).unwrap();

        let snapshot = store.load().unwrap();
        let id = snapshot.get(1).unwrap().id;
        let replacement = sample("Train", -450);
        TransactionService::update(&store, &snapshot, id, replacement).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.get(0).unwrap().description, "Groceries");
        assert_eq!(reloaded.get(1).unwrap().description, "Train");
        assert_eq!(reloaded.get(1).unwrap().amount, Decimal::from(-450));
    }
}

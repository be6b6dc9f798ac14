pub mod csv_backend;

use crate::{errors::StoreError, ledger::{Ledger, Transaction}};

pub type Result<T> = std::result::Result<T, StoreError>;

/// Abstraction over persistence backends for the transaction ledger.
pub trait StorageBackend: Send + Sync {
    /// Reads the full ledger. A missing backing file is initialized and
    /// treated as empty; malformed rows are dropped, never fatal.
    fn load(&self) -> Result<Ledger>;

    /// Appends a single record without rewriting existing rows.
    fn append(&self, record: &Transaction) -> Result<()>;

    /// Rewrites the store with position `index` replaced.
    fn replace_at(&self, index: usize, record: &Transaction) -> Result<()>;

    /// Rewrites the store with position `index` removed; later rows shift up.
    fn delete_at(&self, index: usize) -> Result<()>;
}

pub use csv_backend::CsvStore;

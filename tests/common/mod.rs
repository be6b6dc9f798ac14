use std::sync::Mutex;

use finsight_core::storage::CsvStore;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the
/// test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a CSV store backed by a unique temporary directory for each test.
pub fn setup_store() -> CsvStore {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("transactions.csv");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    CsvStore::new(path)
}

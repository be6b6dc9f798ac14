use uuid::Uuid;

use crate::errors::StoreError;

use super::transaction::Transaction;

/// The ordered sequence of all transactions. Insertion order equals file
/// order; positions are only meaningful for the snapshot they came from.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    entries: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<Transaction>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn push(&mut self, record: Transaction) {
        self.entries.push(record);
    }

    /// Replaces the entry at `index`, leaving every other position untouched.
    pub fn replace(&mut self, index: usize, record: Transaction) -> Result<(), StoreError> {
        let len = self.entries.len();
        match self.entries.get_mut(index) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(StoreError::OutOfBounds { index, len }),
        }
    }

    /// Removes the entry at `index`; later entries shift up by one position.
    pub fn remove(&mut self, index: usize) -> Result<Transaction, StoreError> {
        if index >= self.entries.len() {
            return Err(StoreError::OutOfBounds {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    /// Resolves a session-scoped transaction id to its position in this
    /// snapshot.
    pub fn position_of(&self, id: Uuid) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

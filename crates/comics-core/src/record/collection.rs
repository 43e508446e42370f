//! The ordered record collection.

use serde::{Deserialize, Serialize};

use super::Record;
use crate::types::RecordId;

/// Every record in the document, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    records: Vec<Record>,
}

impl Collection {
    /// Create a collection from records in document order.
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Record> {
        self.records.iter_mut()
    }

    /// First record with the given id.
    pub fn find(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// First record with the given id, mutably.
    pub fn find_mut(&mut self, id: RecordId) -> Option<&mut Record> {
        self.records.iter_mut().find(|r| r.id == id)
    }

    /// Id the next appended record receives.
    pub fn next_id(&self) -> RecordId {
        RecordId::next_after(self.records.len())
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Remove every record with the given id, keeping survivor order.
    /// Returns the number removed.
    pub fn remove(&mut self, id: RecordId) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        before - self.records.len()
    }

    /// Records whose city matches `ciudad`, ignoring case.
    pub fn filter_ciudad(self, ciudad: &str) -> Vec<Record> {
        self.records
            .into_iter()
            .filter(|r| r.ciudad.matches(ciudad))
            .collect()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl IntoIterator for Collection {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<Record> for Collection {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

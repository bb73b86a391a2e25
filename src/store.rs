//! Append-only, ordered storage of parsed [`Record`]s.

use crate::Record;
use std::ops::Deref;

/// Ordered sequence of [`Record`]s, one per input line. Records can be appended but never modified
/// or removed. As this type [Deref]s to a slice and implements [IntoIterator] for references, it
/// supports `for` loops and all immutable slice methods.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore(Vec<Record>);

impl RecordStore {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, record: Record) {
        self.0.push(record);
    }

    /// Number of records that carried at least one recognized field.
    pub fn non_empty_count(&self) -> usize {
        self.0.iter().filter(|r| !r.is_empty()).count()
    }
}

impl From<Vec<Record>> for RecordStore {
    fn from(value: Vec<Record>) -> Self {
        Self(value)
    }
}

impl FromIterator<Record> for RecordStore {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Deref for RecordStore {
    type Target = [Record];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for RecordStore {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

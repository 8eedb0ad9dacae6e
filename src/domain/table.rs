use std::{fs, path::Path};

use crate::{domain::Record, errors::RosterError};

/// Rows currently rendered in the records table.
///
/// The table is the record source for the form: edit state is populated from
/// its rows and id uniqueness is checked against [`RecordTable::ids`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordTable {
    rows: Vec<Record>,
}

impl RecordTable {
    pub fn new(rows: Vec<Record>) -> Self {
        Self { rows }
    }

    /// Parses a JSON array of rows.
    pub fn from_json_str(data: &str) -> Result<Self, RosterError> {
        let rows: Vec<Record> = serde_json::from_str(data)?;
        Ok(Self::new(rows))
    }

    /// Loads a JSON snapshot of rendered rows from disk.
    pub fn load(path: &Path) -> Result<Self, RosterError> {
        let data = fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(|row| row.id.as_str())
    }

    pub fn find(&self, id: &str) -> Option<&Record> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn position(&self, id: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    pub(crate) fn push(&mut self, record: Record) {
        self.rows.push(record);
    }

    pub(crate) fn replace_at(&mut self, index: usize, record: Record) {
        self.rows[index] = record;
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> Record {
        self.rows.remove(index)
    }
}

impl From<Vec<Record>> for RecordTable {
    fn from(rows: Vec<Record>) -> Self {
        Self::new(rows)
    }
}

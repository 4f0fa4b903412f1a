use std::path::Path;

use crate::error::Error;
use crate::model::PersonRecord;

/// The records of one report run, in input order. Read-only once built.
#[derive(Clone, Debug, Default)]
pub struct RecordStore {
    records: Vec<PersonRecord>,
}

impl RecordStore {
    pub fn new(records: Vec<PersonRecord>) -> Self {
        Self { records }
    }

    /// Load records from a JSON array. A missing file is an empty store.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("{} not found, no records loaded", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(Error::Io(std::io::Error::new(
                    e.kind(),
                    format!("{}: {}", e, path.display()),
                )));
            }
        };
        Self::from_json(&text).map_err(|e| match e {
            Error::InvalidInput(msg) => Error::InvalidInput(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, Error> {
        let records: Vec<PersonRecord> =
            serde_json::from_str(text).map_err(|e| Error::InvalidInput(e.to_string()))?;
        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[PersonRecord] {
        &self.records
    }

    /// The first `limit` records.
    pub fn take(&self, limit: usize) -> &[PersonRecord] {
        &self.records[..self.records.len().min(limit)]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

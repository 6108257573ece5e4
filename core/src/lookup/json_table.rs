use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use proxyscope_common::lookup::LookupProvider;
use proxyscope_common::models::record::AddressRecord;
use thiserror::Error;
use tracing::{debug, info};

use super::fallback_record;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("failed to read lookup table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid lookup table {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("lookup table entry {index} has an empty address")]
    EmptyAddress { index: usize },
}

/// Lookup table read from a JSON array of records.
///
/// Lets the built-in table be swapped for a larger fixture without recompiling.
pub struct JsonTableLookup {
    entries: HashMap<String, AddressRecord>,
    delay: Duration,
}

impl JsonTableLookup {
    pub fn load(path: &Path, delay: Duration) -> Result<Self, TableError> {
        let raw: String = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<AddressRecord> =
            serde_json::from_str(&raw).map_err(|source| TableError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        let lookup = Self::from_records(records, delay)?;
        info!(path = %path.display(), entries = lookup.entries.len(), "loaded lookup table");
        Ok(lookup)
    }

    pub fn from_records(records: Vec<AddressRecord>, delay: Duration) -> Result<Self, TableError> {
        let mut entries: HashMap<String, AddressRecord> = HashMap::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let key: String = record.address.trim().to_string();
            if key.is_empty() {
                return Err(TableError::EmptyAddress { index });
            }
            entries.insert(key, record);
        }
        Ok(Self { entries, delay })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl LookupProvider for JsonTableLookup {
    async fn resolve(&self, address: &str) -> AddressRecord {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match self.entries.get(address) {
            Some(found) => AddressRecord {
                address: address.to_string(),
                ..found.clone()
            },
            None => {
                debug!(address, "address not in table, using fallback record");
                fallback_record(address)
            }
        }
    }
}

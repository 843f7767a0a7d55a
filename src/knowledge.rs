use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::{AidMateError, Result};
use crate::models::EmergencyRecord;

static GLOBAL_STORE: OnceLock<KnowledgeStore> = OnceLock::new();

/// Immutable in-memory knowledge base, loaded once at startup.
#[derive(Debug)]
pub struct KnowledgeStore {
    records: Vec<EmergencyRecord>,
}

impl KnowledgeStore {
    /// Read and parse the knowledge file. A missing, unreadable, or malformed
    /// file is fatal: there is no fallback knowledge to serve from.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            AidMateError::DataLoad(format!("cannot read {}: {e}", path.display()))
        })?;
        let records: Vec<EmergencyRecord> = serde_json::from_str(&contents).map_err(|e| {
            AidMateError::DataLoad(format!("cannot parse {}: {e}", path.display()))
        })?;
        tracing::info!(
            "Loaded {} emergency records from {}",
            records.len(),
            path.display()
        );
        Ok(Self { records })
    }

    /// Process-wide store, memoized on first successful load. Once a load
    /// succeeds, repeated calls return the same cached instance without
    /// touching the filesystem again; a failed load leaves the store
    /// uninitialized, so the next call reads the file again.
    pub fn global(path: impl AsRef<Path>) -> Result<&'static Self> {
        if let Some(store) = GLOBAL_STORE.get() {
            return Ok(store);
        }
        let store = Self::load(path)?;
        // A racing initializer may have won; either value came from the same file.
        Ok(GLOBAL_STORE.get_or_init(|| store))
    }

    pub fn records(&self) -> &[EmergencyRecord] {
        &self.records
    }

    /// Case-insensitive substring match of `query` against each record's
    /// `emergency_type`. Results keep storage order; no ranking, no limit.
    ///
    /// An empty query matches only records whose `emergency_type` is empty or
    /// absent, not every record.
    pub fn search(&self, query: &str) -> Vec<EmergencyRecord> {
        let needle = query.to_lowercase();
        self.records
            .iter()
            .filter(|record| {
                let haystack = record.emergency_type().to_lowercase();
                if needle.is_empty() {
                    haystack.is_empty()
                } else {
                    haystack.contains(&needle)
                }
            })
            .cloned()
            .collect()
    }

    #[cfg(test)]
    pub fn from_records(records: Vec<EmergencyRecord>) -> Self {
        Self { records }
    }
}

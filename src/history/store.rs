//! Newest-first history cache mirrored to a single storage key

use crate::error::{RecruiterBotError, Result};
use crate::history::storage::Storage;
use crate::model::AnalysisRecord;
use log::{debug, warn};

pub const HISTORY_KEY: &str = "recruiterBotHistory";

/// In-memory history backed by one serialized blob.
///
/// Every mutation rewrites the whole blob before the in-memory sequence is
/// updated, so a failed write leaves both sides unchanged.
pub struct HistoryStore<S: Storage> {
    storage: S,
    records: Vec<AnalysisRecord>,
}

impl<S: Storage> HistoryStore<S> {
    /// Open the store and load whatever is persisted.
    pub fn open(storage: S) -> Result<Self> {
        let mut store = Self {
            storage,
            records: Vec::new(),
        };
        store.load()?;
        Ok(store)
    }

    /// Re-read the persisted blob.
    ///
    /// A blob that does not decode or parse is discarded and the history starts
    /// empty.
    pub fn load(&mut self) -> Result<&[AnalysisRecord]> {
        self.records = match self.storage.get(HISTORY_KEY) {
            Ok(None) => Vec::new(),
            Ok(Some(blob)) => match serde_json::from_str::<Vec<AnalysisRecord>>(&blob) {
                Ok(records) => records,
                Err(e) => {
                    warn!("Discarding unreadable history ({} bytes): {}", blob.len(), e);
                    self.storage.remove(HISTORY_KEY)?;
                    Vec::new()
                }
            },
            Err(RecruiterBotError::CorruptData(reason)) => {
                warn!("Discarding undecodable history: {}", reason);
                self.storage.remove(HISTORY_KEY)?;
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        debug!("Loaded {} history records", self.records.len());
        Ok(&self.records)
    }

    /// Prepend a record and persist the full sequence.
    pub fn append(&mut self, record: AnalysisRecord) -> Result<&[AnalysisRecord]> {
        let mut updated = Vec::with_capacity(self.records.len() + 1);
        updated.push(record);
        updated.extend(self.records.iter().cloned());

        let blob = serde_json::to_string(&updated)?;
        self.storage.set(HISTORY_KEY, &blob)?;

        self.records = updated;
        Ok(&self.records)
    }

    /// Drop every record. Confirmation is the caller's job.
    pub fn clear(&mut self) -> Result<&[AnalysisRecord]> {
        self.storage.remove(HISTORY_KEY)?;
        self.records.clear();
        Ok(&self.records)
    }

    pub fn get(&self, id: &str) -> Option<&AnalysisRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn records(&self) -> &[AnalysisRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

}

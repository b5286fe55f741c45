//! Bounded, persisted log of accepted scans

use std::sync::Arc;

use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::code128::{Symbology, ValidationResult};
use crate::storage::{self, KeyValueStore, SCAN_HISTORY_KEY};

pub const MAX_HISTORY_ENTRIES: usize = 50;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub data: String,
    #[serde(rename = "type")]
    pub symbology: Symbology,
    pub is_valid: bool,
    /// Local wall-clock time, for display
    pub timestamp: String,
    /// ISO-8601 UTC instant
    pub date: String,
}

impl HistoryEntry {
    pub fn new(data: impl Into<String>, symbology: Symbology, at: DateTime<Utc>) -> Self {
        Self {
            data: data.into(),
            symbology,
            is_valid: true,
            timestamp: at.with_timezone(&Local).format("%H:%M:%S").to_string(),
            date: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Entry for an accepted result; rejected results are never recorded
    pub fn from_result(result: &ValidationResult, at: DateTime<Utc>) -> Option<Self> {
        result
            .symbology()
            .map(|symbology| Self::new(result.data.clone(), symbology, at))
    }
}

/// Newest-first scan log, written through to storage on every change
pub struct ScanHistory {
    entries: Vec<HistoryEntry>,
    store: Arc<dyn KeyValueStore>,
}

impl ScanHistory {
    /// Load from `store`; anything unreadable starts an empty history
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let mut entries: Vec<HistoryEntry> = storage::load_or_default(store.as_ref(), SCAN_HISTORY_KEY);
        entries.truncate(MAX_HISTORY_ENTRIES);
        tracing::debug!(count = entries.len(), "Scan history loaded");
        Self { entries, store }
    }

    pub fn persist(&self) {
        if let Err(e) = storage::save_json(self.store.as_ref(), SCAN_HISTORY_KEY, &self.entries) {
            tracing::warn!(error = %e, "Failed to save scan history");
        }
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        tracing::info!(data = %entry.data, symbology = %entry.symbology, "Recording scan");
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_HISTORY_ENTRIES);
        self.persist();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
        tracing::info!("Scan history cleared");
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::code128::validate;
    use crate::storage::MemoryStore;
    use chrono::TimeZone;

    fn store() -> Arc<dyn KeyValueStore> {
        Arc::new(MemoryStore::new())
    }

    fn entry(n: usize) -> HistoryEntry {
        HistoryEntry::new(format!("CODE{n:04}"), Symbology::Code128B, Utc::now())
    }

    #[test]
    fn append_puts_newest_first_and_caps_at_fifty() {
        let mut history = ScanHistory::load(store());
        for n in 0..=MAX_HISTORY_ENTRIES {
            history.append(entry(n));
        }

        assert_eq!(history.len(), MAX_HISTORY_ENTRIES);
        assert_eq!(history.entries()[0].data, "CODE0050");
        assert_eq!(history.entries().last().unwrap().data, "CODE0001");
        assert!(history.entries().iter().all(|e| e.data != "CODE0000"));
    }

    #[test]
    fn persisted_history_loads_back_equal() {
        let store = store();
        let mut history = ScanHistory::load(store.clone());
        history.append(entry(1));
        history.append(HistoryEntry::new("123456", Symbology::Code128C, Utc::now()));

        let reloaded = ScanHistory::load(store);
        assert_eq!(reloaded.entries(), history.entries());
    }

    #[test]
    fn clear_empties_and_persists() {
        let store = store();
        let mut history = ScanHistory::load(store.clone());
        history.append(entry(1));
        history.clear();

        assert!(history.is_empty());
        assert!(ScanHistory::load(store).is_empty());
    }

    #[test]
    fn malformed_storage_starts_empty() {
        let store = store();
        store.set(SCAN_HISTORY_KEY, "[{\"data\": 12").unwrap();
        assert!(ScanHistory::load(store).is_empty());
    }

    #[test]
    fn entry_serializes_with_browser_field_names() {
        let at = Utc.with_ymd_and_hms(2024, 2, 24, 8, 30, 0).unwrap();
        let entry = HistoryEntry::new("2024022400001", Symbology::Code128C, at);
        let json: serde_json::Value = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["data"], "2024022400001");
        assert_eq!(json["type"], "Code128-C");
        assert_eq!(json["isValid"], true);
        assert_eq!(json["date"], "2024-02-24T08:30:00.000Z");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn only_valid_results_become_entries() {
        assert!(HistoryEntry::from_result(&validate("x"), Utc::now()).is_none());

        let entry = HistoryEntry::from_result(&validate("CODE128DEMO"), Utc::now()).unwrap();
        assert_eq!(entry.symbology, Symbology::Code128B);
        assert!(entry.is_valid);
    }
}

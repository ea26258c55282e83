//! Trip persistence.
//!
//! The history is kept as a single JSON array of trips. Missing or malformed
//! data loads as an empty history; it is never an error for the caller.

use super::types::{Trip, TripHistory};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("could not serialize trip history: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Get/set access to the persisted trip list.
pub trait TripStore {
    /// The persisted history, or an empty one if absent or unreadable.
    fn load_trips(&self) -> TripHistory;

    /// Overwrite the persisted history. The caller enforces the size cap.
    fn save_trips(&mut self, history: &TripHistory) -> Result<(), StoreError>;

    /// Drop the persisted history entirely.
    fn clear_trips(&mut self) -> Result<(), StoreError>;
}

/// Parse a serialized trip list. `None` on malformed input.
pub fn decode_history(raw: &str) -> Option<TripHistory> {
    match serde_json::from_str::<Vec<Trip>>(raw) {
        Ok(trips) => Some(TripHistory::from_trips(trips)),
        Err(e) => {
            log::warn!("ignoring malformed trip history: {}", e);
            None
        }
    }
}

/// JSON file store, by default at ~/.ecotrip/history.json.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn open_default() -> Self {
        Self::at(Self::default_path())
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ecotrip")
            .join("history.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }
}

impl TripStore for JsonFileStore {
    fn load_trips(&self) -> TripHistory {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return TripHistory::new(),
            Err(e) => {
                log::warn!("cannot read {}: {}", self.path.display(), e);
                return TripHistory::new();
            }
        };
        decode_history(&data).unwrap_or_default()
    }

    fn save_trips(&mut self, history: &TripHistory) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let json = serde_json::to_string_pretty(history)?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))?;
        log::debug!("saved {} trips to {}", history.len(), self.path.display());
        Ok(())
    }

    fn clear_trips(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// In-process store holding the serialized history, like a browser's
/// key-value storage. Used for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already-serialized value (possibly malformed).
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self { raw: Some(raw.into()) }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl TripStore for MemoryStore {
    fn load_trips(&self) -> TripHistory {
        self.raw
            .as_deref()
            .and_then(decode_history)
            .unwrap_or_default()
    }

    fn save_trips(&mut self, history: &TripHistory) -> Result<(), StoreError> {
        self.raw = Some(serde_json::to_string(history)?);
        Ok(())
    }

    fn clear_trips(&mut self) -> Result<(), StoreError> {
        self.raw = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impact::ImpactLevel;
    use crate::transport::TransportMode;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn trip(origin: &str, transport: TransportMode) -> Trip {
        Trip {
            origin: origin.into(),
            destination: "Curitiba".into(),
            distance: 408.0,
            transport,
            passengers: 2,
            co2_total: 78.5,
            co2_per_person: 39.25,
            impact_level: ImpactLevel::Medium,
            timestamp: Utc.with_ymd_and_hms(2026, 5, 4, 9, 30, 15).unwrap(),
        }
    }

    fn test_store() -> (JsonFileStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("history.json");
        (JsonFileStore::at(path), dir)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let (store, _dir) = test_store();
        assert!(store.load_trips().is_empty());
    }

    #[test]
    fn test_file_round_trip() {
        let (mut store, _dir) = test_store();
        let history = TripHistory::new()
            .with_trip(trip("Sao Paulo", TransportMode::Car))
            .with_trip(trip("Rio de Janeiro", TransportMode::Bus));
        store.save_trips(&history).unwrap();

        let reopened = JsonFileStore::at(store.path());
        assert_eq!(reopened.load_trips(), history);
    }

    #[test]
    fn test_malformed_file_is_empty() {
        let (store, _dir) = test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();
        assert!(store.load_trips().is_empty());

        // valid JSON, wrong shape
        fs::write(store.path(), r#"{"trips": []}"#).unwrap();
        assert!(store.load_trips().is_empty());
    }

    #[test]
    fn test_unknown_transport_in_file_is_empty() {
        let (store, _dir) = test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        let json = r#"[{
            "origin": "A", "destination": "B", "distance": 1, "transport": "boat",
            "passengers": 1, "co2Total": 0, "co2PerPerson": 0,
            "impactLevel": "low", "timestamp": "2026-01-01T00:00:00Z"
        }]"#;
        fs::write(store.path(), json).unwrap();
        assert!(store.load_trips().is_empty());
    }

    #[test]
    fn test_reads_original_layout() {
        let (store, _dir) = test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        let json = r#"[{
            "origin": "Salvador", "destination": "Recife", "distance": 839,
            "transport": "plane", "passengers": 1, "co2Total": 213.945,
            "co2PerPerson": 213.945, "impactLevel": "high",
            "timestamp": "2025-11-02T18:04:05.123Z"
        }]"#;
        fs::write(store.path(), json).unwrap();
        let history = store.load_trips();
        assert_eq!(history.len(), 1);
        let t = history.latest().unwrap();
        assert_eq!(t.transport, TransportMode::Plane);
        assert_eq!(t.impact_level, ImpactLevel::High);
        assert_eq!(t.distance, 839.0);
    }

    #[test]
    fn test_clear_removes_file() {
        let (mut store, _dir) = test_store();
        store.save_trips(&TripHistory::new().with_trip(trip("A", TransportMode::Bike))).unwrap();
        assert!(store.path().exists());
        store.clear_trips().unwrap();
        assert!(!store.path().exists());
        // clearing twice is fine
        store.clear_trips().unwrap();
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.load_trips().is_empty());
        let history = TripHistory::new().with_trip(trip("A", TransportMode::Train));
        store.save_trips(&history).unwrap();
        assert_eq!(store.load_trips(), history);
        store.clear_trips().unwrap();
        assert!(store.raw().is_none());
    }

    #[test]
    fn test_memory_store_corrupt() {
        let store = MemoryStore::with_raw("[1, 2, 3]");
        assert!(store.load_trips().is_empty());
    }
}

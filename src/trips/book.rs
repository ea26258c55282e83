//! The live trip history paired with the store it is persisted to.

use super::store::{StoreError, TripStore};
use super::types::{Trip, TripHistory};

pub struct TripBook<S: TripStore> {
    store: S,
    history: TripHistory,
}

impl<S: TripStore> TripBook<S> {
    /// Load the persisted history (empty if absent or unreadable).
    pub fn open(store: S) -> Self {
        let history = store.load_trips();
        log::debug!("loaded {} trips", history.len());
        Self { store, history }
    }

    pub fn history(&self) -> &TripHistory {
        &self.history
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Append and persist. The in-memory history only changes once the save
    /// went through.
    pub fn record(&mut self, trip: Trip) -> Result<(), StoreError> {
        let next = self.history.clone().with_trip(trip);
        self.store.save_trips(&next)?;
        self.history = next;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.store.clear_trips()?;
        self.history = std::mem::take(&mut self.history).cleared();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impact::ImpactLevel;
    use crate::transport::TransportMode;
    use crate::trips::store::MemoryStore;
    use chrono::Utc;

    struct FailingStore;

    impl TripStore for FailingStore {
        fn load_trips(&self) -> TripHistory {
            TripHistory::new()
        }
        fn save_trips(&mut self, _: &TripHistory) -> Result<(), StoreError> {
            Err(StoreError::Io {
                path: "/dev/full".into(),
                source: std::io::Error::other("disk full"),
            })
        }
        fn clear_trips(&mut self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    fn trip(n: u32) -> Trip {
        Trip {
            origin: format!("Cidade {}", n),
            destination: "Recife".into(),
            distance: 100.0,
            transport: TransportMode::Bus,
            passengers: 1,
            co2_total: 8.9,
            co2_per_person: 8.9,
            impact_level: ImpactLevel::Low,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_record_persists() {
        let mut book = TripBook::open(MemoryStore::new());
        book.record(trip(1)).unwrap();
        book.record(trip(2)).unwrap();
        assert_eq!(book.history().len(), 2);
        assert_eq!(book.store().load_trips(), *book.history());
    }

    #[test]
    fn test_record_caps_persisted_history() {
        let mut book = TripBook::open(MemoryStore::new());
        for n in 0..51 {
            book.record(trip(n)).unwrap();
        }
        let persisted = book.store().load_trips();
        assert_eq!(persisted.len(), 50);
        assert_eq!(persisted.trips()[0].origin, "Cidade 1");
        assert_eq!(persisted.latest().unwrap().origin, "Cidade 50");
    }

    #[test]
    fn test_reopen_sees_saved_trips() {
        let mut book = TripBook::open(MemoryStore::new());
        book.record(trip(7)).unwrap();
        let store = book.store().clone();
        let reopened = TripBook::open(store);
        assert_eq!(reopened.history(), book.history());
    }

    #[test]
    fn test_failed_save_leaves_history_untouched() {
        let mut book = TripBook::open(FailingStore);
        assert!(book.record(trip(1)).is_err());
        assert!(book.history().is_empty());
    }

    #[test]
    fn test_clear() {
        let mut book = TripBook::open(MemoryStore::new());
        book.record(trip(1)).unwrap();
        book.clear().unwrap();
        assert!(book.history().is_empty());
        assert!(book.store().raw().is_none());
    }
}

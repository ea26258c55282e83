//! Trip records and the bounded trip history.

use crate::impact::ImpactLevel;
use crate::transport::TransportMode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of trips kept in the history.
pub const HISTORY_LIMIT: usize = 50;

/// One calculated trip. Field names follow the persisted JSON layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub origin: String,
    pub destination: String,
    pub distance: f64,
    pub transport: TransportMode,
    pub passengers: u32,
    pub co2_total: f64,
    pub co2_per_person: f64,
    pub impact_level: ImpactLevel,
    pub timestamp: DateTime<Utc>,
}

/// Trips in insertion order, oldest first, at most [`HISTORY_LIMIT`] long.
///
/// Updates are by value: [`TripHistory::with_trip`] and
/// [`TripHistory::cleared`] return the new history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripHistory {
    trips: Vec<Trip>,
}

impl TripHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored trips, keeping only the most recent
    /// [`HISTORY_LIMIT`].
    pub fn from_trips(mut trips: Vec<Trip>) -> Self {
        if trips.len() > HISTORY_LIMIT {
            trips.drain(..trips.len() - HISTORY_LIMIT);
        }
        Self { trips }
    }

    /// Append a trip, evicting the oldest entries beyond the limit.
    pub fn with_trip(mut self, trip: Trip) -> Self {
        self.trips.push(trip);
        Self::from_trips(self.trips)
    }

    pub fn cleared(self) -> Self {
        Self::new()
    }

    /// Oldest first.
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// Most recent first, as displayed.
    pub fn newest_first(&self) -> impl Iterator<Item = &Trip> {
        self.trips.iter().rev()
    }

    pub fn latest(&self) -> Option<&Trip> {
        self.trips.last()
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

//! Trip planning: turns raw form input into a validated plan, and a plan
//! into the full report for one trip.

use crate::calculator::{self, Emissions};
use crate::error::TripError;
use crate::impact::Impact;
use crate::routes;
use crate::transport::TransportMode;
use crate::trips::Trip;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entered and known distances may differ by this much before the known
/// distance is offered instead.
pub const SUGGESTION_TOLERANCE_KM: f64 = 100.0;

/// Raw form fields, as typed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripForm {
    pub origin: String,
    pub destination: String,
    pub distance: String,
    pub transport: String,
    pub passengers: String,
}

/// The route table knows a distance well away from the entered one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceSuggestion {
    pub origin: String,
    pub destination: String,
    pub entered_distance: f64,
    pub known_distance: u32,
}

impl DistanceSuggestion {
    pub fn prompt(&self) -> String {
        format!(
            "A distância típica entre {} e {} é de aproximadamente {} km. Deseja usar este valor?",
            self.origin, self.destination, self.known_distance
        )
    }
}

/// A validated trip, ready to be calculated.
#[derive(Debug, Clone, PartialEq)]
pub struct TripPlan {
    pub origin: String,
    pub destination: String,
    pub distance: f64,
    pub transport: TransportMode,
    pub passengers: u32,
    pub suggestion: Option<DistanceSuggestion>,
}

/// Everything shown after a successful calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripReport {
    pub trip: Trip,
    pub transport_name: &'static str,
    pub emissions: Emissions,
    pub impact: Impact,
    pub recommendations: &'static [&'static str],
    pub co2_total_display: String,
    pub co2_per_person_display: String,
}

/// Validate a form. Checks run in order: origin and destination, transport
/// presence, distance, passengers, transport identifier.
pub fn plan_trip(form: &TripForm) -> Result<TripPlan, TripError> {
    let origin = form.origin.trim();
    let destination = form.destination.trim();
    if origin.is_empty() || destination.is_empty() {
        return Err(TripError::MissingEndpoints);
    }

    let transport = form.transport.trim();
    if transport.is_empty() {
        return Err(TripError::MissingTransport);
    }

    let distance = parse_distance(&form.distance)?;
    let passengers = parse_passengers(&form.passengers)?;

    let transport: TransportMode = transport
        .parse()
        .map_err(|_| TripError::InvalidTransport(transport.to_string()))?;

    let suggestion = routes::get_route_distance(origin, destination)
        .filter(|&known| (distance - known as f64).abs() > SUGGESTION_TOLERANCE_KM)
        .map(|known| DistanceSuggestion {
            origin: origin.to_string(),
            destination: destination.to_string(),
            entered_distance: distance,
            known_distance: known,
        });

    Ok(TripPlan {
        origin: origin.to_string(),
        destination: destination.to_string(),
        distance,
        transport,
        passengers,
        suggestion,
    })
}

pub fn parse_distance(raw: &str) -> Result<f64, TripError> {
    let distance: f64 = raw.trim().parse().map_err(|_| TripError::InvalidDistance)?;
    if !distance.is_finite() || distance <= 0.0 {
        return Err(TripError::InvalidDistance);
    }
    Ok(distance)
}

pub fn parse_passengers(raw: &str) -> Result<u32, TripError> {
    let passengers: i64 = raw.trim().parse().map_err(|_| TripError::InvalidPassengers)?;
    if passengers <= 0 {
        return Err(TripError::InvalidPassengers);
    }
    u32::try_from(passengers).map_err(|_| TripError::InvalidPassengers)
}

impl TripPlan {
    /// Replace the entered distance with the known one. Returns whether a
    /// suggestion was applied.
    pub fn use_suggested_distance(&mut self) -> bool {
        match self.suggestion.take() {
            Some(s) => {
                self.distance = s.known_distance as f64;
                true
            }
            None => false,
        }
    }

    pub fn into_report(self, timestamp: DateTime<Utc>) -> TripReport {
        let emissions = calculator::emissions_for(self.distance, self.transport, self.passengers);
        let level = calculator::impact_level(emissions.per_person);

        let trip = Trip {
            origin: self.origin,
            destination: self.destination,
            distance: self.distance,
            transport: self.transport,
            passengers: self.passengers,
            co2_total: emissions.total,
            co2_per_person: emissions.per_person,
            impact_level: level,
            timestamp,
        };

        TripReport {
            trip,
            transport_name: self.transport.display_name(),
            emissions,
            impact: level.into(),
            recommendations: self.transport.recommendations(),
            co2_total_display: calculator::format_co2(emissions.total),
            co2_per_person_display: calculator::format_co2(emissions.per_person),
        }
    }
}

//! The emission calculator: emissions per trip, impact classification,
//! comparisons and aggregate statistics.
//!
//! Everything here is pure. Distances and passenger counts are assumed to be
//! validated by the caller (see [`crate::planner`]).

use crate::error::TripError;
use crate::impact::{self, Impact, ImpactLevel};
use crate::transport::TransportMode;
use crate::trips::Trip;
use serde::Serialize;
use std::collections::BTreeMap;

/// Trees needed to absorb 1 kg of CO2 over a year.
pub const TREES_PER_KG: f64 = 0.021;
/// Kilometres driven by an average car per kg of CO2.
pub const CAR_KM_PER_KG: f64 = 5.2;

/// Emissions breakdown for one trip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Emissions {
    pub total: f64,
    pub per_person: f64,
    pub transport: TransportMode,
    pub distance: f64,
    pub passengers: u32,
}

/// Compute emissions for a transport identifier.
pub fn calculate_co2(distance: f64, transport: &str, passengers: u32) -> Result<Emissions, TripError> {
    let mode: TransportMode = transport
        .parse()
        .map_err(|_| TripError::InvalidTransport(transport.to_string()))?;
    Ok(emissions_for(distance, mode, passengers))
}

pub fn emissions_for(distance: f64, transport: TransportMode, passengers: u32) -> Emissions {
    let total = distance * transport.emission_factor();
    Emissions {
        total,
        per_person: total / passengers as f64,
        transport,
        distance,
        passengers,
    }
}

pub fn impact_level(per_person: f64) -> ImpactLevel {
    impact::classify(per_person)
}

/// Advice for a transport identifier; empty if unknown.
pub fn recommendations(transport: &str) -> &'static [&'static str] {
    transport
        .parse::<TransportMode>()
        .map(TransportMode::recommendations)
        .unwrap_or(&[])
}

/// Display label for a transport identifier, or the identifier itself.
pub fn transport_name(transport: &str) -> String {
    transport
        .parse::<TransportMode>()
        .map(|m| m.display_name().to_string())
        .unwrap_or_else(|_| transport.to_string())
}

/// Illustrative equivalences for an amount of CO2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparisons {
    pub trees_needed: u64,
    pub km_car_equivalent: u64,
}

pub fn comparisons(total_co2: f64) -> Comparisons {
    Comparisons {
        trees_needed: (total_co2 * TREES_PER_KG).ceil() as u64,
        km_car_equivalent: (total_co2 * CAR_KM_PER_KG).round() as u64,
    }
}

/// One row of a side-by-side transport comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportComparison {
    pub name: &'static str,
    pub total: f64,
    pub per_person: f64,
    pub impact: Impact,
}

/// The same trip evaluated for every transport mode, keyed in table order.
pub fn compare_transports(distance: f64, passengers: u32) -> BTreeMap<TransportMode, TransportComparison> {
    TransportMode::ALL
        .iter()
        .map(|&mode| {
            let e = emissions_for(distance, mode, passengers);
            let row = TransportComparison {
                name: mode.display_name(),
                total: e.total,
                per_person: e.per_person,
                impact: impact_level(e.per_person).into(),
            };
            (mode, row)
        })
        .collect()
}

/// Aggregates over a trip list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_trips: usize,
    #[serde(rename = "totalCO2")]
    pub total_co2: f64,
    #[serde(rename = "averageCO2")]
    pub average_co2: f64,
    pub total_distance: f64,
    pub most_used_transport: TransportMode,
    pub comparisons: Comparisons,
}

impl Statistics {
    pub fn most_used_transport_name(&self) -> &'static str {
        self.most_used_transport.display_name()
    }
}

/// `None` for an empty list. Ties for the most used mode go to the mode seen
/// first.
pub fn calculate_statistics(trips: &[Trip]) -> Option<Statistics> {
    let first = trips.first()?;

    let total_co2: f64 = trips.iter().map(|t| t.co2_total).sum();
    let total_distance: f64 = trips.iter().map(|t| t.distance).sum();

    // (mode, count) in first-seen order
    let mut counts: Vec<(TransportMode, usize)> = Vec::new();
    for trip in trips {
        match counts.iter_mut().find(|(mode, _)| *mode == trip.transport) {
            Some((_, n)) => *n += 1,
            None => counts.push((trip.transport, 1)),
        }
    }
    let mut most_used = (first.transport, 0);
    for &(mode, n) in &counts {
        if n > most_used.1 {
            most_used = (mode, n);
        }
    }

    Some(Statistics {
        total_trips: trips.len(),
        total_co2,
        average_co2: total_co2 / trips.len() as f64,
        total_distance,
        most_used_transport: most_used.0,
        comparisons: comparisons(total_co2),
    })
}

/// Human-readable CO2 amount: grams below 1 kg, tonnes from 1000 kg.
pub fn format_co2(value: f64) -> String {
    if value < 1.0 {
        format!("{} g", to_fixed(value * 1000.0, 0))
    } else if value >= 1000.0 {
        format!("{} toneladas", to_fixed(value / 1000.0, 2))
    } else {
        format!("{} kg", to_fixed(value, 2))
    }
}

/// Fixed-point text with `digits` decimals. Values exactly halfway between two
/// candidates round away from zero; everything else rounds to nearest.
fn to_fixed(value: f64, digits: u32) -> String {
    let Some(lower) = halfway_floor(value.abs(), digits) else {
        return format!("{:.*}", digits as usize, value);
    };
    let n = lower + 1;
    let sign = if value < 0.0 { "-" } else { "" };
    if digits == 0 {
        return format!("{}{}", sign, n);
    }
    let scale = 10u128.pow(digits);
    format!("{}{}.{:0width$}", sign, n / scale, n % scale, width = digits as usize)
}

/// If `value * 10^digits` has a fractional part of exactly one half, its
/// integer part. Works on the exact binary value, not a rounded product.
fn halfway_floor(value: f64, digits: u32) -> Option<u128> {
    if !value.is_finite() || value == 0.0 {
        return None;
    }
    let bits = value.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    // value == mantissa * 2^exponent
    let (mantissa, exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased - 1075)
    };
    if exponent >= 0 {
        return None;
    }
    let shift = exponent.unsigned_abs();
    if shift > 127 {
        return None;
    }
    let scaled = (mantissa as u128).checked_mul(10u128.checked_pow(digits)?)?;
    let mask = (1u128 << shift) - 1;
    if scaled & mask == 1u128 << (shift - 1) {
        Some(scaled >> shift)
    } else {
        None
    }
}

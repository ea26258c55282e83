//! EcoTrip — CO2 emissions calculator for trips.
//!
//! The core is pure: [`calculator`] maps a trip to its emissions, impact band
//! and statistics, and [`routes`] knows a handful of city-pair distances.
//! [`trips`] holds the bounded history and its persistence, [`planner`]
//! validates form input, and [`controller`] ties them to an injected
//! presenter. [`server`] exposes the same operations as a JSON API.

pub mod calculator;
pub mod controller;
pub mod error;
pub mod impact;
pub mod planner;
pub mod report;
pub mod routes;
pub mod server;
pub mod transport;
pub mod trips;

pub use error::TripError;
pub use transport::TransportMode;

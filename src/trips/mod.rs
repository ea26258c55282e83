//! Trip history: records, the bounded history value, and its persistence.

pub mod book;
pub mod store;
pub mod types;

pub use book::TripBook;
pub use store::{JsonFileStore, MemoryStore, StoreError, TripStore};
pub use types::{Trip, TripHistory, HISTORY_LIMIT};

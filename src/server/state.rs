use crate::trips::{JsonFileStore, TripBook};
use std::sync::Mutex;

pub struct AppState {
    pub book: Mutex<TripBook<JsonFileStore>>,
}

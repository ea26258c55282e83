use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, MutexGuard};
use std::time::Instant;

use crate::calculator::{self, Statistics, TransportComparison};
use crate::error::TripError;
use crate::planner::{self, DistanceSuggestion, TripForm, TripReport};
use crate::routes::{self, RouteInfo, RouteSuggestion};
use crate::transport::{transport_list, TransportInfo, TransportMode};
use crate::trips::{JsonFileStore, Trip, TripBook};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

#[derive(Debug)]
pub struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

impl From<TripError> for ApiError {
    fn from(e: TripError) -> Self {
        let status = match &e {
            e if e.is_validation() => StatusCode::BAD_REQUEST,
            TripError::EmptyHistory => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            log::error!("{}", e);
        }
        api_error(status, e.to_string())
    }
}

fn lock_book(state: &AppState) -> Result<MutexGuard<'_, TripBook<JsonFileStore>>, ApiError> {
    state
        .book
        .lock()
        .map_err(|_| api_error(StatusCode::INTERNAL_SERVER_ERROR, "trip history unavailable"))
}

fn millis(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

// ─── GET /api/transports ─────────────────────────────────────────

pub async fn transports() -> Json<Vec<TransportInfo>> {
    Json(transport_list())
}

// ─── /api/trips ──────────────────────────────────────────────────

/// Form fields as posted by the browser. Numbers may arrive as JSON numbers
/// or as the raw text of the input element.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TripPayload {
    pub origin: String,
    pub destination: String,
    pub distance: Value,
    pub transport: String,
    pub passengers: Value,
    pub use_suggested_distance: bool,
}

fn field_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl TripPayload {
    fn to_form(&self) -> TripForm {
        TripForm {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            distance: field_text(&self.distance),
            transport: self.transport.clone(),
            passengers: field_text(&self.passengers),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripResponse {
    pub report: TripReport,
    /// The known distance for this route, when it differed from the entered
    /// one by more than the tolerance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<DistanceSuggestion>,
    pub suggestion_applied: bool,
}

pub async fn create_trip(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TripPayload>,
) -> Result<(StatusCode, Json<CreateTripResponse>), ApiError> {
    let start = Instant::now();

    let mut plan = planner::plan_trip(&payload.to_form())?;
    let suggestion = plan.suggestion.clone();
    let suggestion_applied = payload.use_suggested_distance && plan.use_suggested_distance();
    let report = plan.into_report(Utc::now());

    lock_book(&state)?
        .record(report.trip.clone())
        .map_err(TripError::from)?;

    log::info!(
        "POST /api/trips {} -> {} {} ({:.1}ms)",
        report.trip.transport,
        report.trip.destination,
        report.co2_total_display,
        millis(start),
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateTripResponse {
            report,
            suggestion,
            suggestion_applied,
        }),
    ))
}

/// Most recent first.
pub async fn list_trips(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Trip>>, ApiError> {
    let book = lock_book(&state)?;
    Ok(Json(book.history().newest_first().cloned().collect()))
}

pub async fn clear_trips(State(state): State<Arc<AppState>>) -> Result<StatusCode, ApiError> {
    let mut book = lock_book(&state)?;
    if book.history().is_empty() {
        return Err(TripError::EmptyHistory.into());
    }
    book.clear().map_err(TripError::from)?;
    log::info!("DELETE /api/trips -> cleared");
    Ok(StatusCode::NO_CONTENT)
}

// ─── GET /api/statistics ─────────────────────────────────────────

/// `null` while the history is empty.
pub async fn statistics(State(state): State<Arc<AppState>>) -> Result<Json<Option<Statistics>>, ApiError> {
    let book = lock_book(&state)?;
    Ok(Json(calculator::calculate_statistics(book.history().trips())))
}

// ─── GET /api/compare ────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub distance: Option<String>,
    pub passengers: Option<String>,
}

pub async fn compare(
    Query(params): Query<CompareQuery>,
) -> Result<Json<BTreeMap<TransportMode, TransportComparison>>, ApiError> {
    let distance = planner::parse_distance(params.distance.as_deref().unwrap_or(""))?;
    let passengers = planner::parse_passengers(params.passengers.as_deref().unwrap_or("1"))?;
    Ok(Json(calculator::compare_transports(distance, passengers)))
}

// ─── /api/routes ─────────────────────────────────────────────────

pub async fn route_table() -> Json<Vec<RouteInfo>> {
    Json(routes::route_list())
}

#[derive(Debug, Deserialize)]
pub struct RouteDistanceQuery {
    pub origin: Option<String>,
    pub destination: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RouteDistanceResponse {
    pub origin: String,
    pub destination: String,
    pub distance: Option<u32>,
}

pub async fn route_distance(
    Query(params): Query<RouteDistanceQuery>,
) -> Result<Json<RouteDistanceResponse>, ApiError> {
    let origin = params.origin.as_deref().unwrap_or("").trim();
    let destination = params.destination.as_deref().unwrap_or("").trim();
    if origin.is_empty() || destination.is_empty() {
        return Err(TripError::MissingEndpoints.into());
    }
    Ok(Json(RouteDistanceResponse {
        origin: origin.to_string(),
        destination: destination.to_string(),
        distance: routes::get_route_distance(origin, destination),
    }))
}

#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    pub city: Option<String>,
}

pub async fn route_suggestions(
    Query(params): Query<SuggestQuery>,
) -> Result<Json<Vec<RouteSuggestion>>, ApiError> {
    let city = params.city.as_deref().unwrap_or("").trim();
    if city.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Missing 'city' parameter"));
    }
    Ok(Json(routes::suggest_routes(city)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn test_state() -> (Arc<AppState>, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::at(dir.path().join("history.json"));
        let state = Arc::new(AppState {
            book: Mutex::new(TripBook::open(store)),
        });
        (state, dir)
    }

    fn payload(value: Value) -> Json<TripPayload> {
        Json(serde_json::from_value(value).unwrap())
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let (state, _dir) = test_state();
        let (status, Json(resp)) = create_trip(
            State(state.clone()),
            payload(json!({
                "origin": "Sao Paulo", "destination": "Curitiba",
                "distance": 408, "transport": "car", "passengers": "2"
            })),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert!(resp.suggestion.is_none());
        assert_eq!(resp.report.trip.passengers, 2);

        let Json(trips) = list_trips(State(state.clone())).await.unwrap();
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].destination, "Curitiba");
    }

    #[tokio::test]
    async fn test_create_with_suggestion() {
        let (state, _dir) = test_state();
        let (_, Json(resp)) = create_trip(
            State(state.clone()),
            payload(json!({
                "origin": "Rio de Janeiro", "destination": "São Paulo",
                "distance": "700", "transport": "bus", "passengers": 1,
                "useSuggestedDistance": true
            })),
        )
        .await
        .unwrap();
        assert!(resp.suggestion_applied);
        assert_eq!(resp.suggestion.unwrap().known_distance, 430);
        assert_eq!(resp.report.trip.distance, 430.0);
    }

    #[tokio::test]
    async fn test_create_invalid_is_bad_request() {
        let (state, _dir) = test_state();
        let err = create_trip(
            State(state.clone()),
            payload(json!({ "origin": "A", "destination": "B", "distance": 0, "transport": "car", "passengers": 1 })),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);

        let err = create_trip(State(state.clone()), payload(json!({}))).await.unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);

        let Json(trips) = list_trips(State(state)).await.unwrap();
        assert!(trips.is_empty());
    }

    #[tokio::test]
    async fn test_clear() {
        let (state, _dir) = test_state();
        let err = clear_trips(State(state.clone())).await.unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);

        create_trip(
            State(state.clone()),
            payload(json!({ "origin": "A", "destination": "B", "distance": 5, "transport": "bike", "passengers": 1 })),
        )
        .await
        .unwrap();
        assert_eq!(clear_trips(State(state.clone())).await.unwrap(), StatusCode::NO_CONTENT);
        let Json(stats) = statistics(State(state)).await.unwrap();
        assert!(stats.is_none());
    }

    #[tokio::test]
    async fn test_statistics() {
        let (state, _dir) = test_state();
        for transport in ["train", "plane", "train"] {
            create_trip(
                State(state.clone()),
                payload(json!({ "origin": "A", "destination": "B", "distance": 100, "transport": transport, "passengers": 1 })),
            )
            .await
            .unwrap();
        }
        let Json(stats) = statistics(State(state)).await.unwrap();
        let stats = stats.unwrap();
        assert_eq!(stats.total_trips, 3);
        assert_eq!(stats.most_used_transport, TransportMode::Train);
    }

    #[tokio::test]
    async fn test_json_fields_are_camel_case() {
        let (state, _dir) = test_state();
        let (_, Json(resp)) = create_trip(
            State(state.clone()),
            payload(json!({
                "origin": "Rio de Janeiro", "destination": "São Paulo",
                "distance": 700, "transport": "car", "passengers": 2
            })),
        )
        .await
        .unwrap();
        let body = serde_json::to_value(&resp).unwrap();
        assert_eq!(body["suggestionApplied"], json!(false));
        assert_eq!(body["suggestion"]["knownDistance"], json!(430));
        assert!(body["report"]["emissions"]["perPerson"].is_number());
        assert!(body["report"]["co2TotalDisplay"].is_string());
        assert!(body["report"]["trip"]["co2PerPerson"].is_number());
        assert!(body["report"].get("transport_name").is_none());

        let Json(stats) = statistics(State(state)).await.unwrap();
        let body = serde_json::to_value(stats.unwrap()).unwrap();
        for key in ["totalTrips", "totalCO2", "averageCO2", "totalDistance", "mostUsedTransport"] {
            assert!(body.get(key).is_some(), "missing {}", key);
        }
        assert!(body["comparisons"]["treesNeeded"].is_number());
        assert!(body["comparisons"]["kmCarEquivalent"].is_number());

        let Json(transports) = transports().await;
        let body = serde_json::to_value(&transports).unwrap();
        assert!(body[0]["emissionFactor"].is_number());
    }

    #[tokio::test]
    async fn test_compare() {
        let query = CompareQuery { distance: Some("250".into()), passengers: None };
        let Json(table) = compare(Query(query)).await.unwrap();
        assert_eq!(table.len(), 5);

        let query = CompareQuery { distance: Some("-3".into()), passengers: None };
        assert_eq!(compare(Query(query)).await.unwrap_err().0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_route_endpoints() {
        let q = RouteDistanceQuery { origin: Some("curitiba".into()), destination: Some("Florianópolis".into()) };
        let Json(resp) = route_distance(Query(q)).await.unwrap();
        assert_eq!(resp.distance, Some(300));

        let q = RouteDistanceQuery { origin: Some("curitiba".into()), destination: None };
        assert_eq!(route_distance(Query(q)).await.unwrap_err().0, StatusCode::BAD_REQUEST);

        let Json(suggestions) = route_suggestions(Query(SuggestQuery { city: Some("Goiânia".into()) })).await.unwrap();
        assert_eq!(suggestions.len(), 1);

        let Json(all) = route_table().await;
        assert_eq!(all.len(), 23);
    }
}

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use skylane_core::flight::{Flight, FlightQuery, NewFlight};
use skylane_core::CoreError;
use tracing::info;

use crate::{error::AppError, extract::{AppForm, AppPath}, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/add_flights", get(list_flights).post(add_flight))
        .route("/search", post(search_flights))
        .route(
            "/remove_flight/{flight_id}",
            get(remove_flight_via_get).post(remove_flight),
        )
}

/// GET /add_flights
async fn list_flights(State(state): State<AppState>) -> Result<Json<Vec<Flight>>, AppError> {
    Ok(Json(state.flights.list_flights().await?))
}

/// POST /add_flights
async fn add_flight(
    State(state): State<AppState>,
    AppForm(flight): AppForm<NewFlight>,
) -> Result<impl IntoResponse, AppError> {
    let flight = state.flights.add_flight(&flight).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Flight added successfully",
            "flight": flight,
        })),
    ))
}

/// POST /search
async fn search_flights(
    State(state): State<AppState>,
    AppForm(query): AppForm<FlightQuery>,
) -> Result<Json<Vec<Flight>>, AppError> {
    let results = state.flights.search_flights(&query).await?;
    info!(
        "Search {} -> {} on {}: {} results",
        query.source,
        query.destination,
        query.date,
        results.len()
    );
    Ok(Json(results))
}

/// POST /remove_flight/{flight_id}
async fn remove_flight(
    State(state): State<AppState>,
    AppPath(flight_id): AppPath<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !state.flights.remove_flight(flight_id).await? {
        return Err(CoreError::NotFound(format!("Flight {} not found", flight_id)).into());
    }

    Ok(Json(json!({
        "message": "Flight removed successfully",
        "flight_id": flight_id,
    })))
}

/// GET /remove_flight/{flight_id}: deletion only happens through POST.
async fn remove_flight_via_get() -> AppError {
    AppError::MethodNotAllowed("Method not allowed!".to_string())
}

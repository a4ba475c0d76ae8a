use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use skylane_core::booking::{BookingDetails, NewBooking};
use skylane_core::flight::Flight;
use skylane_core::CoreError;
use tracing::info;

use crate::state::AppState;
use crate::error::AppError;
use crate::extract::{AppForm, AppPath};

#[derive(Debug, Deserialize)]
struct PassengerForm {
    name: String,
    email: String,
    phone: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/book/{flight_id}", get(show_flight).post(book_flight))
        .route("/book_flights", get(list_bookable_flights).post(book_from_form))
        .route("/bookings", get(list_bookings))
        .route("/clear_bookings", post(clear_bookings))
}

/// GET /book/{flight_id}
async fn show_flight(
    State(state): State<AppState>,
    AppPath(flight_id): AppPath<i64>,
) -> Result<Json<Flight>, AppError> {
    let flight = state
        .flights
        .get_flight(flight_id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("Flight {} not found", flight_id)))?;
    Ok(Json(flight))
}

/// POST /book/{flight_id}
async fn book_flight(
    State(state): State<AppState>,
    AppPath(flight_id): AppPath<i64>,
    AppForm(passenger): AppForm<PassengerForm>,
) -> Result<impl IntoResponse, AppError> {
    let booking = NewBooking {
        flight_id,
        name: passenger.name,
        email: passenger.email,
        phone: passenger.phone,
    };
    create_booking(&state, booking).await
}

/// GET /book_flights
async fn list_bookable_flights(State(state): State<AppState>) -> Result<Json<Vec<Flight>>, AppError> {
    Ok(Json(state.flights.list_flights().await?))
}

/// POST /book_flights
async fn book_from_form(
    State(state): State<AppState>,
    AppForm(booking): AppForm<NewBooking>,
) -> Result<impl IntoResponse, AppError> {
    create_booking(&state, booking).await
}

async fn create_booking(state: &AppState, booking: NewBooking) -> Result<impl IntoResponse, AppError> {
    let booking = state.bookings.add_booking(&booking).await.map_err(|e| {
        if let CoreError::UnknownFlight(id) = &e {
            info!("Rejected booking for unknown flight {}", id);
        }
        AppError::from(e)
    })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Thank you for booking",
            "booking": booking,
        })),
    ))
}

/// GET /bookings
async fn list_bookings(State(state): State<AppState>) -> Result<Json<Vec<BookingDetails>>, AppError> {
    Ok(Json(state.bookings.list_bookings().await?))
}

/// POST /clear_bookings
async fn clear_bookings(State(state): State<AppState>) -> Result<Redirect, AppError> {
    state.bookings.clear_bookings().await?;
    Ok(Redirect::to("/bookings"))
}

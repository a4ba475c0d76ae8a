use async_trait::async_trait;
use crate::booking::{BookingDetails, Booking, NewBooking};
use crate::flight::{Flight, FlightQuery, NewFlight};
use crate::user::{User, UserSummary};
use crate::CoreResult;

/// Repository trait for flight listings
#[async_trait]
pub trait FlightRepository: Send + Sync {
    async fn add_flight(&self, flight: &NewFlight) -> CoreResult<Flight>;

    /// All flights in insertion order.
    async fn list_flights(&self) -> CoreResult<Vec<Flight>>;

    async fn search_flights(&self, query: &FlightQuery) -> CoreResult<Vec<Flight>>;

    async fn get_flight(&self, id: i64) -> CoreResult<Option<Flight>>;

    /// Deletes the flight and, through the cascade, its bookings.
    /// Returns `false` when no flight had that id.
    async fn remove_flight(&self, id: i64) -> CoreResult<bool>;

    async fn count_flights(&self) -> CoreResult<i64>;
}

/// Repository trait for bookings
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Fails with `CoreError::UnknownFlight` when `flight_id` is not a listed flight.
    async fn add_booking(&self, booking: &NewBooking) -> CoreResult<Booking>;

    async fn list_bookings(&self) -> CoreResult<Vec<BookingDetails>>;

    /// Removes every booking row and returns how many were deleted.
    async fn clear_bookings(&self) -> CoreResult<u64>;

    async fn count_bookings(&self) -> CoreResult<i64>;
}

/// Repository trait for user accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `CoreError::UsernameTaken` without touching existing rows.
    async fn create_user(&self, username: &str, password: &str) -> CoreResult<User>;

    async fn authenticate(&self, username: &str, password: &str) -> CoreResult<Option<User>>;

    async fn list_users(&self) -> CoreResult<Vec<UserSummary>>;
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub flight_id: i64,
    pub name: String,
    pub email: String,
    // Kept as text so leading zeros and formatting survive.
    pub phone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBooking {
    pub flight_id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// A booking joined with the flight it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingDetails {
    pub id: i64,
    pub source: String,
    pub destination: String,
    pub date: String,
    pub price: f64,
    pub name: String,
}

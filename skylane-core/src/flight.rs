use serde::{Deserialize, Serialize};

/// A listed flight. `date` is free-form text, never parsed as a calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub id: i64,
    pub source: String,
    pub destination: String,
    pub date: String,
    pub price: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewFlight {
    pub source: String,
    pub destination: String,
    pub date: String,
    pub price: f64,
}

/// Exact-match filter: all three fields must be equal.
#[derive(Debug, Clone, Deserialize)]
pub struct FlightQuery {
    pub source: String,
    pub destination: String,
    pub date: String,
}

impl FlightQuery {
    pub fn matches(&self, flight: &Flight) -> bool {
        flight.source == self.source
            && flight.destination == self.destination
            && flight.date == self.date
    }
}

use std::sync::Arc;
use subtle::ConstantTimeEq;
use skylane_core::pii::Masked;
use skylane_core::repository::{BookingRepository, FlightRepository, UserRepository};
use skylane_store::app_config::{AdminConfig, AuthConfig};
use skylane_store::{DbClient, SqliteBookingRepository, SqliteFlightRepository, SqliteUserRepository};

use crate::middleware::auth::SessionKeys;

#[derive(Clone, Debug)]
pub struct AdminCredentials {
    pub username: String,
    pub password: Masked<String>,
}

impl AdminCredentials {
    pub fn matches(&self, username: &str, password: &str) -> bool {
        let username_ok = self.username.as_bytes().ct_eq(username.as_bytes());
        let password_ok = self.password.expose().as_bytes().ct_eq(password.as_bytes());
        (username_ok & password_ok).into()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub flights: Arc<dyn FlightRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub users: Arc<dyn UserRepository>,
    pub sessions: Arc<SessionKeys>,
    pub admin: Arc<AdminCredentials>,
}

impl AppState {
    pub fn new(db: &DbClient, auth: &AuthConfig, admin: &AdminConfig) -> Self {
        Self {
            flights: Arc::new(SqliteFlightRepository::new(db.pool.clone())),
            bookings: Arc::new(SqliteBookingRepository::new(db.pool.clone())),
            users: Arc::new(SqliteUserRepository::new(db.pool.clone())),
            sessions: Arc::new(SessionKeys::new(&auth.session_secret, auth.session_expiration_seconds)),
            admin: Arc::new(AdminCredentials {
                username: admin.username.clone(),
                password: Masked(admin.password.clone()),
            }),
        }
    }
}

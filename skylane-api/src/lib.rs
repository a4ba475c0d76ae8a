use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod error;
pub mod extract;
pub mod flights;
pub mod middleware;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .merge(flights::routes())
        .merge(bookings::routes())
        .merge(auth::routes(state.clone()))
        .merge(admin::routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Json<Value> {
    Json(json!({
        "service": "skylane",
        "links": ["/search", "/book_flights", "/login", "/signup", "/admin/login"],
    }))
}

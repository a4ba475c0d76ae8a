use axum::{
    extract::State,
    middleware::from_fn_with_state,
    response::Redirect,
    routing::get,
    Extension, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};
use skylane_core::user::UserSummary;
use tracing::{info, warn};

use crate::{
    auth::CredentialsForm,
    error::AppError,
    extract::AppForm,
    middleware::auth::{removal_cookie, require_admin, session_cookie, Role, SessionClaims},
    state::AppState,
};

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/admin/dashboard", get(dashboard))
        .route("/user_table", get(user_table))
        .route_layer(from_fn_with_state(state, require_admin));

    Router::new()
        .route("/admin/login", get(login_view).post(login))
        .route("/admin/logout", get(logout))
        .merge(protected)
}

async fn login_view() -> Json<Value> {
    Json(json!({ "view": "admin_login", "error": null }))
}

/// POST /admin/login
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    AppForm(form): AppForm<CredentialsForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    if !state.admin.matches(&form.username, form.password.expose()) {
        warn!("Failed admin login for {}", form.username);
        return Err(AppError::AuthenticationError("Invalid username or password".to_string()));
    }

    let (claims, token) = state
        .sessions
        .issue(&form.username, Role::Admin)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    info!("Admin session {} started", claims.sid);

    Ok((jar.add(session_cookie(Role::Admin, token)), Redirect::to("/admin/dashboard")))
}

/// GET /admin/logout
async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(claims) = state.sessions.claims_in(&jar, Role::Admin) {
        info!("Admin session {} ended", claims.sid);
    }
    (jar.remove(removal_cookie(Role::Admin)), Redirect::to("/"))
}

/// GET /admin/dashboard
async fn dashboard(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<Json<Value>, AppError> {
    let flights = state.flights.count_flights().await?;
    let bookings = state.bookings.count_bookings().await?;
    let users = state.users.list_users().await?.len();

    Ok(Json(json!({
        "view": "admin_dashboard",
        "admin": claims.sub,
        "flights": flights,
        "bookings": bookings,
        "users": users,
    })))
}

/// GET /user_table
async fn user_table(State(state): State<AppState>) -> Result<Json<Vec<UserSummary>>, AppError> {
    Ok(Json(state.users.list_users().await?))
}

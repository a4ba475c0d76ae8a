use axum::{
    extract::{Query, State},
    middleware::from_fn_with_state,
    response::Redirect,
    routing::get,
    Extension, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::{json, Value};
use skylane_core::pii::Masked;
use tracing::{info, warn};

use crate::{
    error::AppError,
    extract::AppForm,
    middleware::auth::{removal_cookie, require_user, session_cookie, Role, SessionClaims},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: Masked<String>,
}

#[derive(Debug, Deserialize)]
struct LogoutParams {
    #[serde(default)]
    all: bool,
}

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/profile", get(profile))
        .route_layer(from_fn_with_state(state, require_user));

    Router::new()
        .route("/login", get(login_view).post(login))
        .route("/signup", get(signup_view).post(signup))
        .route("/logout", get(logout))
        .merge(protected)
}

async fn login_view() -> Json<Value> {
    Json(json!({ "view": "login", "error": null }))
}

async fn signup_view() -> Json<Value> {
    Json(json!({ "view": "signup", "error": null }))
}

fn start_session(state: &AppState, jar: CookieJar, username: &str) -> Result<CookieJar, AppError> {
    let (claims, token) = state
        .sessions
        .issue(username, Role::User)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    info!("User session {} started for {}", claims.sid, claims.sub);
    Ok(jar.add(session_cookie(Role::User, token)))
}

/// POST /login
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    AppForm(form): AppForm<CredentialsForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    let user = state
        .users
        .authenticate(&form.username, form.password.expose())
        .await?;

    match user {
        Some(user) => {
            let jar = start_session(&state, jar, &user.username)?;
            Ok((jar, Redirect::to("/book_flights")))
        }
        None => {
            warn!("Failed login for {}", form.username);
            Err(AppError::AuthenticationError("Invalid username or password".to_string()))
        }
    }
}

/// POST /signup
async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    AppForm(form): AppForm<CredentialsForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    let user = state
        .users
        .create_user(&form.username, form.password.expose())
        .await?;

    let jar = start_session(&state, jar, &user.username)?;
    Ok((jar, Redirect::to("/profile")))
}

/// GET /logout ends the user session; `?all=true` also ends the admin session.
async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<LogoutParams>,
) -> (CookieJar, Redirect) {
    if let Some(claims) = state.sessions.claims_in(&jar, Role::User) {
        info!("User session {} ended for {}", claims.sid, claims.sub);
    }

    let mut jar = jar.remove(removal_cookie(Role::User));
    if params.all {
        jar = jar.remove(removal_cookie(Role::Admin));
    }
    (jar, Redirect::to("/"))
}

/// GET /profile
async fn profile(Extension(claims): Extension<SessionClaims>) -> Json<Value> {
    Json(json!({ "view": "profile", "username": claims.sub }))
}

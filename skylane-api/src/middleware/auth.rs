use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::AppState;

pub const USER_COOKIE: &str = "user_session";
pub const ADMIN_COOKIE: &str = "admin_session";

// ============================================================================
// Session Claims
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Each role lives in its own cookie so one logout never ends the other.
    pub fn cookie_name(self) -> &'static str {
        match self {
            Role::User => USER_COOKIE,
            Role::Admin => ADMIN_COOKIE,
        }
    }

    pub fn login_path(self) -> &'static str {
        match self {
            Role::User => "/login",
            Role::Admin => "/admin/login",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    pub sub: String,
    pub role: Role,
    pub sid: Uuid,
    pub exp: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session token encoding failed: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),
    #[error("Session expiration of {0} seconds is out of range")]
    ExpirationOutOfRange(u64),
}

pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiration_seconds: u64,
}

impl SessionKeys {
    pub fn new(secret: &str, expiration_seconds: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiration_seconds,
        }
    }

    pub fn issue(&self, subject: &str, role: Role) -> Result<(SessionClaims, String), SessionError> {
        let exp = i64::try_from(self.expiration_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .and_then(|at| usize::try_from(at.timestamp()).ok())
            .ok_or(SessionError::ExpirationOutOfRange(self.expiration_seconds))?;

        let claims = SessionClaims {
            sub: subject.to_owned(),
            role,
            sid: Uuid::new_v4(),
            exp,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        Ok((claims, token))
    }

    /// Decodes the token and checks it was issued for `role`.
    pub fn verify(&self, token: &str, role: Role) -> Option<SessionClaims> {
        let data = decode::<SessionClaims>(token, &self.decoding, &Validation::default()).ok()?;
        (data.claims.role == role).then_some(data.claims)
    }

    pub fn claims_in(&self, jar: &CookieJar, role: Role) -> Option<SessionClaims> {
        jar.get(role.cookie_name())
            .and_then(|cookie| self.verify(cookie.value(), role))
    }
}

/// Browser-session cookie: no Max-Age, so it dies with the browser.
pub fn session_cookie(role: Role, token: String) -> Cookie<'static> {
    Cookie::build((role.cookie_name(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

pub fn removal_cookie(role: Role) -> Cookie<'static> {
    Cookie::build(role.cookie_name()).path("/").build()
}

// ============================================================================
// Authorization Gates
// ============================================================================

async fn require_role(
    role: Role,
    state: &AppState,
    jar: &CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, Redirect> {
    let claims = match state.sessions.claims_in(jar, role) {
        Some(claims) => claims,
        None => {
            tracing::debug!("No {:?} session for {}, redirecting", role, req.uri().path());
            return Err(Redirect::to(role.login_path()));
        }
    };

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

pub async fn require_user(
    State(state): State<AppState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Result<Response, Redirect> {
    require_role(Role::User, &state, &jar, req, next).await
}

pub async fn require_admin(
    State(state): State<AppState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Result<Response, Redirect> {
    require_role(Role::Admin, &state, &jar, req, next).await
}

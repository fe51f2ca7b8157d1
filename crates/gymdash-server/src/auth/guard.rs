use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;

use crate::auth::session;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Credential, GymProfile, Session};
use crate::routes::AppState;

pub const SESSION_COOKIE: &str = "gymdash_session";

/// What the guard does when the request carries no usable session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingSession {
    /// Abort the request and send the browser to the entry screen.
    Redirect,
    /// Hand back `None` and let the caller decide.
    Continue,
}

/// The signed-in gym, handed to every protected handler as a request extension.
#[derive(Debug, Clone)]
pub struct GymSession {
    pub gym: GymProfile,
    token: String,
    credential: Credential,
}

impl GymSession {
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Forgets the stored row once the backend has refused its credential.
    pub fn revoke(&self, pool: &DbPool) -> AppResult<()> {
        session::delete_session(pool, &self.token)
    }
}

impl TryFrom<Session> for GymSession {
    type Error = AppError;

    fn try_from(s: Session) -> Result<Self, Self::Error> {
        let credential = Credential::new(s.auth_token).ok_or(AppError::Unauthorized)?;
        Ok(Self {
            gym: GymProfile::from_details(&s.gym_details),
            token: s.token,
            credential,
        })
    }
}

pub fn resolve_session(
    pool: &DbPool,
    jar: &CookieJar,
    on_missing: MissingSession,
) -> AppResult<Option<GymSession>> {
    let found = match jar.get(SESSION_COOKIE) {
        Some(cookie) => session::find_session(pool, cookie.value())?,
        None => None,
    };

    match found {
        Some(s) => Ok(Some(s.try_into()?)),
        None if on_missing == MissingSession::Redirect => Err(AppError::Unauthorized),
        None => Ok(None),
    }
}

pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(session) = resolve_session(&state.db, &jar, MissingSession::Redirect)? else {
        return Err(AppError::Unauthorized);
    };

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .max_age(time::Duration::days(30))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE)
        .path("/")
        .max_age(time::Duration::ZERO)
        .http_only(true)
        .build()
}

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::auth::guard::{self, removal_cookie, session_cookie, MissingSession, SESSION_COOKIE};
use crate::auth::session;
use crate::backend::SignIn;
use crate::error::AppResult;
use crate::routes::{render, AppState};
use crate::services::forms::{LoginForm, SignupForm};
use crate::views::EntryPage;

const LOGIN_FAILED: &str = "Invalid email or password.";
const SIGNUP_FAILED: &str = "Could not create the account. Please try again.";

#[derive(Debug, Default, Deserialize)]
pub struct EntryQuery {
    pub mode: Option<String>,
}

pub async fn entry(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<EntryQuery>,
) -> AppResult<Response> {
    if guard::resolve_session(&state.db, &jar, MissingSession::Continue)?.is_some() {
        return Ok(Redirect::to("/dashboard").into_response());
    }

    let page = if query.mode.as_deref() == Some("signup") {
        EntryPage::signup(SignupForm::default(), "")
    } else {
        EntryPage::login("", "")
    };
    Ok(render(&page)?.into_response())
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let request = match form.validate() {
        Ok(r) => r,
        Err(e) => return Ok(render(&EntryPage::login(&form.email, e.to_string()))?.into_response()),
    };

    match state.backend.login(&request).await {
        Ok(sign_in) => start_session(&state, jar, sign_in),
        Err(e) => {
            tracing::info!("Login failed for {}: {e}", request.email_id);
            let page = EntryPage::login(&form.email, e.user_message(LOGIN_FAILED));
            Ok(render(&page)?.into_response())
        }
    }
}

pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SignupForm>,
) -> AppResult<Response> {
    let request = match form.validate() {
        Ok(r) => r,
        Err(e) => return Ok(render(&EntryPage::signup(form, e.to_string()))?.into_response()),
    };

    match state.backend.create_gym(&request).await {
        Ok(sign_in) => start_session(&state, jar, sign_in),
        Err(e) => {
            tracing::info!("Signup failed for {}: {e}", request.email_id);
            let message = e.user_message(SIGNUP_FAILED);
            Ok(render(&EntryPage::signup(form, message))?.into_response())
        }
    }
}

fn start_session(state: &AppState, jar: CookieJar, sign_in: SignIn) -> AppResult<Response> {
    let sess = session::create_session(&state.db, &sign_in.credential, &sign_in.gym_details)?;
    tracing::info!("Session {} started at {}", sess.id, sess.created_at);

    let cookie = session_cookie(sess.token, state.config.secure_cookies);
    Ok((jar.add(cookie), Redirect::to("/dashboard")).into_response())
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> AppResult<impl IntoResponse> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        session::delete_session(&state.db, cookie.value())?;
    }

    Ok((jar.add(removal_cookie()), Redirect::to("/")))
}

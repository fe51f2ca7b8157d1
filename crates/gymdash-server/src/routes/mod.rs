mod auth;
mod dashboard;
mod members;
mod payments;

use std::sync::Arc;

use askama::Template;
use axum::{
    middleware,
    response::Html,
    routing::{get, post},
    Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};

use crate::auth::guard::{require_session, GymSession};
use crate::backend::{BackendClient, BackendError};
use crate::config::Config;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Config,
    pub backend: BackendClient,
}

async fn health() -> &'static str {
    "ok"
}

async fn not_found() -> AppError {
    AppError::NotFound("Page not found".to_string())
}

pub fn create_router(state: AppState) -> Router {
    let mut auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/signup", post(auth::signup));

    if state.config.auth_rate_limit {
        // 10 sign-in attempts per minute per IP
        let auth_governor = GovernorConfigBuilder::default()
            .per_second(6)
            .burst_size(10)
            .finish()
            .expect("static governor settings are valid");
        auth_routes = auth_routes.layer(GovernorLayer::new(Arc::new(auth_governor)));
    }

    let public = Router::new()
        .route("/health", get(health))
        .route("/", get(auth::entry))
        .route("/logout", post(auth::logout));

    let protected = Router::new()
        .route("/dashboard", get(dashboard::show))
        .route("/members", get(members::list).post(members::create))
        .route(
            "/members/{member_id}/payments",
            get(members::drawer).post(members::create_payment),
        )
        .route("/payments", get(payments::ledger))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .merge(public)
        .merge(auth_routes)
        .merge(protected)
        .fallback(not_found)
        .with_state(state)
}

/// Turns a failed backend call into the screen's inline banner. A refused
/// credential is not a banner: the stored session is dropped and the browser
/// is sent back to the entry screen.
fn banner(
    state: &AppState,
    session: &GymSession,
    err: BackendError,
    fallback: &str,
) -> AppResult<String> {
    match err {
        BackendError::Unauthorized => {
            tracing::info!("Backend refused the stored credential, ending session");
            session.revoke(&state.db)?;
            Err(AppError::Unauthorized)
        }
        err => {
            tracing::warn!("{err}");
            Ok(err.user_message(fallback))
        }
    }
}

fn render<T: Template>(page: &T) -> AppResult<Html<String>> {
    Ok(Html(page.render()?))
}

#[cfg(test)]
mod tests;

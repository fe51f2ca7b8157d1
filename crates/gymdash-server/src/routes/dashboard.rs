use axum::{extract::State, response::Html, Extension};

use crate::auth::guard::GymSession;
use crate::error::AppResult;
use crate::routes::{banner, render, AppState};
use crate::views::{DashboardPage, Nav};

pub async fn show(
    State(state): State<AppState>,
    Extension(session): Extension<GymSession>,
) -> AppResult<Html<String>> {
    let (details, error) = match state.backend.dashboard_details(session.credential()).await {
        Ok(d) => (d, String::new()),
        Err(e) => (Default::default(), banner(&state, &session, e, "Failed to load dashboard.")?),
    };

    render(&DashboardPage::new(Nav::new(&session, "dashboard"), &details, error))
}

use axum::{
    extract::{Query, State},
    response::Html,
    Extension,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::auth::guard::GymSession;
use crate::error::AppResult;
use crate::routes::{banner, render, AppState};
use crate::services::payments::{ledger_query, DateRange, Pagination};
use crate::views::{LedgerPage, Nav};

#[derive(Debug, Default, Deserialize)]
pub struct LedgerQuery {
    pub page: Option<u32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Blank or malformed dates from the range form fall back to the month default.
fn day(raw: Option<&str>) -> Option<NaiveDate> {
    raw.and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
}

pub async fn ledger(
    State(state): State<AppState>,
    Extension(session): Extension<GymSession>,
    Query(query): Query<LedgerQuery>,
) -> AppResult<Html<String>> {
    let range = DateRange::resolve(
        day(query.start_date.as_deref()),
        day(query.end_date.as_deref()),
        Utc::now().date_naive(),
    );
    let pagination = Pagination::new(query.page);

    let (page, error) = match state
        .backend
        .gym_payments(session.credential(), &ledger_query(&pagination, &range))
        .await
    {
        Ok(p) => (p, String::new()),
        Err(e) => (Default::default(), banner(&state, &session, e, "Failed to load payments.")?),
    };
    let pagination = pagination.with_total(page.total_count);

    render(&LedgerPage::new(
        Nav::new(&session, "payments"),
        &range,
        &pagination,
        &page,
        error,
    ))
}

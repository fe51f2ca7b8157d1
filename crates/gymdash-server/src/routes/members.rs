use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use serde::Deserialize;

use crate::auth::guard::GymSession;
use crate::error::AppResult;
use crate::models::{Member, Payment};
use crate::routes::{banner, render, AppState};
use crate::services::forms::{MemberForm, PaymentForm};
use crate::services::members::filter_members;
use crate::views::{drawer_href, DrawerPage, MemberRow, MembersPage, Nav};

const ADD_MEMBER_FAILED: &str = "Failed to add member. Please try again.";
const ADD_PAYMENT_FAILED: &str = "Failed to add payment. Please try again.";

#[derive(Debug, Default, Deserialize)]
pub struct MembersQuery {
    pub q: Option<String>,
    pub add: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DrawerQuery {
    pub name: Option<String>,
    pub add: Option<String>,
}

async fn load_members(state: &AppState, session: &GymSession) -> AppResult<(Vec<Member>, String)> {
    match state.backend.list_members(session.credential()).await {
        Ok(m) => Ok((m, String::new())),
        Err(e) => Ok((Vec::new(), banner(state, session, e, "Failed to load members.")?)),
    }
}

async fn load_payments(
    state: &AppState,
    session: &GymSession,
    member_id: &str,
) -> AppResult<(Vec<Payment>, String)> {
    match state.backend.member_payments(session.credential(), member_id).await {
        Ok(p) => Ok((p, String::new())),
        Err(e) => Ok((Vec::new(), banner(state, session, e, "Failed to load payments.")?)),
    }
}

pub async fn list(
    State(state): State<AppState>,
    Extension(session): Extension<GymSession>,
    Query(query): Query<MembersQuery>,
) -> AppResult<Response> {
    let (members, error) = load_members(&state, &session).await?;

    let search = query.q.unwrap_or_default();
    let rows = filter_members(&members, &search)
        .into_iter()
        .map(MemberRow::from)
        .collect();

    let page = MembersPage {
        nav: Nav::new(&session, "members"),
        query: search,
        rows,
        add_member: query.add.is_some(),
        form: MemberForm::default(),
        form_error: String::new(),
        error,
    };
    Ok(render(&page)?.into_response())
}

/// On success the browser goes back to `/members`, which refetches the list.
/// A refused form is re-shown over a fresh copy of the list; nothing is created.
pub async fn create(
    State(state): State<AppState>,
    Extension(session): Extension<GymSession>,
    Form(form): Form<MemberForm>,
) -> AppResult<Response> {
    let form_error = match form.validate() {
        Err(e) => e.to_string(),
        Ok(member) => match state.backend.create_member(session.credential(), &member).await {
            Ok(()) => {
                tracing::info!("Member {} added", member.email_id);
                return Ok(Redirect::to("/members").into_response());
            }
            Err(e) => banner(&state, &session, e, ADD_MEMBER_FAILED)?,
        },
    };

    let (members, error) = load_members(&state, &session).await?;
    let page = MembersPage {
        nav: Nav::new(&session, "members"),
        query: String::new(),
        rows: members.iter().map(MemberRow::from).collect(),
        add_member: true,
        form,
        form_error,
        error,
    };
    Ok(render(&page)?.into_response())
}

pub async fn drawer(
    State(state): State<AppState>,
    Extension(session): Extension<GymSession>,
    Path(member_id): Path<String>,
    Query(query): Query<DrawerQuery>,
) -> AppResult<Response> {
    let (payments, error) = load_payments(&state, &session, &member_id).await?;

    let name = query.name.unwrap_or_default();
    let mut page = DrawerPage::new(Nav::new(&session, "members"), &member_id, &name, &payments);
    page.error = error;
    if query.add.is_some() {
        page = page.with_form(PaymentForm::default(), String::new());
    }
    Ok(render(&page)?.into_response())
}

/// Success lands back on this member's drawer so only their payments are refetched.
pub async fn create_payment(
    State(state): State<AppState>,
    Extension(session): Extension<GymSession>,
    Path(member_id): Path<String>,
    Query(query): Query<DrawerQuery>,
    Form(form): Form<PaymentForm>,
) -> AppResult<Response> {
    let name = query.name.unwrap_or_default();

    let form_error = match form.validate(&member_id) {
        Err(e) => e.to_string(),
        Ok(payment) => match state.backend.create_payment(session.credential(), &payment).await {
            Ok(()) => {
                tracing::info!("Payment recorded for member {member_id}");
                return Ok(Redirect::to(&drawer_href(&member_id, &name)).into_response());
            }
            Err(e) => banner(&state, &session, e, ADD_PAYMENT_FAILED)?,
        },
    };

    let (payments, error) = load_payments(&state, &session, &member_id).await?;
    let mut page = DrawerPage::new(Nav::new(&session, "members"), &member_id, &name, &payments)
        .with_form(form, form_error);
    page.error = error;
    Ok(render(&page)?.into_response())
}

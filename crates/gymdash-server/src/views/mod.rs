//! Page templates and the row types they render.
//!
//! Everything a template prints is prepared here as plain strings so the
//! templates stay free of formatting logic.

pub mod format;

use askama::Template;
use url::form_urlencoded::byte_serialize;

use crate::auth::guard::GymSession;
use crate::models::{DashboardDetails, Member, Payment, PaymentMethod, UpcomingRenewal};
use crate::services::forms::{MemberForm, PaymentForm, SignupForm};
use crate::services::payments::{DateRange, Pagination};

use self::format::{date_text, rupees, timestamp, MEMBER_DATE, PAYMENT_DATE};

pub fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}

pub fn drawer_href(member_id: &str, member_name: &str) -> String {
    format!(
        "/members/{}/payments?name={}",
        encode(member_id),
        encode(member_name)
    )
}

pub struct Nav {
    pub gym_name: String,
    pub gym_contact: String,
    pub active: &'static str,
}

impl Nav {
    pub fn new(session: &GymSession, active: &'static str) -> Self {
        let gym = &session.gym;
        let gym_contact = [gym.email_id.as_deref(), gym.phone.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" · ");

        Self {
            gym_name: gym.display_name().to_string(),
            gym_contact,
            active,
        }
    }
}

pub struct StatCard {
    pub title: String,
    pub value: String,
}

impl StatCard {
    fn new(title: impl Into<String>, value: impl ToString) -> Self {
        Self {
            title: title.into(),
            value: value.to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "entry.html")]
pub struct EntryPage {
    pub signup: bool,
    pub error: String,
    pub email: String,
    pub form: SignupForm,
}

impl EntryPage {
    pub fn login(email: &str, error: impl Into<String>) -> Self {
        Self {
            signup: false,
            error: error.into(),
            email: email.to_string(),
            form: SignupForm::default(),
        }
    }

    pub fn signup(form: SignupForm, error: impl Into<String>) -> Self {
        Self {
            signup: true,
            error: error.into(),
            email: String::new(),
            form: SignupForm {
                password: String::new(),
                confirm_password: String::new(),
                ..form
            },
        }
    }
}

pub struct RenewalRow {
    pub name: String,
    pub due: String,
}

impl From<&UpcomingRenewal> for RenewalRow {
    fn from(r: &UpcomingRenewal) -> Self {
        Self {
            name: r.name.clone(),
            due: timestamp(r.paid_till.as_ref(), PAYMENT_DATE),
        }
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub nav: Nav,
    pub stats: Vec<StatCard>,
    pub renewals: Vec<RenewalRow>,
    pub error: String,
}

impl DashboardPage {
    pub fn new(nav: Nav, details: &DashboardDetails, error: String) -> Self {
        Self {
            nav,
            stats: vec![
                StatCard::new("Total Members", details.member_count),
                StatCard::new("Paid Members", details.total_active_members),
                StatCard::new("Revenue This Month", rupees(details.revenue)),
            ],
            renewals: details.upcoming_payments.iter().map(RenewalRow::from).collect(),
            error,
        }
    }
}

pub struct MemberRow {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub joined: String,
    pub drawer_href: String,
}

impl From<&Member> for MemberRow {
    fn from(m: &Member) -> Self {
        Self {
            name: m.name.clone(),
            phone: m.phone.clone().unwrap_or_default(),
            email: m.email_id.clone(),
            joined: date_text(&m.joined_at, MEMBER_DATE),
            drawer_href: drawer_href(&m.id, &m.name),
        }
    }
}

#[derive(Template)]
#[template(path = "members.html")]
pub struct MembersPage {
    pub nav: Nav,
    pub query: String,
    pub rows: Vec<MemberRow>,
    pub add_member: bool,
    pub form: MemberForm,
    pub form_error: String,
    pub error: String,
}

pub struct PaymentRow {
    pub member_name: String,
    pub id: String,
    pub method: String,
    pub reference: String,
    pub amount: String,
    pub paid_at: String,
    pub paid_till: String,
}

impl From<&Payment> for PaymentRow {
    fn from(p: &Payment) -> Self {
        Self {
            member_name: p.member_name.clone().unwrap_or_default(),
            id: p.id.clone(),
            method: p.payment_type.clone(),
            reference: p.payment_id.clone().unwrap_or_default(),
            amount: p.amount.to_string(),
            paid_at: timestamp(p.paid_at.as_ref(), PAYMENT_DATE),
            paid_till: timestamp(p.paid_till.as_ref(), PAYMENT_DATE),
        }
    }
}

pub struct MethodOption {
    pub name: &'static str,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "drawer.html")]
pub struct DrawerPage {
    pub nav: Nav,
    pub member_name: String,
    pub self_href: String,
    pub rows: Vec<PaymentRow>,
    pub add_payment: bool,
    pub methods: Vec<MethodOption>,
    pub form: PaymentForm,
    pub form_error: String,
    pub error: String,
}

impl DrawerPage {
    pub fn new(nav: Nav, member_id: &str, member_name: &str, payments: &[Payment]) -> Self {
        Self {
            nav,
            member_name: member_name.to_string(),
            self_href: drawer_href(member_id, member_name),
            rows: payments.iter().map(PaymentRow::from).collect(),
            add_payment: false,
            methods: method_options(""),
            form: PaymentForm::default(),
            form_error: String::new(),
            error: String::new(),
        }
    }

    /// Re-open the nested form with what the user typed and why it was refused.
    pub fn with_form(self, form: PaymentForm, form_error: String) -> Self {
        Self {
            add_payment: true,
            methods: method_options(&form.payment_type),
            form,
            form_error,
            ..self
        }
    }
}

fn method_options(selected: &str) -> Vec<MethodOption> {
    PaymentMethod::ALL
        .iter()
        .map(|m| MethodOption {
            name: m.as_str(),
            selected: m.as_str() == selected,
        })
        .collect()
}

#[derive(Template)]
#[template(path = "payments.html")]
pub struct LedgerPage {
    pub nav: Nav,
    pub stats: Vec<StatCard>,
    pub rows: Vec<PaymentRow>,
    pub start_date: String,
    pub end_date: String,
    pub page: u32,
    pub prev_href: String,
    pub next_href: String,
    pub error: String,
}

impl LedgerPage {
    pub fn new(
        nav: Nav,
        range: &DateRange,
        pagination: &Pagination,
        page: &crate::models::PaymentsPage,
        error: String,
    ) -> Self {
        let start_date = range.start.format("%Y-%m-%d").to_string();
        let end_date = range.end.format("%Y-%m-%d").to_string();
        let href = |p: u32| format!("/payments?page={p}&start_date={start_date}&end_date={end_date}");

        Self {
            stats: vec![
                StatCard::new("Revenue This Month", rupees(page.current_month_amount)),
                StatCard::new(range.label(), rupees(page.total_amount)),
            ],
            rows: page.data.iter().map(PaymentRow::from).collect(),
            page: pagination.page,
            prev_href: if pagination.has_previous() { href(pagination.page - 1) } else { String::new() },
            next_href: if pagination.has_next() { href(pagination.page + 1) } else { String::new() },
            start_date,
            end_date,
            nav,
            error,
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub status: u16,
    pub message: String,
}

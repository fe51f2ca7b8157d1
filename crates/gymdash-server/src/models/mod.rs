use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque bearer string issued by the gym backend.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for an empty or whitespace-only value.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Locally persisted session row.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub token: String,
    pub auth_token: String,
    pub gym_details: String,
    pub created_at: String,
}

/// Display-only view of the gym details returned at login/signup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GymProfile {
    #[serde(default, deserialize_with = "loose_string_opt")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "loose_string_opt")]
    pub email_id: Option<String>,
    #[serde(default, deserialize_with = "loose_string_opt")]
    pub phone: Option<String>,
}

impl GymProfile {
    /// Parses the stored JSON blob; shapes the dashboard cannot read become an empty profile.
    pub fn from_details(details: &str) -> Self {
        // Derived structs also accept sequences, so only objects are trusted
        let parsed: Result<Self, serde_json::Error> =
            serde_json::from_str::<serde_json::Value>(details).and_then(|v| {
                if v.is_object() {
                    serde_json::from_value(v)
                } else {
                    Err(serde::de::Error::custom(format!("expected an object, got {v}")))
                }
            });

        match parsed {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!("Stored gym details are not a profile object: {e}");
                Self::default()
            }
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("FitGym Pro")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    #[serde(deserialize_with = "loose_string")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email_id: String,
    #[serde(default, deserialize_with = "loose_string_opt")]
    pub phone: Option<String>,
    #[serde(default)]
    pub joined_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Gpay,
    PhonePe,
    Cash,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [PaymentMethod::Gpay, PaymentMethod::PhonePe, PaymentMethod::Cash];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Gpay => "Gpay",
            PaymentMethod::PhonePe => "PhonePe",
            PaymentMethod::Cash => "Cash",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("Unknown payment mode: {s}"))
    }
}

/// Backend timestamp wrapper, `{ "value": ... }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Timestamp {
    pub value: TimestampValue,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TimestampValue {
    Millis(i64),
    Text(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Payment {
    #[serde(deserialize_with = "loose_string")]
    pub id: String,
    #[serde(default)]
    pub member_name: Option<String>,
    #[serde(default)]
    pub payment_type: String,
    #[serde(default, deserialize_with = "loose_string_opt")]
    pub payment_id: Option<String>,
    #[serde(default)]
    pub amount: f64,
    pub paid_at: Option<Timestamp>,
    pub paid_till: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDetails {
    #[serde(default)]
    pub member_count: u64,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub total_active_members: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub upcoming_payments: Vec<UpcomingRenewal>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpcomingRenewal {
    #[serde(default)]
    pub name: String,
    pub paid_till: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsPage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<Payment>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub current_month_amount: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email_id: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateGymRequest {
    pub name: String,
    pub email_id: String,
    pub password: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMember {
    pub name: String,
    pub email_id: String,
    pub phone: String,
    pub joined_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPayment {
    pub member_id: String,
    pub payment_type: PaymentMethod,
    pub payment_id: Option<String>,
    pub amount: f64,
    pub paid_at: String,
    pub paid_till: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GymPaymentsQuery {
    pub limit: u32,
    pub offset: u64,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Text(String),
    Int(i64),
    Float(f64),
}

impl From<Loose> for String {
    fn from(v: Loose) -> Self {
        match v {
            Loose::Text(s) => s,
            Loose::Int(n) => n.to_string(),
            Loose::Float(n) => n.to_string(),
        }
    }
}

/// Accepts ids and phone numbers sent either as JSON strings or numbers.
fn loose_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Loose::deserialize(d).map(String::from)
}

fn loose_string_opt<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Loose>::deserialize(d)?.map(String::from))
}

fn null_as_empty<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(d)?.unwrap_or_default())
}

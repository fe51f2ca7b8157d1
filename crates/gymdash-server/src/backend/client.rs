use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{BackendError, BackendResult};
use crate::config::Config;
use crate::models::{
    CreateGymRequest, Credential, DashboardDetails, GymPaymentsQuery, LoginRequest, Member,
    NewMember, NewPayment, Payment, PaymentsPage,
};

/// Header carrying the credential in both directions.
pub const AUTH_HEADER: &str = "x-auth-token";

/// Result of a successful login or signup.
#[derive(Debug, Clone)]
pub struct SignIn {
    pub credential: Credential,
    /// Response body, kept verbatim for the session row.
    pub gym_details: String,
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &Config) -> BackendResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.backend_timeout_secs))
            .user_agent(concat!("gymdash/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get<T, Q>(&self, credential: &Credential, path: &str, query: &Q) -> BackendResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        tracing::debug!("GET {path}");
        let response = self
            .client
            .get(self.url(path))
            .header(AUTH_HEADER, credential.as_str())
            .query(query)
            .send()
            .await?;

        let body = Self::checked_body(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// POST that only cares whether the backend accepted the body.
    async fn post<B: Serialize>(&self, credential: &Credential, path: &str, body: &B) -> BackendResult<()> {
        tracing::debug!("POST {path}");
        let response = self
            .client
            .post(self.url(path))
            .header(AUTH_HEADER, credential.as_str())
            .json(body)
            .send()
            .await?;

        Self::checked_body(response).await.map(|_| ())
    }

    async fn checked_body(response: Response) -> BackendResult<String> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Backend refused credential ({})", response.url().path());
            return Err(BackendError::Unauthorized);
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(BackendError::rejected(status.as_u16(), &body));
        }
        Ok(body)
    }

    async fn sign_in<B: Serialize>(&self, path: &str, body: &B) -> BackendResult<SignIn> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        let status = response.status();

        let credential = response
            .headers()
            .get(AUTH_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(Credential::new);
        let body = response.text().await?;

        if !status.is_success() {
            return Err(BackendError::rejected(status.as_u16(), &body));
        }

        let details: serde_json::Value = serde_json::from_str(&body)?;
        match credential {
            Some(credential) if !details.is_null() => Ok(SignIn {
                credential,
                gym_details: body,
            }),
            _ => Err(BackendError::MissingCredential),
        }
    }

    pub async fn login(&self, request: &LoginRequest) -> BackendResult<SignIn> {
        self.sign_in("gyms/login", request).await
    }

    pub async fn create_gym(&self, request: &CreateGymRequest) -> BackendResult<SignIn> {
        self.sign_in("gyms/createGym", request).await
    }

    pub async fn dashboard_details(&self, credential: &Credential) -> BackendResult<DashboardDetails> {
        self.get(credential, "gyms/getDashboardDetails", &()).await
    }

    pub async fn list_members(&self, credential: &Credential) -> BackendResult<Vec<Member>> {
        let members: Option<Vec<Member>> = self.get(credential, "members/getMembers", &()).await?;
        Ok(members.unwrap_or_default())
    }

    pub async fn create_member(&self, credential: &Credential, member: &NewMember) -> BackendResult<()> {
        self.post(credential, "members/createMembers", member).await
    }

    pub async fn member_payments(&self, credential: &Credential, member_id: &str) -> BackendResult<Vec<Payment>> {
        let payments: Option<Vec<Payment>> = self
            .get(credential, "payments/getPayments", &[("member_id", member_id)])
            .await?;
        Ok(payments.unwrap_or_default())
    }

    pub async fn create_payment(&self, credential: &Credential, payment: &NewPayment) -> BackendResult<()> {
        self.post(credential, "payments/createPayments", payment).await
    }

    pub async fn gym_payments(&self, credential: &Credential, query: &GymPaymentsQuery) -> BackendResult<PaymentsPage> {
        self.get(credential, "payments/getPaymentsByGym", query).await
    }
}

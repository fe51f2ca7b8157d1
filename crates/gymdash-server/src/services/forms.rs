//! Submitted form bodies and the local checks run before anything reaches the backend.

use serde::Deserialize;

use crate::models::{CreateGymRequest, LoginRequest, NewMember, NewPayment, PaymentMethod};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Please provide all required fields")]
    MissingFields,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("{0}")]
    Invalid(String),
}

fn required(fields: &[&str]) -> Result<(), FormError> {
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(FormError::MissingFields);
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, FormError> {
        required(&[&self.email, &self.password])?;
        Ok(LoginRequest {
            email_id: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<CreateGymRequest, FormError> {
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        required(&[&self.name, &self.phone, &self.email, &self.password])?;
        Ok(CreateGymRequest {
            name: self.name.trim().to_string(),
            email_id: self.email.trim().to_string(),
            password: self.password.clone(),
            phone: self.phone.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MemberForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub joined_at: String,
}

impl MemberForm {
    pub fn validate(&self) -> Result<NewMember, FormError> {
        required(&[&self.name, &self.email, &self.phone, &self.joined_at])?;
        Ok(NewMember {
            name: self.name.trim().to_string(),
            email_id: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            joined_at: self.joined_at.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PaymentForm {
    pub payment_type: String,
    pub payment_id: String,
    pub amount: String,
    pub paid_at: String,
    pub paid_till: String,
}

impl PaymentForm {
    pub fn validate(&self, member_id: &str) -> Result<NewPayment, FormError> {
        required(&[&self.payment_type, &self.amount, &self.paid_at, &self.paid_till])?;

        let payment_type: PaymentMethod = self.payment_type.trim().parse().map_err(FormError::Invalid)?;
        let amount = self
            .amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite())
            .ok_or_else(|| FormError::Invalid("Amount must be a number".to_string()))?;
        let payment_id = Some(self.payment_id.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(NewPayment {
            member_id: member_id.to_string(),
            payment_type,
            payment_id,
            amount,
            paid_at: self.paid_at.trim().to_string(),
            paid_till: self.paid_till.trim().to_string(),
        })
    }
}

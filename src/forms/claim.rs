// src/forms/claim.rs

use crate::domain::{ClaimRequest, ListingId};
use crate::forms::fields::{check_length, normalize_email, optional, FieldErrors, FormData};

pub const FULL_NAME: &str = "fullName";
pub const EMAIL: &str = "email";
pub const PHONE: &str = "phone";
pub const ROLE: &str = "role";
pub const MESSAGE: &str = "message";

/// Roles a claimant can hold, as (value, label).
pub const ROLES: &[(&str, &str)] = &[
    ("owner", "Owner"),
    ("manager", "Manager"),
    ("staff", "Staff member"),
    ("agent", "Authorized agent"),
];

/// Raw claim form input, kept as typed so it can be re-rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub message: String,
}

impl ClaimForm {
    pub fn from_form(data: &FormData) -> Self {
        Self {
            full_name: data.text(FULL_NAME),
            email: data.text(EMAIL),
            phone: data.text(PHONE),
            role: data.text(ROLE),
            message: data.text(MESSAGE),
        }
    }

    pub fn validate(&self, business_id: ListingId) -> Result<ClaimRequest, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.full_name.is_empty() {
            errors.add(FULL_NAME, "Your name is required.");
        } else {
            check_length(&mut errors, FULL_NAME, &self.full_name, 2, 100);
        }

        let email = normalize_email(&self.email);
        if self.email.is_empty() {
            errors.add(EMAIL, "Email is required.");
        } else if email.is_none() {
            errors.add(EMAIL, "Enter a valid email address.");
        }

        if !self.phone.is_empty() && !valid_phone(&self.phone) {
            errors.add(PHONE, "Enter a valid phone number.");
        }

        if self.role.is_empty() {
            errors.add(ROLE, "Choose your role at the business.");
        } else if !ROLES.iter().any(|(value, _)| *value == self.role) {
            errors.add(ROLE, "Unknown role.");
        }

        check_length(&mut errors, MESSAGE, &self.message, 0, 1000);

        match email {
            Some(email) if errors.is_empty() => Ok(ClaimRequest {
                business_id,
                full_name: self.full_name.clone(),
                email,
                phone: optional(&self.phone),
                role: self.role.clone(),
                message: optional(&self.message),
            }),
            _ => Err(errors),
        }
    }
}

fn valid_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    let len = phone.chars().count();
    (7..=20).contains(&len)
        && digits >= 7
        && phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'))
}

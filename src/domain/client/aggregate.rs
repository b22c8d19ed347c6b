//! Client aggregate.
//!
//! A client is a gym member: login credentials, a name, optional images and
//! the membership period they have paid for.

use serde::Serialize;

use crate::domain::foundation::{ClientId, Money, Timestamp, ValidationError};
use crate::domain::membership::{Membership, MembershipStatus};

use super::ClientError;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Client aggregate.
///
/// # Invariants
///
/// - `email` is trimmed, lower-cased and contains a single `@`
/// - `first_name` and `last_name` are non-empty
/// - `password_hash` is never exposed through `ClientProfile`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    id: ClientId,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    profile_image: Option<String>,
    qr_code_url: Option<String>,
    membership: Membership,
    created_at: Timestamp,
    updated_at: Timestamp,
}

/// Fields a client (or an admin on their behalf) may change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image: Option<String>,
}

/// Client as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientProfile {
    pub id: ClientId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub profile_image: Option<String>,
    pub qr_code_url: Option<String>,
    pub membership_status: MembershipStatus,
    pub membership_paid_date: Option<Timestamp>,
    pub membership_due_date: Option<Timestamp>,
    pub membership_last_paid_amount: Option<Money>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Client {
    /// Registers a new client with an inactive membership.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` for a malformed email or a blank name
    pub fn register(
        email: &str,
        password_hash: String,
        first_name: &str,
        last_name: &str,
        profile_image: Option<String>,
    ) -> Result<Self, ClientError> {
        let now = Timestamp::now();
        Ok(Self {
            id: ClientId::new(),
            email: normalize_email(email)?,
            password_hash,
            first_name: required_name("first_name", first_name)?,
            last_name: required_name("last_name", last_name)?,
            profile_image,
            qr_code_url: None,
            membership: Membership::default(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a client from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ClientId,
        email: String,
        password_hash: String,
        first_name: String,
        last_name: String,
        profile_image: Option<String>,
        qr_code_url: Option<String>,
        membership: Membership,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            first_name,
            last_name,
            profile_image,
            qr_code_url,
            membership,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ClientId {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// "First Last", used in email greetings.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn profile_image(&self) -> Option<&str> {
        self.profile_image.as_deref()
    }

    pub fn qr_code_url(&self) -> Option<&str> {
        self.qr_code_url.as_deref()
    }

    pub fn membership(&self) -> &Membership {
        &self.membership
    }

    /// Mutable access for membership billing. Callers must persist the client.
    pub fn membership_mut(&mut self) -> &mut Membership {
        self.updated_at = Timestamp::now();
        &mut self.membership
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Behaviour
    // ─────────────────────────────────────────────────────────────────────────

    /// Link encoded in the check-in QR code.
    pub fn check_in_url(&self, frontend_url: &str) -> String {
        format!("{}/client-detail/{}", frontend_url.trim_end_matches('/'), self.id)
    }

    pub fn attach_qr_code(&mut self, url: impl Into<String>) {
        self.qr_code_url = Some(url.into());
        self.updated_at = Timestamp::now();
    }

    /// Applies a partial profile update. Absent fields are left unchanged.
    pub fn update_profile(&mut self, changes: ProfileChanges) -> Result<(), ClientError> {
        if let Some(first) = changes.first_name {
            self.first_name = required_name("first_name", &first)?;
        }
        if let Some(last) = changes.last_name {
            self.last_name = required_name("last_name", &last)?;
        }
        if let Some(image) = changes.profile_image {
            self.profile_image = Some(image);
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn change_password_hash(&mut self, hash: String) {
        self.password_hash = hash;
        self.updated_at = Timestamp::now();
    }

    /// Projection without the credential hash.
    pub fn profile(&self) -> ClientProfile {
        ClientProfile {
            id: self.id,
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            profile_image: self.profile_image.clone(),
            qr_code_url: self.qr_code_url.clone(),
            membership_status: self.membership.status,
            membership_paid_date: self.membership.paid_date,
            membership_due_date: self.membership.due_date,
            membership_last_paid_amount: self.membership.last_paid_amount,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Trims and lower-cases an email, rejecting obviously malformed input.
pub fn normalize_email(raw: &str) -> Result<String, ValidationError> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(ValidationError::empty_field("email"));
    }
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains('@')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(ValidationError::invalid_format("email", "must be a valid email address"));
    }
    Ok(email)
}

/// Rejects passwords shorter than `MIN_PASSWORD_LENGTH` characters.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::too_small(
            "password",
            MIN_PASSWORD_LENGTH as i64,
            len as i64,
        ));
    }
    Ok(())
}

fn required_name(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}

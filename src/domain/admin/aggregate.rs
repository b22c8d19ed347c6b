//! Admin accounts.
//!
//! Admins are created out of band (bootstrap at startup). The API only lets
//! them log in.

use serde::Serialize;

use crate::domain::client::normalize_email;
use crate::domain::foundation::{AdminId, Timestamp, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admin {
    id: AdminId,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

/// Admin as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminProfile {
    pub id: AdminId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Admin {
    pub fn new(
        email: &str,
        password_hash: String,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let now = Timestamp::now();
        Ok(Self {
            id: AdminId::new(),
            email: normalize_email(email)?,
            password_hash,
            first_name: first_name.into(),
            last_name: last_name.into(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute an admin from persistence (no validation).
    pub fn reconstitute(
        id: AdminId,
        email: String,
        password_hash: String,
        first_name: String,
        last_name: String,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            first_name,
            last_name,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &AdminId {
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

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn profile(&self) -> AdminProfile {
        AdminProfile {
            id: self.id,
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_admin_normalizes_email() {
        let admin = Admin::new("Owner@Gym.NG", "hash".into(), "Gym", "Owner").unwrap();
        assert_eq!(admin.email(), "owner@gym.ng");
    }

    #[test]
    fn profile_has_no_hash() {
        let admin = Admin::new("owner@gym.ng", "secret-hash".into(), "Gym", "Owner").unwrap();
        let json = serde_json::to_string(&admin.profile()).unwrap();
        assert!(!json.contains("secret-hash"));
    }
}

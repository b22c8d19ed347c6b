//! Request bodies and query strings for the client endpoints.

use serde::Deserialize;

use crate::domain::foundation::{Money, Timestamp};

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `GET /clients?page=&limit=&search=&status=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListClientsParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub status: Option<String>,
}

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct ActivateMembershipRequest {
    pub paid_date: Timestamp,
    pub due_date: Timestamp,
    pub amount: Money,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

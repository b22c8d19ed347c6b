//! HTTP error responses.
//!
//! Every handler error funnels into [`ApiError`], which renders the
//! `{ "error_code", "message", "details"? }` body with a status derived from
//! the [`ErrorCode`]. Infrastructure failures are logged here and replaced by
//! a generic message so driver or provider details never reach the caller.

use std::collections::HashMap;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::client::ClientError;
use crate::domain::foundation::{AuthError, DomainError, ErrorCode};
use crate::domain::membership::MembershipError;
use crate::domain::store::StoreError;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Wire format of an error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error_code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    code: String,
    message: String,
    details: HashMap<String, String>,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let status = status_for(code);
        if status.is_server_error() {
            tracing::error!(error_code = %code, error = %message, "Request failed");
            return Self {
                status,
                code: code.to_string(),
                message: INTERNAL_MESSAGE.to_string(),
                details: HashMap::new(),
            };
        }
        Self {
            status,
            code: code.to_string(),
            message,
            details: HashMap::new(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if !self.status.is_server_error() {
            self.details.insert(key.into(), value.into());
        }
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// HTTP status for each error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::InvalidStateTransition
        | ErrorCode::MembershipAlreadyActive
        | ErrorCode::ItemUnavailable
        | ErrorCode::InsufficientStock
        | ErrorCode::DeliveryAddressRequired
        | ErrorCode::PurchaseAlreadyVerified
        | ErrorCode::PaymentFailed
        | ErrorCode::InvalidPaymentMetadata => StatusCode::BAD_REQUEST,

        ErrorCode::NotFound
        | ErrorCode::ClientNotFound
        | ErrorCode::AdminNotFound
        | ErrorCode::StoreItemNotFound
        | ErrorCode::PurchaseNotFound => StatusCode::NOT_FOUND,

        ErrorCode::EmailAlreadyRegistered | ErrorCode::Conflict => StatusCode::CONFLICT,

        ErrorCode::MembershipRequired | ErrorCode::Forbidden => StatusCode::FORBIDDEN,

        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,

        ErrorCode::DatabaseError
        | ErrorCode::StorageError
        | ErrorCode::ExternalServiceError
        | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error_code: self.code,
            message: self.message,
            details: (!self.details.is_empty()).then_some(self.details),
        };
        (self.status, Json(body)).into_response()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Conversions
// ════════════════════════════════════════════════════════════════════════════════

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let mut api = ApiError::new(err.code, err.message);
        for (key, value) in err.details {
            api = api.with_detail(key, value);
        }
        api
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        let api = ApiError::new(err.code(), err.message());
        match err {
            ClientError::ValidationFailed { field, .. } => api.with_detail("field", field),
            _ => api,
        }
    }
}

impl From<MembershipError> for ApiError {
    fn from(err: MembershipError) -> Self {
        let api = ApiError::new(err.code(), err.message());
        match err {
            MembershipError::ValidationFailed { field, .. } => api.with_detail("field", field),
            _ => api,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let api = ApiError::new(err.code(), err.message());
        match err {
            StoreError::ValidationFailed { field, .. } => api.with_detail("field", field),
            StoreError::InsufficientStock { available, .. } => {
                api.with_detail("available", available.to_string())
            }
            _ => api,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Forbidden(msg) => ApiError::forbidden(msg),
            AuthError::ServiceUnavailable(msg) => ApiError::new(ErrorCode::InternalError, msg),
            other => ApiError::unauthorized(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

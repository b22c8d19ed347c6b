//! Client directory errors.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | EmailTaken | 409 |
//! | Forbidden | 403 |
//! | Unauthorized | 401 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::domain::membership::MembershipError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// No client with the given id or email.
    NotFound,

    /// Signup with an email that already has an account.
    EmailTaken,

    /// Authenticated, but acting on somebody else's record.
    Forbidden(String),

    /// A token was presented that cannot be used for this operation.
    Unauthorized(String),

    ValidationFailed { field: String, message: String },

    Infrastructure(String),
}

impl ClientError {
    pub fn not_found() -> Self {
        ClientError::NotFound
    }

    pub fn email_taken() -> Self {
        ClientError::EmailTaken
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ClientError::Forbidden(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ClientError::Unauthorized(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ClientError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ClientError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ClientError::NotFound => ErrorCode::ClientNotFound,
            ClientError::EmailTaken => ErrorCode::EmailAlreadyRegistered,
            ClientError::Forbidden(_) => ErrorCode::Forbidden,
            ClientError::Unauthorized(_) => ErrorCode::Unauthorized,
            ClientError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ClientError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ClientError::NotFound => "Client not found".to_string(),
            ClientError::EmailTaken => "Email already registered".to_string(),
            ClientError::Forbidden(msg) | ClientError::Unauthorized(msg) => msg.clone(),
            ClientError::ValidationFailed { message, .. } => message.clone(),
            ClientError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ClientError {}

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ClientError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => ClientError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::ClientNotFound => ClientError::NotFound,
            ErrorCode::EmailAlreadyRegistered => ClientError::EmailTaken,
            _ => ClientError::Infrastructure(err.to_string()),
        }
    }
}

impl From<MembershipError> for ClientError {
    fn from(err: MembershipError) -> Self {
        match err {
            MembershipError::ClientNotFound(_) => ClientError::NotFound,
            MembershipError::ValidationFailed { field, message } => {
                ClientError::ValidationFailed { field, message }
            }
            MembershipError::Infrastructure(msg) => ClientError::Infrastructure(msg),
            other => ClientError::ValidationFailed {
                field: "membership_status".to_string(),
                message: other.message(),
            },
        }
    }
}

impl From<ClientError> for DomainError {
    fn from(err: ClientError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_api_wording() {
        assert_eq!(ClientError::not_found().to_string(), "Client not found");
        assert_eq!(ClientError::email_taken().to_string(), "Email already registered");
        assert_eq!(
            ClientError::forbidden("You can only update your own profile").to_string(),
            "You can only update your own profile"
        );
    }

    #[test]
    fn repository_conflict_maps_to_email_taken() {
        let err: ClientError =
            DomainError::new(ErrorCode::EmailAlreadyRegistered, "duplicate key").into();
        assert_eq!(err, ClientError::EmailTaken);
    }

    #[test]
    fn validation_error_keeps_field() {
        let err: ClientError = ValidationError::empty_field("first_name").into();
        assert!(matches!(err, ClientError::ValidationFailed { ref field, .. } if field == "first_name"));
    }

    #[test]
    fn database_failure_is_infrastructure() {
        let err: ClientError = DomainError::database("pool timed out").into();
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }
}

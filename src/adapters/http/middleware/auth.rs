//! Authentication middleware and extractors for axum.
//!
//! This module provides:
//! - `auth_middleware` - Layer that validates Bearer tokens and injects the principal into extensions
//! - `RequireAuth` - Extractor for any authenticated client or admin
//! - `RequireClient` - Extractor that only admits clients
//! - `RequireAdmin` - Extractor that only admits admins
//!
//! # Architecture
//!
//! The middleware uses the `SessionValidator` port, so it does not care how
//! tokens are signed. Tests swap in `MockSessionValidator`.
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!                              Handler → RequireClient / RequireAdmin reads from extensions
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::domain::foundation::{AdminId, AuthError, AuthenticatedUser, ClientId};
use crate::ports::SessionValidator;

use super::super::error::ApiError;

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

pub const CLIENT_ACCESS_REQUIRED: &str = "Client access required";
pub const ADMIN_ACCESS_REQUIRED: &str = "Admin access required";

/// Authentication middleware that validates Bearer tokens.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the token using the `SessionValidator` port
/// 3. On success, injects `AuthenticatedUser` into request extensions
/// 4. On missing token, continues without injecting (public routes)
/// 5. On invalid token, returns 401 Unauthorized
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token);

    match token {
        Some(token) => match validator.validate(token).await {
            Ok(user) => {
                request.extensions_mut().insert(user);
                next.run(request).await
            }
            Err(e) => {
                if let AuthError::ServiceUnavailable(msg) = &e {
                    tracing::error!("Auth service unavailable: {}", msg);
                } else {
                    tracing::debug!(error = %e, "Rejected bearer token");
                }
                ApiError::from(e).into_response()
            }
        },
        None => next.run(request).await,
    }
}

fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn principal(parts: &Parts) -> Result<AuthenticatedUser, ApiError> {
    parts
        .extensions
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))
}

/// Extractor that requires any authenticated principal.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        principal(parts).map(RequireAuth)
    }
}

/// Extractor that admits only clients. Yields the client's id.
#[derive(Debug, Clone)]
pub struct RequireClient(pub ClientId);

#[async_trait]
impl<S> FromRequestParts<S> for RequireClient
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        principal(parts)?
            .client_id()
            .map(RequireClient)
            .ok_or_else(|| ApiError::forbidden(CLIENT_ACCESS_REQUIRED))
    }
}

/// Extractor that admits only admins. Yields the admin's id.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AdminId);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        principal(parts)?
            .admin_id()
            .map(RequireAdmin)
            .ok_or_else(|| ApiError::forbidden(ADMIN_ACCESS_REQUIRED))
    }
}

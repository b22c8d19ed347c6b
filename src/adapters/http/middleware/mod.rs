//! HTTP middleware for axum.
//!
//! - `auth` - Bearer token middleware and role extractors

pub mod auth;

pub use auth::{
    auth_middleware, AuthState, RequireAdmin, RequireAuth, RequireClient, ADMIN_ACCESS_REQUIRED,
    CLIENT_ACCESS_REQUIRED,
};

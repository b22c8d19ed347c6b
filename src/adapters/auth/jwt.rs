//! HS256 tokens and the bearer session validator built on them.
//!
//! Access tokens carry `{sub, email, type}`. Reset tokens add
//! `purpose = "reset-password"` and live for an hour; the session validator
//! refuses them.

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::foundation::{
    AdminId, AuthError, AuthenticatedUser, ClientId, ErrorCode, Timestamp, UserRole,
};
use crate::ports::{
    AdminRepository, ClientRepository, SessionValidator, TokenClaims, TokenService,
    RESET_PASSWORD_PURPOSE,
};

pub const DEFAULT_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;
pub const DEFAULT_RESET_TOKEN_TTL_SECS: i64 = 60 * 60;

/// Registered claims wrapped around our own.
#[derive(Debug, Serialize, Deserialize)]
struct JwtClaims {
    #[serde(flatten)]
    claims: TokenClaims,
    iat: i64,
    exp: i64,
}

pub struct JwtTokenService {
    secret: SecretString,
    token_ttl_secs: i64,
    reset_token_ttl_secs: i64,
}

impl JwtTokenService {
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            reset_token_ttl_secs: DEFAULT_RESET_TOKEN_TTL_SECS,
        }
    }

    pub fn with_ttls(mut self, token_ttl_secs: i64, reset_token_ttl_secs: i64) -> Self {
        self.token_ttl_secs = token_ttl_secs;
        self.reset_token_ttl_secs = reset_token_ttl_secs;
        self
    }

    fn encode_with_ttl(&self, claims: TokenClaims, ttl_secs: i64) -> Result<String, AuthError> {
        let iat = Timestamp::now().as_datetime().timestamp();
        let wrapped = JwtClaims {
            claims,
            iat,
            exp: iat + ttl_secs,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &wrapped,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes()),
        )
        .map_err(|e| AuthError::service_unavailable(format!("token signing failed: {}", e)))
    }
}

impl std::fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("reset_token_ttl_secs", &self.reset_token_ttl_secs)
            .finish_non_exhaustive()
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, claims: &TokenClaims) -> Result<String, AuthError> {
        let mut claims = claims.clone();
        claims.purpose = None;
        self.encode_with_ttl(claims, self.token_ttl_secs)
    }

    fn issue_reset_token(&self, claims: &TokenClaims) -> Result<String, AuthError> {
        let mut claims = claims.clone();
        claims.purpose = Some(RESET_PASSWORD_PURPOSE.to_string());
        self.encode_with_ttl(claims, self.reset_token_ttl_secs)
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(self.secret.expose_secret().as_bytes()),
            &validation,
        )
        .map(|data| data.claims.claims)
        .map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                _ => {
                    tracing::debug!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })
    }
}

/// Turns a bearer token into the client or admin it was issued to.
pub struct JwtSessionValidator {
    tokens: Arc<dyn TokenService>,
    clients: Arc<dyn ClientRepository>,
    admins: Arc<dyn AdminRepository>,
}

impl JwtSessionValidator {
    pub fn new(
        tokens: Arc<dyn TokenService>,
        clients: Arc<dyn ClientRepository>,
        admins: Arc<dyn AdminRepository>,
    ) -> Self {
        Self {
            tokens,
            clients,
            admins,
        }
    }
}

fn lookup_failure(err: crate::domain::foundation::DomainError) -> AuthError {
    if err.code == ErrorCode::ClientNotFound || err.code == ErrorCode::AdminNotFound {
        AuthError::UserNotFound
    } else {
        tracing::error!(error = %err, "Principal lookup failed");
        AuthError::service_unavailable("principal lookup failed")
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self.tokens.verify(token)?;
        if claims.purpose.is_some() {
            tracing::warn!("Single-purpose token presented as a session");
            return Err(AuthError::InvalidToken);
        }

        match claims.user_type {
            UserRole::Client => {
                let id: ClientId = claims.sub.parse().map_err(|_| AuthError::InvalidToken)?;
                let client = self
                    .clients
                    .find_by_id(&id)
                    .await
                    .map_err(lookup_failure)?
                    .ok_or(AuthError::UserNotFound)?;
                Ok(AuthenticatedUser::client(*client.id(), client.email()))
            }
            UserRole::Admin => {
                let id: AdminId = claims.sub.parse().map_err(|_| AuthError::InvalidToken)?;
                let admin = self
                    .admins
                    .find_by_id(&id)
                    .await
                    .map_err(lookup_failure)?
                    .ok_or(AuthError::UserNotFound)?;
                Ok(AuthenticatedUser::admin(*admin.id(), admin.email()))
            }
        }
    }
}

impl std::fmt::Debug for JwtSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionValidator").finish_non_exhaustive()
    }
}

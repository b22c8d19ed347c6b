//! Authentication adapters.
//!
//! - `password` - Argon2id password hashing
//! - `jwt` - HS256 token service and the bearer session validator
//! - `mock` - fixed-token session validator for tests

mod password;
mod jwt;
mod mock;

pub use password::Argon2PasswordHasher;
pub use jwt::{
    JwtSessionValidator, JwtTokenService, DEFAULT_RESET_TOKEN_TTL_SECS, DEFAULT_TOKEN_TTL_SECS,
};
pub use mock::MockSessionValidator;

//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - Argon2 password hashing, HS256 tokens, session validation
//! - `email` - Resend and an in-memory recorder
//! - `http` - axum REST API
//! - `memory` - in-memory repositories
//! - `paystack` - Paystack gateway and a mock
//! - `postgres` - sqlx repositories
//! - `qrcode` - membership QR codes
//! - `storage` - Supabase Storage and an in-memory store

pub mod auth;
pub mod email;
pub mod http;
pub mod memory;
pub mod paystack;
pub mod postgres;
pub mod qrcode;
pub mod storage;

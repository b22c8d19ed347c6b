//! HTTP adapter for membership billing.
//!
//! - `POST /membership/initialize-payment` (client)
//! - `POST /membership/verify-payment` (client)
//! - `GET /membership/status` (client)
//! - `POST /membership/webhook` (gateway signature)

pub mod dto;
mod handlers;
mod routes;

pub use routes::membership_routes;

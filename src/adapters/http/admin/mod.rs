//! HTTP adapter for admin endpoints.
//!
//! - `POST /admin/login`
//! - `GET /admin/dashboard` (admin)

mod handlers;
mod routes;

pub use routes::admin_routes;

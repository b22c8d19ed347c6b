//! HTTP adapter for the client directory.
//!
//! - `POST /clients/signup`, `POST /clients/login`
//! - `GET /clients/me` (client)
//! - `GET /clients`, `PATCH /clients/active/:id`, `PATCH /clients/inactive/:id`,
//!   `DELETE /clients/:id` (admin)
//! - `GET /clients/:id` (public), `PATCH /clients/:id`, `GET /clients/:id/purchases`
//! - `POST /clients/forgot-password`, `POST /clients/reset-password`

pub mod dto;
mod handlers;
mod routes;

pub use routes::client_routes;

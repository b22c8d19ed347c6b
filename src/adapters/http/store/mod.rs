//! HTTP adapter for the store.
//!
//! - `GET /store/items`, `GET /store/items/:id` (public)
//! - `POST /store/items`, `PATCH /store/items/:id`, `DELETE /store/items/:id` (admin)
//! - `POST /store/purchase`, `POST /store/verify-purchase` (client)
//! - `GET /store/purchases` (admin), `GET /store/purchases/:id` (owner or admin)
//! - `POST /store/webhook` (gateway signature)

pub mod dto;
mod handlers;
mod routes;

pub use routes::store_routes;

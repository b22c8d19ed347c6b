//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Each operation has its own handler; the HTTP adapter builds them once and
//! shares them through `AppState`.

pub mod handlers;
pub mod notifications;
pub mod uploads;

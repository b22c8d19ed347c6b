//! In-memory adapters.
//!
//! Back the repository ports with process memory for tests and local runs.

mod database;

pub use database::InMemoryDatabase;

//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresClientRepository` - clients and their membership fields
//! - `PostgresAdminRepository` - admin accounts
//! - `PostgresStoreItemRepository` - the store catalogue
//! - `PostgresPurchaseRepository` - purchases, line items, stock withdrawal
//!
//! Money columns hold kobo as BIGINT.

mod admin_repository;
mod client_repository;
mod columns;
mod purchase_repository;
mod store_item_repository;

pub use admin_repository::PostgresAdminRepository;
pub use client_repository::PostgresClientRepository;
pub use purchase_repository::PostgresPurchaseRepository;
pub use store_item_repository::PostgresStoreItemRepository;

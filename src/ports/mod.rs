//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Repository Ports
//!
//! - `ClientRepository` - clients and their membership fields
//! - `AdminRepository` - admin accounts
//! - `StoreItemRepository` - store catalogue
//! - `PurchaseRepository` - purchases, line items and stock withdrawal
//!
//! ## Integration Ports
//!
//! - `PaymentGateway` - hosted checkout, verification, webhook signatures
//! - `EmailSender` - transactional email
//! - `FileStorage` - public object storage
//! - `QrCodeGenerator` - check-in QR codes
//!
//! ## Auth Ports
//!
//! - `PasswordHasher` - credential hashing
//! - `TokenService` - access and reset tokens
//! - `SessionValidator` - bearer token to principal

mod admin_repository;
mod client_repository;
mod email_sender;
mod file_storage;
mod password_hasher;
mod payment_gateway;
mod purchase_repository;
mod qr_code_generator;
mod session_validator;
mod store_item_repository;
mod token_service;

pub use admin_repository::AdminRepository;
pub use client_repository::{ClientListEntry, ClientListQuery, ClientPage, ClientRepository};
pub use email_sender::{EmailError, EmailMessage, EmailSender, Recipient};
pub use file_storage::{FileStorage, StorageError};
pub use password_hasher::PasswordHasher;
pub use payment_gateway::{
    CheckoutHandle, InitializeTransaction, PaymentError, PaymentErrorCode, PaymentGateway,
    PaymentReceipt, TransactionVerification,
};
pub use purchase_repository::PurchaseRepository;
pub use qr_code_generator::{QrCodeError, QrCodeGenerator, RenderedImage};
pub use session_validator::SessionValidator;
pub use store_item_repository::StoreItemRepository;
pub use token_service::{TokenClaims, TokenService, RESET_PASSWORD_PURPOSE};

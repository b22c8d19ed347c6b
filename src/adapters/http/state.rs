//! Shared application state for the HTTP layer.

use std::sync::Arc;

use crate::application::handlers::admin::GetDashboardStatsHandler;
use crate::application::handlers::auth::{CredentialsValidator, LoginHandler};
use crate::application::handlers::client::{
    ActivateMembershipHandler, DeactivateMembershipHandler, DeleteClientHandler,
    ForgotPasswordHandler, GetClientHandler, ListClientPurchasesHandler, ListClientsHandler,
    ResetPasswordHandler, SignupHandler, UpdateClientHandler,
};
use crate::application::handlers::membership::{
    GetMembershipStatusHandler, InitializePaymentHandler, VerifyPaymentHandler,
};
use crate::application::handlers::store::{
    CreatePurchaseHandler, CreateStoreItemHandler, DeleteStoreItemHandler, GetPurchaseHandler,
    GetStoreItemHandler, ListPurchasesHandler, ListStoreItemsHandler, UpdateStoreItemHandler,
    VerifyPurchaseHandler,
};
use crate::application::handlers::webhook::DispatchWebhookHandler;
use crate::ports::{
    AdminRepository, ClientRepository, EmailSender, FileStorage, PasswordHasher, PaymentGateway,
    PurchaseRepository, QrCodeGenerator, SessionValidator, StoreItemRepository, TokenService,
};

/// Every port the handlers need, shared across requests.
///
/// Cloned per request; all fields are reference counted. Handlers are built
/// on demand from these ports.
#[derive(Clone)]
pub struct AppState {
    pub clients: Arc<dyn ClientRepository>,
    pub admins: Arc<dyn AdminRepository>,
    pub store_items: Arc<dyn StoreItemRepository>,
    pub purchases: Arc<dyn PurchaseRepository>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenService>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub payment_gateway: Arc<dyn PaymentGateway>,
    pub email_sender: Arc<dyn EmailSender>,
    pub file_storage: Arc<dyn FileStorage>,
    pub qr_codes: Arc<dyn QrCodeGenerator>,
    /// Base URL for links placed in QR codes and emails.
    pub frontend_url: String,
}

impl AppState {
    // ─────────────────────────────────────────────────────────────────────────
    // Auth
    // ─────────────────────────────────────────────────────────────────────────

    pub fn login_handler(&self) -> LoginHandler {
        let credentials = CredentialsValidator::new(
            self.clients.clone(),
            self.admins.clone(),
            self.password_hasher.clone(),
        );
        LoginHandler::new(Arc::new(credentials), self.tokens.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Clients
    // ─────────────────────────────────────────────────────────────────────────

    pub fn signup_handler(&self) -> SignupHandler {
        SignupHandler::new(
            self.clients.clone(),
            self.password_hasher.clone(),
            self.tokens.clone(),
            self.file_storage.clone(),
            self.qr_codes.clone(),
            self.email_sender.clone(),
            self.frontend_url.clone(),
        )
    }

    pub fn get_client_handler(&self) -> GetClientHandler {
        GetClientHandler::new(self.clients.clone(), self.purchases.clone())
    }

    pub fn list_clients_handler(&self) -> ListClientsHandler {
        ListClientsHandler::new(self.clients.clone())
    }

    pub fn activate_membership_handler(&self) -> ActivateMembershipHandler {
        ActivateMembershipHandler::new(self.clients.clone())
    }

    pub fn deactivate_membership_handler(&self) -> DeactivateMembershipHandler {
        DeactivateMembershipHandler::new(self.clients.clone())
    }

    pub fn update_client_handler(&self) -> UpdateClientHandler {
        UpdateClientHandler::new(self.clients.clone(), self.file_storage.clone())
    }

    pub fn delete_client_handler(&self) -> DeleteClientHandler {
        DeleteClientHandler::new(self.clients.clone())
    }

    pub fn client_purchases_handler(&self) -> ListClientPurchasesHandler {
        ListClientPurchasesHandler::new(self.clients.clone(), self.purchases.clone())
    }

    pub fn forgot_password_handler(&self) -> ForgotPasswordHandler {
        ForgotPasswordHandler::new(
            self.clients.clone(),
            self.tokens.clone(),
            self.email_sender.clone(),
            self.frontend_url.clone(),
        )
    }

    pub fn reset_password_handler(&self) -> ResetPasswordHandler {
        ResetPasswordHandler::new(
            self.clients.clone(),
            self.tokens.clone(),
            self.password_hasher.clone(),
        )
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Admin
    // ─────────────────────────────────────────────────────────────────────────

    pub fn dashboard_handler(&self) -> GetDashboardStatsHandler {
        GetDashboardStatsHandler::new(self.clients.clone(), self.purchases.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Membership
    // ─────────────────────────────────────────────────────────────────────────

    pub fn initialize_payment_handler(&self) -> InitializePaymentHandler {
        InitializePaymentHandler::new(self.clients.clone(), self.payment_gateway.clone())
    }

    pub fn verify_payment_handler(&self) -> VerifyPaymentHandler {
        VerifyPaymentHandler::new(
            self.clients.clone(),
            self.payment_gateway.clone(),
            self.email_sender.clone(),
        )
    }

    pub fn membership_status_handler(&self) -> GetMembershipStatusHandler {
        GetMembershipStatusHandler::new(self.clients.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Store
    // ─────────────────────────────────────────────────────────────────────────

    pub fn create_item_handler(&self) -> CreateStoreItemHandler {
        CreateStoreItemHandler::new(self.store_items.clone(), self.file_storage.clone())
    }

    pub fn list_items_handler(&self) -> ListStoreItemsHandler {
        ListStoreItemsHandler::new(self.store_items.clone())
    }

    pub fn get_item_handler(&self) -> GetStoreItemHandler {
        GetStoreItemHandler::new(self.store_items.clone())
    }

    pub fn update_item_handler(&self) -> UpdateStoreItemHandler {
        UpdateStoreItemHandler::new(self.store_items.clone(), self.file_storage.clone())
    }

    pub fn delete_item_handler(&self) -> DeleteStoreItemHandler {
        DeleteStoreItemHandler::new(self.store_items.clone())
    }

    pub fn create_purchase_handler(&self) -> CreatePurchaseHandler {
        CreatePurchaseHandler::new(
            self.clients.clone(),
            self.store_items.clone(),
            self.purchases.clone(),
            self.payment_gateway.clone(),
        )
    }

    pub fn verify_purchase_handler(&self) -> VerifyPurchaseHandler {
        VerifyPurchaseHandler::new(
            self.clients.clone(),
            self.purchases.clone(),
            self.payment_gateway.clone(),
            self.email_sender.clone(),
        )
    }

    pub fn list_purchases_handler(&self) -> ListPurchasesHandler {
        ListPurchasesHandler::new(self.purchases.clone())
    }

    pub fn get_purchase_handler(&self) -> GetPurchaseHandler {
        GetPurchaseHandler::new(self.purchases.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Webhooks
    // ─────────────────────────────────────────────────────────────────────────

    pub fn webhook_handler(&self) -> DispatchWebhookHandler {
        DispatchWebhookHandler::new(
            self.payment_gateway.clone(),
            Arc::new(self.verify_payment_handler()),
            Arc::new(self.verify_purchase_handler()),
        )
    }
}

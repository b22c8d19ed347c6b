//! Mock payment gateway for testing.
//!
//! Keeps initialized transactions in memory. Tests settle them with
//! `complete_payment` and sign webhook bodies with `sign`.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::Timestamp;
use crate::domain::payment::WebhookSignatureVerifier;
use crate::ports::{
    CheckoutHandle, InitializeTransaction, PaymentError, PaymentGateway, TransactionVerification,
};

pub const MOCK_GATEWAY_SECRET: &str = "sk_test_mock_gateway";

#[derive(Default)]
struct MockState {
    transactions: HashMap<String, TransactionVerification>,
    initialized: Vec<InitializeTransaction>,
    fail_initialize: bool,
    fail_verify: bool,
}

#[derive(Clone)]
pub struct MockPaymentGateway {
    inner: Arc<RwLock<MockState>>,
    verifier: WebhookSignatureVerifier,
}

impl Default for MockPaymentGateway {
    fn default() -> Self {
        Self::new(MOCK_GATEWAY_SECRET)
    }
}

impl MockPaymentGateway {
    pub fn new(secret: &str) -> Self {
        Self {
            inner: Arc::new(RwLock::new(MockState::default())),
            verifier: WebhookSignatureVerifier::new(secret),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    pub async fn fail_initialize(&self, fail: bool) {
        self.inner.write().await.fail_initialize = fail;
    }

    pub async fn fail_verify(&self, fail: bool) {
        self.inner.write().await.fail_verify = fail;
    }

    /// Registers or replaces the gateway's record of a transaction.
    pub async fn set_transaction(&self, verification: TransactionVerification) {
        self.inner
            .write()
            .await
            .transactions
            .insert(verification.reference.clone(), verification);
    }

    /// Marks an initialized transaction as paid. Returns false if unknown.
    pub async fn complete_payment(&self, reference: &str) -> bool {
        let mut state = self.inner.write().await;
        match state.transactions.get_mut(reference) {
            Some(tx) => {
                tx.status = "success".to_string();
                tx.paid_at = Some(Timestamp::now());
                true
            }
            None => false,
        }
    }

    /// Hex signature for a webhook body, as the gateway would send it.
    pub fn sign(&self, payload: &[u8]) -> String {
        self.verifier.sign(payload)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Assertions
    // ════════════════════════════════════════════════════════════════════════════

    pub async fn initialized(&self) -> Vec<InitializeTransaction> {
        self.inner.read().await.initialized.clone()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn initialize_transaction(
        &self,
        request: InitializeTransaction,
    ) -> Result<CheckoutHandle, PaymentError> {
        let mut state = self.inner.write().await;
        if state.fail_initialize {
            return Err(PaymentError::provider("Failed to initialize payment"));
        }

        state.transactions.insert(
            request.reference.clone(),
            TransactionVerification {
                api_status: true,
                status: "pending".to_string(),
                reference: request.reference.clone(),
                amount_minor: request.amount.minor(),
                paid_at: None,
                metadata: request.metadata.to_value(),
            },
        );
        let handle = CheckoutHandle {
            authorization_url: format!("https://checkout.paystack.test/{}", request.reference),
            access_code: format!("access_{}", request.reference),
            reference: request.reference.clone(),
        };
        state.initialized.push(request);
        Ok(handle)
    }

    async fn verify_transaction(
        &self,
        reference: &str,
    ) -> Result<TransactionVerification, PaymentError> {
        let state = self.inner.read().await;
        if state.fail_verify {
            return Err(PaymentError::network("Failed to verify payment"));
        }
        state
            .transactions
            .get(reference)
            .cloned()
            .ok_or_else(|| PaymentError::provider("Failed to verify payment"))
    }

    fn verify_webhook_signature(&self, payload: &[u8], signature: &str) -> bool {
        self.verifier.verify(payload, signature)
    }
}

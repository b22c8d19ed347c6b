//! Request bodies for the membership endpoints.

use serde::Deserialize;

use crate::domain::foundation::Money;

/// Amount is in naira.
#[derive(Debug, Clone, Deserialize)]
pub struct InitializePaymentRequest {
    pub amount: Money,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPaymentRequest {
    pub reference: String,
}

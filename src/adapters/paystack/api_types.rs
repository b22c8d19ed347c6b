//! Paystack REST payloads.
//!
//! Only the fields we read are modelled. Paystack wraps every response in
//! `{ status, message, data }`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct InitializeRequest<'a> {
    pub email: &'a str,
    /// Minor units.
    pub amount: i64,
    pub reference: &'a str,
    pub metadata: Value,
    pub callback_url: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub status: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

#[derive(Debug, Deserialize)]
pub struct InitializeData {
    pub authorization_url: String,
    pub access_code: String,
    pub reference: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyData {
    pub status: String,
    pub reference: String,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub paid_at: Option<String>,
    /// Object, JSON-encoded string, or empty string when no metadata was set.
    #[serde(default)]
    pub metadata: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_verify_response() {
        let body = r#"{
            "status": true,
            "message": "Verification successful",
            "data": {
                "id": 4099260516,
                "status": "success",
                "reference": "membership_1700000000000_k2j4h5g6f7d",
                "amount": 500000,
                "paid_at": "2024-01-15T10:30:00.000Z",
                "metadata": {"client_id": "c1", "payment_type": "membership"},
                "customer": {"email": "ada@gym.ng"}
            }
        }"#;
        let parsed: Envelope<VerifyData> = serde_json::from_str(body).unwrap();
        let data = parsed.data.unwrap();
        assert!(parsed.status);
        assert_eq!(data.amount, 500000);
        assert_eq!(data.metadata["payment_type"], "membership");
    }

    #[test]
    fn tolerates_failed_envelope_without_data() {
        let body = r#"{"status": false, "message": "Transaction reference not found"}"#;
        let parsed: Envelope<VerifyData> = serde_json::from_str(body).unwrap();
        assert!(!parsed.status);
        assert!(parsed.data.is_none());
    }

    #[test]
    fn serializes_initialize_request() {
        let body = InitializeRequest {
            email: "ada@gym.ng",
            amount: 3_500_000,
            reference: "purchase_1_abc",
            metadata: serde_json::json!({"payment_type": "store_purchase"}),
            callback_url: "https://gym.ng/payment/callback",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["amount"], 3_500_000);
        assert_eq!(json["callback_url"], "https://gym.ng/payment/callback");
    }
}

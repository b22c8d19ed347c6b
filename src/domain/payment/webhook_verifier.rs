//! Gateway webhook signature verification.
//!
//! The gateway signs every callback with HMAC-SHA512 over the raw request
//! body, keyed by the account secret key, and sends the lowercase hex digest in
//! the `x-paystack-signature` header.

use hmac::{Hmac, Mac};
use sha2::Sha512;
use subtle::ConstantTimeEq;

/// Header carrying the callback signature.
pub const SIGNATURE_HEADER: &str = "x-paystack-signature";

type HmacSha512 = Hmac<Sha512>;

/// Verifier for gateway callback signatures.
#[derive(Clone)]
pub struct WebhookSignatureVerifier {
    secret: Vec<u8>,
}

impl WebhookSignatureVerifier {
    /// Creates a verifier keyed by the gateway secret key.
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    /// Returns true only if `signature` is byte-for-byte the lowercase hex
    /// HMAC-SHA512 of `payload`. No trimming or case folding is applied.
    pub fn verify(&self, payload: &[u8], signature: &str) -> bool {
        let Some(expected) = self.compute(payload) else {
            return false;
        };
        constant_time_compare(hex::encode(expected).as_bytes(), signature.as_bytes())
    }

    /// Hex signature the gateway would send for `payload`.
    ///
    /// Used by the mock gateway and by tests to sign fixtures.
    pub fn sign(&self, payload: &[u8]) -> String {
        self.compute(payload).map(hex::encode).unwrap_or_default()
    }

    fn compute(&self, payload: &[u8]) -> Option<Vec<u8>> {
        let mut mac = HmacSha512::new_from_slice(&self.secret).ok()?;
        mac.update(payload);
        Some(mac.finalize().into_bytes().to_vec())
    }
}

impl std::fmt::Debug for WebhookSignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookSignatureVerifier")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

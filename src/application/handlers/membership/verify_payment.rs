//! VerifyPaymentHandler - activates a membership once the gateway confirms the charge.
//!
//! Reached from the client's own verify call and from the webhook dispatcher,
//! so a payment may be verified more than once. Re-verification renews the
//! period from the moment of the call.

use serde::Serialize;
use std::sync::Arc;

use crate::application::notifications;
use crate::domain::client::ClientProfile;
use crate::domain::foundation::Timestamp;
use crate::domain::membership::MembershipError;
use crate::ports::{ClientRepository, EmailSender, PaymentGateway, PaymentReceipt};

#[derive(Debug, Clone)]
pub struct VerifyPaymentCommand {
    pub reference: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyPaymentResult {
    pub message: String,
    pub client: ClientProfile,
    pub payment: PaymentReceipt,
}

pub struct VerifyPaymentHandler {
    clients: Arc<dyn ClientRepository>,
    gateway: Arc<dyn PaymentGateway>,
    email: Arc<dyn EmailSender>,
}

impl VerifyPaymentHandler {
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        gateway: Arc<dyn PaymentGateway>,
        email: Arc<dyn EmailSender>,
    ) -> Self {
        Self {
            clients,
            gateway,
            email,
        }
    }

    pub async fn handle(
        &self,
        cmd: VerifyPaymentCommand,
    ) -> Result<VerifyPaymentResult, MembershipError> {
        let verification = self
            .gateway
            .verify_transaction(&cmd.reference)
            .await
            .map_err(|e| MembershipError::payment_failed(e.message))?;

        if !verification.is_successful() {
            return Err(MembershipError::verification_failed());
        }

        let client_id = verification
            .metadata()
            .client_id()
            .ok_or_else(MembershipError::invalid_metadata)?;

        let mut client = self
            .clients
            .find_by_id(&client_id)
            .await?
            .ok_or(MembershipError::client_not_found(client_id))?;

        client.membership_mut().activate_from_payment(
            Timestamp::now(),
            verification.amount(),
            verification.reference.clone(),
        )?;
        self.clients.update(&client).await?;

        tracing::info!(
            client_id = %client_id,
            reference = %verification.reference,
            "Membership payment verified"
        );

        notifications::deliver(
            self.email.as_ref(),
            notifications::membership_confirmation(&client, &verification.reference),
            "membership_confirmation",
        )
        .await;

        Ok(VerifyPaymentResult {
            message: "Membership payment verified successfully".to_string(),
            client: client.profile(),
            payment: verification.receipt(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::foundation::ClientId;
    use crate::domain::membership::{MembershipStatus, MEMBERSHIP_PERIOD_DAYS};
    use crate::domain::payment::PaymentMetadata;
    use crate::ports::TransactionVerification;

    fn successful(reference: &str, metadata: PaymentMetadata) -> TransactionVerification {
        TransactionVerification {
            api_status: true,
            status: "success".into(),
            reference: reference.into(),
            amount_minor: 500_000,
            paid_at: Some(Timestamp::now()),
            metadata: metadata.to_value(),
        }
    }

    fn handler(fx: &Fixture) -> VerifyPaymentHandler {
        VerifyPaymentHandler::new(fx.clients(), fx.payments(), fx.mailer())
    }

    #[tokio::test]
    async fn successful_payment_activates_for_thirty_days() {
        let fx = Fixture::new();
        let client = fx.seed_client("ada@gym.ng", MembershipStatus::Inactive).await;
        fx.gateway
            .set_transaction(successful(
                "membership_1_abc",
                PaymentMetadata::membership(*client.id(), 5000.0),
            ))
            .await;

        let result = handler(&fx)
            .handle(VerifyPaymentCommand {
                reference: "membership_1_abc".into(),
            })
            .await
            .unwrap();

        assert_eq!(result.message, "Membership payment verified successfully");
        assert_eq!(result.payment.amount.map(|m| m.to_major()), Some(5000.0));

        let stored = fx.clients().find_by_id(client.id()).await.unwrap().unwrap();
        let membership = stored.membership();
        assert_eq!(membership.status, MembershipStatus::Active);
        let (paid, due) = (membership.paid_date.unwrap(), membership.due_date.unwrap());
        assert_eq!(due, paid.add_days(MEMBERSHIP_PERIOD_DAYS));
        assert_eq!(membership.payment_reference.as_deref(), Some("membership_1_abc"));
        assert_eq!(fx.email.subjects().await, vec!["Membership Payment Confirmed"]);
    }

    #[tokio::test]
    async fn pending_transaction_fails_verification() {
        let fx = Fixture::new();
        let client = fx.seed_client("ada@gym.ng", MembershipStatus::Inactive).await;
        let mut tx = successful("ref", PaymentMetadata::membership(*client.id(), 5000.0));
        tx.status = "abandoned".into();
        fx.gateway.set_transaction(tx).await;

        let err = handler(&fx)
            .handle(VerifyPaymentCommand {
                reference: "ref".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Payment verification failed");
    }

    #[tokio::test]
    async fn metadata_without_client_is_rejected() {
        let fx = Fixture::new();
        fx.gateway
            .set_transaction(successful("ref", PaymentMetadata::default()))
            .await;

        let err = handler(&fx)
            .handle(VerifyPaymentCommand {
                reference: "ref".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, MembershipError::InvalidMetadata);
    }

    #[tokio::test]
    async fn unknown_client_in_metadata() {
        let fx = Fixture::new();
        fx.gateway
            .set_transaction(successful(
                "ref",
                PaymentMetadata::membership(ClientId::new(), 5000.0),
            ))
            .await;

        let err = handler(&fx)
            .handle(VerifyPaymentCommand {
                reference: "ref".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MembershipError::ClientNotFound(_)));
    }

    #[tokio::test]
    async fn email_failure_does_not_fail_verification() {
        let fx = Fixture::new();
        let client = fx.seed_client("ada@gym.ng", MembershipStatus::Expired).await;
        fx.gateway
            .set_transaction(successful(
                "ref",
                PaymentMetadata::membership(*client.id(), 5000.0),
            ))
            .await;
        fx.email.fail_sends(true).await;

        let result = handler(&fx)
            .handle(VerifyPaymentCommand {
                reference: "ref".into(),
            })
            .await;
        assert!(result.is_ok());
    }
}

//! InitializePaymentHandler - starts a hosted checkout for a membership period.

use std::sync::Arc;

use crate::domain::foundation::{ClientId, Money, Timestamp};
use crate::domain::membership::MembershipError;
use crate::domain::payment::{PaymentMetadata, MEMBERSHIP_REFERENCE_PREFIX};
use crate::ports::{CheckoutHandle, ClientRepository, InitializeTransaction, PaymentGateway};

#[derive(Debug, Clone)]
pub struct InitializePaymentCommand {
    pub client_id: ClientId,
    pub amount: Money,
}

pub struct InitializePaymentHandler {
    clients: Arc<dyn ClientRepository>,
    gateway: Arc<dyn PaymentGateway>,
}

impl InitializePaymentHandler {
    pub fn new(clients: Arc<dyn ClientRepository>, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { clients, gateway }
    }

    pub async fn handle(
        &self,
        cmd: InitializePaymentCommand,
    ) -> Result<CheckoutHandle, MembershipError> {
        let mut client = self
            .clients
            .find_by_id(&cmd.client_id)
            .await?
            .ok_or(MembershipError::client_not_found(cmd.client_id))?;

        if client.membership_mut().refresh(Timestamp::now()) {
            self.clients.update(&client).await?;
            tracing::info!(client_id = %cmd.client_id, "Membership expired");
        }
        client.membership().ensure_payable(cmd.client_id)?;
        if cmd.amount.is_zero() {
            return Err(MembershipError::validation(
                "amount",
                "Amount must be greater than zero",
            ));
        }

        let reference = self.gateway.generate_reference(MEMBERSHIP_REFERENCE_PREFIX);
        let checkout = self
            .gateway
            .initialize_transaction(InitializeTransaction {
                email: client.email().to_string(),
                amount: cmd.amount,
                reference: reference.clone(),
                metadata: PaymentMetadata::membership(cmd.client_id, cmd.amount.to_major()),
            })
            .await
            .map_err(|e| MembershipError::payment_failed(e.message))?;

        client.membership_mut().record_pending_payment(&reference);
        self.clients.update(&client).await?;

        tracing::info!(client_id = %cmd.client_id, reference = %reference, "Membership payment initialized");
        Ok(checkout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::membership::MembershipStatus;
    use crate::domain::payment::PaymentType;

    fn naira(amount: f64) -> Money {
        Money::from_major(amount).unwrap()
    }

    #[tokio::test]
    async fn starts_checkout_in_kobo_and_remembers_reference() {
        let fx = Fixture::new();
        let client = fx.seed_client("ada@gym.ng", MembershipStatus::Inactive).await;
        let handler = InitializePaymentHandler::new(fx.clients(), fx.payments());

        let checkout = handler
            .handle(InitializePaymentCommand {
                client_id: *client.id(),
                amount: naira(5000.0),
            })
            .await
            .unwrap();

        assert!(checkout.reference.starts_with("membership_"));
        let sent = fx.gateway.initialized().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].amount.minor(), 500_000);
        assert_eq!(sent[0].metadata.payment_type, Some(PaymentType::Membership));
        assert_eq!(sent[0].metadata.amount_naira, Some(5000.0));

        let stored = fx.clients().find_by_id(client.id()).await.unwrap().unwrap();
        assert_eq!(
            stored.membership().payment_reference.as_deref(),
            Some(checkout.reference.as_str())
        );
        assert_eq!(stored.membership().status, MembershipStatus::Inactive);
    }

    #[tokio::test]
    async fn expired_members_can_renew() {
        let fx = Fixture::new();
        let client = fx.seed_client("ada@gym.ng", MembershipStatus::Expired).await;
        let result = InitializePaymentHandler::new(fx.clients(), fx.payments())
            .handle(InitializePaymentCommand {
                client_id: *client.id(),
                amount: naira(5000.0),
            })
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn lapsed_active_members_can_renew() {
        let fx = Fixture::new();
        let mut client = fx.seed_client("ada@gym.ng", MembershipStatus::Active).await;
        client.membership_mut().due_date = Some(Timestamp::now().add_days(-3));
        fx.clients().update(&client).await.unwrap();

        let checkout = InitializePaymentHandler::new(fx.clients(), fx.payments())
            .handle(InitializePaymentCommand {
                client_id: *client.id(),
                amount: naira(5000.0),
            })
            .await
            .unwrap();

        assert_eq!(fx.gateway.initialized().await.len(), 1);
        let stored = fx.clients().find_by_id(client.id()).await.unwrap().unwrap();
        assert_eq!(stored.membership().status, MembershipStatus::Expired);
        assert_eq!(
            stored.membership().payment_reference.as_deref(),
            Some(checkout.reference.as_str())
        );
    }

    #[tokio::test]
    async fn active_members_are_rejected_before_the_gateway() {
        let fx = Fixture::new();
        let client = fx.seed_client("ada@gym.ng", MembershipStatus::Active).await;
        let err = InitializePaymentHandler::new(fx.clients(), fx.payments())
            .handle(InitializePaymentCommand {
                client_id: *client.id(),
                amount: naira(5000.0),
            })
            .await
            .unwrap_err();

        assert_eq!(err.message(), "Client already has an active membership");
        assert!(fx.gateway.initialized().await.is_empty());
    }

    #[tokio::test]
    async fn unknown_client_and_zero_amount() {
        let fx = Fixture::new();
        let handler = InitializePaymentHandler::new(fx.clients(), fx.payments());
        let missing = ClientId::new();
        let err = handler
            .handle(InitializePaymentCommand {
                client_id: missing,
                amount: naira(5000.0),
            })
            .await
            .unwrap_err();
        assert_eq!(err, MembershipError::client_not_found(missing));

        let client = fx.seed_client("ada@gym.ng", MembershipStatus::Inactive).await;
        let err = handler
            .handle(InitializePaymentCommand {
                client_id: *client.id(),
                amount: Money::ZERO,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MembershipError::ValidationFailed { .. }));
    }

    #[tokio::test]
    async fn gateway_failure_leaves_client_untouched() {
        let fx = Fixture::new();
        let client = fx.seed_client("ada@gym.ng", MembershipStatus::Inactive).await;
        fx.gateway.fail_initialize(true).await;

        let err = InitializePaymentHandler::new(fx.clients(), fx.payments())
            .handle(InitializePaymentCommand {
                client_id: *client.id(),
                amount: naira(5000.0),
            })
            .await
            .unwrap_err();

        assert_eq!(err.message(), "Failed to initialize payment");
        let stored = fx.clients().find_by_id(client.id()).await.unwrap().unwrap();
        assert!(stored.membership().payment_reference.is_none());
    }
}

//! Admin overrides of a client's membership.
//!
//! Used for cash payments and corrections; no gateway is involved.

use std::sync::Arc;

use crate::domain::client::{ClientError, ClientProfile};
use crate::domain::foundation::{ClientId, Money, Timestamp};
use crate::ports::ClientRepository;

#[derive(Debug, Clone)]
pub struct ActivateMembershipCommand {
    pub client_id: ClientId,
    pub paid_date: Timestamp,
    pub due_date: Timestamp,
    pub amount: Money,
}

#[derive(Debug, Clone)]
pub struct DeactivateMembershipCommand {
    pub client_id: ClientId,
}

pub struct ActivateMembershipHandler {
    clients: Arc<dyn ClientRepository>,
}

impl ActivateMembershipHandler {
    pub fn new(clients: Arc<dyn ClientRepository>) -> Self {
        Self { clients }
    }

    pub async fn handle(&self, cmd: ActivateMembershipCommand) -> Result<ClientProfile, ClientError> {
        let mut client = self
            .clients
            .find_by_id(&cmd.client_id)
            .await?
            .ok_or_else(ClientError::not_found)?;

        client
            .membership_mut()
            .activate_manually(cmd.paid_date, cmd.due_date, cmd.amount)?;
        self.clients.update(&client).await?;

        tracing::info!(client_id = %cmd.client_id, "Membership activated by admin");
        Ok(client.profile())
    }
}

pub struct DeactivateMembershipHandler {
    clients: Arc<dyn ClientRepository>,
}

impl DeactivateMembershipHandler {
    pub fn new(clients: Arc<dyn ClientRepository>) -> Self {
        Self { clients }
    }

    pub async fn handle(
        &self,
        cmd: DeactivateMembershipCommand,
    ) -> Result<ClientProfile, ClientError> {
        let mut client = self
            .clients
            .find_by_id(&cmd.client_id)
            .await?
            .ok_or_else(ClientError::not_found)?;

        client.membership_mut().deactivate()?;
        self.clients.update(&client).await?;

        tracing::info!(client_id = %cmd.client_id, "Membership deactivated by admin");
        Ok(client.profile())
    }
}

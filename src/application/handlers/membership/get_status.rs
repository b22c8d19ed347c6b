//! GetMembershipStatusHandler - reports the membership, expiring it on read.

use std::sync::Arc;

use crate::domain::foundation::{ClientId, Timestamp};
use crate::domain::membership::{MembershipError, MembershipSnapshot};
use crate::ports::ClientRepository;

#[derive(Debug, Clone)]
pub struct GetMembershipStatusQuery {
    pub client_id: ClientId,
}

pub struct GetMembershipStatusHandler {
    clients: Arc<dyn ClientRepository>,
}

impl GetMembershipStatusHandler {
    pub fn new(clients: Arc<dyn ClientRepository>) -> Self {
        Self { clients }
    }

    pub async fn handle(
        &self,
        query: GetMembershipStatusQuery,
    ) -> Result<MembershipSnapshot, MembershipError> {
        let mut client = self
            .clients
            .find_by_id(&query.client_id)
            .await?
            .ok_or(MembershipError::client_not_found(query.client_id))?;

        let now = Timestamp::now();
        if client.membership_mut().refresh(now) {
            self.clients.update(&client).await?;
            tracing::info!(client_id = %query.client_id, "Membership expired");
        }
        Ok(client.membership().snapshot(now))
    }
}

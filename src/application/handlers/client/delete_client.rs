//! DeleteClientHandler - removes a client and, with them, their purchases.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::client::ClientError;
use crate::domain::foundation::ClientId;
use crate::ports::ClientRepository;

#[derive(Debug, Clone)]
pub struct DeleteClientCommand {
    pub client_id: ClientId,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteClientResult {
    pub message: String,
}

pub struct DeleteClientHandler {
    clients: Arc<dyn ClientRepository>,
}

impl DeleteClientHandler {
    pub fn new(clients: Arc<dyn ClientRepository>) -> Self {
        Self { clients }
    }

    pub async fn handle(&self, cmd: DeleteClientCommand) -> Result<DeleteClientResult, ClientError> {
        if self.clients.find_by_id(&cmd.client_id).await?.is_none() {
            return Err(ClientError::not_found());
        }
        self.clients.delete(&cmd.client_id).await?;

        tracing::info!(client_id = %cmd.client_id, "Client deleted");
        Ok(DeleteClientResult {
            message: "Client deleted successfully".to_string(),
        })
    }
}

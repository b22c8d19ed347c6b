//! UpdateClientHandler - partial profile update by the client or an admin.

use std::sync::Arc;

use crate::application::uploads::{store_image, ImageUpload, PROFILE_IMAGES_FOLDER};
use crate::domain::client::{ClientError, ClientProfile, ProfileChanges};
use crate::domain::foundation::{AuthenticatedUser, ClientId};
use crate::ports::{ClientRepository, FileStorage};

#[derive(Debug, Clone)]
pub struct UpdateClientCommand {
    pub actor: AuthenticatedUser,
    pub client_id: ClientId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image: Option<ImageUpload>,
}

pub struct UpdateClientHandler {
    clients: Arc<dyn ClientRepository>,
    storage: Arc<dyn FileStorage>,
}

impl UpdateClientHandler {
    pub fn new(clients: Arc<dyn ClientRepository>, storage: Arc<dyn FileStorage>) -> Self {
        Self { clients, storage }
    }

    pub async fn handle(&self, cmd: UpdateClientCommand) -> Result<ClientProfile, ClientError> {
        let mut client = self
            .clients
            .find_by_id(&cmd.client_id)
            .await?
            .ok_or_else(ClientError::not_found)?;

        if !cmd.actor.can_access_client(&cmd.client_id) {
            return Err(ClientError::forbidden("You can only update your own profile"));
        }

        let profile_image = match cmd.profile_image {
            Some(upload) => Some(
                store_image(self.storage.as_ref(), PROFILE_IMAGES_FOLDER, upload)
                    .await
                    .map_err(|e| ClientError::infrastructure(e.to_string()))?,
            ),
            None => None,
        };

        client.update_profile(ProfileChanges {
            first_name: cmd.first_name,
            last_name: cmd.last_name,
            profile_image,
        })?;
        self.clients.update(&client).await?;

        Ok(client.profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::foundation::AdminId;
    use crate::domain::membership::MembershipStatus;

    fn rename(actor: AuthenticatedUser, client_id: ClientId) -> UpdateClientCommand {
        UpdateClientCommand {
            actor,
            client_id,
            first_name: Some("Adaeze".into()),
            last_name: None,
            profile_image: None,
        }
    }

    #[tokio::test]
    async fn owner_can_rename_themselves() {
        let fx = Fixture::new();
        let client = fx.seed_client("ada@gym.ng", MembershipStatus::Inactive).await;
        let actor = AuthenticatedUser::client(*client.id(), client.email());

        let profile = UpdateClientHandler::new(fx.clients(), fx.files())
            .handle(rename(actor, *client.id()))
            .await
            .unwrap();
        assert_eq!(profile.first_name, "Adaeze");
        assert_eq!(profile.last_name, "Obi");
    }

    #[tokio::test]
    async fn admin_can_update_anyone() {
        let fx = Fixture::new();
        let client = fx.seed_client("ada@gym.ng", MembershipStatus::Inactive).await;
        let actor = AuthenticatedUser::admin(AdminId::new(), "boss@gym.ng");
        assert!(UpdateClientHandler::new(fx.clients(), fx.files())
            .handle(rename(actor, *client.id()))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn other_client_is_forbidden() {
        let fx = Fixture::new();
        let client = fx.seed_client("ada@gym.ng", MembershipStatus::Inactive).await;
        let other = fx.seed_client("bola@gym.ng", MembershipStatus::Inactive).await;
        let actor = AuthenticatedUser::client(*other.id(), other.email());

        let err = UpdateClientHandler::new(fx.clients(), fx.files())
            .handle(rename(actor, *client.id()))
            .await
            .unwrap_err();
        assert_eq!(err, ClientError::forbidden("You can only update your own profile"));
    }

    #[tokio::test]
    async fn missing_client_reports_not_found_before_forbidden() {
        let fx = Fixture::new();
        let actor = AuthenticatedUser::client(ClientId::new(), "x@gym.ng");
        let err = UpdateClientHandler::new(fx.clients(), fx.files())
            .handle(rename(actor, ClientId::new()))
            .await
            .unwrap_err();
        assert_eq!(err, ClientError::NotFound);
    }

    #[tokio::test]
    async fn new_picture_replaces_url() {
        let fx = Fixture::new();
        let client = fx.seed_client("ada@gym.ng", MembershipStatus::Inactive).await;
        let actor = AuthenticatedUser::client(*client.id(), client.email());
        let mut cmd = rename(actor, *client.id());
        cmd.profile_image = Some(ImageUpload {
            file_name: "new.png".into(),
            content_type: "image/png".into(),
            bytes: vec![1],
        });
        let profile = UpdateClientHandler::new(fx.clients(), fx.files())
            .handle(cmd)
            .await
            .unwrap();
        assert!(profile.profile_image.unwrap().ends_with("-new.png"));
    }
}

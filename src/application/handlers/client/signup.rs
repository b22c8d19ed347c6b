//! SignupHandler - registers a client and issues their first access token.

use serde::Serialize;
use std::sync::Arc;

use crate::application::notifications;
use crate::application::uploads::{store_image, ImageUpload, PROFILE_IMAGES_FOLDER, QR_CODES_FOLDER};
use crate::domain::client::{normalize_email, validate_password, Client, ClientError, ClientProfile};
use crate::domain::foundation::{Timestamp, UserRole};
use crate::ports::{
    ClientRepository, EmailSender, FileStorage, PasswordHasher, QrCodeGenerator, TokenClaims,
    TokenService,
};

#[derive(Debug, Clone)]
pub struct SignupCommand {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub profile_image: Option<ImageUpload>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupResult {
    pub access_token: String,
    pub client: ClientProfile,
}

pub struct SignupHandler {
    clients: Arc<dyn ClientRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
    storage: Arc<dyn FileStorage>,
    qr_codes: Arc<dyn QrCodeGenerator>,
    email: Arc<dyn EmailSender>,
    frontend_url: String,
}

impl SignupHandler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
        storage: Arc<dyn FileStorage>,
        qr_codes: Arc<dyn QrCodeGenerator>,
        email: Arc<dyn EmailSender>,
        frontend_url: impl Into<String>,
    ) -> Self {
        Self {
            clients,
            hasher,
            tokens,
            storage,
            qr_codes,
            email,
            frontend_url: frontend_url.into(),
        }
    }

    pub async fn handle(&self, cmd: SignupCommand) -> Result<SignupResult, ClientError> {
        // 1. Validate input before touching storage
        let email = normalize_email(&cmd.email)?;
        validate_password(&cmd.password)?;

        // 2. Reject duplicates up front; the unique index still backs this
        if self.clients.find_by_email(&email).await?.is_some() {
            return Err(ClientError::email_taken());
        }

        // 3. Profile picture
        let profile_image = match cmd.profile_image {
            Some(upload) => Some(
                store_image(self.storage.as_ref(), PROFILE_IMAGES_FOLDER, upload)
                    .await
                    .map_err(|e| ClientError::infrastructure(e.to_string()))?,
            ),
            None => None,
        };

        // 4. Create the client
        let password_hash = self
            .hasher
            .hash(&cmd.password)
            .map_err(|e| ClientError::infrastructure(e.to_string()))?;
        let mut client = Client::register(
            &email,
            password_hash,
            &cmd.first_name,
            &cmd.last_name,
            profile_image,
        )?;
        self.clients.create(&client).await?;

        // 5. Check-in QR code
        match self.attach_qr_code(&mut client).await {
            Ok(()) => self.clients.update(&client).await?,
            Err(reason) => {
                tracing::warn!(client_id = %client.id(), %reason, "QR code generation failed");
            }
        }

        // 6. Welcome email and token
        notifications::deliver(self.email.as_ref(), notifications::welcome(&client), "welcome")
            .await;

        let access_token = self
            .tokens
            .issue(&TokenClaims::new(
                client.id().to_string(),
                client.email(),
                UserRole::Client,
            ))
            .map_err(|e| ClientError::infrastructure(e.to_string()))?;

        tracing::info!(client_id = %client.id(), "Client signed up");
        Ok(SignupResult {
            access_token,
            client: client.profile(),
        })
    }

    async fn attach_qr_code(&self, client: &mut Client) -> Result<(), String> {
        let image = self
            .qr_codes
            .render(&client.check_in_url(&self.frontend_url))
            .map_err(|e| e.to_string())?;
        let path = format!(
            "{}/client-{}-{}.{}",
            QR_CODES_FOLDER,
            client.id(),
            Timestamp::now().as_unix_millis(),
            image.extension
        );
        let url = self
            .storage
            .upload(&path, image.bytes, image.content_type)
            .await
            .map_err(|e| e.to_string())?;
        client.attach_qr_code(url);
        Ok(())
    }
}

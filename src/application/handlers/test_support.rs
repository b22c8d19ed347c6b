//! Shared wiring for handler tests.

use secrecy::SecretString;
use std::sync::Arc;

use crate::adapters::auth::{Argon2PasswordHasher, JwtTokenService};
use crate::adapters::email::RecordingEmailSender;
use crate::adapters::memory::InMemoryDatabase;
use crate::adapters::paystack::MockPaymentGateway;
use crate::adapters::qrcode::FakeQrCodeGenerator;
use crate::adapters::storage::InMemoryFileStorage;
use crate::domain::admin::Admin;
use crate::domain::client::Client;
use crate::domain::foundation::{Money, Timestamp};
use crate::domain::membership::{MembershipStatus, MEMBERSHIP_PERIOD_DAYS};
use crate::domain::store::{NewStoreItem, StoreItem};
use crate::ports::{
    AdminRepository, ClientRepository, EmailSender, FileStorage, PasswordHasher, PaymentGateway,
    PurchaseRepository, QrCodeGenerator, StoreItemRepository, TokenService,
};

pub const TEST_PASSWORD: &str = "secret123";
pub const FRONTEND_URL: &str = "http://localhost:3000";

pub struct Fixture {
    pub db: InMemoryDatabase,
    pub gateway: MockPaymentGateway,
    pub email: RecordingEmailSender,
    pub storage: InMemoryFileStorage,
    pub hasher: Arc<Argon2PasswordHasher>,
    pub tokens: Arc<JwtTokenService>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            db: InMemoryDatabase::new(),
            gateway: MockPaymentGateway::default(),
            email: RecordingEmailSender::new(),
            storage: InMemoryFileStorage::new(),
            hasher: Arc::new(Argon2PasswordHasher::low_cost()),
            tokens: Arc::new(JwtTokenService::new(SecretString::new(
                "test-secret-test-secret-test-secret".to_string(),
            ))),
        }
    }

    pub fn clients(&self) -> Arc<dyn ClientRepository> {
        Arc::new(self.db.clone())
    }

    pub fn admins(&self) -> Arc<dyn AdminRepository> {
        Arc::new(self.db.clone())
    }

    pub fn items(&self) -> Arc<dyn StoreItemRepository> {
        Arc::new(self.db.clone())
    }

    pub fn purchases(&self) -> Arc<dyn PurchaseRepository> {
        Arc::new(self.db.clone())
    }

    pub fn payments(&self) -> Arc<dyn PaymentGateway> {
        Arc::new(self.gateway.clone())
    }

    pub fn mailer(&self) -> Arc<dyn EmailSender> {
        Arc::new(self.email.clone())
    }

    pub fn files(&self) -> Arc<dyn FileStorage> {
        Arc::new(self.storage.clone())
    }

    pub fn qr(&self) -> Arc<dyn QrCodeGenerator> {
        Arc::new(FakeQrCodeGenerator)
    }

    pub fn password_hasher(&self) -> Arc<dyn PasswordHasher> {
        self.hasher.clone()
    }

    pub fn token_service(&self) -> Arc<dyn TokenService> {
        self.tokens.clone()
    }

    /// Stores a client with `TEST_PASSWORD` and the given membership status.
    pub async fn seed_client(&self, email: &str, status: MembershipStatus) -> Client {
        let hash = self.hasher.hash(TEST_PASSWORD).unwrap();
        let mut client = Client::register(email, hash, "Ada", "Obi", None).unwrap();
        if status != MembershipStatus::Inactive {
            let now = Timestamp::now();
            client
                .membership_mut()
                .activate_manually(
                    now,
                    now.add_days(MEMBERSHIP_PERIOD_DAYS),
                    Money::from_major(5000.0).unwrap(),
                )
                .unwrap();
            client.membership_mut().status = status;
        }
        ClientRepository::create(&self.db, &client).await.unwrap();
        client
    }

    pub async fn seed_admin(&self, email: &str) -> Admin {
        let hash = self.hasher.hash(TEST_PASSWORD).unwrap();
        let admin = Admin::new(email, hash, "Gym", "Admin").unwrap();
        AdminRepository::save(&self.db, &admin).await.unwrap();
        admin
    }

    pub async fn seed_item(&self, name: &str, naira: f64, quantity: i32, active: bool) -> StoreItem {
        let item = StoreItem::new(NewStoreItem {
            name: name.to_string(),
            description: None,
            price: Money::from_major(naira).unwrap(),
            quantity,
            is_active: Some(active),
            image_url: None,
        })
        .unwrap();
        StoreItemRepository::save(&self.db, &item).await.unwrap();
        item
    }
}

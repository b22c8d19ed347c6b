//! End-to-end tests for the REST API.
//!
//! The full router runs over the in-memory repositories, the mock payment
//! gateway and the real HS256 token service, so every request goes through
//! the bearer middleware, the extractors and the error mapping.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;

use gym_portal::adapters::auth::{Argon2PasswordHasher, JwtSessionValidator, JwtTokenService};
use gym_portal::adapters::email::RecordingEmailSender;
use gym_portal::adapters::http::{api_router, with_http_layers, AppState};
use gym_portal::adapters::memory::InMemoryDatabase;
use gym_portal::adapters::paystack::MockPaymentGateway;
use gym_portal::adapters::qrcode::FakeQrCodeGenerator;
use gym_portal::adapters::storage::InMemoryFileStorage;
use gym_portal::application::handlers::admin::{BootstrapAdminCommand, BootstrapAdminHandler};
use gym_portal::config::ServerConfig;
use gym_portal::domain::payment::SIGNATURE_HEADER;
use gym_portal::ports::{AdminRepository, ClientRepository, PasswordHasher, TokenService};

const BOUNDARY: &str = "gym-portal-test-boundary";
const PASSWORD: &str = "secret123";
const ADMIN_EMAIL: &str = "owner@gym.ng";

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    router: Router,
    gateway: MockPaymentGateway,
    email: RecordingEmailSender,
}

impl TestApp {
    async fn new() -> Self {
        let db = InMemoryDatabase::new();
        let gateway = MockPaymentGateway::default();
        let email = RecordingEmailSender::new();

        let clients: Arc<dyn ClientRepository> = Arc::new(db.clone());
        let admins: Arc<dyn AdminRepository> = Arc::new(db.clone());
        let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::low_cost());
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(SecretString::new(
            "integration-secret-integration-secret".to_string(),
        )));

        BootstrapAdminHandler::new(admins.clone(), hasher.clone())
            .handle(BootstrapAdminCommand {
                email: ADMIN_EMAIL.to_string(),
                password: PASSWORD.to_string(),
                first_name: "Gym".to_string(),
                last_name: "Owner".to_string(),
            })
            .await
            .unwrap();

        let state = AppState {
            session_validator: Arc::new(JwtSessionValidator::new(
                tokens.clone(),
                clients.clone(),
                admins.clone(),
            )),
            clients,
            admins,
            store_items: Arc::new(db.clone()),
            purchases: Arc::new(db.clone()),
            password_hasher: hasher,
            tokens,
            payment_gateway: Arc::new(gateway.clone()),
            email_sender: Arc::new(email.clone()),
            file_storage: Arc::new(InMemoryFileStorage::new()),
            qr_codes: Arc::new(FakeQrCodeGenerator),
            frontend_url: "http://localhost:3000".to_string(),
        };

        Self {
            router: api_router(state),
            gateway,
            email,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(request(Method::GET, uri, token).body(Body::empty()).unwrap())
            .await
    }

    async fn json(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        self.send(
            request(method, uri, token)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn form(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        fields: &[(&str, &str)],
    ) -> (StatusCode, Value) {
        self.send(
            request(method, uri, token)
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={}", BOUNDARY),
                )
                .body(Body::from(multipart_body(fields)))
                .unwrap(),
        )
        .await
    }

    /// Signs up a client and returns `(client_id, token)`.
    async fn signup(&self, email: &str) -> (String, String) {
        let (status, body) = self
            .form(
                Method::POST,
                "/clients/signup",
                None,
                &[
                    ("email", email),
                    ("password", PASSWORD),
                    ("first_name", "Ada"),
                    ("last_name", "Obi"),
                ],
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "signup failed: {}", body);
        (
            body["client"]["id"].as_str().unwrap().to_string(),
            body["access_token"].as_str().unwrap().to_string(),
        )
    }

    async fn admin_token(&self) -> String {
        let (status, body) = self
            .json(
                Method::POST,
                "/admin/login",
                None,
                json!({ "email": ADMIN_EMAIL, "password": PASSWORD }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["access_token"].as_str().unwrap().to_string()
    }

    /// Signs up a client and pays for a membership through verify-payment.
    async fn active_member(&self, email: &str) -> (String, String) {
        let (id, token) = self.signup(email).await;
        let (_, checkout) = self
            .json(
                Method::POST,
                "/membership/initialize-payment",
                Some(&token),
                json!({ "amount": 5000 }),
            )
            .await;
        let reference = checkout["reference"].as_str().unwrap().to_string();
        assert!(self.gateway.complete_payment(&reference).await);

        let (status, _) = self
            .json(
                Method::POST,
                "/membership/verify-payment",
                Some(&token),
                json!({ "reference": reference }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        (id, token)
    }

    /// Creates a catalogue item as admin and returns its id.
    async fn create_item(&self, name: &str, price: &str, quantity: &str) -> String {
        let admin = self.admin_token().await;
        let (status, body) = self
            .form(
                Method::POST,
                "/store/items",
                Some(&admin),
                &[("name", name), ("price", price), ("quantity", quantity)],
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create item failed: {}", body);
        body["id"].as_str().unwrap().to_string()
    }
}

fn request(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {}", token)),
        None => builder,
    }
}

fn multipart_body(fields: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
            BOUNDARY, name, value
        ));
    }
    body.push_str(&format!("--{}--\r\n", BOUNDARY));
    body
}

// =============================================================================
// Health and Auth
// =============================================================================

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn transport_layers_stamp_a_request_id() {
    let app = TestApp::new().await;
    let router = with_http_layers(app.router.clone(), &ServerConfig::default());

    let response = router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn signup_then_login_returns_profile_and_token() {
    let app = TestApp::new().await;
    let (id, _) = app.signup("ada@gym.ng").await;

    let (status, body) = app
        .json(
            Method::POST,
            "/clients/login",
            None,
            json!({ "email": "ada@gym.ng", "password": PASSWORD }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["client"]["id"], id.as_str());
    assert_eq!(body["client"]["membership_status"], "INACTIVE");
    assert!(body["client"].get("password_hash").is_none());

    let token = body["access_token"].as_str().unwrap();
    let (status, me) = app.get("/clients/me", Some(token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "ada@gym.ng");
    assert_eq!(me["purchases"], json!([]));
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let app = TestApp::new().await;
    app.signup("ada@gym.ng").await;

    let (status, body) = app
        .form(
            Method::POST,
            "/clients/signup",
            None,
            &[
                ("email", "ada@gym.ng"),
                ("password", PASSWORD),
                ("first_name", "Ada"),
                ("last_name", "Obi"),
            ],
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_code"], "EMAIL_ALREADY_REGISTERED");
}

#[tokio::test]
async fn signup_requires_every_text_field() {
    let app = TestApp::new().await;
    let (status, body) = app
        .form(
            Method::POST,
            "/clients/signup",
            None,
            &[("email", "ada@gym.ng"), ("password", PASSWORD)],
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "first_name");
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = TestApp::new().await;
    app.signup("ada@gym.ng").await;

    let (status, body) = app
        .json(
            Method::POST,
            "/clients/login",
            None,
            json!({ "email": "ada@gym.ng", "password": "not-the-password" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn bad_bearer_token_is_rejected_before_routing() {
    let app = TestApp::new().await;
    let (status, _) = app.get("/clients/me", Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/clients/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let app = TestApp::new().await;
    let (status, body) = app
        .send(
            Request::builder()
                .method(Method::POST)
                .uri("/clients/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"email\":"))
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "VALIDATION_FAILED");
}

// =============================================================================
// Admin
// =============================================================================

#[tokio::test]
async fn dashboard_is_admin_only() {
    let app = TestApp::new().await;
    let (_, client_token) = app.signup("ada@gym.ng").await;

    let (status, body) = app.get("/admin/dashboard", Some(&client_token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Admin access required");

    let admin = app.admin_token().await;
    let (status, stats) = app.get("/admin/dashboard", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_clients"], 1);
    assert_eq!(stats["active_members"], 0);
    assert_eq!(stats["membership_stats"]["inactive"], 1);
}

#[tokio::test]
async fn admin_manages_membership_by_hand() {
    let app = TestApp::new().await;
    let (id, _) = app.signup("ada@gym.ng").await;
    let admin = app.admin_token().await;

    let (status, profile) = app
        .json(
            Method::PATCH,
            &format!("/clients/active/{}", id),
            Some(&admin),
            json!({
                "paid_date": "2026-10-01T00:00:00Z",
                "due_date": "2026-10-31T00:00:00Z",
                "amount": 5000
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["membership_status"], "ACTIVE");

    let (status, listed) = app.get("/clients?status=ACTIVE", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["data"][0]["id"], id.as_str());

    let (status, profile) = app
        .json(
            Method::PATCH,
            &format!("/clients/inactive/{}", id),
            Some(&admin),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["membership_status"], "INACTIVE");
}

#[tokio::test]
async fn deleting_a_client_removes_them() {
    let app = TestApp::new().await;
    let (id, _) = app.signup("ada@gym.ng").await;
    let admin = app.admin_token().await;

    let uri = format!("/clients/{}", id);
    let (status, body) = app
        .send(request(Method::DELETE, &uri, Some(&admin)).body(Body::empty()).unwrap())
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Client deleted successfully");

    let (status, body) = app.get(&uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "CLIENT_NOT_FOUND");
}

#[tokio::test]
async fn unknown_client_id_format_is_a_bad_request() {
    let app = TestApp::new().await;
    let (status, _) = app.get("/clients/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Membership Billing
// =============================================================================

#[tokio::test]
async fn paid_membership_becomes_active() {
    let app = TestApp::new().await;
    let (_, token) = app.active_member("ada@gym.ng").await;

    let (status, snapshot) = app.get("/membership/status", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["status"], "ACTIVE");
    assert_eq!(snapshot["is_expired"], false);
    assert_eq!(snapshot["last_paid_amount"], json!(5000.0));

    let initialized = app.gateway.initialized().await;
    assert_eq!(initialized.len(), 1);
    assert_eq!(initialized[0].amount.minor(), 500_000);
}

#[tokio::test]
async fn active_member_cannot_start_another_payment() {
    let app = TestApp::new().await;
    let (_, token) = app.active_member("ada@gym.ng").await;

    let (status, body) = app
        .json(
            Method::POST,
            "/membership/initialize-payment",
            Some(&token),
            json!({ "amount": 5000 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "MEMBERSHIP_ALREADY_ACTIVE");
}

#[tokio::test]
async fn unpaid_reference_does_not_activate() {
    let app = TestApp::new().await;
    let (_, token) = app.signup("ada@gym.ng").await;
    let (_, checkout) = app
        .json(
            Method::POST,
            "/membership/initialize-payment",
            Some(&token),
            json!({ "amount": 5000 }),
        )
        .await;

    let (status, body) = app
        .json(
            Method::POST,
            "/membership/verify-payment",
            Some(&token),
            json!({ "reference": checkout["reference"] }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "PAYMENT_FAILED");
}

// =============================================================================
// Store
// =============================================================================

#[tokio::test]
async fn catalogue_hides_inactive_items_by_default() {
    let app = TestApp::new().await;
    app.create_item("Protein Powder", "15000", "10").await;
    let admin = app.admin_token().await;
    let (status, _) = app
        .form(
            Method::POST,
            "/store/items",
            Some(&admin),
            &[
                ("name", "Old Shaker"),
                ("price", "2000"),
                ("quantity", "3"),
                ("is_active", "false"),
            ],
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, visible) = app.get("/store/items", None).await;
    assert_eq!(visible.as_array().unwrap().len(), 1);
    assert_eq!(visible[0]["name"], "Protein Powder");
    assert_eq!(visible[0]["price"], json!(15000.0));

    let (_, all) = app.get("/store/items?include_inactive=true", None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn clients_cannot_edit_the_catalogue() {
    let app = TestApp::new().await;
    let (_, token) = app.signup("ada@gym.ng").await;
    let (status, _) = app
        .form(
            Method::POST,
            "/store/items",
            Some(&token),
            &[("name", "Towel"), ("price", "1000"), ("quantity", "1")],
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn purchases_need_an_active_membership() {
    let app = TestApp::new().await;
    let item = app.create_item("Protein Powder", "15000", "10").await;
    let (_, token) = app.signup("ada@gym.ng").await;

    let (status, body) = app
        .json(
            Method::POST,
            "/store/purchase",
            Some(&token),
            json!({
                "items": [{ "store_item_id": item, "quantity": 1 }],
                "delivery_option": "PICKUP"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error_code"], "MEMBERSHIP_REQUIRED");
}

#[tokio::test]
async fn purchase_beyond_stock_reports_availability() {
    let app = TestApp::new().await;
    let item = app.create_item("Protein Powder", "15000", "2").await;
    let (_, token) = app.active_member("ada@gym.ng").await;

    let (status, body) = app
        .json(
            Method::POST,
            "/store/purchase",
            Some(&token),
            json!({
                "items": [{ "store_item_id": item, "quantity": 3 }],
                "delivery_option": "PICKUP"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "INSUFFICIENT_STOCK");
    assert_eq!(body["details"]["available"], "2");
}

#[tokio::test]
async fn verified_purchase_completes_and_withdraws_stock() {
    let app = TestApp::new().await;
    let item = app.create_item("Protein Powder", "15000", "10").await;
    let (client_id, token) = app.active_member("ada@gym.ng").await;

    let (status, created) = app
        .json(
            Method::POST,
            "/store/purchase",
            Some(&token),
            json!({
                "items": [{ "store_item_id": item, "quantity": 2 }],
                "delivery_option": "DELIVERY",
                "delivery_address": "12 Allen Avenue, Ikeja"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["purchase"]["status"], "PENDING");
    assert_eq!(created["purchase"]["total_amount"], json!(30000.0));

    let reference = created["payment"]["reference"].as_str().unwrap().to_string();
    assert!(app.gateway.complete_payment(&reference).await);

    let (status, verified) = app
        .json(
            Method::POST,
            "/store/verify-purchase",
            Some(&token),
            json!({ "reference": reference }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(verified["message"], "Purchase verified successfully");
    assert_eq!(verified["purchase"]["status"], "COMPLETED");

    let (_, stock) = app.get(&format!("/store/items/{}", item), None).await;
    assert_eq!(stock["quantity"], 8);

    let (status, history) = app
        .get(&format!("/clients/{}/purchases", client_id), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.as_array().unwrap().len(), 1);

    let (status, again) = app
        .json(
            Method::POST,
            "/store/verify-purchase",
            Some(&token),
            json!({ "reference": reference }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(again["error_code"], "PURCHASE_ALREADY_VERIFIED");
}

#[tokio::test]
async fn other_clients_cannot_read_a_purchase() {
    let app = TestApp::new().await;
    let item = app.create_item("Protein Powder", "15000", "10").await;
    let (_, owner) = app.active_member("ada@gym.ng").await;
    let (_, stranger) = app.signup("tolu@gym.ng").await;

    let (_, created) = app
        .json(
            Method::POST,
            "/store/purchase",
            Some(&owner),
            json!({
                "items": [{ "store_item_id": item, "quantity": 1 }],
                "delivery_option": "PICKUP"
            }),
        )
        .await;
    let uri = format!("/store/purchases/{}", created["purchase"]["id"].as_str().unwrap());

    let (status, _) = app.get(&uri, Some(&stranger)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get(&uri, Some(&owner)).await;
    assert_eq!(status, StatusCode::OK);

    let admin = app.admin_token().await;
    let (status, _) = app.get(&uri, Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Webhooks
// =============================================================================

#[tokio::test]
async fn unsigned_webhook_is_acknowledged_but_ignored() {
    let app = TestApp::new().await;
    let payload = json!({ "event": "charge.success", "data": {} }).to_string();

    let (status, body) = app
        .send(
            Request::builder()
                .method(Method::POST)
                .uri("/membership/webhook")
                .header(SIGNATURE_HEADER, "deadbeef")
                .body(Body::from(payload))
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Invalid signature");
}

#[tokio::test]
async fn signed_webhook_completes_a_store_purchase_from_either_path() {
    let app = TestApp::new().await;
    let item = app.create_item("Protein Powder", "15000", "10").await;
    let (_, token) = app.active_member("ada@gym.ng").await;

    let (_, created) = app
        .json(
            Method::POST,
            "/store/purchase",
            Some(&token),
            json!({
                "items": [{ "store_item_id": item, "quantity": 1 }],
                "delivery_option": "PICKUP"
            }),
        )
        .await;
    let reference = created["payment"]["reference"].as_str().unwrap().to_string();
    let purchase_id = created["purchase"]["id"].as_str().unwrap().to_string();
    assert!(app.gateway.complete_payment(&reference).await);

    let payload = json!({
        "event": "charge.success",
        "data": {
            "reference": reference,
            "metadata": {
                "payment_type": "store_purchase",
                "purchase_id": purchase_id
            }
        }
    })
    .to_string();
    let signature = app.gateway.sign(payload.as_bytes());

    // Delivered to the membership endpoint on purpose: routing is by payload.
    let (status, body) = app
        .send(
            Request::builder()
                .method(Method::POST)
                .uri("/membership/webhook")
                .header(SIGNATURE_HEADER, signature)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload))
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Webhook processed successfully");

    let (_, purchase) = app
        .get(&format!("/store/purchases/{}", purchase_id), Some(&token))
        .await;
    assert_eq!(purchase["status"], "COMPLETED");
    assert!(app
        .email
        .subjects()
        .await
        .iter()
        .any(|s| s.contains("Purchase")));
}

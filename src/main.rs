//! Gym Portal API server.
//!
//! Loads configuration from `GYM_PORTAL__*` environment variables, connects
//! to PostgreSQL, applies migrations, wires the production adapters and
//! serves the REST API until Ctrl+C or SIGTERM.

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gym_portal::adapters::auth::{Argon2PasswordHasher, JwtSessionValidator, JwtTokenService};
use gym_portal::adapters::email::ResendEmailSender;
use gym_portal::adapters::http::{api_router, with_http_layers, AppState};
use gym_portal::adapters::paystack::{PaystackConfig, PaystackGateway};
use gym_portal::adapters::postgres::{
    PostgresAdminRepository, PostgresClientRepository, PostgresPurchaseRepository,
    PostgresStoreItemRepository,
};
use gym_portal::adapters::qrcode::SvgQrCodeGenerator;
use gym_portal::adapters::storage::{SupabaseStorage, SupabaseStorageConfig};
use gym_portal::application::handlers::admin::{
    BootstrapAdminCommand, BootstrapAdminHandler, BootstrapOutcome,
};
use gym_portal::config::AppConfig;
use gym_portal::ports::{AdminRepository, ClientRepository, PasswordHasher, TokenService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    init_tracing(&config);

    config.validate()?;

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;
    tracing::info!("Database pool created");

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Migrations applied");
    }

    let clients: Arc<dyn ClientRepository> =
        Arc::new(PostgresClientRepository::new(pool.clone()));
    let admins: Arc<dyn AdminRepository> = Arc::new(PostgresAdminRepository::new(pool.clone()));
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
    let tokens: Arc<dyn TokenService> = Arc::new(
        JwtTokenService::new(SecretString::new(config.auth.jwt_secret.clone())).with_ttls(
            config.auth.token_ttl_secs,
            config.auth.reset_token_ttl_secs,
        ),
    );

    if let Some((email, password)) = config.auth.bootstrap_admin() {
        let outcome = BootstrapAdminHandler::new(admins.clone(), password_hasher.clone())
            .handle(BootstrapAdminCommand {
                email: email.to_string(),
                password: password.to_string(),
                first_name: "Gym".to_string(),
                last_name: "Admin".to_string(),
            })
            .await?;
        if outcome == BootstrapOutcome::AlreadyExists {
            tracing::debug!(email = %email, "Bootstrap admin already present");
        }
    }

    let payment_gateway = PaystackGateway::new(
        PaystackConfig::new(
            SecretString::new(config.payment.paystack_secret_key.clone()),
            config.payment.paystack_callback_url.clone(),
        )
        .with_base_url(config.payment.paystack_base_url.clone())
        .with_timeout(Duration::from_secs(config.payment.timeout_secs)),
    );
    let email_sender = ResendEmailSender::new(
        SecretString::new(config.email.resend_api_key.clone()),
        config.email.from_header(),
        config.email.admin_email.clone(),
    );
    let file_storage = SupabaseStorage::new(
        SupabaseStorageConfig::new(
            config.storage.supabase_url.clone(),
            SecretString::new(config.storage.supabase_service_key.clone()),
        )
        .with_bucket(config.storage.bucket.clone()),
    );

    let state = AppState {
        session_validator: Arc::new(JwtSessionValidator::new(
            tokens.clone(),
            clients.clone(),
            admins.clone(),
        )),
        clients,
        admins,
        store_items: Arc::new(PostgresStoreItemRepository::new(pool.clone())),
        purchases: Arc::new(PostgresPurchaseRepository::new(pool.clone())),
        password_hasher,
        tokens,
        payment_gateway: Arc::new(payment_gateway),
        email_sender: Arc::new(email_sender),
        file_storage: Arc::new(file_storage),
        qr_codes: Arc::new(SvgQrCodeGenerator::new()),
        frontend_url: config.server.frontend_base(),
    };

    let app = with_http_layers(api_router(state), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        address = %addr,
        environment = ?config.server.environment,
        paystack_live = config.payment.is_live_mode(),
        "gym-portal listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Shutdown complete");
    Ok(())
}

/// `RUST_LOG` wins over the configured filter. JSON lines in production.
fn init_tracing(config: &AppConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.server.log_level.as_str().into());

    let production = config.is_production();
    let json_layer =
        production.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!production).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}

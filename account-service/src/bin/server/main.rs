use std::sync::Arc;

use account_service::account::models::AvatarPolicy;
use account_service::account::ports::AccountServicePort;
use account_service::config::Config;
use account_service::domain::account::service::AccountService;
use account_service::inbound::http::cookie::RefreshCookie;
use account_service::inbound::http::router::create_router;
use account_service::outbound::mail::SmtpMailer;
use account_service::outbound::repositories::PostgresAccountRepository;
use account_service::outbound::repositories::PostgresFileRepository;
use account_service::outbound::storage::S3ObjectStorage;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        mail_enabled = config.mail.enabled,
        storage_bucket = %config.storage.bucket,
        avatar_max_bytes = config.upload.avatar_max_bytes,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(config.authenticator()?);
    let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool.clone()));
    let file_repository = Arc::new(PostgresFileRepository::new(pg_pool));
    let mailer = Arc::new(SmtpMailer::new(&config.mail)?);
    let storage = Arc::new(S3ObjectStorage::from_config(&config.storage).await);

    let account_service: Arc<dyn AccountServicePort> = Arc::new(AccountService::new(
        account_repository,
        file_repository,
        mailer,
        storage,
        Arc::clone(&authenticator),
        AvatarPolicy::new(config.upload.avatar_max_bytes),
    ));

    let http_address = format!("{}:{}", config.server.host, config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        account_service,
        authenticator,
        RefreshCookie::from(&config.cookie),
        &config.server.allowed_origins,
        config.upload.avatar_max_bytes,
    );

    axum::serve(http_listener, http_application).await?;
    tracing::info!("Server exited successfully");

    Ok(())
}

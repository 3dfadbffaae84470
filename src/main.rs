use std::sync::Arc;

use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use city_guide_bot::adapters::catalog::{BuiltinCatalog, DatabaseMenuCatalog};
use city_guide_bot::adapters::http::{webhook_routes, WebhookHandlers};
use city_guide_bot::adapters::memory::{
    InMemoryClientRegistry, InMemoryFeedbackStore, InMemoryItemRepository, InMemorySessionStore,
};
use city_guide_bot::adapters::postgres::{
    PostgresClientRegistry, PostgresFeedbackStore, PostgresItemRepository, PostgresSessionStore,
};
use city_guide_bot::adapters::whatsapp::{MessagingError, WhatsAppConfig, WhatsAppSender};
use city_guide_bot::application::{
    ConversationEngine, EngineConfig, FeedbackCollector, HandleInboundMessageHandler, InboundQueue,
    UserLocks,
};
use city_guide_bot::config::{AppConfig, ConfigError, DatabaseConfig, MenuSource, ValidationError};
use city_guide_bot::domain::foundation::DomainError;
use city_guide_bot::ports::{
    CatalogLoader, ClientRegistry, FeedbackStore, ItemRepository, SessionStore,
};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migrations: {0}")]
    Migrations(#[from] sqlx::migrate::MigrateError),

    #[error("items: {0}")]
    Items(DomainError),

    #[error("whatsapp: {0}")]
    Messaging(#[from] MessagingError),

    #[error("server: {0}")]
    Io(#[from] std::io::Error),
}

struct Storage {
    sessions: Arc<dyn SessionStore>,
    items: Arc<dyn ItemRepository>,
    feedback: Arc<dyn FeedbackStore>,
    clients: Arc<dyn ClientRegistry>,
    catalog: Arc<dyn CatalogLoader>,
}

#[tokio::main]
async fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("failed to load configuration: {err}");
            std::process::exit(1);
        }
    };

    init_tracing(&config);

    if let Err(err) = run(config).await {
        error!(error = %err, "City guide bot stopped");
        std::process::exit(1);
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn run(config: AppConfig) -> Result<(), StartupError> {
    config.validate()?;

    let storage = match &config.database {
        Some(database) => postgres_storage(database, config.conversation.menu_source).await?,
        None => memory_storage(&config).await?,
    };

    let whatsapp = &config.whatsapp;
    let sender = WhatsAppSender::new(
        WhatsAppConfig::new(whatsapp.access_token.expose_secret().clone(), whatsapp.phone_number_id.clone())
            .with_base_url(whatsapp.api_base_url.clone())
            .with_timeout(whatsapp.timeout())
            .with_max_retries(whatsapp.max_retries),
    )?;

    let engine = ConversationEngine::new(
        storage.items,
        storage.catalog,
        FeedbackCollector::new(storage.feedback),
        EngineConfig {
            page_size: config.conversation.page_size,
            idle_timeout: config.conversation.idle_timeout(),
        },
    );

    let inbound = HandleInboundMessageHandler::new(
        Arc::new(engine),
        storage.sessions,
        Arc::new(sender),
        storage.clients,
        Arc::new(UserLocks::new()),
        config.conversation.main_menu_delay(),
    );

    let app = webhook_routes(
        WebhookHandlers::new(InboundQueue::new(Arc::new(inbound)), whatsapp.verify_token.clone()),
        config.server.request_timeout(),
    );

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(
        addr = %listener.local_addr().unwrap_or(addr),
        environment = ?config.server.environment,
        "City guide bot listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down cleanly");
    Ok(())
}

async fn postgres_storage(
    database: &DatabaseConfig,
    menu_source: MenuSource,
) -> Result<Storage, StartupError> {
    let pool: PgPool = PgPoolOptions::new()
        .min_connections(database.min_connections)
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .connect(&database.url)
        .await?;

    if database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Migrations applied");
    }

    let catalog: Arc<dyn CatalogLoader> = match menu_source {
        MenuSource::Database => Arc::new(DatabaseMenuCatalog::new(pool.clone())),
        MenuSource::Builtin => Arc::new(BuiltinCatalog::new()),
    };

    info!("Using PostgreSQL storage");
    Ok(Storage {
        sessions: Arc::new(PostgresSessionStore::new(pool.clone())),
        items: Arc::new(PostgresItemRepository::new(pool.clone())),
        feedback: Arc::new(PostgresFeedbackStore::new(pool.clone())),
        clients: Arc::new(PostgresClientRegistry::new(pool)),
        catalog,
    })
}

async fn memory_storage(config: &AppConfig) -> Result<Storage, StartupError> {
    let items = match &config.conversation.items_dir {
        Some(dir) => InMemoryItemRepository::load_dir(dir)
            .await
            .map_err(StartupError::Items)?,
        None => InMemoryItemRepository::new(),
    };

    info!("No database configured, using in-memory storage");
    Ok(Storage {
        sessions: Arc::new(InMemorySessionStore::new()),
        items: Arc::new(items),
        feedback: Arc::new(InMemoryFeedbackStore::new()),
        clients: Arc::new(InMemoryClientRegistry::new()),
        catalog: Arc::new(BuiltinCatalog::new()),
    })
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

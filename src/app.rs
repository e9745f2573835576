//! Application bootstrap: configuration, logging, database, and service
//! wiring.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use stockroom_auth::{Authenticator, PasswordHasher, PasswordValidator, SessionStore};
use stockroom_core::AppResult;
use stockroom_core::config::AppConfig;
use stockroom_database::repositories::{BorrowRepository, ItemRepository, UserRepository};
use stockroom_database::{DatabasePool, migration};
use stockroom_entity::session::Session;
use stockroom_service::{AdminUserService, BorrowService, CatalogService, ReturnService};

/// The wired application: configuration, connections, and all services.
///
/// `bootstrap` is the only place concrete repositories are constructed;
/// everything downstream sees the store traits.
pub struct Application {
    /// Loaded configuration.
    pub config: AppConfig,
    /// Catalog browsing and administration.
    pub catalog: CatalogService,
    /// Borrow submissions and listings.
    pub borrows: Arc<BorrowService>,
    /// Phone-verified returns.
    pub returns: ReturnService,
    /// User account administration.
    pub users: AdminUserService,
    /// Login, logout, and session persistence.
    pub authenticator: Authenticator,
    /// The underlying connection pool, kept for shutdown.
    db: DatabasePool,
}

impl Application {
    /// Loads configuration, connects to the database, runs migrations, and
    /// wires every service.
    pub async fn bootstrap(env: &str) -> AppResult<Self> {
        let config = AppConfig::load(env)?;
        Self::with_config(config).await
    }

    /// Wires the application from an already-loaded configuration.
    pub async fn with_config(config: AppConfig) -> AppResult<Self> {
        tracing::info!("Starting Stockroom v{}", env!("CARGO_PKG_VERSION"));

        let db = DatabasePool::connect(&config.database).await?;
        migration::run_migrations(db.pool()).await?;

        let items = Arc::new(ItemRepository::new(db.pool().clone()));
        let ledger = Arc::new(BorrowRepository::new(db.pool().clone()));
        let users = Arc::new(UserRepository::new(db.pool().clone()));

        let hasher = Arc::new(PasswordHasher::new());
        let validator = Arc::new(PasswordValidator::new(&config.auth));
        let sessions = Arc::new(SessionStore::new(&config.session));

        let borrows = Arc::new(BorrowService::new(ledger.clone(), items.clone()));

        Ok(Self {
            catalog: CatalogService::new(items),
            returns: ReturnService::new(ledger, borrows.clone()),
            borrows,
            users: AdminUserService::new(users.clone(), hasher.clone(), validator),
            authenticator: Authenticator::new(users, hasher, sessions, config.auth.clone()),
            config,
            db,
        })
    }

    /// Restores the session persisted by the previous run, if any.
    pub fn restore_session(&self) -> AppResult<Option<Session>> {
        self.authenticator.restore_session()
    }

    /// Checks database connectivity.
    pub async fn health_check(&self) -> AppResult<bool> {
        self.db.health_check().await
    }

    /// Closes the database pool.
    pub async fn shutdown(&self) {
        self.db.close().await;
        tracing::info!("Stockroom shut down");
    }
}

/// Initializes the tracing subscriber from logging configuration.
///
/// `RUST_LOG` overrides the configured level when set.
pub fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

use std::sync::Arc;

use anyhow::Context;
use tokengate_auth::{InMemoryUserStore, StoreError, TokenService, User, UserId, UserStore};
use tokengate_config::{CorsConfig, JwtConfig, ServerConfig};
use tokengate_db::{PgUserStore, init_db_pool};
use tracing::{info, warn};

/// The user store selected at startup.
#[derive(Debug, Clone)]
pub enum UserBackend {
    Memory(InMemoryUserStore),
    Postgres(PgUserStore),
}

impl UserStore for UserBackend {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, StoreError> {
        match self {
            UserBackend::Memory(store) => store.find_by_identifier(identifier).await,
            UserBackend::Postgres(store) => store.find_by_identifier(identifier).await,
        }
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        match self {
            UserBackend::Memory(store) => store.find_by_id(id).await,
            UserBackend::Postgres(store) => store.find_by_id(id).await,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<TokenService<UserBackend>>,
    pub server_config: ServerConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(
        auth: TokenService<UserBackend>,
        server_config: ServerConfig,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            auth: Arc::new(auth),
            server_config,
            cors_config,
        }
    }
}

/// Loads configuration from the environment and connects the user store.
///
/// With `DATABASE_URL` unset the server runs against an empty in-memory
/// store, which accepts no logins.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let jwt_config = JwtConfig::from_env().context("invalid token configuration")?;
    let server_config = ServerConfig::from_env().context("invalid server configuration")?;
    let cors_config = CorsConfig::from_env();

    let backend = match std::env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()) {
        Some(url) => {
            let pool = init_db_pool(&url)
                .await
                .context("failed to connect to database")?;
            info!("Using PostgreSQL user store");
            UserBackend::Postgres(PgUserStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set, using an empty in-memory user store");
            UserBackend::Memory(InMemoryUserStore::new())
        }
    };

    Ok(AppState::new(
        TokenService::from_config(backend, &jwt_config),
        server_config,
        cors_config,
    ))
}

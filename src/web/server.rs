//! Web server for Gatehouse.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::auth::{AuthService, CredentialHasher, SessionTokenCodec};
use crate::config::Config;
use crate::db::UserRepository;
use crate::{Database, GatehouseError, Result};

use super::handlers::AppState;
use super::middleware::SessionCookies;
use super::router::create_router;

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Allowed CORS origin.
    cors_origin: String,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &Config, db: Database) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| GatehouseError::Config(format!("invalid server address: {e}")))?;

        let app_state = build_app_state(config, db);

        Ok(Self {
            addr,
            app_state: Arc::new(app_state),
            cors_origin: config.server.cors_origin.clone(),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Run the web server.
    pub async fn run(self) -> Result<()> {
        let router = create_router(self.app_state, &self.cors_origin);

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await?;
        Ok(())
    }

    /// Run the server and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr> {
        let router = create_router(self.app_state, &self.cors_origin);

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}

/// Wire the auth flow and cookie policy from configuration.
pub fn build_app_state(config: &Config, db: Database) -> AppState {
    let directory = Arc::new(UserRepository::new(db.pool().clone()));
    let hasher = CredentialHasher::new(config.auth.bcrypt_cost);
    let tokens =
        SessionTokenCodec::with_ttl_days(&config.auth.jwt_secret, config.auth.token_ttl_days);

    let auth = AuthService::new(directory, hasher, tokens);
    let cookies = SessionCookies::new(
        config.auth.cookie_name.clone(),
        config.server.environment.is_production(),
    );

    AppState::new(auth, cookies)
}

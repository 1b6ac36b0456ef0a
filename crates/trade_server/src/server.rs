//! Server startup and binding
//!
//! Loads the route table, builds the rate provider and serves the router on
//! the configured host/port.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use trade_config::ToolkitConfig;
use trade_market::{build_provider, RateProvider};
use trade_routes::RouteTable;

use crate::routes::{self, AppState};

/// Server instance that can be started
pub struct Server {
    /// Toolkit configuration
    config: Arc<ToolkitConfig>,
    /// The built router
    router: Router,
}

impl Server {
    /// Create a server over an already loaded table and provider
    pub fn new(
        config: ToolkitConfig,
        table: RouteTable,
        provider: Arc<dyn RateProvider>,
    ) -> Self {
        let config = Arc::new(config);
        let state = AppState::new(config.clone(), Arc::new(table), provider);
        Self::with_state(state)
    }

    /// Create a server from prepared state
    pub fn with_state(state: AppState) -> Self {
        let config = state.config.clone();
        let router = routes::build_router(state);
        Self { config, router }
    }

    /// Load the route table and build the provider named in `config`
    pub fn from_config(config: ToolkitConfig) -> anyhow::Result<Self> {
        let table = RouteTable::from_path(&config.data_path)
            .with_context(|| format!("loading routes from {}", config.data_path.display()))?;
        let provider = build_provider(&config.market.provider_settings());
        Ok(Self::new(config, table, provider))
    }

    /// Get the socket address the server will bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = self.config.socket_addr();
        addr.parse()
            .with_context(|| format!("invalid socket address {}", addr))
    }

    /// Get the configuration
    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    /// Run the server
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.socket_addr()?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("binding {}", addr))?;
        self.run_with_listener(listener).await
    }

    /// Run the server with a specific listener
    pub async fn run_with_listener(self, listener: TcpListener) -> anyhow::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, self.router).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing;
    use std::io::Write;

    #[test]
    fn test_server_socket_addr() {
        let mut config = ToolkitConfig::default();
        config.host = "127.0.0.1".to_string();
        config.port = 3000;

        let server = Server::with_state(AppState {
            config: Arc::new(config),
            ..testing::state()
        });
        assert_eq!(server.socket_addr().unwrap().to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn test_invalid_host_is_an_error() {
        let mut config = ToolkitConfig::default();
        config.host = "not a host".to_string();
        let server = Server::with_state(AppState {
            config: Arc::new(config),
            ..testing::state()
        });
        assert!(server.socket_addr().is_err());
    }

    #[test]
    fn test_from_config_loads_table() {
        let mut file = tempfile_csv();
        file.flush().unwrap();
        let mut config = ToolkitConfig::default();
        config.data_path = file.path().to_path_buf();
        config.port = 9999;

        let server = Server::from_config(config).unwrap();
        assert_eq!(server.config().port, 9999);
    }

    #[test]
    fn test_from_config_missing_table() {
        let mut config = ToolkitConfig::default();
        config.data_path = "/nonexistent/routes.csv".into();
        let err = Server::from_config(config).err().unwrap();
        assert!(err.to_string().contains("loading routes"));
    }

    #[tokio::test]
    async fn test_server_serves_health() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = Server::with_state(testing::state());
        let handle = tokio::spawn(async move {
            server.run_with_listener(listener).await.ok();
        });

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains("\"status\":\"healthy\""));

        handle.abort();
    }

    fn tempfile_csv() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(testing::SAMPLE.as_bytes()).unwrap();
        file
    }
}

mod health;

use std::net::SocketAddr;

use axum::Router;
use courier_config::Config;
use courier_relay::Relay;
use tower_http::trace::TraceLayer;

/// Port used when neither the config file nor the CLI names a listen address
pub const DEFAULT_PORT: u16 = 8000;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the provider client cannot be built
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)));

        let relay = Relay::from_config(&config.provider)?;

        let mut app = Router::new();

        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::heartbeat_handler));
        }

        app = app.merge(courier_relay::relay_router(relay));

        app = app.layer(TraceLayer::new_for_http());

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered. In-flight requests
    /// are allowed to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}

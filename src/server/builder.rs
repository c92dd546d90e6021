//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::config::SeedData;
use crate::core::id::{IdentifierSource, RandomIdSource};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the GrubDash HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_id_source(SequentialIdSource::new())
///     .with_seed(SeedData::from_yaml_file("config/seed.yaml")?)
///     .build()?;
/// ```
pub struct ServerBuilder {
    id_source: Option<Arc<dyn IdentifierSource>>,
    seed: Option<SeedData>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            id_source: None,
            seed: None,
            custom_routes: Vec::new(),
        }
    }

    /// Set the identifier source for new records
    ///
    /// Defaults to [`RandomIdSource`]. Tests swap in a sequential source so
    /// created ids are predictable.
    pub fn with_id_source(mut self, source: impl IdentifierSource + 'static) -> Self {
        self.id_source = Some(Arc::new(source));
        self
    }

    /// Pre-populate the stores
    pub fn with_seed(mut self, seed: SeedData) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Add custom routes to the server
    ///
    /// Merged before the JSON 404 fallback, so they take part in normal
    /// routing alongside `/dishes` and `/orders`.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the application-scope host
    ///
    /// Fails when the seed data holds a record that does not pass the create
    /// rules of its collection, or repeats an id.
    pub fn build_host(&mut self) -> Result<ServerHost> {
        let ids = self
            .id_source
            .take()
            .unwrap_or_else(|| Arc::new(RandomIdSource));

        match self.seed.take() {
            Some(seed) => Ok(ServerHost::with_seed(ids, seed)?),
            None => Ok(ServerHost::new(ids)),
        }
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let host = Arc::new(self.build_host()?);
        RestExposure::build_router(host, self.custom_routes)
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::id::SequentialIdSource;
    use crate::entities::Dish;

    fn dish(id: &str, price: u64) -> Dish {
        Dish {
            id: id.to_string(),
            name: "Falafel".to_string(),
            description: "crisp".to_string(),
            price,
            image_url: "http://f".to_string(),
        }
    }

    #[test]
    fn test_builder_default() {
        let builder = ServerBuilder::default();
        assert!(builder.id_source.is_none());
        assert!(builder.seed.is_none());
        assert!(builder.custom_routes.is_empty());
    }

    #[test]
    fn test_build_host_uses_given_id_source() {
        let mut builder = ServerBuilder::new().with_id_source(SequentialIdSource::with_prefix("t-"));
        let host = builder.build_host().unwrap();
        assert_eq!(host.ids.next_id(), "t-1");
    }

    #[tokio::test]
    async fn test_build_host_applies_seed() {
        let mut builder = ServerBuilder::new().with_seed(SeedData {
            dishes: vec![dish("d1", 3)],
            orders: vec![],
        });
        let host = builder.build_host().unwrap();
        assert!(host.dishes.read().await.contains("d1"));
    }

    #[test]
    fn test_build_rejects_invalid_seed() {
        let result = ServerBuilder::new()
            .with_seed(SeedData {
                dishes: vec![dish("d1", 0)],
                orders: vec![],
            })
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_build_with_custom_routes() {
        let routes = Router::new().route("/ping", axum::routing::get(|| async { "pong" }));
        let result = ServerBuilder::new().with_custom_routes(routes).build();
        assert!(result.is_ok());
    }
}

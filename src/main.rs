use anyhow::Result;
use grubdash::config::AppConfig;
use grubdash::server::ServerBuilder;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut builder = ServerBuilder::new();
    if let Some(seed) = config.load_seed()? {
        builder = builder.with_seed(seed);
    }

    tracing::info!(address = %config.server.bind_address(), "starting grubdash");

    builder.serve(&config.server.bind_address()).await
}

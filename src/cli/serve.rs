use anyhow::Context;
use bookgraph::{server, store, Catalog, Config, SchemaBuilder, SharedStore};
use std::net::SocketAddr;

/// Run the serve command to start the GraphQL server
pub async fn run(config_path: String, port: Option<u16>) -> anyhow::Result<()> {
    tracing::info!("📖 Loading configuration from {}", config_path);

    let config = bookgraph::config::load_config(&config_path)?;
    let server_port = port.unwrap_or(config.server.port);

    let store = store::connect(&config.database)
        .await
        .with_context(|| format!("opening store {}", config.database.url))?;

    run_with_store(store, &config, server_port).await
}

/// Serve from an opened store, closing it however serving ends
async fn run_with_store(store: SharedStore, config: &Config, port: u16) -> anyhow::Result<()> {
    let served = serve(store.clone(), config, port).await;

    store.close().await;
    tracing::info!("👋 Server stopped");

    served
}

async fn serve(store: SharedStore, config: &Config, port: u16) -> anyhow::Result<()> {
    if config.database.seed {
        store::seed_sample_data(store.as_ref())
            .await
            .context("seeding sample data")?;
    } else {
        store.init_schema().await.context("creating tables")?;
    }

    tracing::info!("🔧 Building GraphQL schema...");
    let catalog = Catalog::new(store, config.pagination.clone());
    let schema = SchemaBuilder::new(catalog).build()?;

    let addr: SocketAddr = format!("{}:{}", config.server.bind, port)
        .parse()
        .with_context(|| format!("invalid bind address {}", config.server.bind))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}, port may be in use", addr))?;

    tracing::info!("🚀 GraphQL server running on http://{}", addr);
    tracing::info!("📊 Playground: http://{}/graphql", addr);
    tracing::info!("💡 Press Ctrl+C to stop the server");

    axum::serve(listener, server::router(schema))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

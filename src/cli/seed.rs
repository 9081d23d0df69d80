use anyhow::Context;
use bookgraph::store;

/// Run the seed command: create tables and insert the sample dataset
pub async fn run(config_path: String) -> anyhow::Result<()> {
    tracing::info!("📖 Loading configuration from {}", config_path);
    let config = bookgraph::config::load_config(&config_path)?;

    let store = store::connect(&config.database)
        .await
        .with_context(|| format!("opening store {}", config.database.url))?;

    let seeded = store::seed_sample_data(store.as_ref()).await;
    store.close().await;

    if seeded.context("seeding sample data")? {
        tracing::info!("🌱 Sample authors and books inserted");
    } else {
        tracing::info!("Nothing to do, the store already has data");
    }

    Ok(())
}

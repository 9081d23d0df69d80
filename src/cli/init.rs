use anyhow::Context;
use bookgraph::config::{self, Config};

/// Run the init command to write a default configuration
pub fn run(output: Option<String>) -> anyhow::Result<()> {
    let mut config = Config::default();
    config.database.seed = true;

    if let Some(output_path) = output {
        config::save_config(&config, &output_path)
            .with_context(|| format!("writing configuration to {}", output_path))?;
        tracing::info!("📝 Generated {}", output_path);
        tracing::info!("💡 Next steps:");
        tracing::info!("   1. bookgraph seed --config {}", output_path);
        tracing::info!("   2. bookgraph serve --config {}", output_path);
    } else {
        let toml_string = toml::to_string_pretty(&config).context("serializing configuration")?;
        println!("{}", toml_string);
        tracing::info!("💡 Tip: Add --output <file> to save to a file instead of stdout");
    }

    Ok(())
}

use clap::{Parser, Subcommand};

mod cli;

#[derive(Parser)]
#[command(name = "bookgraph")]
#[command(version = "0.1.0")]
#[command(about = "GraphQL API over authors and books", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a default configuration file
    Init {
        /// Output config file path (if not specified, outputs to stdout)
        #[arg(long)]
        output: Option<String>,
    },

    /// Create the tables and insert the sample authors and books
    Seed {
        /// Config file path
        #[arg(long, default_value = "bookgraph.toml")]
        config: String,
    },

    /// Print the GraphQL schema in SDL form
    Schema,

    /// Start GraphQL server
    Serve {
        /// Config file path
        #[arg(long, default_value = "bookgraph.toml")]
        config: String,

        /// Server port (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { output } => {
            cli::init::run(output)?;
        }
        Commands::Seed { config } => {
            cli::seed::run(config).await?;
        }
        Commands::Schema => {
            cli::schema::run()?;
        }
        Commands::Serve { config, port } => {
            cli::serve::run(config, port).await?;
        }
    }

    Ok(())
}

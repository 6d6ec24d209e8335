//! Banking Service - HTTP server for users and accounts.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use banking_service_lib::config::BankingServiceConfig;

#[derive(Parser)]
#[command(name = "banking-service")]
#[command(about = "User and account management service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long, env = "BANKING_SERVICE_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "BANKING_SERVICE_PORT", default_value = "3000")]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = BankingServiceConfig::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},tower_http=debug", config.service.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::debug!(?config, "Configuration loaded");

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            banking_service_lib::run_embedded(&host, port).await?;
        }
    }

    Ok(())
}

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zonesplit::{api, database, Settings};

#[derive(Parser, Debug)]
#[command(name = "zonesplit")]
#[command(about = "Zone and percentage distribution management API", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config/server.toml")]
    config: String,

    /// Apply database migrations and exit
    #[arg(long)]
    migrate: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let settings = Settings::load(&args.config)?;
    settings.validate()?;
    let settings = Arc::new(settings);

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.server.default_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting zonesplit");

    let store = database::open_store(&settings.database, args.migrate).await?;

    if args.migrate {
        return Ok(());
    }

    api::server::start(settings, store).await
}

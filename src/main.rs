//! jamfeed
//!
//! Follows the live team and commit feeds and renders them to the terminal.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use jamfeed::config::Config;
use jamfeed::feed::{DashboardHandler, FeedClient, TickerDriver, TickerHandler};
use jamfeed::logging::init_logging;

#[derive(Parser)]
#[command(name = "jamfeed")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Live code-jam team dashboard and commit ticker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the dashboard feed URL
    #[arg(long, global = true)]
    dashboard_url: Option<String>,

    /// Override the commit feed URL
    #[arg(long, global = true)]
    ticker_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Follow the team roster feed
    Dashboard,

    /// Follow the commit feed
    Ticker,

    /// Follow both feeds
    Watch,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.dashboard_url {
        config.feeds.dashboard_url = url;
    }
    if let Some(url) = cli.ticker_url {
        config.feeds.ticker_url = url;
    }

    init_logging(&config.logging)?;
    tracing::info!("jamfeed v{}", env!("CARGO_PKG_VERSION"));

    let client = FeedClient::new(config.feeds.clone())?;

    tokio::select! {
        result = run(cli.command, &client, &config) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down...");
            Ok(())
        }
    }
}

async fn run(command: Commands, client: &FeedClient, config: &Config) -> anyhow::Result<()> {
    match command {
        Commands::Dashboard => follow_dashboard(client, config).await,
        Commands::Ticker => follow_ticker(client, config).await,
        Commands::Watch => {
            tokio::try_join!(
                follow_dashboard(client, config),
                follow_ticker(client, config)
            )?;
            Ok(())
        }
    }
}

async fn follow_dashboard(client: &FeedClient, config: &Config) -> anyhow::Result<()> {
    let mut handler = DashboardHandler::new(config.layout.metrics(), std::io::stdout());
    client
        .subscribe(&config.feeds.dashboard_url, &mut handler)
        .await?;
    Ok(())
}

async fn follow_ticker(client: &FeedClient, config: &Config) -> anyhow::Result<()> {
    let (handle, driver) = TickerDriver::new(
        config.ticker.timings(),
        config.ticker.max_commits,
        std::io::stdout(),
    );
    let driver_task = tokio::spawn(driver.run());

    let mut handler = TickerHandler::new(handle.clone());
    let result = client.subscribe(&config.feeds.ticker_url, &mut handler).await;

    handle.shutdown();
    driver_task.await?;
    result?;
    Ok(())
}

use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;
use tokio::io::BufReader;
use tracing::info;

use cryptobuddy::constants::{self, BOT_NAME, SUPPORTED_ASSETS};
use cryptobuddy::{recommend, AssetBook, ChatSession, MarketClient};

// Define the command-line interface structure using clap.
// Defaults come from constants.rs, which is the only place CRYPTOBUDDY_* is read.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Base URL of the CoinGecko-compatible market data API.
    #[arg(long, global = true, default_value_t = constants::API_BASE.clone())]
    api_base: String,

    /// Pause between per-asset requests, in milliseconds.
    #[arg(long, global = true, default_value_t = *constants::REQUEST_DELAY_MS)]
    request_delay_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

// Define the available subcommands
#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Chat with CryptoBuddy interactively.
    Chat {
        #[arg(long, default_value_t = *constants::REFRESH_SECS, help = "Seconds between market data refreshes.")]
        refresh_interval: u64,
    },
    /// Ask a single question and print the answer.
    Ask {
        #[arg(required = true, num_args = 1.., help = "The question, e.g. what should I invest in")]
        query: Vec<String>,
    },
    /// Fetch market data once and print the normalized records as JSON.
    Snapshot,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if present (for CRYPTOBUDDY_* overrides)
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with the chat transcript.
    // Reads log level from RUST_LOG environment variable (e.g., RUST_LOG=cryptobuddy=debug)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("CryptoBuddy starting with command: {:?}", cli.command);

    let client = MarketClient::new(&cli.api_base, Duration::from_millis(cli.request_delay_ms))
        .context("Failed to build HTTP client")?;

    match cli.command {
        Commands::Chat { refresh_interval } => {
            let mut session = ChatSession::new(
                client,
                &SUPPORTED_ASSETS,
                Duration::from_secs(refresh_interval),
            );
            println!("{}: Fetching the latest market data...", BOT_NAME);
            let report = session.refresh().await;
            if !report.failed.is_empty() {
                println!(
                    "{}: Couldn't load data for {}, I'll try again later.",
                    BOT_NAME,
                    report.failed.join(", ")
                );
            }

            session
                .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
                .await
                .context("Chat session failed")?;
            info!("Chat session finished.");
        }
        Commands::Ask { query } => {
            let mut book = AssetBook::new();
            client.refresh(&SUPPORTED_ASSETS, &mut book).await;
            println!("{}: {}", BOT_NAME, recommend(&book, &query.join(" ")));
        }
        Commands::Snapshot => {
            let mut book = AssetBook::new();
            client.refresh(&SUPPORTED_ASSETS, &mut book).await;
            let json = serde_json::to_string_pretty(&book).context("Failed to serialize snapshot")?;
            println!("{}", json);
        }
    }

    Ok(())
}

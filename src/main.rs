//! Main entry point for the DeepL client CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deepl_client::cli::commands::{self, Commands};
use deepl_client::Tier;

/// DeepL client - translate text and documents from the command line
#[derive(Parser, Debug)]
#[command(name = "deepl-client", version, about, long_about = None)]
struct Args {
    /// API key (optional, defaults to DEEPL_AUTH_KEY env var)
    #[arg(long)]
    auth_key: Option<String>,

    /// Account tier: free or pro (defaults to DEEPL_TIER env var)
    #[arg(long)]
    tier: Option<Tier>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .ok()
                .filter(|_| !args.verbose)
                .unwrap_or_else(|| format!("deepl_client={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Override config with CLI args if provided
    if let Some(auth_key) = args.auth_key {
        std::env::set_var("DEEPL_AUTH_KEY", auth_key);
    }

    if let Some(tier) = args.tier {
        std::env::set_var("DEEPL_TIER", tier.to_string());
    }

    // Execute command
    match args.command {
        Some(Commands::Text {
            text,
            target_lang,
            source_lang,
            split_sentences,
            preserve_formatting,
        }) => {
            commands::handle_text(text, target_lang, source_lang, split_sentences, preserve_formatting)
                .await?;
        }
        Some(Commands::Document {
            file,
            target_lang,
            source_lang,
            stdout,
        }) => {
            commands::handle_document(file, target_lang, source_lang, stdout).await?;
        }
        Some(Commands::Usage) => {
            commands::handle_usage().await?;
        }
        Some(Commands::Languages) => {
            commands::handle_languages();
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}

// SYNOID Sign Main Entry Point
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use synoid_sign::config::{self, SignConfig};
use synoid_sign::server;
use synoid_sign::sign::{InMemorySignRepository, SignRepository};
use synoid_sign::state::{build_embedder, SignState};

use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "synoid-sign")]
#[command(about = "SYNOID Sign - phrase to sign-language animation", long_about = None)]
struct Cli {
    /// Sign store to match against (overrides SYNOID_SIGN_STORE)
    #[arg(long, global = true)]
    signs: Option<PathBuf>,

    /// Directory holding A.json .. Z.json (overrides SYNOID_ALPHABET_DIR)
    #[arg(long, global = true)]
    alphabet: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the pose API server
    Serve {
        /// Port to run the server on
        #[arg(short, long, default_value_t = 5000)]
        port: u16,
    },

    /// Sign a phrase once and print the frames as JSON
    Translate {
        /// Phrase to sign
        phrase: String,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// Embed a directory of recorded <word>.json animations into a sign store
    Index {
        /// Directory of recorded sign animations
        #[arg(short, long)]
        input: PathBuf,

        /// Output sign store (defaults to the configured store path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(config::log_filter(rust_log.as_deref()))
        .init();

    info!("--- SYNOID SIGN v0.1.1 ---");

    let args = Cli::parse();

    let mut config = SignConfig::from_env()?;
    if let Some(signs) = args.signs {
        config.sign_store = signs;
    }
    if let Some(alphabet) = args.alphabet {
        config.alphabet_dir = alphabet;
    }

    match args.command {
        Commands::Serve { port } => {
            let state = Arc::new(SignState::load(&config).await?);
            info!(
                "[KERNEL] 🧠 {} signs, {} letters ready",
                state.sign_count, state.letter_count
            );
            server::start_server(port, state).await?;
        }
        Commands::Translate { phrase, pretty } => {
            let state = SignState::load(&config).await?;
            let frames = state.pipeline.translate(&phrase).await?;
            let json = if pretty {
                serde_json::to_string_pretty(&frames)?
            } else {
                serde_json::to_string(&frames)?
            };
            println!("{}", json);
        }
        Commands::Index { input, output } => {
            let output = output.unwrap_or_else(|| config.sign_store.clone());
            let embedder = build_embedder(&config.embedder).await?;
            let store = InMemorySignRepository::index_directory(&input, embedder.as_ref())
                .await
                .with_context(|| format!("indexing {:?}", input))?;
            store.save(&output)?;
            info!("[KERNEL] ✅ Indexed {} signs into {:?}", store.len(), output);
        }
    }

    Ok(())
}

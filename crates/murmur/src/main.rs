// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Murmur - dialogue codec for roleplay chat clients.
//!
//! Decodes raw model replies into chat bubbles and encodes stored
//! conversations into provider requests. Results go to stdout as JSON; logs
//! go to stderr.

mod commands;
mod profile;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use murmur_config::{MurmurConfig, RequestShape};
use murmur_core::{MurmurError, Role};

/// Murmur - dialogue codec for roleplay chat clients.
#[derive(Parser, Debug)]
#[command(name = "murmur", version, about, long_about = None)]
struct Cli {
    /// Load this config file instead of the standard lookup.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a raw reply into messages and transfer settlements.
    Decode {
        /// File holding the raw reply, or `-` for stdin.
        input: String,
        /// Timestamp the new messages are stamped after.
        #[arg(long)]
        base_ts: i64,
        /// Author of the text (model, user).
        #[arg(long, default_value = "model")]
        role: Role,
        /// Conversation file whose pending transfers the reply may settle.
        #[arg(long)]
        history: Option<PathBuf>,
    },
    /// Encode a conversation file into a provider request.
    Encode {
        conversation: PathBuf,
        /// Request layout. Defaults to `chat.request_shape`.
        #[arg(long, value_enum)]
        shape: Option<ShapeArg>,
    },
    /// Estimate the prompt size of a conversation file.
    Estimate { conversation: PathBuf },
    /// Validate the configuration and report problems.
    CheckConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ShapeArg {
    Parts,
    RoleContent,
}

impl From<ShapeArg> for RequestShape {
    fn from(shape: ShapeArg) -> Self {
        match shape {
            ShapeArg::Parts => RequestShape::Parts,
            ShapeArg::RoleContent => RequestShape::RoleContent,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => murmur_config::load_and_validate_path(path),
        None => murmur_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            murmur_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.app.log_level);

    if let Err(e) = run(cli.command, &config).await {
        eprintln!("murmur: {e}");
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: &MurmurConfig) -> Result<(), MurmurError> {
    let output = match command {
        Commands::CheckConfig => {
            tracing::info!("configuration is valid");
            format!(
                "configuration ok: mode={}, history_limit={}, stickers={}",
                config.chat.dialogue_mode,
                config.chat.history_limit,
                config.stickers.len()
            )
        }
        Commands::Decode {
            input,
            base_ts,
            role,
            history,
        } => {
            let profile = profile::load_profile(config).await;
            let raw = commands::read_input(&input).await?;
            let history = match history {
                Some(path) => commands::read_conversation(&path).await?,
                None => Vec::new(),
            };
            let turn = commands::decode(&raw, base_ts, role, &history, &profile);
            commands::to_pretty_json(&turn)?
        }
        Commands::Encode {
            conversation,
            shape,
        } => {
            let profile = profile::load_profile(config).await;
            let messages = commands::read_conversation(&conversation).await?;
            let shape = shape.map_or(profile.chat.request_shape, RequestShape::from);
            commands::to_pretty_json(&commands::encode_request(&messages, &profile, shape)?)?
        }
        Commands::Estimate { conversation } => {
            let profile = profile::load_profile(config).await;
            let messages = commands::read_conversation(&conversation).await?;
            commands::to_pretty_json(&commands::estimate(&messages, &profile))?
        }
    };

    println!("{output}");
    Ok(())
}

/// Logs to stderr so stdout stays machine-readable. `RUST_LOG` overrides the
/// configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("murmur={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

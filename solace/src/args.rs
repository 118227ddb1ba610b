use std::path::PathBuf;

use clap::Parser;

/// Solace mood companion server
#[derive(Debug, Parser)]
#[command(name = "solace", about = "Mood companion backend for chat, transcription, speech, and donations")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "solace.toml", env = "SOLACE_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "SOLACE_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}

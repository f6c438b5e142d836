use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Courier LLM relay
#[derive(Debug, Parser)]
#[command(name = "courier", about = "Relay text and image prompts to an OpenAI-compatible LLM provider")]
pub struct Args {
    /// Path to configuration file; built-in defaults are used when omitted
    #[arg(short, long, env = "COURIER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long, env = "COURIER_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Log filter directive, e.g. `info` or `courier_relay=debug,info`
    #[arg(long, env = "COURIER_LOG", default_value = "info")]
    pub log: String,
}

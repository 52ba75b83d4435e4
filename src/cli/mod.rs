// CLI module for hakka-proxy

use clap::Parser;

/// hakka-proxy - Token-caching proxy for Hakka translation and speech synthesis
#[derive(Parser, Debug)]
#[command(name = "hakka-proxy", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.hakka-proxy/config.toml)
    #[arg(short, long, env = "HAKKA_PROXY_CONFIG")]
    pub config: Option<String>,

    /// Override the listen host
    #[arg(long)]
    pub host: Option<String>,

    /// Override the listen port
    #[arg(long)]
    pub port: Option<u16>,

    /// Report missing backend credentials and exit
    #[arg(long)]
    pub check_config: bool,

    /// Translate and synthesize a sample word against the live backends, print the report, and exit
    #[arg(long)]
    pub diagnose: bool,
}

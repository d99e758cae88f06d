use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::http_client::DEFAULT_TIMEOUT_SECS;
use crate::server::{DEFAULT_HOST, DEFAULT_PORT};
use clap::Parser;

pub const DEFAULT_OUTPUT: &str = "text";

#[derive(Parser, Debug, Clone)]
#[command(name = "seo-tag-inspector")]
#[command(
    about = "Inspect a page's SEO meta tags, score them and suggest improvements",
    long_about = None
)]
pub struct Cli {
    /// The URL to analyze (https:// is assumed when no scheme is given)
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Run the HTTP API instead of analyzing a single URL
    #[arg(long)]
    pub serve: bool,

    /// Address to bind the HTTP API to (default: 127.0.0.1)
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to bind the HTTP API to (default: 5000)
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Number of recent analyses kept in memory (default: 10)
    #[arg(long, default_value_t = DEFAULT_HISTORY_CAPACITY)]
    pub history_capacity: usize,

    /// Fetch timeout in seconds (default: 20)
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Output format: text or json
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Save the JSON report to a file
    #[arg(short, long)]
    pub save: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to configuration file (JSON, TOML, or YAML)
    #[arg(long)]
    pub config: Option<String>,
}

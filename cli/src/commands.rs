pub mod analyze;
pub mod lookup;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use proxyscope_common::config::{
    Config, DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL, InsightConfig,
};
use proxyscope_common::lookup::LookupProvider;
use proxyscope_core::lookup::json_table::JsonTableLookup;
use proxyscope_core::lookup::static_table::StaticTableLookup;

#[derive(Parser)]
#[command(name = "proxyscope")]
#[command(version)]
#[command(about = "Batch proxy, VPN and datacenter detection for IP addresses.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Reduce output: once hides decorations, twice hides per-address results
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Simulated latency of every lookup, in milliseconds
    #[arg(long, global = true, default_value_t = 150)]
    pub delay_ms: u64,

    /// Maximum number of lookups in flight
    #[arg(long, global = true, default_value_t = 1)]
    pub concurrency: usize,

    /// JSON lookup table replacing the built-in one
    #[arg(long, global = true, value_name = "PATH")]
    pub table: Option<PathBuf>,

    /// API key for security insight generation
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_key: Option<String>,

    /// Model used for security insights
    #[arg(long, global = true, default_value = DEFAULT_GEMINI_MODEL)]
    pub model: String,

    /// Base URL of the insight generation API
    #[arg(long, global = true, default_value = DEFAULT_GEMINI_ENDPOINT)]
    pub endpoint: String,

    /// Timeout for insight generation requests, in seconds
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout_secs: u64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a batch of addresses
    #[command(alias = "a")]
    Analyze(AnalyzeArgs),
    /// Look up a single address
    #[command(alias = "l")]
    Lookup { address: String },
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Addresses separated by spaces, commas or newlines (read from stdin when omitted)
    pub addresses: Vec<String>,

    /// Read addresses from a file
    #[arg(short, long, value_name = "PATH", conflicts_with = "addresses")]
    pub file: Option<PathBuf>,

    /// Generate security insights for risky addresses
    #[arg(short, long)]
    pub insights: bool,

    /// Write a CSV export into this directory
    #[arg(short, long, value_name = "DIR")]
    pub export: Option<PathBuf>,

    /// Print the batch as JSON instead of the report
    #[arg(long)]
    pub json: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn is_json(&self) -> bool {
        matches!(&self.command, Commands::Analyze(args) if args.json)
    }

    pub fn config(&self) -> Config {
        Config {
            quiet: self.quiet,
            no_banner: self.no_banner,
            lookup_delay: Duration::from_millis(self.delay_ms),
            concurrency: self.concurrency,
            table: self.table.clone(),
            insights: InsightConfig {
                api_key: self.gemini_key.clone(),
                endpoint: self.endpoint.clone(),
                model: self.model.clone(),
                timeout: Duration::from_secs(self.timeout_secs),
            },
        }
    }
}

/// Chooses the lookup adapter for `cfg`.
pub fn lookup_provider(cfg: &Config) -> anyhow::Result<Arc<dyn LookupProvider>> {
    let provider: Arc<dyn LookupProvider> = match &cfg.table {
        Some(path) => Arc::new(JsonTableLookup::load(path, cfg.lookup_delay)?),
        None => Arc::new(StaticTableLookup::new(cfg.lookup_delay)),
    };
    Ok(provider)
}

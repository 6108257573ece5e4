use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_LOOKUP_DELAY: Duration = Duration::from_millis(150);
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_INSIGHT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct Config {
    /// Suppresses headers and decorations. `1` keeps results, `2` keeps only the summary.
    pub quiet: u8,
    pub no_banner: bool,
    /// Simulated latency of every table lookup.
    pub lookup_delay: Duration,
    /// Maximum number of lookups in flight. `1` resolves strictly one after another.
    pub concurrency: usize,
    /// Optional JSON file replacing the built-in lookup table.
    pub table: Option<PathBuf>,
    pub insights: InsightConfig,
}

/// Settings for the external text-generation capability.
pub struct InsightConfig {
    /// Credential for the generation API. Insights are unavailable without one.
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quiet: 0,
            no_banner: false,
            lookup_delay: DEFAULT_LOOKUP_DELAY,
            concurrency: 1,
            table: None,
            insights: InsightConfig::default(),
        }
    }
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            timeout: DEFAULT_INSIGHT_TIMEOUT,
        }
    }
}

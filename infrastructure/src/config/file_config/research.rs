//! Research backend configuration from TOML (`[research]` section)

use serde::{Deserialize, Serialize};

/// Web search and scraping settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileResearchConfig {
    /// Search results kept per query (default: 10)
    pub max_results: usize,
    /// Result pages fetched for full text (default: 3)
    pub scrape_top: usize,
    /// Minimum gap between two search requests
    pub min_request_interval_ms: u64,
    /// Per-request timeout
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for FileResearchConfig {
    fn default() -> Self {
        Self {
            max_results: 10,
            scrape_top: 3,
            min_request_interval_ms: 2000,
            timeout_seconds: 30,
            user_agent: "Mozilla/5.0 (compatible; SymptomQuorum/0.3; +medical research)"
                .to_string(),
        }
    }
}

//! Records returned by the research backend.
//!
//! Missing fields default to empty, so `ConditionResearch::default()` is the
//! "backend had nothing" value callers fall back to.

use serde::{Deserialize, Serialize};

/// One web search hit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    /// Page text if the page was fetched, otherwise the snippet
    pub content: String,
    pub snippet: String,
    pub citation: String,
}

impl SearchResult {
    pub fn new(title: impl Into<String>, url: impl Into<String>, snippet: impl Into<String>) -> Self {
        let url = url.into();
        let snippet = snippet.into();
        Self {
            title: title.into(),
            citation: url.clone(),
            url,
            content: snippet.clone(),
            snippet,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }
}

/// Structured research about one condition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionResearch {
    pub overview: String,
    pub symptoms: Vec<String>,
    pub causes: Vec<String>,
    pub risk_factors: Vec<String>,
    pub diagnosis: String,
    pub treatment: String,
    pub sources: Vec<String>,
}

impl ConditionResearch {
    /// Whether the backend returned nothing usable.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

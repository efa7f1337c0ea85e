//! Web research service
//!
//! [`ResearchPort`] backend built on DuckDuckGo search plus page scraping.
//! Structured condition records are extracted with sentence-level keyword
//! matching over the scraped text.

use super::duckduckgo::DuckDuckGoSearch;
use super::html::{medical_page_text, page_title};
use crate::config::FileResearchConfig;
use async_trait::async_trait;
use futures::future::join_all;
use std::time::Duration;
use symptom_application::{ResearchError, ResearchPort};
use symptom_domain::core::text::truncate_chars;
use symptom_domain::{ClinicRecord, ConditionResearch, Location, SearchResult};
use tracing::{debug, info, warn};

/// Results requested per condition research query
const CONDITION_MAX_RESULTS: usize = 5;

/// Symptom context appended to a condition query
const QUERY_CONTEXT_CHARS: usize = 100;

/// Maximum response body size (5 MB)
const MAX_BODY_SIZE: usize = 5 * 1024 * 1024;

/// Scraped text kept per page
const MAX_PAGE_CHARS: usize = 20_000;

const OVERVIEW_MIN_CHARS: usize = 100;
const OVERVIEW_MAX_CHARS: usize = 500;
const MAX_SYMPTOM_SENTENCES: usize = 10;
const MAX_CAUSE_SENTENCES: usize = 5;
const MAX_RISK_SENTENCES: usize = 5;
const SUMMARY_SENTENCE_CHARS: usize = 300;

struct ScrapedPage {
    title: Option<String>,
    content: String,
}

/// DuckDuckGo + scraping research backend
pub struct WebResearchService {
    client: reqwest::Client,
    search: DuckDuckGoSearch,
    user_agent: String,
    max_results: usize,
    scrape_top: usize,
}

impl WebResearchService {
    pub fn new(config: &FileResearchConfig) -> Result<Self, ResearchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ResearchError::RequestFailed(format!("Failed to build HTTP client: {}", e)))?;

        let search = DuckDuckGoSearch::new(
            client.clone(),
            config.user_agent.clone(),
            Duration::from_millis(config.min_request_interval_ms),
        );

        Ok(Self {
            client,
            search,
            user_agent: config.user_agent.clone(),
            max_results: config.max_results,
            scrape_top: config.scrape_top,
        })
    }

    /// Search, then replace the snippet of the top results with page text
    async fn search_and_scrape(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, ResearchError> {
        let mut results = self.search.search_medical(query, max_results).await?;
        if results.is_empty() {
            warn!("No search results for: {}", query);
            return Ok(results);
        }

        let targets: Vec<String> = results
            .iter()
            .take(self.scrape_top)
            .map(|r| r.url.clone())
            .collect();
        debug!("Scraping {} pages concurrently", targets.len());

        let pages = join_all(targets.iter().map(|url| self.scrape_page(url))).await;

        for (result, page) in results.iter_mut().zip(pages) {
            match page {
                Ok(page) => {
                    if !page.content.is_empty() {
                        result.content = page.content;
                    }
                    if let Some(title) = page.title {
                        result.title = title;
                    }
                }
                Err(e) => debug!("Keeping snippet for {}: {}", result.url, e),
            }
        }

        info!("Research returned {} enriched results", results.len());
        Ok(results)
    }

    async fn scrape_page(&self, url: &str) -> Result<ScrapedPage, ResearchError> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| ResearchError::RequestFailed(format!("Failed to fetch URL: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResearchError::HttpStatus(status.as_u16()));
        }

        let is_html = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("text/html") || ct.contains("application/xhtml"));
        if !is_html {
            return Err(ResearchError::ParseError(format!("not an HTML page: {}", url)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ResearchError::RequestFailed(format!("Failed to read body: {}", e)))?;
        if body.len() > MAX_BODY_SIZE {
            return Err(ResearchError::ParseError(format!(
                "Response too large: {} bytes",
                body.len()
            )));
        }

        let html = String::from_utf8_lossy(&body);
        let content = medical_page_text(&html);
        Ok(ScrapedPage {
            title: page_title(&html),
            content: truncate_chars(&content, MAX_PAGE_CHARS).to_string(),
        })
    }
}

#[async_trait]
impl ResearchPort for WebResearchService {
    async fn search_medical(
        &self,
        query: &str,
        _sources: &[&str],
    ) -> Result<Vec<SearchResult>, ResearchError> {
        self.search_and_scrape(query, self.max_results).await
    }

    async fn research_condition(
        &self,
        condition: &str,
        symptom_context: Option<&str>,
    ) -> Result<ConditionResearch, ResearchError> {
        let query = condition_query(condition, symptom_context);
        let results = self.search_and_scrape(&query, CONDITION_MAX_RESULTS).await?;
        if results.is_empty() {
            return Err(ResearchError::NoResults(condition.to_string()));
        }

        info!("Completed web research on: {}", condition);
        Ok(extract_research(&results))
    }

    async fn find_clinics(
        &self,
        _location: Location,
        _min_rating: f64,
    ) -> Result<Vec<ClinicRecord>, ResearchError> {
        warn!("Clinic search is not available with the web research backend");
        Ok(Vec::new())
    }
}

/// `"<name> symptoms causes treatment diagnosis"` plus a slice of the symptoms
pub fn condition_query(condition: &str, symptom_context: Option<&str>) -> String {
    let mut query = format!("{} symptoms causes treatment diagnosis", condition);
    if let Some(context) = symptom_context.filter(|c| !c.trim().is_empty()) {
        query.push(' ');
        query.push_str(truncate_chars(context, QUERY_CONTEXT_CHARS));
    }
    query
}

/// Build a condition record from enriched search results
pub fn extract_research(results: &[SearchResult]) -> ConditionResearch {
    ConditionResearch {
        overview: extract_overview(results),
        symptoms: matching_sentences(results, "symptom", "symptom", MAX_SYMPTOM_SENTENCES),
        causes: matching_sentences(results, "cause", "cause", MAX_CAUSE_SENTENCES),
        risk_factors: matching_sentences(results, "risk factor", "risk", MAX_RISK_SENTENCES),
        diagnosis: first_sentence_with(results, "diagnos"),
        treatment: first_sentence_with(results, "treatment"),
        sources: results
            .iter()
            .filter(|r| !r.citation.is_empty())
            .map(|r| r.citation.clone())
            .collect(),
    }
}

fn extract_overview(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| r.content.as_str())
        .find(|c| c.chars().count() > OVERVIEW_MIN_CHARS)
        .or_else(|| results.first().map(|r| r.content.as_str()))
        .map(|c| truncate_chars(c, OVERVIEW_MAX_CHARS).to_string())
        .unwrap_or_default()
}

/// Sentences containing `sentence_key` from contents containing `content_key`
fn matching_sentences(
    results: &[SearchResult],
    content_key: &str,
    sentence_key: &str,
    limit: usize,
) -> Vec<String> {
    results
        .iter()
        .map(|r| r.content.as_str())
        .filter(|c| c.to_lowercase().contains(content_key))
        .flat_map(|c| c.split('.'))
        .filter(|s| s.to_lowercase().contains(sentence_key))
        .map(|s| s.trim().to_string())
        .take(limit)
        .collect()
}

fn first_sentence_with(results: &[SearchResult], key: &str) -> String {
    results
        .iter()
        .flat_map(|r| r.content.split('.'))
        .find(|s| s.to_lowercase().contains(key))
        .map(|s| truncate_chars(s.trim(), SUMMARY_SENTENCE_CHARS).to_string())
        .unwrap_or_default()
}

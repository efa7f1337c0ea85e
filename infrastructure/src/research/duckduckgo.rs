//! DuckDuckGo HTML search client
//!
//! Queries the no-JavaScript results page and parses result blocks with
//! `scraper`. Requests are spaced by a minimum interval because the endpoint
//! answers bursts with HTTP 202 / 403.

use reqwest::{StatusCode, Url};
use scraper::{Html, Selector};
use std::time::Duration;
use symptom_application::ResearchError;
use symptom_domain::SearchResult;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info};

pub const DDG_HTML_URL: &str = "https://html.duckduckgo.com/html/";

/// Appended to every medical query
pub const MEDICAL_QUERY_SUFFIX: &str = "medical symptoms causes treatment";

/// Rate-limited DuckDuckGo search
pub struct DuckDuckGoSearch {
    client: reqwest::Client,
    endpoint: String,
    user_agent: String,
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl DuckDuckGoSearch {
    pub fn new(client: reqwest::Client, user_agent: impl Into<String>, min_interval: Duration) -> Self {
        Self {
            client,
            endpoint: DDG_HTML_URL.to_string(),
            user_agent: user_agent.into(),
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Wait until `min_interval` has passed since the previous request.
    ///
    /// The lock is held across the sleep so concurrent callers queue up.
    async fn rate_limit(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let delay = self.min_interval - elapsed;
                debug!(delay_ms = delay.as_millis() as u64, "Delaying search request");
                tokio::time::sleep(delay).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// Plain web search
    pub async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, ResearchError> {
        self.rate_limit().await;

        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("q", query)])
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| ResearchError::RequestFailed(format!("Search request failed: {}", e)))?;

        let status = response.status();
        // 202 is the endpoint's rate-limit answer
        if !status.is_success() || status == StatusCode::ACCEPTED {
            return Err(ResearchError::HttpStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ResearchError::RequestFailed(format!("Failed to read results: {}", e)))?;

        let results = parse_results(&body, max_results)?;
        info!("DuckDuckGo found {} results for: {}", results.len(), query);
        Ok(results)
    }

    /// Search with the medical suffix appended
    pub async fn search_medical(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, ResearchError> {
        self.search(&medical_query(query), max_results).await
    }
}

pub fn medical_query(query: &str) -> String {
    format!("{} {}", query.trim(), MEDICAL_QUERY_SUFFIX)
}

fn selector(css: &str) -> Result<Selector, ResearchError> {
    Selector::parse(css).map_err(|e| ResearchError::ParseError(format!("{}: {}", css, e)))
}

/// Parse a DuckDuckGo HTML results page
pub fn parse_results(html: &str, max_results: usize) -> Result<Vec<SearchResult>, ResearchError> {
    let document = Html::parse_document(html);
    let result_sel = selector("div.result")?;
    let link_sel = selector("a.result__a")?;
    let snippet_sel = selector(".result__snippet")?;

    let mut results = Vec::new();
    for block in document.select(&result_sel) {
        if results.len() >= max_results {
            break;
        }
        // Sponsored results
        if block.value().classes().any(|c| c == "result--ad") {
            continue;
        }

        let Some(link) = block.select(&link_sel).next() else {
            continue;
        };
        let Some(url) = link.value().attr("href").and_then(resolve_result_url) else {
            continue;
        };

        let title = collapse(link.text());
        let snippet = block
            .select(&snippet_sel)
            .next()
            .map(|s| collapse(s.text()))
            .unwrap_or_default();

        results.push(SearchResult::new(title, url, snippet));
    }

    Ok(results)
}

fn collapse<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Turn a result href into the target URL.
///
/// Result links usually point at the `/l/?uddg=<target>` redirector.
fn resolve_result_url(href: &str) -> Option<String> {
    let absolute = if href.starts_with("//") {
        format!("https:{}", href)
    } else if href.starts_with('/') {
        format!("https://duckduckgo.com{}", href)
    } else {
        href.to_string()
    };

    let url = Url::parse(&absolute).ok()?;
    let is_redirect = url
        .host_str()
        .is_some_and(|h| h.ends_with("duckduckgo.com"))
        && url.path().starts_with("/l/");

    if is_redirect {
        return url
            .query_pairs()
            .find(|(key, _)| key == "uddg")
            .map(|(_, target)| target.into_owned());
    }

    matches!(url.scheme(), "http" | "https").then_some(absolute)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS_PAGE: &str = r##"
<html><body>
<div class="results">
  <div class="result results_links result--ad">
    <a class="result__a" href="https://ads.example.com/buy">Buy supplements</a>
    <a class="result__snippet">Sponsored</a>
  </div>
  <div class="result results_links">
    <h2><a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.mayoclinic.org%2Fdiseases%2Danemia&amp;rut=abc">Iron deficiency <b>anemia</b> - Mayo Clinic</a></h2>
    <a class="result__snippet" href="#">Iron deficiency anemia is a common type of anemia.</a>
  </div>
  <div class="result results_links">
    <h2><a class="result__a" href="https://medlineplus.gov/hypothyroidism.html">Hypothyroidism</a></h2>
    <div class="result__snippet">Underactive   thyroid
      symptoms include fatigue.</div>
  </div>
  <div class="result results_links">
    <h2><a class="result__a" href="javascript:void(0)">Broken</a></h2>
  </div>
</div>
</body></html>
"##;

    #[test]
    fn test_parse_results_skips_ads_and_resolves_redirects() {
        let results = parse_results(RESULTS_PAGE, 10).unwrap();
        assert_eq!(results.len(), 2);

        assert_eq!(results[0].title, "Iron deficiency anemia - Mayo Clinic");
        assert_eq!(results[0].url, "https://www.mayoclinic.org/diseases-anemia");
        assert_eq!(results[0].citation, results[0].url);
        assert_eq!(
            results[0].snippet,
            "Iron deficiency anemia is a common type of anemia."
        );
        assert_eq!(results[0].content, results[0].snippet);

        assert_eq!(results[1].url, "https://medlineplus.gov/hypothyroidism.html");
        assert_eq!(
            results[1].snippet,
            "Underactive thyroid symptoms include fatigue."
        );
    }

    #[test]
    fn test_parse_results_respects_limit() {
        let results = parse_results(RESULTS_PAGE, 1).unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_parse_results_empty_page() {
        assert!(parse_results("<html><body>No results.</body></html>", 10)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_medical_query() {
        assert_eq!(
            medical_query(" fatigue and pale skin "),
            "fatigue and pale skin medical symptoms causes treatment"
        );
    }

    #[test]
    fn test_resolve_result_url() {
        assert_eq!(
            resolve_result_url("/l/?uddg=https%3A%2F%2Fexample.org%2Fa").as_deref(),
            Some("https://example.org/a")
        );
        assert_eq!(
            resolve_result_url("https://example.org/b").as_deref(),
            Some("https://example.org/b")
        );
        assert!(resolve_result_url("javascript:void(0)").is_none());
        assert!(resolve_result_url("//duckduckgo.com/l/?rut=abc").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_spaces_requests() {
        let search = DuckDuckGoSearch::new(
            reqwest::Client::new(),
            "test-agent",
            Duration::from_millis(2000),
        );

        let start = Instant::now();
        search.rate_limit().await;
        search.rate_limit().await;
        assert!(start.elapsed() >= Duration::from_millis(2000));
    }
}

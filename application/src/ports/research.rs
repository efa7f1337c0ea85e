//! Research port
//!
//! Defines the interface for web search and per-condition research.

use async_trait::async_trait;
use symptom_domain::{ClinicRecord, ConditionResearch, Location, SearchResult};
use thiserror::Error;
use tracing::warn;

/// Errors that can occur inside a research backend
#[derive(Error, Debug)]
pub enum ResearchError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("No results for query: {0}")]
    NoResults(String),
}

/// Port for external research
///
/// Adapters implement the fallible methods. Agents call the provided
/// [`research_web`](Self::research_web) and
/// [`condition_details`](Self::condition_details), which turn every failure
/// into an empty value.
#[async_trait]
pub trait ResearchPort: Send + Sync {
    /// Search for medical pages. `sources` is a hint the backend may ignore.
    async fn search_medical(
        &self,
        query: &str,
        sources: &[&str],
    ) -> Result<Vec<SearchResult>, ResearchError>;

    /// Structured research about one condition
    async fn research_condition(
        &self,
        condition: &str,
        symptom_context: Option<&str>,
    ) -> Result<ConditionResearch, ResearchError>;

    /// Providers near `location` rated at least `min_rating`
    async fn find_clinics(
        &self,
        _location: Location,
        _min_rating: f64,
    ) -> Result<Vec<ClinicRecord>, ResearchError> {
        Ok(Vec::new())
    }

    /// Search, returning an empty list on any failure
    async fn research_web(&self, query: &str, sources: &[&str]) -> Vec<SearchResult> {
        match self.search_medical(query, sources).await {
            Ok(results) => results,
            Err(e) => {
                warn!("Web research failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Condition research, returning an empty record on any failure
    async fn condition_details(
        &self,
        condition: &str,
        symptom_context: Option<&str>,
    ) -> ConditionResearch {
        match self.research_condition(condition, symptom_context).await {
            Ok(research) => research,
            Err(e) => {
                warn!("Research on {} failed: {}", condition, e);
                ConditionResearch::default()
            }
        }
    }

    /// Clinic lookup, returning an empty list on any failure
    async fn clinics_near(&self, location: Location, min_rating: f64) -> Vec<ClinicRecord> {
        match self.find_clinics(location, min_rating).await {
            Ok(clinics) => clinics,
            Err(e) => {
                warn!("Clinic lookup failed: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DownBackend;

    #[async_trait]
    impl ResearchPort for DownBackend {
        async fn search_medical(
            &self,
            _query: &str,
            _sources: &[&str],
        ) -> Result<Vec<SearchResult>, ResearchError> {
            Err(ResearchError::HttpStatus(503))
        }

        async fn research_condition(
            &self,
            condition: &str,
            _symptom_context: Option<&str>,
        ) -> Result<ConditionResearch, ResearchError> {
            Err(ResearchError::NoResults(condition.to_string()))
        }
    }

    #[tokio::test]
    async fn test_failures_become_empty() {
        let backend = DownBackend;
        assert!(backend.research_web("anemia", &["medical"]).await.is_empty());
        assert!(backend.condition_details("Anemia", None).await.is_empty());
    }

    #[tokio::test]
    async fn test_find_clinics_default_empty() {
        let backend = DownBackend;
        let location = Location::try_new(40.7, -74.0).unwrap();
        assert!(backend.find_clinics(location, 3.5).await.unwrap().is_empty());
        assert!(backend.clinics_near(location, 3.5).await.is_empty());
    }
}

//! Scripted in-memory ports shared by agent and use case tests.

use crate::ports::reasoning::{ReasoningError, ReasoningPort, ReasoningRequest};
use crate::ports::research::{ResearchError, ResearchPort};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use symptom_domain::{ConditionResearch, SearchResult};

/// Answers each prompt with the first rule whose needle it contains
pub struct ScriptedReasoner {
    rules: Vec<(String, Result<String, String>)>,
    fallback: Result<String, String>,
    requests: Mutex<Vec<ReasoningRequest>>,
}

impl ScriptedReasoner {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            fallback: Err("No scripted response".to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Reply with `response` when the prompt contains `needle`
    pub fn on(mut self, needle: &str, response: &str) -> Self {
        self.rules
            .push((needle.to_string(), Ok(response.to_string())));
        self
    }

    /// Fail when the prompt contains `needle`
    pub fn fail_on(mut self, needle: &str, message: &str) -> Self {
        self.rules
            .push((needle.to_string(), Err(message.to_string())));
        self
    }

    pub fn otherwise(mut self, response: &str) -> Self {
        self.fallback = Ok(response.to_string());
        self
    }

    pub fn requests(&self) -> Vec<ReasoningRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReasoningPort for ScriptedReasoner {
    async fn try_reason(&self, request: &ReasoningRequest) -> Result<String, ReasoningError> {
        self.requests.lock().unwrap().push(request.clone());
        let result = self
            .rules
            .iter()
            .find(|(needle, _)| request.prompt.contains(needle.as_str()))
            .map(|(_, result)| result)
            .unwrap_or(&self.fallback);
        result.clone().map_err(ReasoningError::Other)
    }
}

/// Fixed search results and per-condition research records
pub struct ScriptedResearch {
    search: Result<Vec<SearchResult>, u16>,
    conditions: HashMap<String, ConditionResearch>,
    queries: Mutex<Vec<String>>,
}

impl ScriptedResearch {
    pub fn new() -> Self {
        Self {
            search: Ok(Vec::new()),
            conditions: HashMap::new(),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_search_results(mut self, results: Vec<SearchResult>) -> Self {
        self.search = Ok(results);
        self
    }

    /// Make searches fail with the given HTTP status
    pub fn with_search_failure(mut self, status: u16) -> Self {
        self.search = Err(status);
        self
    }

    pub fn with_condition(mut self, name: &str, research: ConditionResearch) -> Self {
        self.conditions.insert(name.to_string(), research);
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResearchPort for ScriptedResearch {
    async fn search_medical(
        &self,
        query: &str,
        _sources: &[&str],
    ) -> Result<Vec<SearchResult>, ResearchError> {
        self.queries.lock().unwrap().push(query.to_string());
        self.search.clone().map_err(ResearchError::HttpStatus)
    }

    async fn research_condition(
        &self,
        condition: &str,
        _symptom_context: Option<&str>,
    ) -> Result<ConditionResearch, ResearchError> {
        self.conditions
            .get(condition)
            .cloned()
            .ok_or_else(|| ResearchError::NoResults(condition.to_string()))
    }
}

/// A research record with `source_count` sources
pub fn research_record(overview: &str, source_count: usize) -> ConditionResearch {
    ConditionResearch {
        overview: overview.to_string(),
        sources: (0..source_count)
            .map(|i| format!("https://source{}.example", i))
            .collect(),
        ..Default::default()
    }
}

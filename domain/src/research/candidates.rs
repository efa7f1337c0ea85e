//! Candidate condition list produced by discovery.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered, case-insensitively deduplicated condition names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateList(Vec<String>);

impl CandidateList {
    /// Merge the reasoning-based and research-based enumerations.
    ///
    /// Names are deduplicated on their trimmed lowercase form, keeping the
    /// first spelling seen (reasoning list first). Names present in both
    /// lists are moved to the front; "present in both" compares the kept
    /// spelling by exact string value, so `Flu` vs `flu` does not count.
    /// Remaining order follows discovery order. At most `cap` names are kept.
    pub fn merge(intuition: &[String], research: &[String], cap: usize) -> Self {
        let mut seen = HashSet::new();
        let unique: Vec<&String> = intuition
            .iter()
            .chain(research)
            .filter(|name| seen.insert(name.trim().to_lowercase()))
            .collect();

        let (in_both, in_either): (Vec<&String>, Vec<&String>) = unique
            .into_iter()
            .partition(|name| intuition.contains(*name) && research.contains(*name));

        Self(
            in_both
                .into_iter()
                .chain(in_either)
                .take(cap)
                .cloned()
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

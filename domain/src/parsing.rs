//! Free-text parsing of reasoning and research output.
//!
//! Every heuristic that turns model prose into structured fields lives here.
//! They are pure text functions with a fixed default per field, and they
//! never fail: a reasoning failure (text starting with
//! [`REASONING_ERROR_PREFIX`](crate::core::text::REASONING_ERROR_PREFIX))
//! simply yields the defaults.
//!
//! # Functions
//!
//! | Function | Input | Default on no match |
//! |----------|-------|---------------------|
//! | [`parse_condition_list`] | numbered / bulleted list | empty |
//! | [`extract_research_candidates`] | search results | empty |
//! | [`parse_condition_assessment`] | `PROBABILITY:` / `MATCHES:` / … block | probability 0.5, empty lists |
//! | [`extract_challenged_conditions`] | debate round text | empty |
//! | [`parse_consensus`] | `CONSENSUS:` / `CONTESTED:` / `ADJUSTMENTS:` | empty lists, no multipliers |
//! | [`extract_probability`] | findings text | `None` |
//! | [`extract_matched_symptoms`] | raw assessment text | empty |
//!
//! The heuristics are intentionally crude and their edge cases are part of
//! the contract; for example a numbered line keeps only the text after its
//! first hyphen, and challenged "conditions" are capitalized words.

use crate::forum::ConsensusResult;
use crate::research::{ConditionAssessment, SearchResult};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Lines inspected at the top of each research result.
const RESEARCH_LINES_PER_RESULT: usize = 5;

/// Research lines this long or longer are not treated as names.
const MAX_RESEARCH_NAME_CHARS: usize = 100;

/// Minimum length (exclusive) of a word picked as a challenged condition.
const CHALLENGED_WORD_MIN_CHARS: usize = 5;

/// Matched symptoms kept for a final condition.
pub const MAX_MATCHED_SYMPTOMS: usize = 5;

static PROBABILITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"probability[:\s]+([0-9.]+)").expect("valid regex"));

/// Parse a numbered or bulleted list of condition names.
///
/// A trimmed line counts when it starts with a digit or `-`. The name is the
/// text after the first `.` (or the whole line), then after the first `-`,
/// trimmed. At most `limit` names are returned.
///
/// ```
/// use symptom_domain::parsing::parse_condition_list;
///
/// let names = parse_condition_list("1. Migraine\n2. Tension headache\nNotes", 10);
/// assert_eq!(names, vec!["Migraine", "Tension headache"]);
/// ```
pub fn parse_condition_list(response: &str, limit: usize) -> Vec<String> {
    response
        .lines()
        .map(str::trim)
        .filter(|line| {
            line.chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit() || c == '-')
        })
        .filter_map(|line| {
            let after_dot = line.split_once('.').map_or(line, |(_, rest)| rest);
            let name = after_dot
                .split_once('-')
                .map_or(after_dot, |(_, rest)| rest)
                .trim();
            (!name.is_empty()).then(|| name.to_string())
        })
        .take(limit)
        .collect()
}

/// Pull candidate names out of research results.
///
/// Only results whose content mentions "condition" or "disease" are used;
/// from each, the first five lines that are non-blank and shorter than 100
/// characters are taken as names.
pub fn extract_research_candidates(results: &[SearchResult], limit: usize) -> Vec<String> {
    results
        .iter()
        .filter(|result| {
            let lower = result.content.to_lowercase();
            lower.contains("condition") || lower.contains("disease")
        })
        .flat_map(|result| {
            result
                .content
                .split('\n')
                .take(RESEARCH_LINES_PER_RESULT)
                .filter(|line| {
                    !line.trim().is_empty() && line.chars().count() < MAX_RESEARCH_NAME_CHARS
                })
                .map(|line| line.trim().to_string())
        })
        .take(limit)
        .collect()
}

/// Parse the four-field assessment block.
///
/// ```text
/// PROBABILITY: 0.65
/// MATCHES: fatigue, pale skin
/// MISMATCHES: fever
/// REASONING: ...
/// ```
///
/// Labels must start the line. The value is the text between the first and
/// second `:`. A probability that does not parse (or is not finite) keeps the
/// default 0.5; a parsed one is clamped to `[0, 1]`. `REASONING:` takes the
/// rest of the response from that point on.
pub fn parse_condition_assessment(response: &str) -> ConditionAssessment {
    let mut assessment = ConditionAssessment::default();
    let mut lines = response.split('\n');

    while let Some(line) = lines.next() {
        if line.starts_with("PROBABILITY:") {
            if let Some(probability) = first_field(line)
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|p| p.is_finite())
            {
                assessment.probability = probability.clamp(0.0, 1.0);
            }
        } else if line.starts_with("MATCHES:") {
            assessment.matched_symptoms = split_list(first_field(line));
        } else if line.starts_with("MISMATCHES:") {
            assessment.mismatched_symptoms = split_list(first_field(line));
        } else if let Some(rest) = line.strip_prefix("REASONING:") {
            let remainder: Vec<&str> = std::iter::once(rest).chain(lines.by_ref()).collect();
            assessment.reasoning = remainder.join("\n").trim().to_string();
        }
    }

    assessment
}

/// Pick "challenged" condition words out of a debate round.
///
/// On every line mentioning "contradicting evidence" or "argues against"
/// (case-insensitive), each whitespace-separated word longer than five
/// characters that starts with an uppercase letter is taken, punctuation
/// included. Duplicates are dropped, first occurrence wins.
pub fn extract_challenged_conditions(debate_text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    debate_text
        .lines()
        .filter(|line| {
            let lower = line.to_lowercase();
            lower.contains("contradicting evidence") || lower.contains("argues against")
        })
        .flat_map(str::split_whitespace)
        .filter(|word| {
            word.chars().count() > CHALLENGED_WORD_MIN_CHARS
                && word.chars().next().is_some_and(char::is_uppercase)
        })
        .filter(|word| seen.insert(word.to_string()))
        .map(str::to_string)
        .collect()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ConsensusSection {
    None,
    Consensus,
    Contested,
    Adjustments,
}

/// Parse the synthesis response.
///
/// Header lines (`CONSENSUS:`, `CONTESTED:`, `ADJUSTMENTS:`) switch the
/// parser mode; the first two carry a comma list on the same line. Inside
/// the adjustments section each `- name: multiplier` line records a
/// multiplier; values that do not parse as a finite number are dropped.
/// The returned summary is empty.
pub fn parse_consensus(response: &str) -> ConsensusResult {
    let mut result = ConsensusResult::default();
    let mut section = ConsensusSection::None;

    for line in response.lines().map(str::trim) {
        if let Some(rest) = line.strip_prefix("CONSENSUS:") {
            section = ConsensusSection::Consensus;
            result.consensus = split_list(rest);
        } else if let Some(rest) = line.strip_prefix("CONTESTED:") {
            section = ConsensusSection::Contested;
            result.contested = split_list(rest);
        } else if line.starts_with("ADJUSTMENTS:") {
            section = ConsensusSection::Adjustments;
        } else if section == ConsensusSection::Adjustments
            && let Some((name, value)) = line.split_once(':')
        {
            let name = name.trim_matches(|c| c == '-' || c == ' ').trim();
            if let Some(multiplier) = value.trim().parse::<f64>().ok().filter(|m| m.is_finite())
            {
                result.multipliers.insert(name.to_string(), multiplier);
            }
        }
    }

    result
}

/// Find a literal `probability: <number>` in findings text.
///
/// Matching is case-insensitive and only the first occurrence is tried.
pub fn extract_probability(findings: &str) -> Option<f64> {
    let lower = findings.to_lowercase();
    PROBABILITY_PATTERN
        .captures(&lower)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Symptoms listed after the first `MATCHES:` in an assessment, at most five.
pub fn extract_matched_symptoms(reasoning: &str) -> Vec<String> {
    reasoning
        .split_once("MATCHES:")
        .map(|(_, rest)| {
            let line = rest.split('\n').next().unwrap_or_default();
            split_list(line)
                .into_iter()
                .take(MAX_MATCHED_SYMPTOMS)
                .collect()
        })
        .unwrap_or_default()
}

/// Text between the first and second `:` of a labelled line.
fn first_field(line: &str) -> &str {
    line.split(':').nth(1).unwrap_or_default()
}

fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

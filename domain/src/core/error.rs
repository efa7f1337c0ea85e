//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These only surface while building pipeline input. Once a
/// [`ResearchContext`](super::context::ResearchContext) exists, a run always
/// completes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Symptom description too short: {0} characters (minimum 10)")]
    SymptomsTooShort(usize),

    #[error("Invalid patient age: {0}")]
    InvalidAge(u16),

    #[error("Invalid patient sex: {0} (expected male, female or other)")]
    InvalidSex(String),

    #[error("Invalid location: lat={lat}, lon={lon}")]
    InvalidLocation { lat: f64, lon: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symptoms_too_short_display() {
        let error = DomainError::SymptomsTooShort(3);
        assert_eq!(
            error.to_string(),
            "Symptom description too short: 3 characters (minimum 10)"
        );
    }

    #[test]
    fn test_invalid_sex_display() {
        let error = DomainError::InvalidSex("unknown".to_string());
        assert!(error.to_string().contains("unknown"));
    }
}

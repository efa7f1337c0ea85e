//! Research context value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Minimum number of characters a symptom description must contain.
pub const MIN_SYMPTOM_CHARS: usize = 10;

/// Oldest accepted patient age.
pub const MAX_PATIENT_AGE: u16 = 120;

/// Patient sex as reported in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientSex {
    Male,
    Female,
    Other,
}

impl PatientSex {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatientSex::Male => "male",
            PatientSex::Female => "female",
            PatientSex::Other => "other",
        }
    }
}

impl std::fmt::Display for PatientSex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PatientSex {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(PatientSex::Male),
            "female" => Ok(PatientSex::Female),
            "other" => Ok(PatientSex::Other),
            _ => Err(DomainError::InvalidSex(s.to_string())),
        }
    }
}

/// Immutable input to one pipeline run (Value Object)
///
/// Holds the symptom text plus optional patient attributes. Created once per
/// request and shared read-only by every agent. Deserializing goes through
/// the same checks as [`ResearchContext::try_new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ResearchContextFields")]
pub struct ResearchContext {
    symptoms: String,
    age: Option<u16>,
    sex: Option<PatientSex>,
    medical_history: Option<String>,
}

impl ResearchContext {
    /// Create a context from a symptom description.
    ///
    /// The description is trimmed and must keep at least
    /// [`MIN_SYMPTOM_CHARS`] characters.
    pub fn try_new(symptoms: impl Into<String>) -> Result<Self, DomainError> {
        let symptoms = symptoms.into().trim().to_string();
        let len = symptoms.chars().count();
        if len < MIN_SYMPTOM_CHARS {
            return Err(DomainError::SymptomsTooShort(len));
        }

        Ok(Self {
            symptoms,
            age: None,
            sex: None,
            medical_history: None,
        })
    }

    pub fn with_age(mut self, age: u16) -> Result<Self, DomainError> {
        if age > MAX_PATIENT_AGE {
            return Err(DomainError::InvalidAge(age));
        }
        self.age = Some(age);
        Ok(self)
    }

    pub fn with_sex(mut self, sex: PatientSex) -> Self {
        self.sex = Some(sex);
        self
    }

    pub fn with_medical_history(mut self, history: impl Into<String>) -> Self {
        let history = history.into();
        if !history.trim().is_empty() {
            self.medical_history = Some(history.trim().to_string());
        }
        self
    }

    pub fn symptoms(&self) -> &str {
        &self.symptoms
    }

    pub fn age(&self) -> Option<u16> {
        self.age
    }

    pub fn sex(&self) -> Option<PatientSex> {
        self.sex
    }

    pub fn medical_history(&self) -> Option<&str> {
        self.medical_history.as_deref()
    }

    /// Patient attributes as prompt lines (`Age: 42\nSex: female\n`).
    ///
    /// Empty when no attribute is known.
    pub fn patient_summary(&self) -> String {
        let mut summary = String::new();
        if let Some(age) = self.age {
            summary.push_str(&format!("Age: {}\n", age));
        }
        if let Some(sex) = self.sex {
            summary.push_str(&format!("Sex: {}\n", sex));
        }
        if let Some(history) = &self.medical_history {
            summary.push_str(&format!("Medical history: {}\n", history));
        }
        summary
    }
}

/// Unvalidated wire form of [`ResearchContext`]
#[derive(Deserialize)]
struct ResearchContextFields {
    symptoms: String,
    #[serde(default)]
    age: Option<u16>,
    #[serde(default)]
    sex: Option<PatientSex>,
    #[serde(default)]
    medical_history: Option<String>,
}

impl TryFrom<ResearchContextFields> for ResearchContext {
    type Error = DomainError;

    fn try_from(fields: ResearchContextFields) -> Result<Self, Self::Error> {
        let mut context = ResearchContext::try_new(fields.symptoms)?;
        if let Some(age) = fields.age {
            context = context.with_age(age)?;
        }
        if let Some(sex) = fields.sex {
            context = context.with_sex(sex);
        }
        if let Some(history) = fields.medical_history {
            context = context.with_medical_history(history);
        }
        Ok(context)
    }
}

impl std::fmt::Display for ResearchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symptoms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_creation_trims() {
        let ctx = ResearchContext::try_new("  persistent fatigue and pale skin  ").unwrap();
        assert_eq!(ctx.symptoms(), "persistent fatigue and pale skin");
        assert!(ctx.age().is_none());
        assert!(ctx.sex().is_none());
    }

    #[test]
    fn test_context_too_short() {
        assert_eq!(
            ResearchContext::try_new("   cough  "),
            Err(DomainError::SymptomsTooShort(5))
        );
        assert!(ResearchContext::try_new("").is_err());
    }

    #[test]
    fn test_context_age_bounds() {
        let ctx = ResearchContext::try_new("chest pain radiating to left arm").unwrap();
        assert!(ctx.clone().with_age(120).is_ok());
        assert_eq!(ctx.with_age(121), Err(DomainError::InvalidAge(121)));
    }

    #[test]
    fn test_patient_summary() {
        let ctx = ResearchContext::try_new("headache and stiff neck for two days")
            .unwrap()
            .with_age(34)
            .unwrap()
            .with_sex(PatientSex::Female);

        assert_eq!(ctx.patient_summary(), "Age: 34\nSex: female\n");
    }

    #[test]
    fn test_patient_summary_empty() {
        let ctx = ResearchContext::try_new("headache and stiff neck for two days").unwrap();
        assert!(ctx.patient_summary().is_empty());
    }

    #[test]
    fn test_blank_history_ignored() {
        let ctx = ResearchContext::try_new("headache and stiff neck for two days")
            .unwrap()
            .with_medical_history("   ");
        assert!(ctx.medical_history().is_none());
    }

    #[test]
    fn test_deserialize_validates() {
        let ctx: ResearchContext = serde_json::from_str(
            r#"{"symptoms": " headache and stiff neck ", "age": 34, "sex": "female"}"#,
        )
        .unwrap();
        assert_eq!(ctx.symptoms(), "headache and stiff neck");
        assert_eq!(ctx.age(), Some(34));
        assert_eq!(ctx.sex(), Some(PatientSex::Female));

        assert!(serde_json::from_str::<ResearchContext>(r#"{"symptoms": "cough"}"#).is_err());
        assert!(
            serde_json::from_str::<ResearchContext>(
                r#"{"symptoms": "headache and stiff neck", "age": 121}"#
            )
            .is_err()
        );
    }

    #[test]
    fn test_serialize_roundtrips_through_validation() {
        let ctx = ResearchContext::try_new("headache and stiff neck for two days")
            .unwrap()
            .with_medical_history("migraines");
        let json = serde_json::to_string(&ctx).unwrap();
        let back: ResearchContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ctx);
    }

    #[test]
    fn test_sex_from_str() {
        assert_eq!("Male".parse::<PatientSex>().unwrap(), PatientSex::Male);
        assert_eq!(" other ".parse::<PatientSex>().unwrap(), PatientSex::Other);
        assert!("unknown".parse::<PatientSex>().is_err());
    }
}

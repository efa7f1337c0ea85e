//! Keyword rule tables for final conditions
//!
//! All lookups are substring matches on the lowercased condition name (or
//! symptom text), tried in table order; the first hit wins.

use super::condition::{BodyRegion, Urgency};

const REGION_KEYWORDS: &[(BodyRegion, &[&str])] = &[
    (BodyRegion::Head, &["headache", "migraine", "concussion"]),
    (BodyRegion::Brain, &["alzheimer", "dementia", "stroke", "seizure"]),
    (
        BodyRegion::Heart,
        &["heart", "cardiac", "cardiovascular", "arrhythmia"],
    ),
    (BodyRegion::Lungs, &["lung", "pneumonia", "asthma", "bronchitis"]),
    (BodyRegion::Respiratory, &["respiratory", "breathing"]),
    (BodyRegion::Stomach, &["stomach", "gastric", "ulcer"]),
    (BodyRegion::Liver, &["liver", "hepatitis", "cirrhosis"]),
    (BodyRegion::Kidneys, &["kidney", "renal"]),
    (
        BodyRegion::Digestive,
        &["digestive", "intestinal", "bowel", "ibs"],
    ),
    (BodyRegion::Blood, &["anemia", "leukemia", "blood"]),
    (BodyRegion::Immune, &["immune", "autoimmune", "lupus"]),
    (BodyRegion::Endocrine, &["diabetes", "thyroid", "hormone"]),
    (
        BodyRegion::Musculoskeletal,
        &["arthritis", "bone", "joint", "muscle"],
    ),
    (BodyRegion::Skin, &["skin", "dermatitis", "rash"]),
];

const TEST_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "anemia",
        &["Complete Blood Count (CBC)", "Iron levels", "Ferritin test"],
    ),
    (
        "diabetes",
        &[
            "Fasting blood glucose",
            "HbA1c test",
            "Oral glucose tolerance test",
        ],
    ),
    ("thyroid", &["TSH test", "Free T4", "Thyroid antibodies"]),
    (
        "heart",
        &["ECG", "Echocardiogram", "Stress test", "Cardiac enzymes"],
    ),
    (
        "liver",
        &["Liver function tests", "Ultrasound", "Bilirubin test"],
    ),
    ("kidney", &["Creatinine test", "BUN", "Urinalysis", "GFR"]),
];

const FALLBACK_TESTS: &[&str] = &[
    "Physical examination",
    "Medical history review",
    "Targeted lab work",
];

const EMERGENCY_KEYWORDS: &[&str] = &["stroke", "heart attack", "aneurysm", "sepsis", "meningitis"];
const URGENT_KEYWORDS: &[&str] = &["infection", "pneumonia", "acute", "severe"];

/// Symptom words that on their own say little about the cause.
pub const GENERAL_SYMPTOM_KEYWORDS: &[&str] = &["tired", "fatigue", "pain", "headache", "dizzy"];

/// Probability scale applied when symptoms are too general.
pub const GENERALITY_PENALTY: f64 = 0.8;

/// Average confidence below which general symptoms trigger the penalty.
pub const GENERALITY_CONFIDENCE_THRESHOLD: f64 = 0.6;

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

pub fn infer_body_region(condition: &str) -> BodyRegion {
    let lower = condition.to_lowercase();
    REGION_KEYWORDS
        .iter()
        .find(|(_, keywords)| contains_any(&lower, keywords))
        .map_or(BodyRegion::General, |(region, _)| *region)
}

pub fn recommended_tests(condition: &str) -> Vec<String> {
    let lower = condition.to_lowercase();
    let tests = TEST_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map_or(FALLBACK_TESTS, |(_, tests)| *tests);
    tests.iter().map(|t| t.to_string()).collect()
}

/// Classify urgency. Keyword rules are checked before the score rules.
pub fn classify_urgency(condition: &str, probability: f64, confidence: f64) -> Urgency {
    let lower = condition.to_lowercase();

    if contains_any(&lower, EMERGENCY_KEYWORDS) {
        return Urgency::Emergency;
    }
    if contains_any(&lower, URGENT_KEYWORDS) && (probability > 0.6 || confidence > 0.7) {
        return Urgency::Urgent;
    }
    if probability > 0.8 && confidence > 0.8 {
        return Urgency::Urgent;
    }
    if probability < 0.3 || confidence < 0.5 {
        return Urgency::Monitor;
    }
    Urgency::Routine
}

/// Number of distinct general-symptom keywords present in `symptoms`.
pub fn general_symptom_count(symptoms: &str) -> usize {
    let lower = symptoms.to_lowercase();
    GENERAL_SYMPTOM_KEYWORDS
        .iter()
        .filter(|keyword| lower.contains(*keyword))
        .count()
}

/// Whether the generality penalty applies.
///
/// Needs at least two general keywords and an average confidence below
/// [`GENERALITY_CONFIDENCE_THRESHOLD`]; an empty list averages to zero.
pub fn symptoms_too_general(symptoms: &str, confidences: &[f64]) -> bool {
    if general_symptom_count(symptoms) < 2 {
        return false;
    }
    let average = if confidences.is_empty() {
        0.0
    } else {
        confidences.iter().sum::<f64>() / confidences.len() as f64
    };
    average < GENERALITY_CONFIDENCE_THRESHOLD
}

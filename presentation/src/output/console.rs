//! Console output formatter for diagnosis reports

use crate::output::formatter::OutputFormatter;
use chrono::DateTime;
use colored::{ColoredString, Colorize};
use symptom_domain::core::text::truncate_chars;
use symptom_domain::{ClinicRecord, DiagnosisReport, FinalCondition, Urgency};

/// Characters of each finding shown in the full report
const FINDING_PREVIEW_CHARS: usize = 300;

/// Shown under every human-readable report
pub const DISCLAIMER: &str = "These results are possibilities, not diagnoses. \
Always consult a qualified healthcare provider. Call emergency services for urgent symptoms.";

/// Formats diagnosis reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete report
    pub fn format(report: &DiagnosisReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Symptom Quorum Results"));
        output.push('\n');

        if report.has_emergency() {
            output.push_str(&format!(
                "\n{}\n",
                "!! One or more conditions may need emergency care. Seek help now. !!"
                    .red()
                    .bold()
            ));
        }

        // Stage 1: Discovery
        output.push_str(&Self::section_header("Stage 1: Discovery"));
        output.push_str(&format!(
            "\n{} {}\n",
            "Summary:".cyan().bold(),
            report.discovery.findings()
        ));
        if !report.candidates.is_empty() {
            output.push_str(&format!("{}\n", "Candidates:".cyan().bold()));
            for candidate in &report.candidates {
                output.push_str(&format!("  * {}\n", candidate));
            }
        }

        // Stage 2: Deep research
        output.push_str(&Self::section_header("Stage 2: Deep Research"));
        for finding in &report.findings {
            let name = finding.condition().unwrap_or("unspecified");
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!("── {} ({:.0}%) ──", name, finding.confidence() * 100.0)
                    .yellow()
                    .bold(),
                truncate_chars(finding.findings(), FINDING_PREVIEW_CHARS)
            ));
        }

        // Stage 3: Forum
        output.push_str(&Self::section_header("Stage 3: Forum"));
        output.push_str(&format!(
            "\n{} {} rounds, {} participants\n",
            "Debate:".cyan().bold(),
            report.forum.rounds.len(),
            report.forum.participants.len()
        ));
        if !report.forum.consensus.consensus.is_empty() {
            output.push_str(&format!("\n{}\n", "Areas of Consensus:".green().bold()));
            for point in &report.forum.consensus.consensus {
                output.push_str(&format!("  * {}\n", point));
            }
        }
        if !report.forum.contested_points.is_empty() {
            output.push_str(&format!("\n{}\n", "Contested:".yellow().bold()));
            for point in &report.forum.contested_points {
                output.push_str(&format!("  * {}: {}\n", point.condition, point.reason));
            }
        }

        // Stage 4: Ranked conditions
        output.push_str(&Self::section_header("Stage 4: Ranked Conditions"));
        output.push_str(&Self::conditions_block(&report.conditions));

        if !report.clinics.is_empty() {
            output.push_str(&Self::section_header("Nearby Clinics"));
            for clinic in &report.clinics {
                output.push_str(&Self::clinic_line(clinic));
            }
        }

        if let Some(warning) = &report.warning {
            output.push_str(&format!("\n{} {}\n", "Note:".yellow().bold(), warning));
        }

        output.push_str(&format!("\n{}\n", DISCLAIMER.dimmed()));
        output.push_str(&format!(
            "{}\n",
            format!(
                "Completed in {:.1}s{}",
                report.processing_time_ms as f64 / 1000.0,
                Self::generated_at(report.discovery.timestamp())
            )
            .dimmed()
        ));
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(report: &DiagnosisReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format ranked conditions only (concise output)
    pub fn format_conditions_only(report: &DiagnosisReport) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n",
            "=== Possible Conditions ===".cyan().bold()
        ));
        output.push_str(&Self::conditions_block(&report.conditions));

        if let Some(warning) = &report.warning {
            output.push_str(&format!("\n{} {}\n", "Note:".yellow().bold(), warning));
        }
        output.push_str(&format!("\n{}\n", DISCLAIMER.dimmed()));

        output
    }

    fn conditions_block(conditions: &[FinalCondition]) -> String {
        if conditions.is_empty() {
            return format!("\n{}\n", "No conditions identified.".dimmed());
        }

        let mut output = String::new();
        for (rank, condition) in conditions.iter().enumerate() {
            output.push_str(&format!(
                "\n{} {}  {}\n",
                format!("{}.", rank + 1).bold(),
                condition.name.bold(),
                Self::urgency_label(condition.urgency)
            ));
            output.push_str(&format!(
                "   probability {:.0}%  confidence {:.0}%  region {}\n",
                condition.probability * 100.0,
                condition.confidence * 100.0,
                condition.body_region
            ));
            if !condition.matched_symptoms.is_empty() {
                output.push_str(&format!(
                    "   {} {}\n",
                    "matches:".dimmed(),
                    condition.matched_symptoms.join(", ")
                ));
            }
            output.push_str(&format!(
                "   {} {}\n",
                "tests:".dimmed(),
                condition.recommended_tests.join(", ")
            ));
        }
        output
    }

    fn clinic_line(clinic: &ClinicRecord) -> String {
        format!(
            "  * {} ({}, {}) {:.1}/5 from {} reviews, {:.1} km\n    {} | {}\n",
            clinic.name.bold(),
            clinic.doctor_name,
            clinic.specialty,
            clinic.rating,
            clinic.review_count,
            clinic.distance_km,
            clinic.address,
            clinic.phone
        )
    }

    /// `" (started 2026-01-01 09:30:00 UTC)"`, empty for an unset timestamp
    fn generated_at(timestamp_ms: u64) -> String {
        i64::try_from(timestamp_ms)
            .ok()
            .filter(|ms| *ms > 0)
            .and_then(DateTime::from_timestamp_millis)
            .map(|at| format!(" (started {})", at.format("%Y-%m-%d %H:%M:%S UTC")))
            .unwrap_or_default()
    }

    fn urgency_label(urgency: Urgency) -> ColoredString {
        let label = format!("[{}]", urgency);
        match urgency {
            Urgency::Emergency => label.red().bold(),
            Urgency::Urgent => label.yellow().bold(),
            Urgency::Routine => label.green(),
            Urgency::Monitor => label.dimmed(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, report: &DiagnosisReport) -> String {
        Self::format(report)
    }

    fn format_json(&self, report: &DiagnosisReport) -> String {
        Self::format_json(report)
    }

    fn format_conditions_only(&self, report: &DiagnosisReport) -> String {
        Self::format_conditions_only(report)
    }
}

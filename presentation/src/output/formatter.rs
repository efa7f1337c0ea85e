//! Output formatter trait

use symptom_domain::DiagnosisReport;

/// Trait for formatting diagnosis reports
pub trait OutputFormatter {
    /// Format the complete report
    fn format(&self, report: &DiagnosisReport) -> String;

    /// Format as JSON
    fn format_json(&self, report: &DiagnosisReport) -> String;

    /// Format the ranked conditions only (concise output)
    fn format_conditions_only(&self, report: &DiagnosisReport) -> String;
}

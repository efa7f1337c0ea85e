//! Progress reporting for diagnosis runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use symptom_application::{PipelineStage, ProgressNotifier};
use symptom_domain::AgentFinding;

/// Reports progress on a single percentage bar
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    pub fn new() -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(Self::stage_style());
        bar.set_prefix("Diagnosis");
        bar.set_message("Starting...");
        Self { bar }
    }

    fn stage_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos:>3}% {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_stage(&self, stage: PipelineStage, percent: u8) {
        self.bar.set_position(u64::from(percent));
        if stage == PipelineStage::Completed {
            self.bar
                .finish_with_message(format!("{}", "Diagnosis complete!".green()));
        } else {
            self.bar.set_message(stage.label());
        }
    }

    fn on_candidates(&self, candidates: &[String]) {
        self.bar.println(format!(
            "{} {} candidate conditions",
            "->".cyan(),
            candidates.len()
        ));
    }

    fn on_finding(&self, finding: &AgentFinding) {
        self.bar.println(finding_line(finding));
    }

    fn on_debate_round(&self, round: usize, total: usize) {
        self.bar
            .set_message(format!("Debating findings (round {}/{})", round, total));
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_stage(&self, stage: PipelineStage, percent: u8) {
        eprintln!("{} {} ({}%)", "->".cyan(), stage.label().bold(), percent);
    }

    fn on_candidates(&self, candidates: &[String]) {
        for candidate in candidates {
            eprintln!("  * {}", candidate);
        }
    }

    fn on_finding(&self, finding: &AgentFinding) {
        eprintln!("{}", finding_line(finding));
    }

    fn on_debate_round(&self, round: usize, total: usize) {
        eprintln!("  round {}/{} done", round, total);
    }
}

fn finding_line(finding: &AgentFinding) -> String {
    let name = finding.condition().unwrap_or("unspecified");
    if finding.confidence() > 0.0 {
        format!(
            "  {} {} ({:.0}%)",
            "v".green(),
            name,
            finding.confidence() * 100.0
        )
    } else {
        format!("  {} {} (no evidence)", "x".red(), name)
    }
}

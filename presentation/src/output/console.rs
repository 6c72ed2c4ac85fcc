//! Console output formatter for panel state and results

use colored::Colorize;
use knobpanel_application::{ArtifactPaths, LoadReport, WriteConfigsError, WriteSummary};
use knobpanel_domain::{
    ConfigIssue, Field, RunOutcome, Scale, SettingsModel, Toggle, ValueBag,
    scaling::percent_to_fraction,
};

/// Formats panel state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// `current / max` readout of a control.
    ///
    /// Percent-scale controls show the stored fraction (`0.40 / 1.0`).
    pub fn readout(model: &SettingsModel, field: Field) -> String {
        let value = model.get(field);
        let max = model.range(field).max;
        match field.spec().scale {
            Scale::Integer => format!("{} / {}", value, max),
            Scale::Percent => format!(
                "{:.2} / {:.1}",
                percent_to_fraction(value),
                percent_to_fraction(max)
            ),
        }
    }

    /// Every control, toggle, path and artifact location.
    pub fn format_settings(model: &SettingsModel, paths: &ArtifactPaths) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("knobpanel"));

        output.push_str(&Self::section_header("Controls"));
        let width = Field::ALL
            .iter()
            .map(|f| f.spec().label.len())
            .max()
            .unwrap_or(0);
        for field in Field::ALL {
            let spec = field.spec();
            output.push_str(&format!(
                "  {:<width$}  {:>14}  {}\n",
                spec.label,
                Self::readout(model, field),
                spec.key.dimmed(),
                width = width
            ));
        }

        output.push_str(&Self::section_header("Enabled"));
        for toggle in Toggle::ALL {
            let mark = if model.enables.get(toggle) {
                "on".green()
            } else {
                "off".red()
            };
            output.push_str(&format!("  {:<12} {}\n", toggle.as_str(), mark));
        }

        output.push_str(&Self::section_header("Paths"));
        for (key, value) in model.paths.entries() {
            output.push_str(&format!(
                "  {:<18} {}\n",
                key,
                value.map(str::to_string).unwrap_or_else(|| "-".dimmed().to_string())
            ));
        }

        if !model.providers.is_empty() {
            output.push_str(&Self::section_header("Providers"));
            for (report, selection) in &model.providers {
                output.push_str(&format!(
                    "  {:<6} {} {}\n",
                    report.as_str(),
                    selection.provider.as_deref().unwrap_or("-"),
                    selection.model.as_deref().unwrap_or("")
                ));
            }
        }

        output.push_str(&Self::section_header("Artifacts"));
        for (label, path) in [
            ("primary", &paths.primary),
            ("secondary", &paths.secondary),
            ("source", &paths.source),
            ("task", &paths.task),
            ("presets", &paths.presets),
            ("script", &paths.script),
            ("download", &paths.download_script),
        ] {
            let marker = if path.exists() {
                " ".normal()
            } else {
                "!".yellow()
            };
            output.push_str(&format!("{} {:<10} {}\n", marker, label, path.display()));
        }

        output
    }

    /// Snapshot of every setting as pretty JSON.
    pub fn format_json(bag: &ValueBag) -> String {
        serde_json::to_string_pretty(bag).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }

    pub fn format_load_report(report: &LoadReport) -> String {
        report
            .warnings
            .iter()
            .map(|w| format!("{} {}\n", "warning:".yellow().bold(), w))
            .collect()
    }

    pub fn format_write_summary(summary: &WriteSummary) -> String {
        let mut output = String::new();
        for report in &summary.reports {
            output.push_str(&format!(
                "{} {} ({} value(s))\n",
                "wrote".green(),
                report.path.display(),
                report.written.len()
            ));
            if !report.missing.is_empty() {
                output.push_str(&format!(
                    "  {} not found: {}\n",
                    "warning:".yellow().bold(),
                    report.missing.join(", ")
                ));
            }
        }
        output
    }

    pub fn format_write_error(error: &WriteConfigsError) -> String {
        let mut output = Self::format_write_summary(&error.summary);
        output.push_str(&format!("{} {}\n", "error:".red().bold(), error));
        for (artifact, e) in &error.others {
            output.push_str(&format!(
                "{} Failed to write {} settings: {}\n",
                "error:".red().bold(),
                artifact,
                e
            ));
        }
        output
    }

    pub fn format_outcome(outcome: &RunOutcome) -> String {
        if outcome.success {
            format!("{} {}", "v".green(), outcome.message.green())
        } else {
            format!("{} {}", "x".red(), outcome.message.red())
        }
    }

    pub fn format_issues(issues: &[ConfigIssue]) -> String {
        issues
            .iter()
            .map(|issue| {
                let label = if issue.is_error() {
                    "config error:".red().bold()
                } else {
                    "config warning:".yellow().bold()
                };
                format!("{} {}\n", label, issue.message)
            })
            .collect()
    }

    pub fn format_presets(names: &[String]) -> String {
        if names.is_empty() {
            return format!("{}\n", "No presets saved.".dimmed());
        }
        names.iter().map(|n| format!("  {}\n", n)).collect()
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(50);
        format!("{}\n{}\n{}\n", line.cyan(), title.cyan().bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n", format!("── {} ──", title).yellow().bold())
    }
}

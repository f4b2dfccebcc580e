//! Human-readable colored output

use super::{FileReport, Formatter};
use crate::core::Severity;
use colored::Colorize;

pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for TextFormatter {
    fn format(&self, reports: &[FileReport]) -> String {
        let mut out = String::new();
        let mut errors = 0usize;
        let mut warnings = 0usize;
        let mut infos = 0usize;

        for report in reports {
            if report.diagnostics.is_empty() {
                continue;
            }
            out.push_str(&format!("{}\n", report.file.display().to_string().bold()));

            for diag in &report.diagnostics {
                let severity = match diag.severity {
                    Severity::Error => {
                        errors += 1;
                        "error".red().bold()
                    }
                    Severity::Warning => {
                        warnings += 1;
                        "warning".yellow().bold()
                    }
                    Severity::Info => {
                        infos += 1;
                        "info".cyan()
                    }
                };
                out.push_str(&format!(
                    "  {}:{} {} {} [{}]\n",
                    diag.range.start.line,
                    diag.range.start.character,
                    severity,
                    diag.message,
                    diag.code.dimmed()
                ));
            }
            out.push('\n');
        }

        let total = errors + warnings + infos;
        if total == 0 {
            out.push_str(&format!("{}\n", "No issues found".green()));
        } else {
            out.push_str(&format!(
                "{} issue{} ({} error{}, {} warning{}, {} info)\n",
                total,
                if total == 1 { "" } else { "s" },
                errors,
                if errors == 1 { "" } else { "s" },
                warnings,
                if warnings == 1 { "" } else { "s" },
                infos,
            ));
        }

        out
    }
}

//! Output formatters

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::core::Diagnostic;
use std::path::PathBuf;

/// Diagnostics for one analyzed file
#[derive(Debug, Clone)]
pub struct FileReport {
    pub file: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
}

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Trait for output formatters
pub trait Formatter {
    fn format(&self, reports: &[FileReport]) -> String;
}

/// Get a formatter for the requested format
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new()),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Range, Severity};

    pub(crate) fn sample_reports() -> Vec<FileReport> {
        let source = "public class Cart {\n}\n";
        vec![FileReport {
            file: PathBuf::from("Cart.java"),
            diagnostics: vec![Diagnostic::new(
                "InvalidScopeOnManagedBean",
                Severity::Error,
                "Scope type annotations must not be applied more than once to a managed bean",
                Range::from_offsets(source, 13, 17),
            )],
        }]
    }

    #[test]
    fn test_get_formatter_text() {
        let output = get_formatter(OutputFormat::Text).format(&sample_reports());
        assert!(output.contains("Cart.java"));
    }

    #[test]
    fn test_get_formatter_json() {
        let output = get_formatter(OutputFormat::Json).format(&sample_reports());
        assert!(output.contains("\"code\""));
    }
}

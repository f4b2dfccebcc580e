//! JSON output

use super::{FileReport, Formatter};
use serde::Serialize;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonReport<'a> {
    file: String,
    diagnostics: &'a [crate::core::Diagnostic],
}

impl Formatter for JsonFormatter {
    fn format(&self, reports: &[FileReport]) -> String {
        let entries: Vec<JsonReport> = reports
            .iter()
            .map(|r| JsonReport {
                file: r.file.display().to_string(),
                diagnostics: &r.diagnostics,
            })
            .collect();
        serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Diagnostic, Range, Severity};
    use std::path::PathBuf;

    #[test]
    fn test_json_output_parses_back() {
        let source = "public class Cart {\n}\n";
        let reports = vec![FileReport {
            file: PathBuf::from("Cart.java"),
            diagnostics: vec![Diagnostic::new(
                "RemoveProducesOrInject",
                Severity::Error,
                "conflict",
                Range::from_offsets(source, 13, 17),
            )],
        }];

        let output = JsonFormatter.format(&reports);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["file"], "Cart.java");
        assert_eq!(parsed[0]["diagnostics"][0]["code"], "RemoveProducesOrInject");
        assert_eq!(parsed[0]["diagnostics"][0]["severity"], "error");
    }
}

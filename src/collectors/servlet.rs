//! Servlet and resource annotation completeness

use super::{codes, Collector};
use crate::core::{Diagnostic, Severity};
use crate::jakarta;
use crate::model::CompilationUnit;
use regex::Regex;
use std::sync::LazyLock;

/// Valid servlet url-pattern: path mapping or extension mapping
static URL_PATTERN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(/.*|\*\.[A-Za-z0-9]+)?$").unwrap());

/// Extracts string literals out of a raw annotation value
static STRING_LITERAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""((?:[^"\\]|\\.)*)""#).unwrap());

/// Checks `@WebServlet` and class-level `@Resource` for required attributes
pub struct ServletCollector;

impl ServletCollector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ServletCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector for ServletCollector {
    fn name(&self) -> &'static str {
        "servlet"
    }

    fn collect(&self, unit: &CompilationUnit) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for ty in &unit.types {
            if let Some(servlet) = ty.annotation(jakarta::WEB_SERVLET) {
                if !servlet.has_arg("value") && !servlet.has_arg("urlPatterns") {
                    diagnostics.push(
                        Diagnostic::new(
                            codes::COMPLETE_SERVLET_ANNOTATION,
                            Severity::Error,
                            "The @WebServlet annotation must define the attribute 'urlPatterns' or 'value'",
                            unit.range_of(servlet.span),
                        )
                        .with_data(vec!["urlPatterns".to_string(), "value".to_string()]),
                    );
                } else {
                    for attr in ["value", "urlPatterns"] {
                        let Some(raw) = servlet.arg(attr) else {
                            continue;
                        };
                        for capture in STRING_LITERAL_REGEX.captures_iter(raw) {
                            let pattern = &capture[1];
                            if !URL_PATTERN_REGEX.is_match(pattern) {
                                diagnostics.push(Diagnostic::new(
                                    codes::INVALID_SERVLET_URL_PATTERN,
                                    Severity::Warning,
                                    format!(
                                        "Invalid url-pattern '{}': must begin with '/' or be an extension mapping '*.ext'",
                                        pattern
                                    ),
                                    unit.range_of(servlet.span),
                                ));
                            }
                        }
                    }
                }
            }

            if let Some(resource) = ty.annotation(jakarta::RESOURCE) {
                let mut missing = Vec::new();
                if !resource.has_arg("name") {
                    missing.push("name".to_string());
                }
                if !resource.has_arg("type") {
                    missing.push("type".to_string());
                }
                if !missing.is_empty() {
                    let attrs: Vec<String> =
                        missing.iter().map(|m| format!("'{}'", m)).collect();
                    diagnostics.push(
                        Diagnostic::new(
                            codes::COMPLETE_RESOURCE_ANNOTATION,
                            Severity::Error,
                            format!(
                                "A class-level @Resource annotation must define the attribute{} {}",
                                if missing.len() > 1 { "s" } else { "" },
                                attrs.join(" and ")
                            ),
                            unit.range_of(resource.span),
                        )
                        .with_data(missing),
                    );
                }
            }
        }

        diagnostics
    }
}

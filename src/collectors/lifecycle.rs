//! Lifecycle callback shape rules
//!
//! Methods annotated `@PostConstruct` or `@PreDestroy` must be non-static,
//! take no parameters, return void, and declare no checked exceptions. Each
//! violated constraint is its own diagnostic with its own fix.

use super::{codes, Collector};
use crate::core::{Diagnostic, Severity};
use crate::jakarta;
use crate::model::{CompilationUnit, MethodDecl};

const LIFECYCLE_ANNOTATIONS: &[&str] = &[jakarta::POST_CONSTRUCT, jakarta::PRE_DESTROY];

pub struct LifecycleCollector;

impl Collector for LifecycleCollector {
    fn name(&self) -> &'static str {
        "lifecycle"
    }

    fn collect(&self, unit: &CompilationUnit) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for ty in &unit.types {
            for (_, method) in ty.methods() {
                if method.is_constructor {
                    continue;
                }
                for marker in LIFECYCLE_ANNOTATIONS {
                    if method.annotations.iter().any(|a| &a.fqn == marker) {
                        check_shape(unit, method, marker, &mut diagnostics);
                    }
                }
            }
        }

        diagnostics
    }
}

fn check_shape(
    unit: &CompilationUnit,
    method: &MethodDecl,
    marker: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let simple = jakarta::simple_name(marker);
    let range = unit.range_of(method.name_span);

    if method.is_static() {
        diagnostics.push(Diagnostic::new(
            codes::LIFECYCLE_METHOD_STATIC,
            Severity::Error,
            format!("A method annotated with @{} must not be static", simple),
            range,
        ));
    }

    if !method.params.is_empty() {
        diagnostics.push(Diagnostic::new(
            codes::LIFECYCLE_METHOD_PARAMS,
            Severity::Error,
            format!("A method annotated with @{} must not have any parameters", simple),
            range,
        ));
    }

    if !method.returns_void() {
        diagnostics.push(Diagnostic::new(
            codes::LIFECYCLE_METHOD_RETURN_TYPE,
            Severity::Error,
            format!("A method annotated with @{} must return void", simple),
            range,
        ));
    }

    let checked: Vec<String> = method
        .throws
        .iter()
        .filter(|t| jakarta::is_checked_exception(&t.fqn))
        .map(|t| t.fqn.clone())
        .collect();
    if !checked.is_empty() {
        diagnostics.push(
            Diagnostic::new(
                codes::LIFECYCLE_METHOD_CHECKED_EXCEPTIONS,
                Severity::Error,
                format!(
                    "A method annotated with @{} must not throw checked exceptions",
                    simple
                ),
                range,
            )
            .with_data(checked),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn collect(source: &str) -> Vec<Diagnostic> {
        let unit = CompilationUnit::parse(source, Path::new("Test.java")).unwrap();
        LifecycleCollector.collect(&unit)
    }

    #[test]
    fn test_compliant_lifecycle_method() {
        let diagnostics = collect(
            "public class A {\n\
             \x20   @PostConstruct\n\
             \x20   void init() {\n\
             \x20   }\n\
             }\n",
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_static_lifecycle_method() {
        let diagnostics = collect(
            "public class A {\n\
             \x20   @PreDestroy\n\
             \x20   static void shutdown() {\n\
             \x20   }\n\
             }\n",
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, codes::LIFECYCLE_METHOD_STATIC);
        assert!(diagnostics[0].message.contains("@PreDestroy"));
    }

    #[test]
    fn test_lifecycle_method_with_params() {
        let diagnostics = collect(
            "public class A {\n\
             \x20   @PostConstruct\n\
             \x20   void init(int unused) {\n\
             \x20   }\n\
             }\n",
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, codes::LIFECYCLE_METHOD_PARAMS);
    }

    #[test]
    fn test_lifecycle_method_wrong_return_type() {
        let diagnostics = collect(
            "public class A {\n\
             \x20   @PostConstruct\n\
             \x20   String init() {\n\
             \x20       return null;\n\
             \x20   }\n\
             }\n",
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, codes::LIFECYCLE_METHOD_RETURN_TYPE);
    }

    #[test]
    fn test_checked_exception_reported_with_data() {
        let diagnostics = collect(
            "import java.io.IOException;\n\
             \n\
             public class A {\n\
             \x20   @PostConstruct\n\
             \x20   void init() throws IOException {\n\
             \x20   }\n\
             }\n",
        );
        assert_eq!(diagnostics.len(), 1);
        let diag = &diagnostics[0];
        assert_eq!(diag.code, codes::LIFECYCLE_METHOD_CHECKED_EXCEPTIONS);
        assert!(diag.message.contains("must not throw checked exceptions"));
        assert_eq!(diag.data_strings().unwrap(), vec!["java.io.IOException"]);
    }

    #[test]
    fn test_unchecked_exception_is_compliant() {
        let diagnostics = collect(
            "public class A {\n\
             \x20   @PreDestroy\n\
             \x20   void shutdown() throws IllegalStateException {\n\
             \x20   }\n\
             }\n",
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_mixed_exceptions_lists_only_checked() {
        let diagnostics = collect(
            "import java.io.IOException;\n\
             import java.sql.SQLException;\n\
             \n\
             public class A {\n\
             \x20   @PostConstruct\n\
             \x20   void init() throws IOException, RuntimeException, SQLException {\n\
             \x20   }\n\
             }\n",
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].data_strings().unwrap(),
            vec!["java.io.IOException", "java.sql.SQLException"]
        );
    }

    #[test]
    fn test_each_violation_is_its_own_diagnostic() {
        let diagnostics = collect(
            "import java.io.IOException;\n\
             \n\
             public class A {\n\
             \x20   @PostConstruct\n\
             \x20   static String init(int x) throws IOException {\n\
             \x20       return null;\n\
             \x20   }\n\
             }\n",
        );
        let codes_found: Vec<&str> = diagnostics.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(
            codes_found,
            vec![
                codes::LIFECYCLE_METHOD_STATIC,
                codes::LIFECYCLE_METHOD_PARAMS,
                codes::LIFECYCLE_METHOD_RETURN_TYPE,
                codes::LIFECYCLE_METHOD_CHECKED_EXCEPTIONS,
            ]
        );
    }
}

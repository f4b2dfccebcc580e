//! Bean validation constraint placement rules

use super::{codes, Collector};
use crate::core::{Diagnostic, Severity};
use crate::jakarta;
use crate::model::{CompilationUnit, Modifier};

/// Checks constraint annotations for invalid placement: boolean-only
/// constraints on non-boolean fields, and any constraint on a static field
pub struct ValidationCollector;

const BOOLEAN_TYPES: &[&str] = &["boolean", "Boolean", "java.lang.Boolean"];

impl Collector for ValidationCollector {
    fn name(&self) -> &'static str {
        "validation"
    }

    fn collect(&self, unit: &CompilationUnit) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for ty in &unit.types {
            for (_, field) in ty.fields() {
                let constraints: Vec<String> = field
                    .annotations
                    .iter()
                    .filter(|a| jakarta::is_constraint(&a.fqn))
                    .map(|a| a.fqn.clone())
                    .collect();
                if constraints.is_empty() {
                    continue;
                }

                if field.modifiers.contains(&Modifier::Static) {
                    let simple: Vec<String> = constraints
                        .iter()
                        .map(|fqn| format!("@{}", jakarta::simple_name(fqn)))
                        .collect();
                    diagnostics.push(
                        Diagnostic::new(
                            codes::INVALID_CONSTRAINT_ON_STATIC_FIELD,
                            Severity::Error,
                            format!(
                                "Constraint annotations must not be applied to static fields: {}",
                                simple.join(", ")
                            ),
                            unit.range_of(field.name_span),
                        )
                        .with_data(constraints.clone()),
                    );
                }

                for marker in [jakarta::ASSERT_TRUE, jakarta::ASSERT_FALSE] {
                    if constraints.iter().any(|c| c == marker)
                        && !BOOLEAN_TYPES.contains(&field.ty.as_str())
                    {
                        diagnostics.push(
                            Diagnostic::new(
                                codes::INVALID_CONSTRAINT_FIELD_TYPE,
                                Severity::Error,
                                format!(
                                    "The @{} annotation can only be used on boolean fields",
                                    jakarta::simple_name(marker)
                                ),
                                unit.range_of(field.name_span),
                            )
                            .with_data(vec![marker.to_string()]),
                        );
                    }
                }
            }
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn collect(source: &str) -> Vec<Diagnostic> {
        let unit = CompilationUnit::parse(source, Path::new("Test.java")).unwrap();
        ValidationCollector.collect(&unit)
    }

    #[test]
    fn test_assert_true_on_boolean_is_compliant() {
        let diagnostics = collect(
            "public class A {\n\
             \x20   @AssertTrue\n\
             \x20   private boolean active;\n\
             }\n",
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_assert_true_on_string_field() {
        let diagnostics = collect(
            "public class A {\n\
             \x20   @AssertTrue\n\
             \x20   private String name;\n\
             }\n",
        );
        assert_eq!(diagnostics.len(), 1);
        let diag = &diagnostics[0];
        assert_eq!(diag.code, codes::INVALID_CONSTRAINT_FIELD_TYPE);
        assert_eq!(diag.data_strings().unwrap(), vec![jakarta::ASSERT_TRUE]);
    }

    #[test]
    fn test_assert_false_on_boxed_boolean_is_compliant() {
        let diagnostics = collect(
            "public class A {\n\
             \x20   @AssertFalse\n\
             \x20   private Boolean closed;\n\
             }\n",
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_constraint_on_static_field() {
        let diagnostics = collect(
            "public class A {\n\
             \x20   @NotNull\n\
             \x20   @Size(min = 1)\n\
             \x20   private static String name;\n\
             }\n",
        );
        assert_eq!(diagnostics.len(), 1);
        let diag = &diagnostics[0];
        assert_eq!(diag.code, codes::INVALID_CONSTRAINT_ON_STATIC_FIELD);
        assert_eq!(
            diag.data_strings().unwrap(),
            vec![jakarta::NOT_NULL, jakarta::SIZE]
        );
        assert!(diag.message.contains("@NotNull, @Size"));
    }

    #[test]
    fn test_static_and_type_violations_both_fire() {
        let diagnostics = collect(
            "public class A {\n\
             \x20   @AssertTrue\n\
             \x20   private static String name;\n\
             }\n",
        );
        let codes_found: Vec<&str> = diagnostics.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(
            codes_found,
            vec![
                codes::INVALID_CONSTRAINT_ON_STATIC_FIELD,
                codes::INVALID_CONSTRAINT_FIELD_TYPE,
            ]
        );
    }

    #[test]
    fn test_unconstrained_field_is_ignored() {
        let diagnostics = collect(
            "public class A {\n\
             \x20   private static String name;\n\
             }\n",
        );
        assert!(diagnostics.is_empty());
    }
}

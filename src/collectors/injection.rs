//! Producer/injection-point mutual exclusion and forbidden parameter
//! annotations

use super::{codes, Collector};
use crate::core::{Diagnostic, Severity};
use crate::jakarta;
use crate::model::{Annotation, CompilationUnit, MethodDecl};

/// Checks that `@Produces` and `@Inject` are not co-located, and that
/// `@Inject`/`@Produces` methods have no `@Disposes`/`@Observes`/
/// `@ObservesAsync` parameters
pub struct InjectionCollector;

impl Collector for InjectionCollector {
    fn name(&self) -> &'static str {
        "injection"
    }

    fn collect(&self, unit: &CompilationUnit) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for ty in &unit.types {
            for (_, field) in ty.fields() {
                if let Some(found) = produces_and_inject(&field.annotations) {
                    diagnostics.push(
                        Diagnostic::new(
                            codes::REMOVE_PRODUCES_OR_INJECT,
                            Severity::Error,
                            format!(
                                "The field '{}' must not be annotated with both @Produces and @Inject",
                                field.name
                            ),
                            unit.range_of(field.name_span),
                        )
                        .with_data(found),
                    );
                }
            }

            for (_, method) in ty.methods() {
                if !method.is_constructor {
                    if let Some(found) = produces_and_inject(&method.annotations) {
                        diagnostics.push(
                            Diagnostic::new(
                                codes::REMOVE_PRODUCES_OR_INJECT,
                                Severity::Error,
                                format!(
                                    "The method '{}' must not be annotated with both @Produces and @Inject",
                                    method.name
                                ),
                                unit.range_of(method.name_span),
                            )
                            .with_data(found),
                        );
                    }
                }

                check_forbidden_params(
                    unit,
                    method,
                    jakarta::INJECT,
                    codes::INVALID_INJECT_PARAMS,
                    &mut diagnostics,
                );
                check_forbidden_params(
                    unit,
                    method,
                    jakarta::PRODUCES,
                    codes::INVALID_PRODUCES_PARAMS,
                    &mut diagnostics,
                );
            }
        }

        diagnostics
    }
}

/// Both conflicting annotations in declaration order, or None
fn produces_and_inject(annotations: &[Annotation]) -> Option<Vec<String>> {
    let found: Vec<String> = annotations
        .iter()
        .filter(|a| a.fqn == jakarta::PRODUCES || a.fqn == jakarta::INJECT)
        .map(|a| a.fqn.clone())
        .collect();
    if found.iter().any(|f| f == jakarta::PRODUCES) && found.iter().any(|f| f == jakarta::INJECT) {
        Some(found)
    } else {
        None
    }
}

/// One diagnostic per method when parameters carry forbidden annotations.
///
/// The message lists simple names, while `data` carries the fully-qualified
/// names the fix participant works with - the asymmetry is deliberate and
/// mirrors what clients display.
fn check_forbidden_params(
    unit: &CompilationUnit,
    method: &MethodDecl,
    marker: &str,
    code: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if !method.annotations.iter().any(|a| a.fqn == marker) {
        return;
    }

    // Distinct forbidden annotations across all parameters, discovery order
    let mut found: Vec<String> = Vec::new();
    for param in &method.params {
        for annotation in &param.annotations {
            if jakarta::FORBIDDEN_PARAM_ANNOTATIONS.contains(&annotation.fqn.as_str())
                && !found.contains(&annotation.fqn)
            {
                found.push(annotation.fqn.clone());
            }
        }
    }

    if found.is_empty() {
        return;
    }

    let simple: Vec<String> = found
        .iter()
        .map(|fqn| format!("@{}", jakarta::simple_name(fqn)))
        .collect();
    diagnostics.push(
        Diagnostic::new(
            code,
            Severity::Error,
            format!(
                "A method annotated with @{} must not have parameters annotated with {}",
                jakarta::simple_name(marker),
                simple.join(", ")
            ),
            unit.range_of(method.name_span),
        )
        .with_data(found),
    );
}

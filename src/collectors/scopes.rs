//! Scope cardinality and scope/visibility interaction rules

use super::{codes, Collector};
use crate::core::{Diagnostic, Severity};
use crate::jakarta;
use crate::model::{scopes_of, CompilationUnit, Modifier, TypeKind};

/// Checks the "at most one scope annotation" rule on bean classes, producer
/// fields, and producer methods, and the public-field/default-scope
/// interaction on managed beans
pub struct ScopeCollector;

impl Collector for ScopeCollector {
    fn name(&self) -> &'static str {
        "scopes"
    }

    fn collect(&self, unit: &CompilationUnit) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for ty in &unit.types {
            if ty.kind != TypeKind::Class {
                continue;
            }

            let scopes = ty.scopes();
            if scopes.len() > 1 {
                let names: Vec<String> = scopes.iter().map(|a| a.fqn.clone()).collect();
                let simple: Vec<String> = scopes
                    .iter()
                    .map(|a| format!("@{}", jakarta::simple_name(&a.fqn)))
                    .collect();
                diagnostics.push(
                    Diagnostic::new(
                        codes::INVALID_SCOPE_ON_MANAGED_BEAN,
                        Severity::Error,
                        format!(
                            "Scope type annotations must not be applied more than once to a managed bean: {}",
                            simple.join(", ")
                        ),
                        unit.range_of(ty.name_span),
                    )
                    .with_data(names),
                );
            }

            // A managed bean with a non-static public field must have the
            // default scope
            if !scopes.is_empty() && scopes.iter().any(|a| a.fqn != jakarta::DEPENDENT) {
                let has_public_instance_field = ty.fields().any(|(_, f)| {
                    f.modifiers.contains(&Modifier::Public)
                        && !f.modifiers.contains(&Modifier::Static)
                });
                if has_public_instance_field {
                    let names: Vec<String> = scopes.iter().map(|a| a.fqn.clone()).collect();
                    diagnostics.push(
                        Diagnostic::new(
                            codes::INVALID_MANAGED_BEAN_ANNOTATION,
                            Severity::Error,
                            format!(
                                "A managed bean with a non-static public field must not declare any scope other than @{}",
                                jakarta::simple_name(jakarta::DEPENDENT)
                            ),
                            unit.range_of(ty.name_span),
                        )
                        .with_data(names),
                    );
                }
            }

            for (_, field) in ty.fields() {
                if !field.annotations.iter().any(|a| a.fqn == jakarta::PRODUCES) {
                    continue;
                }
                let field_scopes = scopes_of(&field.annotations);
                if field_scopes.len() > 1 {
                    let names: Vec<String> = field_scopes.iter().map(|a| a.fqn.clone()).collect();
                    let simple: Vec<String> = field_scopes
                        .iter()
                        .map(|a| format!("@{}", jakarta::simple_name(&a.fqn)))
                        .collect();
                    diagnostics.push(
                        Diagnostic::new(
                            codes::INVALID_SCOPE_ON_PRODUCER_FIELD,
                            Severity::Error,
                            format!(
                                "Scope type annotations must not be applied more than once to a producer field: {}",
                                simple.join(", ")
                            ),
                            unit.range_of(field.name_span),
                        )
                        .with_data(names),
                    );
                }
            }

            for (_, method) in ty.methods() {
                if method.is_constructor
                    || !method.annotations.iter().any(|a| a.fqn == jakarta::PRODUCES)
                {
                    continue;
                }
                let method_scopes = scopes_of(&method.annotations);
                if method_scopes.len() > 1 {
                    let names: Vec<String> = method_scopes.iter().map(|a| a.fqn.clone()).collect();
                    let simple: Vec<String> = method_scopes
                        .iter()
                        .map(|a| format!("@{}", jakarta::simple_name(&a.fqn)))
                        .collect();
                    diagnostics.push(
                        Diagnostic::new(
                            codes::INVALID_SCOPE_ON_PRODUCER_METHOD,
                            Severity::Error,
                            format!(
                                "Scope type annotations must not be applied more than once to a producer method: {}",
                                simple.join(", ")
                            ),
                            unit.range_of(method.name_span),
                        )
                        .with_data(names),
                    );
                }
            }
        }

        diagnostics
    }
}

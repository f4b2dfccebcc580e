//! Persistence entity rules

use super::{codes, Collector};
use crate::core::{Diagnostic, Severity};
use crate::jakarta;
use crate::model::{CompilationUnit, Modifier, TypeKind};

/// An `@Entity` class must have a public or protected no-arg constructor and
/// must not be final
pub struct PersistenceCollector;

impl Collector for PersistenceCollector {
    fn name(&self) -> &'static str {
        "persistence"
    }

    fn collect(&self, unit: &CompilationUnit) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for ty in &unit.types {
            if ty.kind != TypeKind::Class || !ty.has_annotation(jakarta::ENTITY) {
                continue;
            }

            let ctors: Vec<_> = ty.constructors().collect();
            let has_usable_no_arg = ctors.is_empty()
                || ctors.iter().any(|(_, c)| {
                    c.params.is_empty()
                        && (c.modifiers.contains(&Modifier::Public)
                            || c.modifiers.contains(&Modifier::Protected))
                });
            if !has_usable_no_arg {
                diagnostics.push(Diagnostic::new(
                    codes::INVALID_ENTITY_CONSTRUCTOR,
                    Severity::Error,
                    format!(
                        "The entity '{}' must have a public or protected no-arg constructor",
                        ty.name
                    ),
                    unit.range_of(ty.name_span),
                ));
            }

            if ty.has_modifier(Modifier::Final) {
                diagnostics.push(Diagnostic::new(
                    codes::INVALID_ENTITY_MODIFIER,
                    Severity::Error,
                    format!("The entity '{}' must not be final", ty.name),
                    unit.range_of(ty.name_span),
                ));
            }
        }

        diagnostics
    }
}

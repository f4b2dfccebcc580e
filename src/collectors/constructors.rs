//! Bean constructor resolution

use super::{codes, Collector};
use crate::core::{Diagnostic, Severity};
use crate::jakarta;
use crate::model::{CompilationUnit, TypeKind};

/// A bean-defining class whose constructors are all parameterized and none
/// annotated `@Inject` cannot be instantiated by the container; one
/// diagnostic fires per such constructor
pub struct ConstructorCollector;

impl Collector for ConstructorCollector {
    fn name(&self) -> &'static str {
        "constructors"
    }

    fn collect(&self, unit: &CompilationUnit) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for ty in &unit.types {
            if ty.kind != TypeKind::Class || ty.scopes().is_empty() {
                continue;
            }

            let ctors: Vec<_> = ty.constructors().collect();
            if ctors.is_empty() {
                // Implicit default constructor
                continue;
            }

            let resolvable = ctors.iter().any(|(_, c)| {
                c.params.is_empty() || c.annotations.iter().any(|a| a.fqn == jakarta::INJECT)
            });
            if resolvable {
                continue;
            }

            for (_, ctor) in ctors {
                diagnostics.push(Diagnostic::new(
                    codes::INVALID_MANAGED_BEAN_CONSTRUCTOR,
                    Severity::Error,
                    format!(
                        "The managed bean '{}' needs a no-arg constructor or a constructor annotated with @Inject",
                        ty.name
                    ),
                    unit.range_of(ctor.name_span),
                ));
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
        ConstructorCollector.collect(&unit)
    }

    #[test]
    fn test_parameterized_constructor_without_inject() {
        let diagnostics = collect(
            "@RequestScoped\n\
             public class Cart {\n\
             \x20   public Cart(PriceService prices) {\n\
             \x20   }\n\
             }\n",
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, codes::INVALID_MANAGED_BEAN_CONSTRUCTOR);
    }

    #[test]
    fn test_one_diagnostic_per_constructor() {
        let diagnostics = collect(
            "@RequestScoped\n\
             public class Cart {\n\
             \x20   public Cart(PriceService prices) {\n\
             \x20   }\n\
             \n\
             \x20   public Cart(PriceService prices, TaxService taxes) {\n\
             \x20   }\n\
             }\n",
        );
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_no_arg_constructor_is_compliant() {
        let diagnostics = collect(
            "@RequestScoped\n\
             public class Cart {\n\
             \x20   public Cart() {\n\
             \x20   }\n\
             \n\
             \x20   public Cart(PriceService prices) {\n\
             \x20   }\n\
             }\n",
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_inject_annotated_constructor_is_compliant() {
        let diagnostics = collect(
            "@RequestScoped\n\
             public class Cart {\n\
             \x20   @Inject\n\
             \x20   public Cart(PriceService prices) {\n\
             \x20   }\n\
             }\n",
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_implicit_constructor_is_compliant() {
        let diagnostics = collect("@RequestScoped\npublic class Cart {\n}\n");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_non_bean_class_is_ignored() {
        let diagnostics = collect(
            "public class Plain {\n\
             \x20   public Plain(String id) {\n\
             \x20   }\n\
             }\n",
        );
        assert!(diagnostics.is_empty());
    }
}

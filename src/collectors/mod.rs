//! Rule catalog
//!
//! One collector per specification area. Each collector is a pure function
//! over a compilation unit: no shared state, no mutation, and a
//! deterministic diagnostic list (order included) for a fixed input, since
//! clients diff results across incremental edits.

pub mod constructors;
pub mod injection;
pub mod lifecycle;
pub mod persistence;
pub mod scopes;
pub mod servlet;
pub mod validation;

pub use constructors::ConstructorCollector;
pub use injection::InjectionCollector;
pub use lifecycle::LifecycleCollector;
pub use persistence::PersistenceCollector;
pub use scopes::ScopeCollector;
pub use servlet::ServletCollector;
pub use validation::ValidationCollector;

use crate::core::Diagnostic;
use crate::model::CompilationUnit;

/// Stable rule identifiers
pub mod codes {
    pub const INVALID_SCOPE_ON_MANAGED_BEAN: &str = "InvalidScopeOnManagedBean";
    pub const INVALID_SCOPE_ON_PRODUCER_FIELD: &str = "InvalidScopeOnProducerField";
    pub const INVALID_SCOPE_ON_PRODUCER_METHOD: &str = "InvalidScopeOnProducerMethod";
    pub const INVALID_MANAGED_BEAN_ANNOTATION: &str = "InvalidManagedBeanAnnotation";

    pub const REMOVE_PRODUCES_OR_INJECT: &str = "RemoveProducesOrInject";
    pub const INVALID_INJECT_PARAMS: &str = "InvalidInjectAnnotatedMethodParams";
    pub const INVALID_PRODUCES_PARAMS: &str = "InvalidProducesAnnotatedMethodParams";

    pub const INVALID_MANAGED_BEAN_CONSTRUCTOR: &str = "InvalidManagedBeanConstructor";

    pub const LIFECYCLE_METHOD_STATIC: &str = "LifecycleMethodStatic";
    pub const LIFECYCLE_METHOD_PARAMS: &str = "LifecycleMethodParams";
    pub const LIFECYCLE_METHOD_RETURN_TYPE: &str = "LifecycleMethodReturnType";
    pub const LIFECYCLE_METHOD_CHECKED_EXCEPTIONS: &str = "LifecycleMethodCheckedExceptions";

    pub const COMPLETE_SERVLET_ANNOTATION: &str = "CompleteServletAnnotation";
    pub const INVALID_SERVLET_URL_PATTERN: &str = "InvalidServletUrlPattern";
    pub const COMPLETE_RESOURCE_ANNOTATION: &str = "CompleteResourceAnnotation";

    pub const INVALID_ENTITY_CONSTRUCTOR: &str = "InvalidEntityConstructor";
    pub const INVALID_ENTITY_MODIFIER: &str = "InvalidEntityModifier";

    pub const INVALID_CONSTRAINT_FIELD_TYPE: &str = "InvalidConstraintFieldType";
    pub const INVALID_CONSTRAINT_ON_STATIC_FIELD: &str = "InvalidConstraintOnStaticField";

    /// Every rule code, in catalog order
    pub const ALL: &[&str] = &[
        INVALID_SCOPE_ON_MANAGED_BEAN,
        INVALID_SCOPE_ON_PRODUCER_FIELD,
        INVALID_SCOPE_ON_PRODUCER_METHOD,
        INVALID_MANAGED_BEAN_ANNOTATION,
        REMOVE_PRODUCES_OR_INJECT,
        INVALID_INJECT_PARAMS,
        INVALID_PRODUCES_PARAMS,
        INVALID_MANAGED_BEAN_CONSTRUCTOR,
        LIFECYCLE_METHOD_STATIC,
        LIFECYCLE_METHOD_PARAMS,
        LIFECYCLE_METHOD_RETURN_TYPE,
        LIFECYCLE_METHOD_CHECKED_EXCEPTIONS,
        COMPLETE_SERVLET_ANNOTATION,
        INVALID_SERVLET_URL_PATTERN,
        COMPLETE_RESOURCE_ANNOTATION,
        INVALID_ENTITY_CONSTRUCTOR,
        INVALID_ENTITY_MODIFIER,
        INVALID_CONSTRAINT_FIELD_TYPE,
        INVALID_CONSTRAINT_ON_STATIC_FIELD,
    ];
}

/// Trait for rule collectors
pub trait Collector: Send + Sync {
    /// Collector name, used in isolation logging
    fn name(&self) -> &'static str;

    /// Analyze a unit and return diagnostics in discovery order
    fn collect(&self, unit: &CompilationUnit) -> Vec<Diagnostic>;
}

/// The built-in catalog, in the order collectors run
pub fn builtin_collectors() -> Vec<Box<dyn Collector>> {
    vec![
        Box::new(ScopeCollector),
        Box::new(InjectionCollector),
        Box::new(ConstructorCollector),
        Box::new(LifecycleCollector),
        Box::new(ServletCollector::new()),
        Box::new(PersistenceCollector),
        Box::new(ValidationCollector),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_builtin_catalog_names_are_unique() {
        let collectors = builtin_collectors();
        let mut names: Vec<_> = collectors.iter().map(|c| c.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), collectors.len());
    }

    #[test]
    fn test_no_diagnostics_on_compliant_unit() {
        let source = "import jakarta.annotation.PostConstruct;\n\
             import jakarta.enterprise.context.RequestScoped;\n\
             \n\
             @RequestScoped\n\
             public class Cart {\n\
             \x20   private int total;\n\
             \n\
             \x20   @PostConstruct\n\
             \x20   void init() {\n\
             \x20   }\n\
             }\n";
        let unit = CompilationUnit::parse(source, Path::new("Cart.java")).unwrap();
        for collector in builtin_collectors() {
            let diagnostics = collector.collect(&unit);
            assert!(
                diagnostics.is_empty(),
                "{} reported {:?}",
                collector.name(),
                diagnostics
            );
        }
    }
}

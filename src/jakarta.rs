//! Jakarta EE annotation catalog
//!
//! The closed sets of annotations the rule catalog reasons about, plus the
//! well-known-name table used to resolve simple names to fully-qualified
//! names when a source file relies on imports the parser has not seen.

/// CDI injection point
pub const INJECT: &str = "jakarta.inject.Inject";
/// CDI producer
pub const PRODUCES: &str = "jakarta.enterprise.inject.Produces";
/// CDI disposer parameter
pub const DISPOSES: &str = "jakarta.enterprise.inject.Disposes";
/// CDI observer parameter
pub const OBSERVES: &str = "jakarta.enterprise.event.Observes";
/// CDI async observer parameter
pub const OBSERVES_ASYNC: &str = "jakarta.enterprise.event.ObservesAsync";

/// Default scope
pub const DEPENDENT: &str = "jakarta.enterprise.context.Dependent";
pub const APPLICATION_SCOPED: &str = "jakarta.enterprise.context.ApplicationScoped";
pub const REQUEST_SCOPED: &str = "jakarta.enterprise.context.RequestScoped";
pub const SESSION_SCOPED: &str = "jakarta.enterprise.context.SessionScoped";
pub const CONVERSATION_SCOPED: &str = "jakarta.enterprise.context.ConversationScoped";

/// Lifecycle callbacks
pub const POST_CONSTRUCT: &str = "jakarta.annotation.PostConstruct";
pub const PRE_DESTROY: &str = "jakarta.annotation.PreDestroy";

/// Servlet / resource annotations
pub const WEB_SERVLET: &str = "jakarta.servlet.annotation.WebServlet";
pub const RESOURCE: &str = "jakarta.annotation.Resource";

/// Persistence
pub const ENTITY: &str = "jakarta.persistence.Entity";

/// Bean validation constraints
pub const ASSERT_TRUE: &str = "jakarta.validation.constraints.AssertTrue";
pub const ASSERT_FALSE: &str = "jakarta.validation.constraints.AssertFalse";
pub const NOT_NULL: &str = "jakarta.validation.constraints.NotNull";
pub const MIN: &str = "jakarta.validation.constraints.Min";
pub const MAX: &str = "jakarta.validation.constraints.Max";
pub const SIZE: &str = "jakarta.validation.constraints.Size";
pub const PATTERN: &str = "jakarta.validation.constraints.Pattern";
pub const NOT_EMPTY: &str = "jakarta.validation.constraints.NotEmpty";
pub const NOT_BLANK: &str = "jakarta.validation.constraints.NotBlank";

/// The closed scope set: at most one of these may appear per element
pub const SCOPES: &[&str] = &[
    DEPENDENT,
    APPLICATION_SCOPED,
    REQUEST_SCOPED,
    SESSION_SCOPED,
    CONVERSATION_SCOPED,
];

/// Annotations forbidden on parameters of `@Inject`/`@Produces` methods
pub const FORBIDDEN_PARAM_ANNOTATIONS: &[&str] = &[DISPOSES, OBSERVES, OBSERVES_ASYNC];

/// Bean validation constraint annotations
pub const CONSTRAINTS: &[&str] = &[
    ASSERT_TRUE,
    ASSERT_FALSE,
    NOT_NULL,
    MIN,
    MAX,
    SIZE,
    PATTERN,
    NOT_EMPTY,
    NOT_BLANK,
];

pub fn is_scope(fqn: &str) -> bool {
    SCOPES.contains(&fqn)
}

pub fn is_constraint(fqn: &str) -> bool {
    CONSTRAINTS.contains(&fqn)
}

/// Simple (unqualified) name of a fully-qualified name
pub fn simple_name(fqn: &str) -> &str {
    fqn.rsplit('.').next().unwrap_or(fqn)
}

/// Exception types known to be unchecked. Anything not listed here counts as
/// checked, since no type hierarchy is available at this layer.
const UNCHECKED_EXCEPTIONS: &[&str] = &[
    "java.lang.RuntimeException",
    "java.lang.Error",
    "java.lang.ArithmeticException",
    "java.lang.ArrayIndexOutOfBoundsException",
    "java.lang.ArrayStoreException",
    "java.lang.ClassCastException",
    "java.lang.IllegalArgumentException",
    "java.lang.IllegalStateException",
    "java.lang.IndexOutOfBoundsException",
    "java.lang.NegativeArraySizeException",
    "java.lang.NullPointerException",
    "java.lang.NumberFormatException",
    "java.lang.StringIndexOutOfBoundsException",
    "java.lang.UnsupportedOperationException",
    "java.lang.AssertionError",
    "java.lang.OutOfMemoryError",
    "java.lang.StackOverflowError",
];

pub fn is_checked_exception(fqn: &str) -> bool {
    !UNCHECKED_EXCEPTIONS.contains(&fqn)
}

/// Well-known simple-name to fully-qualified-name table, consulted when a
/// name is neither qualified nor covered by an import.
const WELL_KNOWN: &[(&str, &str)] = &[
    ("Inject", INJECT),
    ("Produces", PRODUCES),
    ("Disposes", DISPOSES),
    ("Observes", OBSERVES),
    ("ObservesAsync", OBSERVES_ASYNC),
    ("Dependent", DEPENDENT),
    ("ApplicationScoped", APPLICATION_SCOPED),
    ("RequestScoped", REQUEST_SCOPED),
    ("SessionScoped", SESSION_SCOPED),
    ("ConversationScoped", CONVERSATION_SCOPED),
    ("PostConstruct", POST_CONSTRUCT),
    ("PreDestroy", PRE_DESTROY),
    ("WebServlet", WEB_SERVLET),
    ("Resource", RESOURCE),
    ("Entity", ENTITY),
    ("AssertTrue", ASSERT_TRUE),
    ("AssertFalse", ASSERT_FALSE),
    ("NotNull", NOT_NULL),
    ("Min", MIN),
    ("Max", MAX),
    ("Size", SIZE),
    ("Pattern", PATTERN),
    ("NotEmpty", NOT_EMPTY),
    ("NotBlank", NOT_BLANK),
    ("IOException", "java.io.IOException"),
    ("FileNotFoundException", "java.io.FileNotFoundException"),
    ("SQLException", "java.sql.SQLException"),
    ("Exception", "java.lang.Exception"),
    ("Throwable", "java.lang.Throwable"),
    ("RuntimeException", "java.lang.RuntimeException"),
    ("Error", "java.lang.Error"),
    ("IllegalArgumentException", "java.lang.IllegalArgumentException"),
    ("IllegalStateException", "java.lang.IllegalStateException"),
    ("NullPointerException", "java.lang.NullPointerException"),
    ("UnsupportedOperationException", "java.lang.UnsupportedOperationException"),
    ("InterruptedException", "java.lang.InterruptedException"),
    ("CloneNotSupportedException", "java.lang.CloneNotSupportedException"),
];

pub fn well_known_fqn(simple: &str) -> Option<&'static str> {
    WELL_KNOWN
        .iter()
        .find(|(name, _)| *name == simple)
        .map(|(_, fqn)| *fqn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_membership() {
        assert!(is_scope(DEPENDENT));
        assert!(is_scope(APPLICATION_SCOPED));
        assert!(!is_scope(INJECT));
    }

    #[test]
    fn test_simple_name() {
        assert_eq!(simple_name(INJECT), "Inject");
        assert_eq!(simple_name("Observes"), "Observes");
    }

    #[test]
    fn test_checked_exception() {
        assert!(is_checked_exception("java.io.IOException"));
        assert!(is_checked_exception("java.lang.Exception"));
        assert!(!is_checked_exception("java.lang.RuntimeException"));
        assert!(!is_checked_exception("java.lang.NullPointerException"));
    }

    #[test]
    fn test_well_known_lookup() {
        assert_eq!(well_known_fqn("Inject"), Some(INJECT));
        assert_eq!(well_known_fqn("IOException"), Some("java.io.IOException"));
        assert_eq!(well_known_fqn("NoSuchThing"), None);
    }
}

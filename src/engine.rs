//! Analysis engine
//!
//! The three host-facing operations: collect diagnostics, enumerate quick-fix
//! candidates, resolve one candidate into an edit. The engine holds no
//! mutable state across calls - the collector list and participant registry
//! are built once and read-only afterwards, so concurrent requests need no
//! locking.

use crate::actions::ParticipantRegistry;
use crate::collectors::{builtin_collectors, Collector};
use crate::config::Config;
use crate::core::{CodeActionCandidate, Diagnostic, ResolvedCodeAction};
use crate::fixes::ResolveError;
use crate::model::CompilationUnit;
use std::panic::{catch_unwind, AssertUnwindSafe};

pub struct Engine {
    collectors: Vec<Box<dyn Collector>>,
    registry: ParticipantRegistry,
    config: Config,
}

impl Engine {
    /// Engine with the built-in catalog and default configuration
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            collectors: builtin_collectors(),
            registry: ParticipantRegistry::with_builtin(),
            config,
        }
    }

    /// Add a collector to the catalog
    pub fn register_collector(&mut self, collector: Box<dyn Collector>) {
        self.collectors.push(collector);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full rule catalog over a unit.
    ///
    /// A collector that panics is isolated: its diagnostics are dropped for
    /// this unit, a warning is logged, and the remaining collectors still
    /// run. The pass as a whole never fails.
    pub fn collect_diagnostics(&self, unit: &CompilationUnit) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for collector in &self.collectors {
            match catch_unwind(AssertUnwindSafe(|| collector.collect(unit))) {
                Ok(found) => diagnostics.extend(found),
                Err(_) => {
                    log::warn!(
                        "collector '{}' failed on {}; continuing with remaining collectors",
                        collector.name(),
                        unit.file.display()
                    );
                }
            }
        }

        for diagnostic in &mut diagnostics {
            diagnostic.severity = self
                .config
                .effective_severity(&diagnostic.code, diagnostic.severity);
        }
        diagnostics.retain(|d| self.config.is_rule_enabled(&d.code));
        diagnostics.retain(|d| d.severity >= self.config.min_severity);

        diagnostics
    }

    /// Enumerate quick-fix candidates for one diagnostic. Unknown codes and
    /// malformed payloads yield an empty list.
    pub fn get_code_actions(
        &self,
        unit: &CompilationUnit,
        diagnostic: &Diagnostic,
    ) -> Vec<CodeActionCandidate> {
        self.registry.propose(unit, diagnostic)
    }

    /// Resolve one previously-proposed candidate into a concrete edit
    pub fn resolve_code_action(
        &self,
        unit: &CompilationUnit,
        candidate: &CodeActionCandidate,
    ) -> Result<ResolvedCodeAction, ResolveError> {
        self.registry.resolve(unit, candidate)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Severity;
    use std::path::Path;

    fn unit(source: &str) -> CompilationUnit {
        CompilationUnit::parse(source, Path::new("Test.java")).unwrap()
    }

    struct PanickingCollector;

    impl Collector for PanickingCollector {
        fn name(&self) -> &'static str {
            "panicking"
        }

        fn collect(&self, _unit: &CompilationUnit) -> Vec<Diagnostic> {
            panic!("collector bug");
        }
    }

    #[test]
    fn test_collector_panic_is_isolated() {
        let mut engine = Engine::new();
        engine.register_collector(Box::new(PanickingCollector));

        let u = unit(
            "public class A {\n\
             \x20   @Produces\n\
             \x20   @Inject\n\
             \x20   private Widget widget;\n\
             }\n",
        );
        // The remaining collectors still report
        let diagnostics = engine.collect_diagnostics(&u);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "RemoveProducesOrInject");
    }

    #[test]
    fn test_collect_is_deterministic() {
        let engine = Engine::new();
        let u = unit(
            "@ApplicationScoped\n\
             @RequestScoped\n\
             public class Cart {\n\
             \x20   public int total;\n\
             }\n",
        );
        let first = engine.collect_diagnostics(&u);
        let second = engine.collect_diagnostics(&u);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_rule_filtering() {
        let mut config = Config::default();
        config.rules.disable.push("RemoveProducesOrInject".to_string());
        let engine = Engine::with_config(config);

        let u = unit(
            "public class A {\n\
             \x20   @Produces\n\
             \x20   @Inject\n\
             \x20   private Widget widget;\n\
             }\n",
        );
        assert!(engine.collect_diagnostics(&u).is_empty());
    }

    #[test]
    fn test_severity_floor() {
        let mut config = Config::default();
        config.min_severity = Severity::Error;
        let engine = Engine::with_config(config);

        let u = unit(
            "@WebServlet(urlPatterns = {\"orders\"})\n\
             public class OrderServlet {\n\
             }\n",
        );
        // InvalidServletUrlPattern is a warning and falls below the floor
        assert!(engine.collect_diagnostics(&u).is_empty());
    }

    #[test]
    fn test_severity_override_applies() {
        let mut config = Config::default();
        config
            .severity_overrides
            .insert("InvalidServletUrlPattern".to_string(), Severity::Error);
        let engine = Engine::with_config(config);

        let u = unit(
            "@WebServlet(urlPatterns = {\"orders\"})\n\
             public class OrderServlet {\n\
             }\n",
        );
        let diagnostics = engine.collect_diagnostics(&u);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Error);
    }

    #[test]
    fn test_unknown_code_yields_no_actions() {
        let engine = Engine::new();
        let u = unit("public class A {\n}\n");
        let diag = Diagnostic::new(
            "NotARealRule",
            Severity::Error,
            "unknown",
            u.range_of(u.types[0].name_span),
        );
        assert!(engine.get_code_actions(&u, &diag).is_empty());
    }
}

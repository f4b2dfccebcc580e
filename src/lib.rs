//! Jakarta Analyzer - CDI diagnostics and quick fixes for Java sources
//!
//! This library inspects a declaration-level model of Java compilation units
//! for violations of Jakarta EE / CDI specification rules and offers
//! automated source transformations (quick fixes) that repair them:
//! - Scoping: at most one scope annotation per bean, producer field, or
//!   producer method; public-field beans must be `@Dependent`
//! - Injection: `@Produces`/`@Inject` conflicts, forbidden parameter
//!   annotations, bean constructor resolution
//! - Lifecycle: `@PostConstruct`/`@PreDestroy` method shape
//! - Completeness: required `@WebServlet`/`@Resource` attributes
//! - Persistence and bean-validation placement rules
//!
//! # Example
//!
//! ```no_run
//! use jakarta_analyzer::{CompilationUnit, Engine};
//! use std::path::Path;
//!
//! let source = "@ApplicationScoped @RequestScoped public class Cart { }";
//! let unit = CompilationUnit::parse(source, Path::new("Cart.java")).unwrap();
//! let engine = Engine::new();
//!
//! for diag in engine.collect_diagnostics(&unit) {
//!     println!("{}: {}", diag.code, diag.message);
//!     for candidate in engine.get_code_actions(&unit, &diag) {
//!         println!("  fix: {}", candidate.label);
//!     }
//! }
//! ```

pub mod actions;
pub mod collectors;
pub mod combinations;
pub mod config;
pub mod core;
pub mod engine;
pub mod fixes;
pub mod jakarta;
pub mod lsp;
pub mod model;
pub mod output;

// Re-export main types
pub use crate::actions::{CodeActionParticipant, ParticipantRegistry};
pub use crate::collectors::{builtin_collectors, codes, Collector};
pub use crate::config::{Config, ConfigError};
pub use crate::core::{
    CodeActionCandidate, Diagnostic, Position, Range, ResolvedCodeAction, Severity, TextEdit,
    WorkspaceEdit,
};
pub use crate::engine::Engine;
pub use crate::fixes::{ResolveError, Transform};
pub use crate::model::{CompilationUnit, ParseError, TargetPath};
pub use crate::output::{get_formatter, FileReport, Formatter, OutputFormat};

use std::path::Path;

/// Parse and analyze one source file's text
pub fn analyze_source(
    source: &str,
    file: &Path,
    engine: &Engine,
) -> Result<Vec<Diagnostic>, ParseError> {
    let unit = CompilationUnit::parse(source, file)?;
    Ok(engine.collect_diagnostics(&unit))
}

/// Analyze many files in parallel
pub fn analyze_files(files: &[std::path::PathBuf], engine: &Engine) -> Vec<FileReport> {
    use rayon::prelude::*;

    files
        .par_iter()
        .map(|file| {
            let diagnostics = match std::fs::read_to_string(file) {
                Ok(source) => match analyze_source(&source, file, engine) {
                    Ok(diagnostics) => diagnostics,
                    Err(e) => {
                        log::warn!("skipping {}: {}", file.display(), e);
                        Vec::new()
                    }
                },
                Err(e) => {
                    log::warn!("failed to read {}: {}", file.display(), e);
                    Vec::new()
                }
            };
            FileReport {
                file: file.clone(),
                diagnostics,
            }
        })
        .collect()
}

//! Core value types shared by collectors, participants, and the engine

pub mod types;

pub use types::{
    position_to_offset, CodeActionCandidate, Diagnostic, Position, Range, ResolvedCodeAction,
    Severity, TextEdit, WorkspaceEdit, DIAGNOSTIC_SOURCE,
};

//! Language Server Protocol wire shapes
//!
//! Serde structs matching the standard LSP `Diagnostic` and `CodeAction`
//! JSON shapes, plus conversions from the engine's types. The `data` field
//! carries the resolve-time payload, so a client can round-trip an
//! unresolved code action back through `codeAction/resolve`.

use crate::core::{
    CodeActionCandidate, Diagnostic, Position as CorePosition, Range as CoreRange,
    ResolvedCodeAction, Severity, WorkspaceEdit as CoreWorkspaceEdit,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// LSP diagnostic severity (matches the LSP spec)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum LspSeverity {
    Error = 1,
    Warning = 2,
    Information = 3,
    Hint = 4,
}

impl From<Severity> for LspSeverity {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => LspSeverity::Error,
            Severity::Warning => LspSeverity::Warning,
            Severity::Info => LspSeverity::Information,
        }
    }
}

/// LSP position (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl From<CorePosition> for Position {
    fn from(pos: CorePosition) -> Self {
        Self {
            line: pos.line.saturating_sub(1) as u32,
            character: pos.character.saturating_sub(1) as u32,
        }
    }
}

/// LSP range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl From<CoreRange> for Range {
    fn from(range: CoreRange) -> Self {
        Self {
            start: range.start.into(),
            end: range.end.into(),
        }
    }
}

/// LSP diagnostic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LspDiagnostic {
    pub range: Range,
    pub severity: Option<u32>,
    pub code: Option<String>,
    pub source: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// LSP text edit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextEdit {
    pub range: Range,
    #[serde(rename = "newText")]
    pub new_text: String,
}

/// LSP workspace edit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceEdit {
    pub changes: Option<HashMap<String, Vec<TextEdit>>>,
}

impl From<&CoreWorkspaceEdit> for WorkspaceEdit {
    fn from(edit: &CoreWorkspaceEdit) -> Self {
        let changes = edit
            .changes
            .iter()
            .map(|(uri, edits)| {
                (
                    uri.clone(),
                    edits
                        .iter()
                        .map(|e| TextEdit {
                            range: e.range.into(),
                            new_text: e.new_text.clone(),
                        })
                        .collect(),
                )
            })
            .collect();
        Self {
            changes: Some(changes),
        }
    }
}

/// LSP code action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeAction {
    pub title: String,
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Vec<LspDiagnostic>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit: Option<WorkspaceEdit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "isPreferred")]
    pub is_preferred: Option<bool>,
}

/// Convert diagnostics to LSP diagnostics
pub fn to_lsp_diagnostics(diagnostics: &[Diagnostic]) -> Vec<LspDiagnostic> {
    diagnostics
        .iter()
        .map(|d| LspDiagnostic {
            range: d.range.into(),
            severity: Some(LspSeverity::from(d.severity) as u32),
            code: Some(d.code.clone()),
            source: Some(d.source.clone()),
            message: d.message.clone(),
            data: d.data.clone(),
        })
        .collect()
}

/// Convert an unresolved candidate to an LSP code action.
///
/// No edit is attached; the candidate itself rides in `data` so the resolve
/// request can reconstruct it.
pub fn to_unresolved_code_action(candidate: &CodeActionCandidate) -> CodeAction {
    CodeAction {
        title: candidate.label.clone(),
        kind: Some("quickfix".to_string()),
        diagnostics: None,
        edit: None,
        data: serde_json::to_value(candidate).ok(),
        is_preferred: None,
    }
}

/// Reconstruct a candidate from a resolve request's `data` payload
pub fn candidate_from_data(data: &serde_json::Value) -> Option<CodeActionCandidate> {
    serde_json::from_value(data.clone()).ok()
}

/// Convert a resolved action to an LSP code action carrying its edit
pub fn to_resolved_code_action(resolved: &ResolvedCodeAction) -> CodeAction {
    CodeAction {
        title: resolved.candidate.label.clone(),
        kind: Some("quickfix".to_string()),
        diagnostics: None,
        edit: Some((&resolved.edit).into()),
        data: None,
        is_preferred: Some(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Range as CR;

    #[test]
    fn test_positions_are_zero_based() {
        let source = "abc\ndef";
        let core = CR::from_offsets(source, 4, 7);
        let lsp: Range = core.into();
        assert_eq!(lsp.start, Position { line: 1, character: 0 });
        assert_eq!(lsp.end, Position { line: 1, character: 3 });
    }

    #[test]
    fn test_diagnostic_conversion_keeps_data() {
        let source = "class A {}";
        let diag = Diagnostic::new(
            "RemoveProducesOrInject",
            Severity::Error,
            "conflict",
            CR::from_offsets(source, 6, 7),
        )
        .with_data(vec!["jakarta.inject.Inject".to_string()]);

        let lsp = to_lsp_diagnostics(&[diag]);
        assert_eq!(lsp[0].code.as_deref(), Some("RemoveProducesOrInject"));
        assert_eq!(lsp[0].severity, Some(1));
        assert!(lsp[0].data.is_some());
    }

    #[test]
    fn test_candidate_round_trips_through_data() {
        let candidate = CodeActionCandidate {
            label: "Remove @Produces".to_string(),
            diagnostic_code: "RemoveProducesOrInject".to_string(),
            participant_id: "jakarta.produces-inject".to_string(),
            data: Some(serde_json::json!({"kind": "removeAnnotations"})),
        };

        let action = to_unresolved_code_action(&candidate);
        assert!(action.edit.is_none());

        let back = candidate_from_data(action.data.as_ref().unwrap()).unwrap();
        assert_eq!(back, candidate);
    }

    #[test]
    fn test_code_action_serializes_camel_case() {
        let candidate = CodeActionCandidate {
            label: "x".to_string(),
            diagnostic_code: "c".to_string(),
            participant_id: "p".to_string(),
            data: None,
        };
        let json = serde_json::to_value(to_unresolved_code_action(&candidate)).unwrap();
        assert_eq!(json["kind"], "quickfix");
        assert_eq!(json["data"]["diagnosticCode"], "c");
        assert_eq!(json["data"]["participantId"], "p");
    }
}

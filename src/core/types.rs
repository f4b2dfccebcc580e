//! Core types for Jakarta EE analysis

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Position in a file (1-based for editor compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

impl Position {
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

/// Range in a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create range from byte offsets in source
    pub fn from_offsets(source: &str, start: usize, end: usize) -> Self {
        let start_pos = offset_to_position(source, start);
        let end_pos = offset_to_position(source, end);
        Self::new(start_pos, end_pos)
    }
}

/// Convert byte offset to Position
fn offset_to_position(source: &str, offset: usize) -> Position {
    let mut line = 1;
    let mut character = 1;

    for (i, ch) in source.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            character = 1;
        } else {
            character += 1;
        }
    }

    Position::new(line, character)
}

/// Convert a Position back to a byte offset in source
pub fn position_to_offset(source: &str, pos: Position) -> usize {
    let mut line = 1;
    let mut character = 1;

    for (i, ch) in source.char_indices() {
        if line == pos.line && character == pos.character {
            return i;
        }
        if ch == '\n' {
            line += 1;
            character = 1;
        } else {
            character += 1;
        }
    }

    source.len()
}

/// Diagnostic severity
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message
    Info,
    /// Warning - potential issue
    #[default]
    Warning,
    /// Error - definite specification violation
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" | "hint" | "note" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" | "err" => Ok(Severity::Error),
            _ => Err(()),
        }
    }
}

/// Diagnostic source name reported to clients
pub const DIAGNOSTIC_SOURCE: &str = "jakarta-analyzer";

/// A reported specification violation.
///
/// Immutable value object; created fresh on every collection pass and never
/// mutated afterwards. `data`, when present, is a JSON array of
/// fully-qualified annotation or exception names in discovery order - the
/// resolve-time payload for quick fixes whose candidate set depends on which
/// annotations were found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Range of the offending declaration or element
    pub range: Range,
    /// Severity level
    pub severity: Severity,
    /// Stable rule identifier (e.g. "RemoveProducesOrInject")
    pub code: String,
    /// Tool name
    pub source: String,
    /// Human-readable message
    pub message: String,
    /// Ordered resolve payload (fully-qualified names)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(code: &str, severity: Severity, message: impl Into<String>, range: Range) -> Self {
        Self {
            range,
            severity,
            code: code.to_string(),
            source: DIAGNOSTIC_SOURCE.to_string(),
            message: message.into(),
            data: None,
        }
    }

    /// Attach an ordered list of fully-qualified names as the data payload
    pub fn with_data(mut self, names: Vec<String>) -> Self {
        self.data = Some(serde_json::Value::Array(
            names.into_iter().map(serde_json::Value::String).collect(),
        ));
        self
    }

    /// Read the data payload back as a list of strings.
    ///
    /// Returns `None` when the payload is absent or not an array of strings,
    /// so participants can treat a malformed payload the same as a missing
    /// one.
    pub fn data_strings(&self) -> Option<Vec<String>> {
        let values = self.data.as_ref()?.as_array()?;
        values
            .iter()
            .map(|v| v.as_str().map(str::to_string))
            .collect()
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

/// A cheap, unresolved quick-fix candidate.
///
/// Carries no edit; `data` holds the serialized transform the resolve phase
/// will apply, so a client can round-trip the candidate without the engine
/// retaining state between the two phases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeActionCandidate {
    /// User-visible label
    pub label: String,
    /// Rule code of the diagnostic this candidate repairs
    #[serde(rename = "diagnosticCode")]
    pub diagnostic_code: String,
    /// Registered participant that proposed (and will resolve) this candidate
    #[serde(rename = "participantId")]
    pub participant_id: String,
    /// Resolve-time payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// A candidate with its computed edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedCodeAction {
    #[serde(flatten)]
    pub candidate: CodeActionCandidate,
    pub edit: WorkspaceEdit,
}

/// A single text replacement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextEdit {
    pub range: Range,
    #[serde(rename = "newText")]
    pub new_text: String,
}

/// A set of text edits over one or more documents, applied atomically
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkspaceEdit {
    pub changes: HashMap<String, Vec<TextEdit>>,
}

impl WorkspaceEdit {
    /// Single-document edit
    pub fn single(uri: impl Into<String>, edits: Vec<TextEdit>) -> Self {
        let mut changes = HashMap::new();
        changes.insert(uri.into(), edits);
        Self { changes }
    }

    /// Apply the edit set to a document's text.
    ///
    /// Edits for one document are non-overlapping; they are applied from the
    /// bottom of the file upwards so earlier offsets stay valid.
    pub fn apply_to(&self, uri: &str, source: &str) -> Option<String> {
        let edits = self.changes.get(uri)?;

        let mut offsets: Vec<(usize, usize, &str)> = edits
            .iter()
            .map(|e| {
                (
                    position_to_offset(source, e.range.start),
                    position_to_offset(source, e.range.end),
                    e.new_text.as_str(),
                )
            })
            .collect();
        offsets.sort_by(|a, b| b.0.cmp(&a.0));

        let mut text = source.to_string();
        for (start, end, new_text) in offsets {
            text.replace_range(start..end, new_text);
        }
        Some(text)
    }
}

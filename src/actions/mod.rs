//! Quick-fix participants and the two-phase propose/resolve protocol
//!
//! Phase 1 (propose) reads only the diagnostic and the unit to build cheap,
//! label-only candidates. Phase 2 (resolve) deserializes the transform a
//! candidate carries, applies it to a fresh clone, and materializes the
//! edit. Clients request candidate lists far more often than they resolve
//! one, so nothing expensive happens before resolve.

pub mod participants;
pub mod registry;

pub use registry::ParticipantRegistry;

use crate::core::{CodeActionCandidate, Diagnostic, ResolvedCodeAction};
use crate::fixes::{resolve_transform, ResolveError, Transform};
use crate::model::{CompilationUnit, TargetPath};

/// A quick-fix provider for one or more rule codes
pub trait CodeActionParticipant: Send + Sync {
    /// Stable participant identifier, echoed on every candidate
    fn id(&self) -> &'static str;

    /// Enumerate candidates for a diagnostic. Cheap: O(annotations named in
    /// the diagnostic), never a full-file walk. A missing or malformed data
    /// payload yields an empty list, not an error.
    fn propose(&self, unit: &CompilationUnit, diagnostic: &Diagnostic) -> Vec<CodeActionCandidate>;

    /// Compute the edit for one previously-proposed candidate.
    ///
    /// Fails closed: a stale target reports an error and emits no edit.
    fn resolve(
        &self,
        unit: &CompilationUnit,
        candidate: &CodeActionCandidate,
    ) -> Result<ResolvedCodeAction, ResolveError> {
        let transform = Transform::from_data(candidate.data.as_ref())?;
        let edit = resolve_transform(unit, &transform)?;
        Ok(ResolvedCodeAction {
            candidate: candidate.clone(),
            edit,
        })
    }
}

/// Structural path of the declaration a diagnostic points at
pub(crate) fn target_of(unit: &CompilationUnit, diagnostic: &Diagnostic) -> Option<TargetPath> {
    unit.find_target_at(&diagnostic.range)
}

/// Build a candidate carrying a serialized transform as its resolve payload
pub(crate) fn make_candidate(
    participant_id: &str,
    diagnostic: &Diagnostic,
    label: impl Into<String>,
    transform: &Transform,
) -> CodeActionCandidate {
    CodeActionCandidate {
        label: label.into(),
        diagnostic_code: diagnostic.code.clone(),
        participant_id: participant_id.to_string(),
        data: Some(transform.to_data()),
    }
}

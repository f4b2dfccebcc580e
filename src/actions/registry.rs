//! Participant registry
//!
//! An explicit, constructed-once table from rule code to participants.
//! Immutable after construction; the engine shares it across requests
//! without locking. Unknown diagnostic codes yield an empty candidate list
//! rather than an error, so newer diagnostics degrade gracefully on older
//! engines.

use super::participants::{
    AttributeCompletionParticipant, BeanConstructorParticipant, ConstraintParticipant,
    DependentScopeParticipant, EntityParticipant, InjectParamsParticipant, LifecycleParticipant,
    ProducesInjectParticipant, ScopeCardinalityParticipant,
};
use super::CodeActionParticipant;
use crate::collectors::codes;
use crate::core::{CodeActionCandidate, Diagnostic, ResolvedCodeAction};
use crate::fixes::ResolveError;
use crate::model::CompilationUnit;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of quick-fix participants keyed by rule code
pub struct ParticipantRegistry {
    by_code: HashMap<&'static str, Vec<Arc<dyn CodeActionParticipant>>>,
    by_id: HashMap<&'static str, Arc<dyn CodeActionParticipant>>,
}

impl ParticipantRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            by_code: HashMap::new(),
            by_id: HashMap::new(),
        }
    }

    /// Registry with every built-in participant registered
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();

        registry.register(
            &[
                codes::INVALID_SCOPE_ON_MANAGED_BEAN,
                codes::INVALID_SCOPE_ON_PRODUCER_FIELD,
                codes::INVALID_SCOPE_ON_PRODUCER_METHOD,
            ],
            Arc::new(ScopeCardinalityParticipant),
        );
        registry.register(
            &[codes::INVALID_MANAGED_BEAN_ANNOTATION],
            Arc::new(DependentScopeParticipant),
        );
        registry.register(
            &[codes::REMOVE_PRODUCES_OR_INJECT],
            Arc::new(ProducesInjectParticipant),
        );
        registry.register(
            &[codes::INVALID_INJECT_PARAMS, codes::INVALID_PRODUCES_PARAMS],
            Arc::new(InjectParamsParticipant),
        );
        registry.register(
            &[codes::INVALID_MANAGED_BEAN_CONSTRUCTOR],
            Arc::new(BeanConstructorParticipant),
        );
        registry.register(
            &[
                codes::LIFECYCLE_METHOD_STATIC,
                codes::LIFECYCLE_METHOD_PARAMS,
                codes::LIFECYCLE_METHOD_RETURN_TYPE,
                codes::LIFECYCLE_METHOD_CHECKED_EXCEPTIONS,
            ],
            Arc::new(LifecycleParticipant),
        );
        registry.register(
            &[
                codes::COMPLETE_SERVLET_ANNOTATION,
                codes::COMPLETE_RESOURCE_ANNOTATION,
            ],
            Arc::new(AttributeCompletionParticipant),
        );
        registry.register(
            &[codes::INVALID_ENTITY_CONSTRUCTOR, codes::INVALID_ENTITY_MODIFIER],
            Arc::new(EntityParticipant),
        );
        registry.register(
            &[
                codes::INVALID_CONSTRAINT_FIELD_TYPE,
                codes::INVALID_CONSTRAINT_ON_STATIC_FIELD,
            ],
            Arc::new(ConstraintParticipant),
        );

        registry
    }

    /// Register a participant for the given rule codes, in registration order
    pub fn register(
        &mut self,
        rule_codes: &[&'static str],
        participant: Arc<dyn CodeActionParticipant>,
    ) {
        self.by_id.insert(participant.id(), participant.clone());
        for code in rule_codes {
            self.by_code.entry(*code).or_default().push(participant.clone());
        }
    }

    /// Participants registered for a rule code, registration order preserved
    pub fn participants_for(&self, code: &str) -> &[Arc<dyn CodeActionParticipant>] {
        self.by_code.get(code).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Look up a participant by its identifier
    pub fn participant(&self, id: &str) -> Option<&Arc<dyn CodeActionParticipant>> {
        self.by_id.get(id)
    }

    /// Ask every registered participant, in order, to propose candidates.
    /// Unknown codes yield an empty list.
    pub fn propose(
        &self,
        unit: &CompilationUnit,
        diagnostic: &Diagnostic,
    ) -> Vec<CodeActionCandidate> {
        let mut candidates = Vec::new();
        for participant in self.participants_for(&diagnostic.code) {
            candidates.extend(participant.propose(unit, diagnostic));
        }
        candidates
    }

    /// Resolve one previously-proposed candidate through its participant
    pub fn resolve(
        &self,
        unit: &CompilationUnit,
        candidate: &CodeActionCandidate,
    ) -> Result<ResolvedCodeAction, ResolveError> {
        let participant = self
            .participant(&candidate.participant_id)
            .ok_or_else(|| ResolveError::UnknownParticipant(candidate.participant_id.clone()))?;
        participant.resolve(unit, candidate)
    }
}

impl Default for ParticipantRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

//! Built-in quick-fix participants, one per rule family

use super::{make_candidate, target_of, CodeActionParticipant};
use crate::collectors::codes;
use crate::combinations::single_survivor_sets;
use crate::core::{CodeActionCandidate, Diagnostic};
use crate::fixes::Transform;
use crate::jakarta;
use crate::model::{CompilationUnit, Modifier, TargetPath};

/// "Keep one scope" fixes for scope cardinality violations
pub struct ScopeCardinalityParticipant;

impl CodeActionParticipant for ScopeCardinalityParticipant {
    fn id(&self) -> &'static str {
        "jakarta.scope.keep-one"
    }

    fn propose(&self, unit: &CompilationUnit, diagnostic: &Diagnostic) -> Vec<CodeActionCandidate> {
        let Some(present) = diagnostic.data_strings() else {
            return Vec::new();
        };
        let Some(path) = target_of(unit, diagnostic) else {
            return Vec::new();
        };

        single_survivor_sets(&present)
            .into_iter()
            .map(|set| {
                let transform = Transform::RemoveAnnotations {
                    path,
                    fqns: set.remove,
                };
                make_candidate(
                    self.id(),
                    diagnostic,
                    format!("Keep only @{}", jakarta::simple_name(&set.keep)),
                    &transform,
                )
            })
            .collect()
    }
}

/// Replace the current scope with `@Dependent` on a managed bean with a
/// public instance field
pub struct DependentScopeParticipant;

impl CodeActionParticipant for DependentScopeParticipant {
    fn id(&self) -> &'static str {
        "jakarta.scope.dependent"
    }

    fn propose(&self, unit: &CompilationUnit, diagnostic: &Diagnostic) -> Vec<CodeActionCandidate> {
        let Some(present) = diagnostic.data_strings() else {
            return Vec::new();
        };
        let Some(path) = target_of(unit, diagnostic) else {
            return Vec::new();
        };

        let transform = Transform::ReplaceAnnotations {
            path,
            remove: present,
            insert: jakarta::DEPENDENT.to_string(),
        };
        vec![make_candidate(
            self.id(),
            diagnostic,
            "Replace the current scope with @Dependent",
            &transform,
        )]
    }
}

/// "Remove @Produces" / "Remove @Inject" for co-located producer and
/// injection-point annotations; the two candidates are independent, never
/// offered as one combined removal
pub struct ProducesInjectParticipant;

impl CodeActionParticipant for ProducesInjectParticipant {
    fn id(&self) -> &'static str {
        "jakarta.produces-inject"
    }

    fn propose(&self, unit: &CompilationUnit, diagnostic: &Diagnostic) -> Vec<CodeActionCandidate> {
        let Some(found) = diagnostic.data_strings() else {
            return Vec::new();
        };
        let Some(path) = target_of(unit, diagnostic) else {
            return Vec::new();
        };

        found
            .iter()
            .map(|fqn| {
                let transform = Transform::RemoveAnnotations {
                    path,
                    fqns: vec![fqn.clone()],
                };
                make_candidate(
                    self.id(),
                    diagnostic,
                    format!("Remove @{}", jakarta::simple_name(fqn)),
                    &transform,
                )
            })
            .collect()
    }
}

/// Fixes for forbidden parameter annotations on `@Inject`/`@Produces`
/// methods: remove the marker annotation, or remove one forbidden annotation
/// from whichever parameters carry it
pub struct InjectParamsParticipant;

impl CodeActionParticipant for InjectParamsParticipant {
    fn id(&self) -> &'static str {
        "jakarta.inject-params"
    }

    fn propose(&self, unit: &CompilationUnit, diagnostic: &Diagnostic) -> Vec<CodeActionCandidate> {
        let marker = match diagnostic.code.as_str() {
            codes::INVALID_INJECT_PARAMS => jakarta::INJECT,
            codes::INVALID_PRODUCES_PARAMS => jakarta::PRODUCES,
            _ => return Vec::new(),
        };
        let Some(found) = diagnostic.data_strings() else {
            return Vec::new();
        };
        let Some(path) = target_of(unit, diagnostic) else {
            return Vec::new();
        };
        let Some(method) = path.resolve_method(unit) else {
            return Vec::new();
        };

        let mut candidates = vec![make_candidate(
            self.id(),
            diagnostic,
            format!("Remove @{} from the method", jakarta::simple_name(marker)),
            &Transform::RemoveAnnotations {
                path,
                fqns: vec![marker.to_string()],
            },
        )];

        for fqn in &found {
            let carriers: Vec<&str> = method
                .params
                .iter()
                .filter(|p| p.annotations.iter().any(|a| &a.fqn == fqn))
                .map(|p| p.name.as_str())
                .collect();
            let transform = Transform::RemoveParameterAnnotation {
                path,
                fqn: fqn.clone(),
            };
            candidates.push(make_candidate(
                self.id(),
                diagnostic,
                format!(
                    "Remove @{} from '{}'",
                    jakarta::simple_name(fqn),
                    carriers.join("', '")
                ),
                &transform,
            ));
        }

        candidates
    }
}

/// Constructor fixes for unresolvable managed beans: add a no-arg
/// constructor (`protected` or `public`) or annotate the existing one
pub struct BeanConstructorParticipant;

impl CodeActionParticipant for BeanConstructorParticipant {
    fn id(&self) -> &'static str {
        "jakarta.bean-constructor"
    }

    fn propose(&self, unit: &CompilationUnit, diagnostic: &Diagnostic) -> Vec<CodeActionCandidate> {
        let Some(path) = target_of(unit, diagnostic) else {
            return Vec::new();
        };
        let type_path = TargetPath::ty(path.type_index);
        let Some(ty) = type_path.resolve_type(unit) else {
            return Vec::new();
        };

        vec![
            make_candidate(
                self.id(),
                diagnostic,
                format!("Add a protected no-arg constructor to '{}'", ty.name),
                &Transform::AddConstructor {
                    path: type_path,
                    visibility: Modifier::Protected,
                },
            ),
            make_candidate(
                self.id(),
                diagnostic,
                format!("Add a public no-arg constructor to '{}'", ty.name),
                &Transform::AddConstructor {
                    path: type_path,
                    visibility: Modifier::Public,
                },
            ),
            make_candidate(
                self.id(),
                diagnostic,
                "Annotate the constructor with @Inject",
                &Transform::InsertAnnotation {
                    path,
                    fqn: jakarta::INJECT.to_string(),
                    args: vec![],
                },
            ),
        ]
    }
}

/// Lifecycle shape fixes: remove the annotation entirely, or narrow the
/// specific violation
pub struct LifecycleParticipant;

impl CodeActionParticipant for LifecycleParticipant {
    fn id(&self) -> &'static str {
        "jakarta.lifecycle"
    }

    fn propose(&self, unit: &CompilationUnit, diagnostic: &Diagnostic) -> Vec<CodeActionCandidate> {
        let Some(path) = target_of(unit, diagnostic) else {
            return Vec::new();
        };
        let Some(method) = path.resolve_method(unit) else {
            return Vec::new();
        };
        let Some(marker) = method
            .annotations
            .iter()
            .map(|a| a.fqn.as_str())
            .find(|fqn| *fqn == jakarta::POST_CONSTRUCT || *fqn == jakarta::PRE_DESTROY)
        else {
            return Vec::new();
        };

        let mut candidates = vec![make_candidate(
            self.id(),
            diagnostic,
            format!("Remove @{}", jakarta::simple_name(marker)),
            &Transform::RemoveAnnotations {
                path,
                fqns: vec![marker.to_string()],
            },
        )];

        match diagnostic.code.as_str() {
            codes::LIFECYCLE_METHOD_STATIC => {
                candidates.push(make_candidate(
                    self.id(),
                    diagnostic,
                    "Remove the static modifier",
                    &Transform::RemoveModifier {
                        path,
                        modifier: Modifier::Static,
                    },
                ));
            }
            codes::LIFECYCLE_METHOD_PARAMS => {
                candidates.push(make_candidate(
                    self.id(),
                    diagnostic,
                    "Remove all parameters",
                    &Transform::RemoveParameters { path },
                ));
            }
            codes::LIFECYCLE_METHOD_RETURN_TYPE => {
                candidates.push(make_candidate(
                    self.id(),
                    diagnostic,
                    "Change the return type to void",
                    &Transform::SetReturnType {
                        path,
                        ty: "void".to_string(),
                    },
                ));
            }
            codes::LIFECYCLE_METHOD_CHECKED_EXCEPTIONS => {
                // The checked-exception list lives in the data payload;
                // without it there is nothing safe to offer
                let Some(checked) = diagnostic.data_strings() else {
                    return Vec::new();
                };
                candidates.push(make_candidate(
                    self.id(),
                    diagnostic,
                    "Remove the checked exceptions from the throws clause",
                    &Transform::RemoveThrownExceptions {
                        path,
                        fqns: checked,
                    },
                ));
            }
            _ => return Vec::new(),
        }

        candidates
    }
}

/// Inserts missing required annotation attributes with placeholder values
pub struct AttributeCompletionParticipant;

impl AttributeCompletionParticipant {
    fn placeholder(attribute: &str) -> &'static str {
        match attribute {
            "urlPatterns" => "{\"\"}",
            "type" => "Object.class",
            _ => "\"\"",
        }
    }
}

impl CodeActionParticipant for AttributeCompletionParticipant {
    fn id(&self) -> &'static str {
        "jakarta.attribute-completeness"
    }

    fn propose(&self, unit: &CompilationUnit, diagnostic: &Diagnostic) -> Vec<CodeActionCandidate> {
        let fqn = match diagnostic.code.as_str() {
            codes::COMPLETE_SERVLET_ANNOTATION => jakarta::WEB_SERVLET,
            codes::COMPLETE_RESOURCE_ANNOTATION => jakarta::RESOURCE,
            _ => return Vec::new(),
        };
        let Some(missing) = diagnostic.data_strings() else {
            return Vec::new();
        };
        let Some(path) = target_of(unit, diagnostic) else {
            return Vec::new();
        };

        missing
            .iter()
            .map(|attribute| {
                let transform = Transform::InsertAnnotationArg {
                    path,
                    fqn: fqn.to_string(),
                    name: attribute.clone(),
                    value: Self::placeholder(attribute).to_string(),
                };
                make_candidate(
                    self.id(),
                    diagnostic,
                    format!("Add the '{}' attribute", attribute),
                    &transform,
                )
            })
            .collect()
    }
}

/// Entity fixes: usable no-arg constructor, or drop the final modifier
pub struct EntityParticipant;

impl CodeActionParticipant for EntityParticipant {
    fn id(&self) -> &'static str {
        "jakarta.entity"
    }

    fn propose(&self, unit: &CompilationUnit, diagnostic: &Diagnostic) -> Vec<CodeActionCandidate> {
        let Some(path) = target_of(unit, diagnostic) else {
            return Vec::new();
        };
        let type_path = TargetPath::ty(path.type_index);
        let Some(ty) = type_path.resolve_type(unit) else {
            return Vec::new();
        };

        match diagnostic.code.as_str() {
            codes::INVALID_ENTITY_CONSTRUCTOR => vec![
                make_candidate(
                    self.id(),
                    diagnostic,
                    format!("Add a protected no-arg constructor to '{}'", ty.name),
                    &Transform::AddConstructor {
                        path: type_path,
                        visibility: Modifier::Protected,
                    },
                ),
                make_candidate(
                    self.id(),
                    diagnostic,
                    format!("Add a public no-arg constructor to '{}'", ty.name),
                    &Transform::AddConstructor {
                        path: type_path,
                        visibility: Modifier::Public,
                    },
                ),
            ],
            codes::INVALID_ENTITY_MODIFIER => vec![make_candidate(
                self.id(),
                diagnostic,
                "Remove the final modifier",
                &Transform::RemoveModifier {
                    path: type_path,
                    modifier: Modifier::Final,
                },
            )],
            _ => Vec::new(),
        }
    }
}

/// Constraint placement fixes: remove the constraint annotations, or make
/// the field non-static
pub struct ConstraintParticipant;

impl CodeActionParticipant for ConstraintParticipant {
    fn id(&self) -> &'static str {
        "jakarta.constraints"
    }

    fn propose(&self, unit: &CompilationUnit, diagnostic: &Diagnostic) -> Vec<CodeActionCandidate> {
        let Some(found) = diagnostic.data_strings() else {
            return Vec::new();
        };
        let Some(path) = target_of(unit, diagnostic) else {
            return Vec::new();
        };

        match diagnostic.code.as_str() {
            codes::INVALID_CONSTRAINT_FIELD_TYPE => found
                .iter()
                .map(|fqn| {
                    make_candidate(
                        self.id(),
                        diagnostic,
                        format!("Remove @{}", jakarta::simple_name(fqn)),
                        &Transform::RemoveAnnotations {
                            path,
                            fqns: vec![fqn.clone()],
                        },
                    )
                })
                .collect(),
            codes::INVALID_CONSTRAINT_ON_STATIC_FIELD => {
                let simple: Vec<String> = found
                    .iter()
                    .map(|fqn| format!("@{}", jakarta::simple_name(fqn)))
                    .collect();
                vec![
                    make_candidate(
                        self.id(),
                        diagnostic,
                        "Remove the static modifier",
                        &Transform::RemoveModifier {
                            path,
                            modifier: Modifier::Static,
                        },
                    ),
                    make_candidate(
                        self.id(),
                        diagnostic,
                        format!("Remove {}", simple.join(", ")),
                        &Transform::RemoveAnnotations { path, fqns: found },
                    ),
                ]
            }
            _ => Vec::new(),
        }
    }
}

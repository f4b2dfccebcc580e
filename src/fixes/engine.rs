//! Transformation primitives and edit materialization
//!
//! A [`Transform`] describes one source rewrite against a structural target
//! path. Resolution clones the unit, re-locates the target inside the clone,
//! applies the single transformation, and replaces the whole original text
//! with the reserialized unit - the one strategy that stays syntactically
//! valid under arbitrary structural mutation (new imports, inserted
//! declarations).
//!
//! Every application fails closed: when the path no longer points at what
//! the transform expects, the resolve call reports [`ResolveError::StaleTarget`]
//! and emits no edit.

use crate::core::{TextEdit, WorkspaceEdit};
use crate::model::{
    Annotation, AnnotationArg, CompilationUnit, Member, MethodDecl, Modifier, TargetPath,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error during code-action resolution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The candidate's diagnostic code or participant is not registered
    #[error("no participant registered for '{0}'")]
    UnknownParticipant(String),

    /// The candidate carries no usable resolve payload
    #[error("candidate carries a missing or malformed resolve payload")]
    MalformedData,

    /// The structural target no longer matches the model
    #[error("transformation target is stale: {0}")]
    StaleTarget(String),
}

/// One source transformation, consumed exactly once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Transform {
    /// Insert an annotation (with optional arguments) on a declaration
    InsertAnnotation {
        path: TargetPath,
        fqn: String,
        #[serde(default)]
        args: Vec<(String, String)>,
    },
    /// Delete every listed annotation from a declaration
    RemoveAnnotations { path: TargetPath, fqns: Vec<String> },
    /// Delete the listed annotations and insert a replacement in their place
    ReplaceAnnotations {
        path: TargetPath,
        remove: Vec<String>,
        insert: String,
    },
    /// Add a modifier to a declaration
    AddModifier { path: TargetPath, modifier: Modifier },
    /// Remove a modifier from a declaration
    RemoveModifier { path: TargetPath, modifier: Modifier },
    /// Delete the entire parameter list of a method
    RemoveParameters { path: TargetPath },
    /// Delete one annotation from every parameter carrying it
    RemoveParameterAnnotation { path: TargetPath, fqn: String },
    /// Delete the listed entries from a throws clause
    RemoveThrownExceptions { path: TargetPath, fqns: Vec<String> },
    /// Change a method's return type
    SetReturnType { path: TargetPath, ty: String },
    /// Insert a no-arg constructor with the given visibility
    AddConstructor {
        path: TargetPath,
        visibility: Modifier,
    },
    /// Add a missing argument to an annotation already on the declaration
    InsertAnnotationArg {
        path: TargetPath,
        fqn: String,
        name: String,
        value: String,
    },
}

impl Transform {
    /// Serialize into a candidate's resolve payload
    pub fn to_data(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Deserialize from a candidate's resolve payload
    pub fn from_data(data: Option<&serde_json::Value>) -> Result<Self, ResolveError> {
        let value = data.ok_or(ResolveError::MalformedData)?;
        serde_json::from_value(value.clone()).map_err(|_| ResolveError::MalformedData)
    }
}

/// Resolve a transform against a unit: clone, mutate, reserialize, and emit
/// one whole-document replacement edit
pub fn resolve_transform(
    unit: &CompilationUnit,
    transform: &Transform,
) -> Result<WorkspaceEdit, ResolveError> {
    let mut clone = unit.clone_for_editing();
    apply(&mut clone, transform)?;

    let edit = TextEdit {
        range: unit.full_range(),
        new_text: clone.serialize(),
    };
    Ok(WorkspaceEdit::single(unit.uri(), vec![edit]))
}

/// Apply a single transform to a mutable unit
pub fn apply(unit: &mut CompilationUnit, transform: &Transform) -> Result<(), ResolveError> {
    match transform {
        Transform::InsertAnnotation { path, fqn, args } => {
            if annotations_of(unit, path)?.iter().any(|a| &a.fqn == fqn) {
                return Err(ResolveError::StaleTarget(format!(
                    "@{} is already present",
                    fqn
                )));
            }
            unit.ensure_import(fqn);
            let mut annotation = Annotation::from_fqn(fqn);
            annotation.args = args
                .iter()
                .map(|(name, value)| AnnotationArg {
                    name: name.clone(),
                    value: value.clone(),
                })
                .collect();
            annotations_mut(unit, path)?.push(annotation);
            Ok(())
        }

        Transform::RemoveAnnotations { path, fqns } => {
            let annotations = annotations_mut(unit, path)?;
            let before = annotations.len();
            annotations.retain(|a| !fqns.contains(&a.fqn));
            if annotations.len() == before {
                return Err(ResolveError::StaleTarget(
                    "none of the annotations to remove are present".to_string(),
                ));
            }
            Ok(())
        }

        Transform::ReplaceAnnotations {
            path,
            remove,
            insert,
        } => {
            unit.ensure_import(insert);
            let annotations = annotations_mut(unit, path)?;
            let position = annotations
                .iter()
                .position(|a| remove.contains(&a.fqn))
                .ok_or_else(|| {
                    ResolveError::StaleTarget(
                        "none of the annotations to replace are present".to_string(),
                    )
                })?;
            annotations.retain(|a| !remove.contains(&a.fqn));
            if !annotations.iter().any(|a| &a.fqn == insert) {
                let position = position.min(annotations.len());
                annotations.insert(position, Annotation::from_fqn(insert));
            }
            Ok(())
        }

        Transform::AddModifier { path, modifier } => {
            let modifiers = modifiers_mut(unit, path)?;
            if modifiers.contains(modifier) {
                return Err(ResolveError::StaleTarget(format!(
                    "'{}' is already present",
                    modifier
                )));
            }
            let is_visibility = matches!(
                modifier,
                Modifier::Public | Modifier::Protected | Modifier::Private
            );
            if is_visibility {
                modifiers.insert(0, *modifier);
            } else {
                modifiers.push(*modifier);
            }
            Ok(())
        }

        Transform::RemoveModifier { path, modifier } => {
            let modifiers = modifiers_mut(unit, path)?;
            let before = modifiers.len();
            modifiers.retain(|m| m != modifier);
            if modifiers.len() == before {
                return Err(ResolveError::StaleTarget(format!(
                    "'{}' is not present",
                    modifier
                )));
            }
            Ok(())
        }

        Transform::RemoveParameters { path } => {
            let method = method_mut(unit, path)?;
            if method.params.is_empty() {
                return Err(ResolveError::StaleTarget(
                    "method has no parameters".to_string(),
                ));
            }
            method.params.clear();
            Ok(())
        }

        Transform::RemoveParameterAnnotation { path, fqn } => {
            let method = method_mut(unit, path)?;
            let mut removed = 0;
            for param in &mut method.params {
                let before = param.annotations.len();
                param.annotations.retain(|a| &a.fqn != fqn);
                removed += before - param.annotations.len();
            }
            if removed == 0 {
                return Err(ResolveError::StaleTarget(format!(
                    "no parameter carries @{}",
                    fqn
                )));
            }
            Ok(())
        }

        Transform::RemoveThrownExceptions { path, fqns } => {
            let method = method_mut(unit, path)?;
            let before = method.throws.len();
            method.throws.retain(|t| !fqns.contains(&t.fqn));
            if method.throws.len() == before {
                return Err(ResolveError::StaleTarget(
                    "none of the exceptions to remove are declared".to_string(),
                ));
            }
            Ok(())
        }

        Transform::SetReturnType { path, ty } => {
            let method = method_mut(unit, path)?;
            if method.is_constructor {
                return Err(ResolveError::StaleTarget(
                    "constructors have no return type".to_string(),
                ));
            }
            if method.return_type.as_deref() == Some(ty.as_str()) {
                return Err(ResolveError::StaleTarget(format!(
                    "return type is already '{}'",
                    ty
                )));
            }
            method.return_type = Some(ty.clone());
            Ok(())
        }

        Transform::AddConstructor { path, visibility } => {
            let ty = unit
                .types
                .get_mut(path.type_index)
                .ok_or_else(|| ResolveError::StaleTarget("type is gone".to_string()))?;
            let ctor = MethodDecl::no_arg_constructor(&ty.name, *visibility);
            // After the last field, before the first method
            let position = ty
                .members
                .iter()
                .rposition(|m| matches!(m, Member::Field(_)))
                .map(|i| i + 1)
                .unwrap_or(0);
            ty.members.insert(position, Member::Method(ctor));
            Ok(())
        }

        Transform::InsertAnnotationArg {
            path,
            fqn,
            name,
            value,
        } => {
            let annotations = annotations_mut(unit, path)?;
            let annotation = annotations
                .iter_mut()
                .find(|a| &a.fqn == fqn)
                .ok_or_else(|| ResolveError::StaleTarget(format!("@{} is gone", fqn)))?;
            if annotation.has_arg(name) {
                return Err(ResolveError::StaleTarget(format!(
                    "'{}' is already present on @{}",
                    name, fqn
                )));
            }
            annotation.args.push(AnnotationArg {
                name: name.clone(),
                value: value.clone(),
            });
            Ok(())
        }
    }
}

fn stale_path() -> ResolveError {
    ResolveError::StaleTarget("declaration path no longer resolves".to_string())
}

fn annotations_of<'a>(
    unit: &'a CompilationUnit,
    path: &TargetPath,
) -> Result<&'a [Annotation], ResolveError> {
    let ty = unit.types.get(path.type_index).ok_or_else(stale_path)?;
    match path.member_index {
        None => Ok(&ty.annotations),
        Some(index) => match ty.members.get(index).ok_or_else(stale_path)? {
            Member::Field(f) => Ok(&f.annotations),
            Member::Method(m) => Ok(&m.annotations),
            Member::Raw(_) => Err(stale_path()),
        },
    }
}

fn annotations_mut<'a>(
    unit: &'a mut CompilationUnit,
    path: &TargetPath,
) -> Result<&'a mut Vec<Annotation>, ResolveError> {
    let ty = unit.types.get_mut(path.type_index).ok_or_else(stale_path)?;
    match path.member_index {
        None => Ok(&mut ty.annotations),
        Some(index) => match ty.members.get_mut(index).ok_or_else(stale_path)? {
            Member::Field(f) => Ok(&mut f.annotations),
            Member::Method(m) => Ok(&mut m.annotations),
            Member::Raw(_) => Err(stale_path()),
        },
    }
}

fn modifiers_mut<'a>(
    unit: &'a mut CompilationUnit,
    path: &TargetPath,
) -> Result<&'a mut Vec<Modifier>, ResolveError> {
    let ty = unit.types.get_mut(path.type_index).ok_or_else(stale_path)?;
    match path.member_index {
        None => Ok(&mut ty.modifiers),
        Some(index) => match ty.members.get_mut(index).ok_or_else(stale_path)? {
            Member::Field(f) => Ok(&mut f.modifiers),
            Member::Method(m) => Ok(&mut m.modifiers),
            Member::Raw(_) => Err(stale_path()),
        },
    }
}

fn method_mut<'a>(
    unit: &'a mut CompilationUnit,
    path: &TargetPath,
) -> Result<&'a mut MethodDecl, ResolveError> {
    let ty = unit.types.get_mut(path.type_index).ok_or_else(stale_path)?;
    let index = path.member_index.ok_or_else(stale_path)?;
    match ty.members.get_mut(index).ok_or_else(stale_path)? {
        Member::Method(m) => Ok(m),
        _ => Err(stale_path()),
    }
}

//! Java program model
//!
//! A declaration-level model of a compilation unit: types, fields, methods,
//! constructors, parameters, annotations, and modifiers, each with its byte
//! span in the original source. Method bodies and initializers are kept as
//! verbatim text so a mutated unit can be reserialized without understanding
//! statement syntax.
//!
//! Transformations never touch a shared unit: `clone_for_editing` produces an
//! isolated copy, and targets inside that copy are re-located through a
//! [`TargetPath`] (declaration index, member index) rather than through node
//! references, since the clone is a separate object graph.

pub mod parser;
pub mod printer;

pub use parser::ParseError;

use crate::core::{position_to_offset, Range};
use crate::jakarta;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Byte span in the original source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }
}

/// Java modifier keywords the model understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Static,
    Final,
    Transient,
    Volatile,
    Synchronized,
    Native,
    Strictfp,
    Default,
}

impl Modifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Abstract => "abstract",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Transient => "transient",
            Modifier::Volatile => "volatile",
            Modifier::Synchronized => "synchronized",
            Modifier::Native => "native",
            Modifier::Strictfp => "strictfp",
            Modifier::Default => "default",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "public" => Some(Modifier::Public),
            "protected" => Some(Modifier::Protected),
            "private" => Some(Modifier::Private),
            "abstract" => Some(Modifier::Abstract),
            "static" => Some(Modifier::Static),
            "final" => Some(Modifier::Final),
            "transient" => Some(Modifier::Transient),
            "volatile" => Some(Modifier::Volatile),
            "synchronized" => Some(Modifier::Synchronized),
            "native" => Some(Modifier::Native),
            "strictfp" => Some(Modifier::Strictfp),
            "default" => Some(Modifier::Default),
            _ => None,
        }
    }
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One annotation argument, raw value text preserved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationArg {
    /// Argument name; a single unnamed value is stored as "value"
    pub name: String,
    /// Raw value text (string literals keep their quotes)
    pub value: String,
}

/// An annotation instance on a declaration or parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Name as written in source, without the '@'
    pub name: String,
    /// Resolved fully-qualified name
    pub fqn: String,
    pub args: Vec<AnnotationArg>,
    pub span: Span,
}

impl Annotation {
    /// Synthesize an annotation from a fully-qualified name
    pub fn from_fqn(fqn: &str) -> Self {
        Self {
            name: jakarta::simple_name(fqn).to_string(),
            fqn: fqn.to_string(),
            args: Vec::new(),
            span: Span::default(),
        }
    }

    pub fn arg(&self, name: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn has_arg(&self, name: &str) -> bool {
        self.args.iter().any(|a| a.name == name)
    }
}

/// A named type reference (throws clause entry, parameter type)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    /// Name as written in source
    pub name: String,
    /// Resolved fully-qualified name
    pub fqn: String,
}

/// An import declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// Dotted path, including a trailing ".*" for on-demand imports
    pub path: String,
    pub is_static: bool,
}

/// A field declaration
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    /// Type as written in source
    pub ty: String,
    pub annotations: Vec<Annotation>,
    pub modifiers: Vec<Modifier>,
    /// Raw initializer text after '=' (without the semicolon)
    pub initializer: Option<String>,
    pub leading_comment: Option<String>,
    pub span: Span,
    pub name_span: Span,
}

/// A method parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    /// Type as written, including generics/varargs
    pub ty: String,
    pub annotations: Vec<Annotation>,
    pub is_final: bool,
    pub span: Span,
}

/// A method or constructor declaration
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub name: String,
    /// None for constructors
    pub return_type: Option<String>,
    pub annotations: Vec<Annotation>,
    pub modifiers: Vec<Modifier>,
    pub params: Vec<Parameter>,
    pub throws: Vec<TypeRef>,
    /// Verbatim body text including braces; None for abstract/native methods
    pub body: Option<String>,
    pub is_constructor: bool,
    pub leading_comment: Option<String>,
    pub span: Span,
    pub name_span: Span,
}

impl MethodDecl {
    /// Synthesize a no-arg constructor with the given visibility
    pub fn no_arg_constructor(type_name: &str, visibility: Modifier) -> Self {
        Self {
            name: type_name.to_string(),
            return_type: None,
            annotations: Vec::new(),
            modifiers: vec![visibility],
            params: Vec::new(),
            throws: Vec::new(),
            body: Some("{\n    }".to_string()),
            is_constructor: true,
            leading_comment: None,
            span: Span::default(),
            name_span: Span::default(),
        }
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(&Modifier::Static)
    }

    pub fn returns_void(&self) -> bool {
        self.return_type.as_deref() == Some("void")
    }
}

/// A member the parser recognized only as raw text (nested types, static
/// initializer blocks); reprinted verbatim
#[derive(Debug, Clone, PartialEq)]
pub struct RawMember {
    pub text: String,
    pub span: Span,
}

/// One member of a type body, in declaration order
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Field(FieldDecl),
    Method(MethodDecl),
    Raw(RawMember),
}

impl Member {
    pub fn span(&self) -> Span {
        match self {
            Member::Field(f) => f.span,
            Member::Method(m) => m.span,
            Member::Raw(r) => r.span,
        }
    }
}

/// Kind of top-level type declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
}

impl TypeKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
        }
    }
}

/// A top-level type declaration
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub name: String,
    pub kind: TypeKind,
    pub annotations: Vec<Annotation>,
    pub modifiers: Vec<Modifier>,
    /// Raw generics text, e.g. "<T extends Widget>"
    pub type_params: Option<String>,
    /// Raw "extends ... implements ..." text
    pub heritage: Option<String>,
    pub members: Vec<Member>,
    pub leading_comment: Option<String>,
    pub span: Span,
    pub name_span: Span,
}

impl TypeDecl {
    pub fn fields(&self) -> impl Iterator<Item = (usize, &FieldDecl)> + '_ {
        self.members.iter().enumerate().filter_map(|(i, m)| match m {
            Member::Field(f) => Some((i, f)),
            _ => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = (usize, &MethodDecl)> + '_ {
        self.members.iter().enumerate().filter_map(|(i, m)| match m {
            Member::Method(f) => Some((i, f)),
            _ => None,
        })
    }

    pub fn constructors(&self) -> impl Iterator<Item = (usize, &MethodDecl)> + '_ {
        self.methods().filter(|(_, m)| m.is_constructor)
    }

    pub fn annotation(&self, fqn: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.fqn == fqn)
    }

    pub fn has_annotation(&self, fqn: &str) -> bool {
        self.annotation(fqn).is_some()
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// Scope annotations present, in declaration order
    pub fn scopes(&self) -> Vec<&Annotation> {
        self.annotations
            .iter()
            .filter(|a| jakarta::is_scope(&a.fqn))
            .collect()
    }
}

/// Scope annotations on any annotated element, in declaration order
pub fn scopes_of(annotations: &[Annotation]) -> Vec<&Annotation> {
    annotations
        .iter()
        .filter(|a| jakarta::is_scope(&a.fqn))
        .collect()
}

/// A parsed compilation unit
#[derive(Debug, Clone, PartialEq)]
pub struct CompilationUnit {
    pub file: PathBuf,
    pub source: String,
    pub package: Option<String>,
    pub imports: Vec<Import>,
    pub types: Vec<TypeDecl>,
}

impl CompilationUnit {
    /// Parse a compilation unit from source text
    pub fn parse(source: &str, file: &Path) -> Result<Self, ParseError> {
        parser::parse(source, file)
    }

    /// Produce an isolated mutable clone for transformation.
    ///
    /// The clone shares nothing with the original; concurrent resolve calls
    /// over the same unit each work on their own copy.
    pub fn clone_for_editing(&self) -> CompilationUnit {
        self.clone()
    }

    /// URI of the backing document
    pub fn uri(&self) -> String {
        format!("file://{}", self.file.display())
    }

    /// Range of a span in this unit's source
    pub fn range_of(&self, span: Span) -> Range {
        Range::from_offsets(&self.source, span.start, span.end)
    }

    /// Range covering the entire source text
    pub fn full_range(&self) -> Range {
        Range::from_offsets(&self.source, 0, self.source.len())
    }

    /// Serialize the (possibly mutated) unit back to text
    pub fn serialize(&self) -> String {
        printer::print_unit(self)
    }

    /// Resolve a possibly-simple name against imports, the well-known table,
    /// and the unit's package
    pub fn resolve_fqn(&self, name: &str) -> String {
        parser::resolve_name(name, self.package.as_deref(), &self.imports)
    }

    /// Ensure an import for the given fully-qualified name exists, so the
    /// simple name can be printed. `java.lang` and same-package names need no
    /// import.
    pub fn ensure_import(&mut self, fqn: &str) {
        let Some(dot) = fqn.rfind('.') else {
            return;
        };
        let package_of = &fqn[..dot];
        if package_of == "java.lang" {
            return;
        }
        if self.package.as_deref() == Some(package_of) {
            return;
        }
        let on_demand = format!("{}.*", package_of);
        if self
            .imports
            .iter()
            .any(|i| !i.is_static && (i.path == fqn || i.path == on_demand))
        {
            return;
        }
        self.imports.push(Import {
            path: fqn.to_string(),
            is_static: false,
        });
    }

    /// Structural path of the innermost declaration containing the given
    /// range, or None when nothing matches
    pub fn find_target_at(&self, range: &Range) -> Option<TargetPath> {
        let offset = position_to_offset(&self.source, range.start);
        for (ti, ty) in self.types.iter().enumerate() {
            if !ty.span.contains(offset) {
                continue;
            }
            for (mi, member) in ty.members.iter().enumerate() {
                if member.span().contains(offset) {
                    return Some(TargetPath::member(ti, mi));
                }
            }
            return Some(TargetPath::ty(ti));
        }
        None
    }
}

/// Structural path to a declaration inside a unit.
///
/// Resolved fresh inside each clone; never a retained node reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetPath {
    #[serde(rename = "type")]
    pub type_index: usize,
    #[serde(rename = "member", skip_serializing_if = "Option::is_none")]
    pub member_index: Option<usize>,
}

impl TargetPath {
    pub fn ty(type_index: usize) -> Self {
        Self {
            type_index,
            member_index: None,
        }
    }

    pub fn member(type_index: usize, member_index: usize) -> Self {
        Self {
            type_index,
            member_index: Some(member_index),
        }
    }

    pub fn resolve_type<'a>(&self, unit: &'a CompilationUnit) -> Option<&'a TypeDecl> {
        unit.types.get(self.type_index)
    }

    pub fn resolve_member<'a>(&self, unit: &'a CompilationUnit) -> Option<&'a Member> {
        let ty = unit.types.get(self.type_index)?;
        ty.members.get(self.member_index?)
    }

    pub fn resolve_method<'a>(&self, unit: &'a CompilationUnit) -> Option<&'a MethodDecl> {
        match self.resolve_member(unit)? {
            Member::Method(m) => Some(m),
            _ => None,
        }
    }

    pub fn resolve_field<'a>(&self, unit: &'a CompilationUnit) -> Option<&'a FieldDecl> {
        match self.resolve_member(unit)? {
            Member::Field(f) => Some(f),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(source: &str) -> CompilationUnit {
        CompilationUnit::parse(source, Path::new("Test.java")).unwrap()
    }

    #[test]
    fn test_clone_for_editing_is_isolated() {
        let original = unit("public class A {\n    int x;\n}\n");
        let mut clone = original.clone_for_editing();
        clone.types[0].name = "B".to_string();
        assert_eq!(original.types[0].name, "A");
    }

    #[test]
    fn test_resolve_fqn_via_import() {
        let u = unit("import jakarta.inject.Inject;\n\npublic class A {\n}\n");
        assert_eq!(u.resolve_fqn("Inject"), "jakarta.inject.Inject");
    }

    #[test]
    fn test_resolve_fqn_well_known() {
        let u = unit("public class A {\n}\n");
        assert_eq!(u.resolve_fqn("IOException"), "java.io.IOException");
    }

    #[test]
    fn test_resolve_fqn_same_package() {
        let u = unit("package com.example;\n\npublic class A {\n}\n");
        assert_eq!(u.resolve_fqn("Widget"), "com.example.Widget");
    }

    #[test]
    fn test_ensure_import_dedupes() {
        let mut u = unit("import jakarta.inject.Inject;\n\npublic class A {\n}\n");
        u.ensure_import("jakarta.inject.Inject");
        assert_eq!(u.imports.len(), 1);

        u.ensure_import("jakarta.enterprise.context.Dependent");
        assert_eq!(u.imports.len(), 2);
        assert_eq!(u.imports[1].path, "jakarta.enterprise.context.Dependent");
    }

    #[test]
    fn test_ensure_import_skips_java_lang() {
        let mut u = unit("public class A {\n}\n");
        u.ensure_import("java.lang.Override");
        assert!(u.imports.is_empty());
    }

    #[test]
    fn test_find_target_at_member() {
        let u = unit("public class A {\n    int x;\n\n    void m() {\n    }\n}\n");
        let (index, field) = u.types[0].fields().next().unwrap();
        let path = u.find_target_at(&u.range_of(field.name_span)).unwrap();
        assert_eq!(path, TargetPath::member(0, index));
        assert!(path.resolve_field(&u).is_some());
    }

    #[test]
    fn test_find_target_at_type() {
        let u = unit("public class A {\n    int x;\n}\n");
        let path = u.find_target_at(&u.range_of(u.types[0].name_span)).unwrap();
        assert_eq!(path, TargetPath::ty(0));
    }

    #[test]
    fn test_target_path_serde() {
        let path = TargetPath::member(0, 2);
        let json = serde_json::to_value(path).unwrap();
        let back: TargetPath = serde_json::from_value(json).unwrap();
        assert_eq!(back, path);
    }
}

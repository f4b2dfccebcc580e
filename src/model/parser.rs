//! Declaration-level Java source parser
//!
//! Builds the program model from source text. Only declaration structure is
//! parsed: package, imports, type declarations, annotations, modifiers,
//! fields, methods, constructors, parameters, and throws clauses. Method
//! bodies, initializers, enum constant lists, nested types, and initializer
//! blocks are captured as verbatim text and reprinted unchanged.

use super::{
    Annotation, AnnotationArg, CompilationUnit, FieldDecl, Import, Member, MethodDecl, Modifier,
    Parameter, RawMember, Span, TypeDecl, TypeKind, TypeRef,
};
use crate::jakarta;
use std::path::Path;
use thiserror::Error;

/// Error during parsing
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unexpected end of input at line {line}")]
    UnexpectedEof { line: usize },

    #[error("expected {expected} at line {line}")]
    Expected { expected: String, line: usize },
}

/// Parse a compilation unit from source text
pub fn parse(source: &str, file: &Path) -> Result<CompilationUnit, ParseError> {
    let mut cur = Cursor::new(source);

    cur.skip_trivia();
    let package = if cur.eat_keyword("package") {
        let (name, _) = cur.parse_qualified()?;
        cur.expect(';')?;
        Some(name)
    } else {
        None
    };

    let mut imports = Vec::new();
    loop {
        cur.skip_trivia();
        if !cur.eat_keyword("import") {
            break;
        }
        let is_static = cur.eat_keyword("static");
        let (mut path, _) = cur.parse_qualified()?;
        if cur.rest().starts_with(".*") {
            cur.advance(2);
            path.push_str(".*");
        }
        cur.expect(';')?;
        imports.push(Import { path, is_static });
    }

    let mut types = Vec::new();
    loop {
        let comment = cur.skip_trivia();
        if cur.at_end() {
            break;
        }
        types.push(parse_type_decl(&mut cur, comment)?);
    }

    let mut unit = CompilationUnit {
        file: file.to_path_buf(),
        source: source.to_string(),
        package,
        imports,
        types,
    };
    resolve_names(&mut unit);
    Ok(unit)
}

/// Resolve a possibly-simple name against a unit's imports, the well-known
/// table, and the package
pub(crate) fn resolve_name(name: &str, package: Option<&str>, imports: &[Import]) -> String {
    if name.contains('.') {
        return name.to_string();
    }
    for import in imports {
        if import.is_static {
            continue;
        }
        if let Some(last) = import.path.rsplit('.').next() {
            if last == name {
                return import.path.clone();
            }
        }
    }
    if let Some(fqn) = jakarta::well_known_fqn(name) {
        return fqn.to_string();
    }
    match package {
        Some(pkg) => format!("{}.{}", pkg, name),
        None => name.to_string(),
    }
}

/// Fill in resolved names for every annotation and throws entry
fn resolve_names(unit: &mut CompilationUnit) {
    let package = unit.package.clone();
    let imports = unit.imports.clone();
    let resolve = |name: &str| resolve_name(name, package.as_deref(), &imports);

    for ty in &mut unit.types {
        for a in &mut ty.annotations {
            a.fqn = resolve(&a.name);
        }
        for member in &mut ty.members {
            match member {
                Member::Field(f) => {
                    for a in &mut f.annotations {
                        a.fqn = resolve(&a.name);
                    }
                }
                Member::Method(m) => {
                    for a in &mut m.annotations {
                        a.fqn = resolve(&a.name);
                    }
                    for p in &mut m.params {
                        for a in &mut p.annotations {
                            a.fqn = resolve(&a.name);
                        }
                    }
                    for t in &mut m.throws {
                        t.fqn = resolve(&t.name);
                    }
                }
                Member::Raw(_) => {}
            }
        }
    }
}

fn parse_type_decl(cur: &mut Cursor, leading_comment: Option<String>) -> Result<TypeDecl, ParseError> {
    let start = cur.pos;
    let annotations = parse_annotations(cur)?;
    let modifiers = parse_modifiers(cur);

    let kind = if cur.eat_keyword("class") {
        TypeKind::Class
    } else if cur.eat_keyword("interface") {
        TypeKind::Interface
    } else if cur.eat_keyword("enum") {
        TypeKind::Enum
    } else {
        return Err(cur.expected("class, interface, or enum"));
    };

    let (name, name_span) = cur.parse_ident().ok_or_else(|| cur.expected("type name"))?;

    cur.skip_trivia();
    let type_params = if cur.peek() == Some('<') {
        Some(cur.skip_balanced('<', '>')?)
    } else {
        None
    };

    cur.skip_trivia();
    let heritage_start = cur.pos;
    while let Some(c) = cur.peek() {
        if c == '{' {
            break;
        }
        if c == '<' {
            cur.skip_balanced('<', '>')?;
        } else {
            cur.bump();
        }
    }
    let heritage_text = cur.slice(heritage_start, cur.pos).trim().to_string();
    let heritage = if heritage_text.is_empty() {
        None
    } else {
        Some(heritage_text)
    };
    cur.expect('{')?;

    let mut members = Vec::new();

    // Enum constant list, captured verbatim up to the member separator
    if kind == TypeKind::Enum {
        let const_start = cur.pos;
        let stopped_at_semi = cur.scan_raw_until(&[';', '}'])?;
        if stopped_at_semi {
            cur.bump();
        }
        let text = cur.slice(const_start, cur.pos).trim().to_string();
        if !text.is_empty() {
            members.push(Member::Raw(RawMember {
                text,
                span: Span::new(const_start, cur.pos),
            }));
        }
    }

    loop {
        let comment = cur.skip_trivia();
        match cur.peek() {
            Some('}') => {
                cur.bump();
                break;
            }
            None => return Err(ParseError::UnexpectedEof { line: cur.line() }),
            Some(_) => members.push(parse_member(cur, &name, comment)?),
        }
    }

    Ok(TypeDecl {
        name,
        kind,
        annotations,
        modifiers,
        type_params,
        heritage,
        members,
        leading_comment,
        span: Span::new(start, cur.pos),
        name_span,
    })
}

fn parse_member(
    cur: &mut Cursor,
    type_name: &str,
    leading_comment: Option<String>,
) -> Result<Member, ParseError> {
    let start = cur.pos;
    let annotations = parse_annotations(cur)?;
    let modifiers = parse_modifiers(cur);
    cur.skip_trivia();

    // Initializer block (instance or static)
    if cur.peek() == Some('{') {
        cur.skip_balanced('{', '}')?;
        return Ok(Member::Raw(RawMember {
            text: cur.slice(start, cur.pos).to_string(),
            span: Span::new(start, cur.pos),
        }));
    }

    // Nested type or annotation type: keep verbatim
    if cur.peek_keyword("class")
        || cur.peek_keyword("interface")
        || cur.peek_keyword("enum")
        || cur.peek() == Some('@')
    {
        while let Some(c) = cur.peek() {
            if c == '{' {
                break;
            }
            cur.bump();
        }
        cur.skip_balanced('{', '}')?;
        return Ok(Member::Raw(RawMember {
            text: cur.slice(start, cur.pos).to_string(),
            span: Span::new(start, cur.pos),
        }));
    }

    // Constructor: the type name followed by a parameter list
    let mut look = *cur;
    if let Some((ident, ident_span)) = look.parse_ident() {
        if ident == type_name {
            look.skip_trivia();
            if look.peek() == Some('(') {
                *cur = look;
                return parse_method_rest(
                    cur,
                    ident,
                    ident_span,
                    None,
                    annotations,
                    modifiers,
                    true,
                    leading_comment,
                    start,
                )
                .map(Member::Method);
            }
        }
    }

    // Generic method type parameters become part of the return type text
    cur.skip_trivia();
    let mut return_prefix = String::new();
    if cur.peek() == Some('<') {
        return_prefix = cur.skip_balanced('<', '>')?;
        return_prefix.push(' ');
    }

    let ty = parse_type_text(cur)?;
    let (name, name_span) = cur.parse_ident().ok_or_else(|| cur.expected("member name"))?;
    cur.skip_trivia();

    match cur.peek() {
        Some('(') => parse_method_rest(
            cur,
            name,
            name_span,
            Some(format!("{}{}", return_prefix, ty)),
            annotations,
            modifiers,
            false,
            leading_comment,
            start,
        )
        .map(Member::Method),
        Some('=') => {
            cur.bump();
            let init_start = cur.pos;
            cur.scan_raw_until(&[';'])?;
            let initializer = cur.slice(init_start, cur.pos).trim().to_string();
            cur.expect(';')?;
            Ok(Member::Field(FieldDecl {
                name,
                ty,
                annotations,
                modifiers,
                initializer: Some(initializer),
                leading_comment,
                span: Span::new(start, cur.pos),
                name_span,
            }))
        }
        Some(';') => {
            cur.bump();
            Ok(Member::Field(FieldDecl {
                name,
                ty,
                annotations,
                modifiers,
                initializer: None,
                leading_comment,
                span: Span::new(start, cur.pos),
                name_span,
            }))
        }
        // Multi-declarator fields and anything else unrecognized: verbatim
        Some(',') => {
            cur.scan_raw_until(&[';'])?;
            cur.expect(';')?;
            Ok(Member::Raw(RawMember {
                text: cur.slice(start, cur.pos).to_string(),
                span: Span::new(start, cur.pos),
            }))
        }
        _ => Err(cur.expected("'(', '=', or ';'")),
    }
}

#[allow(clippy::too_many_arguments)]
fn parse_method_rest(
    cur: &mut Cursor,
    name: String,
    name_span: Span,
    return_type: Option<String>,
    annotations: Vec<Annotation>,
    modifiers: Vec<Modifier>,
    is_constructor: bool,
    leading_comment: Option<String>,
    start: usize,
) -> Result<MethodDecl, ParseError> {
    let params = parse_params(cur)?;

    let mut throws = Vec::new();
    if cur.eat_keyword("throws") {
        loop {
            let (tname, _) = cur.parse_qualified()?;
            throws.push(TypeRef {
                name: tname,
                fqn: String::new(),
            });
            if !cur.eat(',') {
                break;
            }
        }
    }

    cur.skip_trivia();
    let body = match cur.peek() {
        Some('{') => Some(cur.skip_balanced('{', '}')?),
        Some(';') => {
            cur.bump();
            None
        }
        _ => return Err(cur.expected("method body or ';'")),
    };

    Ok(MethodDecl {
        name,
        return_type,
        annotations,
        modifiers,
        params,
        throws,
        body,
        is_constructor,
        leading_comment,
        span: Span::new(start, cur.pos),
        name_span,
    })
}

fn parse_params(cur: &mut Cursor) -> Result<Vec<Parameter>, ParseError> {
    cur.expect('(')?;
    let mut params = Vec::new();

    cur.skip_trivia();
    if cur.peek() == Some(')') {
        cur.bump();
        return Ok(params);
    }

    loop {
        cur.skip_trivia();
        let pstart = cur.pos;
        let annotations = parse_annotations(cur)?;
        let is_final = cur.eat_keyword("final");
        let ty = parse_type_text(cur)?;
        let (name, _) = cur.parse_ident().ok_or_else(|| cur.expected("parameter name"))?;
        params.push(Parameter {
            name,
            ty,
            annotations,
            is_final,
            span: Span::new(pstart, cur.pos),
        });

        cur.skip_trivia();
        match cur.peek() {
            Some(',') => {
                cur.bump();
            }
            Some(')') => {
                cur.bump();
                break;
            }
            _ => return Err(cur.expected("',' or ')'")),
        }
    }

    Ok(params)
}

fn parse_annotations(cur: &mut Cursor) -> Result<Vec<Annotation>, ParseError> {
    let mut annotations = Vec::new();
    loop {
        cur.skip_trivia();
        if cur.peek() != Some('@') {
            break;
        }
        // "@interface" introduces an annotation type declaration, not a use
        let mut look = *cur;
        look.bump();
        if look.peek_keyword("interface") {
            break;
        }

        let start = cur.pos;
        cur.bump();
        let (name, _) = cur.parse_qualified()?;
        let args = {
            let mut look = *cur;
            look.skip_trivia();
            if look.peek() == Some('(') {
                *cur = look;
                let raw = cur.skip_balanced('(', ')')?;
                parse_annotation_args(&raw[1..raw.len() - 1])
            } else {
                Vec::new()
            }
        };
        annotations.push(Annotation {
            name,
            fqn: String::new(),
            args,
            span: Span::new(start, cur.pos),
        });
    }
    Ok(annotations)
}

/// Split an annotation argument list at top-level commas and classify each
/// piece as `name = value` or a bare value
fn parse_annotation_args(inner: &str) -> Vec<AnnotationArg> {
    let mut args = Vec::new();
    for piece in split_top_level(inner) {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }
        if let Some(eq) = find_top_level_eq(piece) {
            let name = piece[..eq].trim();
            if !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                args.push(AnnotationArg {
                    name: name.to_string(),
                    value: piece[eq + 1..].trim().to_string(),
                });
                continue;
            }
        }
        args.push(AnnotationArg {
            name: "value".to_string(),
            value: piece.to_string(),
        });
    }
    args
}

fn split_top_level(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '(' | '{' | '[' | '<' => depth += 1,
            ')' | '}' | ']' | '>' => depth = depth.saturating_sub(1),
            '"' | '\'' => {
                // Skip to the matching quote, honoring escapes
                while let Some((_, n)) = chars.next() {
                    if n == '\\' {
                        chars.next();
                    } else if n == c {
                        break;
                    }
                }
            }
            ',' if depth == 0 => {
                pieces.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    pieces.push(&text[start..]);
    pieces
}

fn find_top_level_eq(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '(' | '{' | '[' | '<' => depth += 1,
            ')' | '}' | ']' | '>' => depth = depth.saturating_sub(1),
            '"' | '\'' => {
                while let Some((_, n)) = chars.next() {
                    if n == '\\' {
                        chars.next();
                    } else if n == c {
                        break;
                    }
                }
            }
            '=' if depth == 0 => {
                // Not part of ==, !=, <=, >=
                let prev = text[..i].chars().next_back();
                let next = chars.peek().map(|(_, n)| *n);
                if next != Some('=') && !matches!(prev, Some('!') | Some('<') | Some('>') | Some('=')) {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn parse_modifiers(cur: &mut Cursor) -> Vec<Modifier> {
    let mut modifiers = Vec::new();
    loop {
        cur.skip_trivia();
        let mut look = *cur;
        match look.parse_ident() {
            Some((word, _)) => match Modifier::from_keyword(&word) {
                Some(modifier) => {
                    // "default" as a modifier only on interface methods; a
                    // lone "default" followed by ':' would be a switch label,
                    // which cannot appear at member level
                    *cur = look;
                    modifiers.push(modifier);
                }
                None => break,
            },
            None => break,
        }
    }
    modifiers
}

fn parse_type_text(cur: &mut Cursor) -> Result<String, ParseError> {
    let (mut text, _) = cur.parse_qualified()?;

    {
        let mut look = *cur;
        look.skip_trivia();
        if look.peek() == Some('<') {
            *cur = look;
            text.push_str(&cur.skip_balanced('<', '>')?);
        }
    }

    loop {
        let mut look = *cur;
        look.skip_trivia();
        if look.peek() == Some('[') {
            look.bump();
            look.skip_trivia();
            if look.peek() == Some(']') {
                look.bump();
                *cur = look;
                text.push_str("[]");
                continue;
            }
        }
        break;
    }

    {
        let mut look = *cur;
        look.skip_trivia();
        if look.rest().starts_with("...") {
            look.advance(3);
            *cur = look;
            text.push_str("...");
        }
    }

    Ok(text)
}

/// Lightweight scanning cursor over source text
#[derive(Clone, Copy)]
struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.src[start..end]
    }

    fn advance(&mut self, bytes: usize) {
        self.pos += bytes;
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn line(&self) -> usize {
        self.src[..self.pos].matches('\n').count() + 1
    }

    fn expected(&self, what: &str) -> ParseError {
        if self.at_end() {
            ParseError::UnexpectedEof { line: self.line() }
        } else {
            ParseError::Expected {
                expected: what.to_string(),
                line: self.line(),
            }
        }
    }

    /// Skip whitespace and comments, returning any comment text skipped
    fn skip_trivia(&mut self) -> Option<String> {
        let mut comments: Vec<String> = Vec::new();
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') if self.rest().starts_with("//") => {
                    let end = self
                        .rest()
                        .find('\n')
                        .map(|i| self.pos + i)
                        .unwrap_or(self.src.len());
                    comments.push(self.src[self.pos..end].to_string());
                    self.pos = end;
                }
                Some('/') if self.rest().starts_with("/*") => {
                    let end = self.rest()[2..]
                        .find("*/")
                        .map(|i| self.pos + i + 4)
                        .unwrap_or(self.src.len());
                    comments.push(self.src[self.pos..end].to_string());
                    self.pos = end;
                }
                _ => break,
            }
        }
        if comments.is_empty() {
            None
        } else {
            Some(comments.join("\n"))
        }
    }

    fn eat(&mut self, c: char) -> bool {
        self.skip_trivia();
        if self.peek() == Some(c) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, c: char) -> Result<(), ParseError> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(self.expected(&format!("'{}'", c)))
        }
    }

    fn parse_ident_here(&mut self) -> Option<(String, Span)> {
        let start = self.pos;
        let first = self.peek()?;
        if !first.is_alphabetic() && first != '_' && first != '$' {
            return None;
        }
        self.bump();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '$' {
                self.bump();
            } else {
                break;
            }
        }
        Some((
            self.src[start..self.pos].to_string(),
            Span::new(start, self.pos),
        ))
    }

    fn parse_ident(&mut self) -> Option<(String, Span)> {
        self.skip_trivia();
        self.parse_ident_here()
    }

    fn peek_keyword(&self, word: &str) -> bool {
        let mut look = *self;
        look.skip_trivia();
        matches!(look.parse_ident_here(), Some((w, _)) if w == word)
    }

    fn eat_keyword(&mut self, word: &str) -> bool {
        let mut look = *self;
        look.skip_trivia();
        if let Some((w, _)) = look.parse_ident_here() {
            if w == word {
                *self = look;
                return true;
            }
        }
        false
    }

    /// Parse a dotted qualified name
    fn parse_qualified(&mut self) -> Result<(String, Span), ParseError> {
        self.skip_trivia();
        let start = self.pos;
        let (first, _) = self
            .parse_ident_here()
            .ok_or_else(|| self.expected("identifier"))?;
        let mut text = first;
        loop {
            let mut look = *self;
            if look.peek() == Some('.') {
                look.bump();
                if let Some((next, _)) = look.parse_ident_here() {
                    text.push('.');
                    text.push_str(&next);
                    *self = look;
                    continue;
                }
            }
            break;
        }
        Ok((text, Span::new(start, self.pos)))
    }

    /// Consume a balanced delimiter pair, string- and comment-aware,
    /// returning the consumed text including the delimiters
    fn skip_balanced(&mut self, open: char, close: char) -> Result<String, ParseError> {
        let start = self.pos;
        if self.peek() != Some(open) {
            return Err(self.expected(&format!("'{}'", open)));
        }
        self.bump();
        let mut depth = 1usize;
        while depth > 0 {
            match self.peek() {
                None => return Err(ParseError::UnexpectedEof { line: self.line() }),
                Some('"') => self.skip_string('"')?,
                Some('\'') => self.skip_string('\'')?,
                Some('/') if self.rest().starts_with("//") || self.rest().starts_with("/*") => {
                    self.skip_trivia();
                }
                Some(c) => {
                    if c == open {
                        depth += 1;
                    } else if c == close {
                        depth -= 1;
                    }
                    self.bump();
                }
            }
        }
        Ok(self.src[start..self.pos].to_string())
    }

    fn skip_string(&mut self, quote: char) -> Result<(), ParseError> {
        self.bump();
        loop {
            match self.bump() {
                None => return Err(ParseError::UnexpectedEof { line: self.line() }),
                Some('\\') => {
                    self.bump();
                }
                Some(c) if c == quote => return Ok(()),
                Some(_) => {}
            }
        }
    }

    /// Scan forward until one of the stop characters appears at delimiter
    /// depth zero, without consuming it. Returns true when the stop was the
    /// first character in the list.
    fn scan_raw_until(&mut self, stops: &[char]) -> Result<bool, ParseError> {
        let mut depth = 0usize;
        loop {
            match self.peek() {
                None => return Err(ParseError::UnexpectedEof { line: self.line() }),
                Some('"') => self.skip_string('"')?,
                Some('\'') => self.skip_string('\'')?,
                Some('/') if self.rest().starts_with("//") || self.rest().starts_with("/*") => {
                    self.skip_trivia();
                }
                Some(c) if depth == 0 && stops.contains(&c) => {
                    return Ok(c == stops[0]);
                }
                Some(c) => {
                    if matches!(c, '(' | '{' | '[') {
                        depth += 1;
                    } else if matches!(c, ')' | '}' | ']') {
                        depth = depth.saturating_sub(1);
                    }
                    self.bump();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse_ok(source: &str) -> CompilationUnit {
        parse(source, Path::new("Test.java")).unwrap()
    }

    #[test]
    fn test_parse_package_and_imports() {
        let unit = parse_ok(
            "package com.example.beans;\n\
             \n\
             import jakarta.inject.Inject;\n\
             import static java.util.Objects.requireNonNull;\n\
             import java.util.*;\n\
             \n\
             public class A {\n\
             }\n",
        );
        assert_eq!(unit.package.as_deref(), Some("com.example.beans"));
        assert_eq!(unit.imports.len(), 3);
        assert!(unit.imports[1].is_static);
        assert_eq!(unit.imports[2].path, "java.util.*");
        assert_eq!(unit.types[0].name, "A");
    }

    #[test]
    fn test_parse_class_annotations_and_modifiers() {
        let unit = parse_ok(
            "import jakarta.enterprise.context.RequestScoped;\n\
             \n\
             @RequestScoped\n\
             public final class Cart {\n\
             }\n",
        );
        let ty = &unit.types[0];
        assert_eq!(ty.annotations.len(), 1);
        assert_eq!(ty.annotations[0].fqn, "jakarta.enterprise.context.RequestScoped");
        assert_eq!(ty.modifiers, vec![Modifier::Public, Modifier::Final]);
    }

    #[test]
    fn test_parse_field_with_annotations() {
        let unit = parse_ok(
            "public class A {\n\
             \x20   @Inject\n\
             \x20   @Produces\n\
             \x20   private java.util.List<String> names = new ArrayList<>();\n\
             }\n",
        );
        let (_, field) = unit.types[0].fields().next().unwrap();
        assert_eq!(field.name, "names");
        assert_eq!(field.ty, "java.util.List<String>");
        assert_eq!(field.annotations.len(), 2);
        assert_eq!(field.annotations[0].fqn, "jakarta.inject.Inject");
        assert_eq!(field.initializer.as_deref(), Some("new ArrayList<>()"));
    }

    #[test]
    fn test_parse_method_params_and_throws() {
        let unit = parse_ok(
            "import jakarta.enterprise.inject.Disposes;\n\
             import java.io.IOException;\n\
             \n\
             public class A {\n\
             \x20   void close(@Disposes Widget w, final int count) throws IOException, java.sql.SQLException {\n\
             \x20       w.close();\n\
             \x20   }\n\
             }\n",
        );
        let (_, method) = unit.types[0].methods().next().unwrap();
        assert_eq!(method.name, "close");
        assert_eq!(method.return_type.as_deref(), Some("void"));
        assert_eq!(method.params.len(), 2);
        assert_eq!(method.params[0].annotations[0].fqn, "jakarta.enterprise.inject.Disposes");
        assert!(method.params[1].is_final);
        assert_eq!(method.throws.len(), 2);
        assert_eq!(method.throws[0].fqn, "java.io.IOException");
        assert_eq!(method.throws[1].fqn, "java.sql.SQLException");
        assert!(method.body.as_deref().unwrap().contains("w.close();"));
    }

    #[test]
    fn test_parse_constructor() {
        let unit = parse_ok(
            "public class Order {\n\
             \x20   private final String id;\n\
             \n\
             \x20   public Order(String id) {\n\
             \x20       this.id = id;\n\
             \x20   }\n\
             }\n",
        );
        let (_, ctor) = unit.types[0].constructors().next().unwrap();
        assert!(ctor.is_constructor);
        assert_eq!(ctor.name, "Order");
        assert!(ctor.return_type.is_none());
        assert_eq!(ctor.params.len(), 1);
    }

    #[test]
    fn test_parse_annotation_args() {
        let unit = parse_ok(
            "import jakarta.servlet.annotation.WebServlet;\n\
             \n\
             @WebServlet(name = \"orders\", urlPatterns = {\"/orders\", \"/orders/*\"})\n\
             public class OrderServlet {\n\
             }\n",
        );
        let ann = &unit.types[0].annotations[0];
        assert_eq!(ann.arg("name"), Some("\"orders\""));
        assert_eq!(ann.arg("urlPatterns"), Some("{\"/orders\", \"/orders/*\"}"));
    }

    #[test]
    fn test_parse_single_value_annotation_arg() {
        let unit = parse_ok("@SuppressWarnings(\"unchecked\")\npublic class A {\n}\n");
        let ann = &unit.types[0].annotations[0];
        assert_eq!(ann.arg("value"), Some("\"unchecked\""));
    }

    #[test]
    fn test_parse_heritage() {
        let unit = parse_ok(
            "public class A extends Base<String> implements Runnable, java.io.Serializable {\n}\n",
        );
        assert_eq!(
            unit.types[0].heritage.as_deref(),
            Some("extends Base<String> implements Runnable, java.io.Serializable")
        );
    }

    #[test]
    fn test_parse_abstract_method_without_body() {
        let unit = parse_ok(
            "public interface Repo {\n\
             \x20   String find(String id);\n\
             }\n",
        );
        let (_, method) = unit.types[0].methods().next().unwrap();
        assert!(method.body.is_none());
    }

    #[test]
    fn test_parse_enum_constants_kept_raw() {
        let unit = parse_ok(
            "public enum Status {\n\
             \x20   OPEN, CLOSED;\n\
             \n\
             \x20   public boolean open() {\n\
             \x20       return this == OPEN;\n\
             \x20   }\n\
             }\n",
        );
        let ty = &unit.types[0];
        assert!(matches!(ty.members[0], Member::Raw(_)));
        assert_eq!(ty.methods().count(), 1);
    }

    #[test]
    fn test_parse_nested_type_kept_raw() {
        let unit = parse_ok(
            "public class A {\n\
             \x20   int x;\n\
             \n\
             \x20   static class Inner {\n\
             \x20       int y;\n\
             \x20   }\n\
             }\n",
        );
        let ty = &unit.types[0];
        assert_eq!(ty.fields().count(), 1);
        assert!(ty.members.iter().any(|m| matches!(m, Member::Raw(r) if r.text.contains("class Inner"))));
    }

    #[test]
    fn test_parse_static_initializer_kept_raw() {
        let unit = parse_ok(
            "public class A {\n\
             \x20   static {\n\
             \x20       System.loadLibrary(\"native\");\n\
             \x20   }\n\
             }\n",
        );
        assert!(matches!(unit.types[0].members[0], Member::Raw(_)));
    }

    #[test]
    fn test_parse_varargs_and_arrays() {
        let unit = parse_ok(
            "public class A {\n\
             \x20   void log(String format, Object... args) {\n\
             \x20   }\n\
             \n\
             \x20   int[] counts;\n\
             }\n",
        );
        let (_, method) = unit.types[0].methods().next().unwrap();
        assert_eq!(method.params[1].ty, "Object...");
        let (_, field) = unit.types[0].fields().next().unwrap();
        assert_eq!(field.ty, "int[]");
    }

    #[test]
    fn test_parse_error_reports_line() {
        let err = parse("public class A {\n    void m(\n", Path::new("Bad.java")).unwrap_err();
        match err {
            ParseError::UnexpectedEof { line } => assert!(line >= 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_leading_comments_attached() {
        let unit = parse_ok(
            "public class A {\n\
             \x20   /** The order count. */\n\
             \x20   int count;\n\
             }\n",
        );
        let (_, field) = unit.types[0].fields().next().unwrap();
        assert!(field
            .leading_comment
            .as_deref()
            .unwrap()
            .contains("The order count."));
    }

    #[test]
    fn test_body_with_braces_in_strings() {
        let unit = parse_ok(
            "public class A {\n\
             \x20   String brace() {\n\
             \x20       return \"{ not a block }\";\n\
             \x20   }\n\
             }\n",
        );
        let (_, method) = unit.types[0].methods().next().unwrap();
        assert!(method.body.as_deref().unwrap().contains("not a block"));
    }
}

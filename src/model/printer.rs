//! Reserialization of a (possibly mutated) compilation unit
//!
//! The edit-materialization strategy regenerates the whole unit's text, so
//! the printer must always produce output the parser accepts again. Method
//! bodies, initializers, and raw members are emitted verbatim; everything
//! else is printed in a fixed style with four-space indentation.

use super::{Annotation, CompilationUnit, FieldDecl, Member, MethodDecl, RawMember, TypeDecl};

const INDENT: &str = "    ";

/// Serialize the unit back to source text
pub fn print_unit(unit: &CompilationUnit) -> String {
    let mut out = String::new();

    if let Some(pkg) = &unit.package {
        out.push_str(&format!("package {};\n\n", pkg));
    }

    if !unit.imports.is_empty() {
        for import in &unit.imports {
            let kw = if import.is_static { "import static" } else { "import" };
            out.push_str(&format!("{} {};\n", kw, import.path));
        }
        out.push('\n');
    }

    for (i, ty) in unit.types.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        print_type(&mut out, ty);
    }

    out
}

fn print_type(out: &mut String, ty: &TypeDecl) {
    print_comment(out, ty.leading_comment.as_deref(), "");
    for annotation in &ty.annotations {
        out.push_str(&format_annotation(annotation));
        out.push('\n');
    }

    for modifier in &ty.modifiers {
        out.push_str(modifier.as_str());
        out.push(' ');
    }
    out.push_str(ty.kind.keyword());
    out.push(' ');
    out.push_str(&ty.name);
    if let Some(tp) = &ty.type_params {
        out.push_str(tp);
    }
    if let Some(heritage) = &ty.heritage {
        out.push(' ');
        out.push_str(heritage);
    }
    out.push_str(" {\n");

    let mut prev_was_field = false;
    for (i, member) in ty.members.iter().enumerate() {
        let is_field = matches!(member, Member::Field(_));
        if i > 0 && !(prev_was_field && is_field) {
            out.push('\n');
        }
        match member {
            Member::Field(field) => print_field(out, field),
            Member::Method(method) => print_method(out, method),
            Member::Raw(raw) => print_raw(out, raw),
        }
        prev_was_field = is_field;
    }

    out.push_str("}\n");
}

fn print_field(out: &mut String, field: &FieldDecl) {
    print_comment(out, field.leading_comment.as_deref(), INDENT);
    for annotation in &field.annotations {
        out.push_str(INDENT);
        out.push_str(&format_annotation(annotation));
        out.push('\n');
    }

    out.push_str(INDENT);
    for modifier in &field.modifiers {
        out.push_str(modifier.as_str());
        out.push(' ');
    }
    out.push_str(&field.ty);
    out.push(' ');
    out.push_str(&field.name);
    if let Some(init) = &field.initializer {
        out.push_str(" = ");
        out.push_str(init);
    }
    out.push_str(";\n");
}

fn print_method(out: &mut String, method: &MethodDecl) {
    print_comment(out, method.leading_comment.as_deref(), INDENT);
    for annotation in &method.annotations {
        out.push_str(INDENT);
        out.push_str(&format_annotation(annotation));
        out.push('\n');
    }

    out.push_str(INDENT);
    for modifier in &method.modifiers {
        out.push_str(modifier.as_str());
        out.push(' ');
    }
    if let Some(return_type) = &method.return_type {
        out.push_str(return_type);
        out.push(' ');
    }
    out.push_str(&method.name);
    out.push('(');
    for (i, param) in method.params.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        for annotation in &param.annotations {
            out.push_str(&format_annotation(annotation));
            out.push(' ');
        }
        if param.is_final {
            out.push_str("final ");
        }
        out.push_str(&param.ty);
        out.push(' ');
        out.push_str(&param.name);
    }
    out.push(')');

    if !method.throws.is_empty() {
        out.push_str(" throws ");
        let names: Vec<&str> = method.throws.iter().map(|t| t.name.as_str()).collect();
        out.push_str(&names.join(", "));
    }

    match &method.body {
        Some(body) => {
            out.push(' ');
            out.push_str(body);
            out.push('\n');
        }
        None => out.push_str(";\n"),
    }
}

fn print_raw(out: &mut String, raw: &RawMember) {
    out.push_str(INDENT);
    out.push_str(&raw.text);
    out.push('\n');
}

fn format_annotation(annotation: &Annotation) -> String {
    let mut text = format!("@{}", annotation.name);
    if !annotation.args.is_empty() {
        text.push('(');
        if annotation.args.len() == 1 && annotation.args[0].name == "value" {
            text.push_str(&annotation.args[0].value);
        } else {
            let parts: Vec<String> = annotation
                .args
                .iter()
                .map(|a| format!("{} = {}", a.name, a.value))
                .collect();
            text.push_str(&parts.join(", "));
        }
        text.push(')');
    }
    text
}

fn print_comment(out: &mut String, comment: Option<&str>, indent: &str) {
    let Some(comment) = comment else {
        return;
    };
    for line in comment.lines() {
        let trimmed = line.trim();
        out.push_str(indent);
        if trimmed.starts_with('*') {
            // Continuation line of a block comment
            out.push(' ');
        }
        out.push_str(trimmed);
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CompilationUnit;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn round_trip(source: &str) -> String {
        let unit = CompilationUnit::parse(source, Path::new("Test.java")).unwrap();
        unit.serialize()
    }

    #[test]
    fn test_print_simple_class() {
        let printed = round_trip(
            "package com.example;\n\
             \n\
             import jakarta.inject.Inject;\n\
             \n\
             public class A {\n\
             \x20   @Inject\n\
             \x20   private Widget widget;\n\
             }\n",
        );
        assert_eq!(
            printed,
            "package com.example;\n\
             \n\
             import jakarta.inject.Inject;\n\
             \n\
             public class A {\n\
             \x20   @Inject\n\
             \x20   private Widget widget;\n\
             }\n"
        );
    }

    #[test]
    fn test_print_method_with_throws() {
        let printed = round_trip(
            "public class A {\n\
             \x20   void close() throws IOException {\n\
             \x20       flush();\n\
             \x20   }\n\
             }\n",
        );
        assert!(printed.contains("void close() throws IOException {"));
        assert!(printed.contains("flush();"));
    }

    #[test]
    fn test_print_annotation_args() {
        let printed = round_trip(
            "@WebServlet(name = \"orders\", urlPatterns = {\"/orders\"})\n\
             public class OrderServlet {\n\
             }\n",
        );
        assert!(printed.contains("@WebServlet(name = \"orders\", urlPatterns = {\"/orders\"})"));
    }

    #[test]
    fn test_print_single_value_annotation() {
        let printed = round_trip("@SuppressWarnings(\"unchecked\")\npublic class A {\n}\n");
        assert!(printed.contains("@SuppressWarnings(\"unchecked\")"));
    }

    #[test]
    fn test_printed_output_reparses() {
        let source = "package com.example;\n\
             \n\
             import jakarta.enterprise.context.RequestScoped;\n\
             import jakarta.inject.Inject;\n\
             \n\
             @RequestScoped\n\
             public class Cart {\n\
             \x20   @Inject\n\
             \x20   private PriceService prices;\n\
             \n\
             \x20   public Cart(PriceService prices) {\n\
             \x20       this.prices = prices;\n\
             \x20   }\n\
             \n\
             \x20   int total() throws java.io.IOException {\n\
             \x20       return prices.total();\n\
             \x20   }\n\
             }\n";
        let printed = round_trip(source);
        let reparsed = CompilationUnit::parse(&printed, Path::new("Test.java")).unwrap();
        assert_eq!(reparsed.types[0].name, "Cart");
        assert_eq!(reparsed.types[0].methods().count(), 2);
        // Printing is a fixed point after the first pass
        assert_eq!(reparsed.serialize(), printed);
    }

    #[test]
    fn test_print_consecutive_fields_not_separated() {
        let printed = round_trip(
            "public class A {\n\
             \x20   int a;\n\
             \x20   int b;\n\
             \n\
             \x20   void m() {\n\
             \x20   }\n\
             }\n",
        );
        assert!(printed.contains("int a;\n    int b;\n\n    void m()"));
    }

    #[test]
    fn test_print_comment_block() {
        let printed = round_trip(
            "public class A {\n\
             \x20   /**\n\
             \x20    * The total.\n\
             \x20    */\n\
             \x20   int total;\n\
             }\n",
        );
        assert!(printed.contains("/**\n     * The total.\n     */\n    int total;"));
    }
}

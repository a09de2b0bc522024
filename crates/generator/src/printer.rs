//! Pretty-printer for the TypeScript IR
//!
//! Output follows prettier defaults for the constructs we generate: two-space
//! indentation, single quotes, trailing commas in multi-line literals.

use crate::ast::{
    ClassDecl, ClassMember, ConstDecl, DocComment, Expr, ImportDecl, ImportSpecifiers, Item,
    MethodSignature, Param, Program, Stmt, TypeAlias, TypeExpr,
};
use serde_json::Value;
use std::fmt::Write;

const INDENT: &str = "  ";

/// Render a program to source text
pub fn print_program(program: &Program) -> String {
    let mut out = String::new();

    if let Some(header) = &program.header {
        for line in header.lines() {
            let _ = writeln!(out, "// {}", line);
        }
        out.push('\n');
    }

    let mut previous: Option<&Item> = None;
    for item in &program.items {
        if let Some(prev) = previous {
            if needs_blank_line(prev, item) {
                out.push('\n');
            }
        }
        print_item(&mut out, item);
        previous = Some(item);
    }

    out
}

/// Imports and type aliases stack; everything else is spaced out
fn needs_blank_line(prev: &Item, next: &Item) -> bool {
    !matches!(
        (prev, next),
        (Item::Import(_), Item::Import(_)) | (Item::TypeAlias(_), Item::TypeAlias(_))
    )
}

fn print_item(out: &mut String, item: &Item) {
    match item {
        Item::Import(import) => print_import(out, import),
        Item::TypeAlias(alias) => print_type_alias(out, alias),
        Item::Class(class) => print_class(out, class),
        Item::Const(constant) => print_const(out, constant),
    }
}

/// Render a single import statement, including the trailing newline
pub fn print_import(out: &mut String, import: &ImportDecl) {
    let specifiers = match &import.specifiers {
        ImportSpecifiers::Namespace(alias) => format!("* as {}", alias),
        ImportSpecifiers::Named(names) => {
            let names: Vec<String> = names
                .iter()
                .map(|n| {
                    if n.type_only {
                        format!("type {}", n.name)
                    } else {
                        n.name.clone()
                    }
                })
                .collect();
            format!("{{ {} }}", names.join(", "))
        }
    };
    let _ = writeln!(
        out,
        "import {} from {};",
        specifiers,
        quote(&import.source)
    );
}

fn print_type_alias(out: &mut String, alias: &TypeAlias) {
    let export = if alias.exported { "export " } else { "" };
    let _ = writeln!(out, "{}type {} = {};", export, alias.name, print_type(&alias.ty));
}

fn print_const(out: &mut String, constant: &ConstDecl) {
    let _ = writeln!(
        out,
        "export const {} = {} as const;",
        constant.name,
        js_literal(&constant.value, 0)
    );
}

fn print_class(out: &mut String, class: &ClassDecl) {
    let _ = write!(out, "export class {}", class.name);
    if let Some(base) = &class.extends {
        let _ = write!(out, " extends {}", base);
    }
    out.push_str(" {\n");

    let mut previous: Option<&ClassMember> = None;
    for member in &class.members {
        if let Some(prev) = previous {
            if member_needs_blank_line(prev, member) {
                out.push('\n');
            }
        }
        print_member(out, member, 1);
        previous = Some(member);
    }

    out.push_str("}\n");
}

/// Properties stack; overloads sit directly on top of their implementation
fn member_needs_blank_line(prev: &ClassMember, next: &ClassMember) -> bool {
    match (prev, next) {
        (ClassMember::Property { .. }, ClassMember::Property { .. }) => false,
        (ClassMember::Declaration(a), ClassMember::Declaration(b)) => a.name != b.name,
        (ClassMember::Declaration(a), ClassMember::Method { signature, .. }) => {
            a.name != signature.name
        }
        _ => true,
    }
}

fn print_member(out: &mut String, member: &ClassMember, level: usize) {
    let pad = INDENT.repeat(level);
    match member {
        ClassMember::Property { name, value } => {
            let _ = writeln!(out, "{}{} = {};", pad, name, print_expr(value, level));
        }
        ClassMember::Declaration(signature) => {
            print_doc(out, signature.doc.as_ref(), level);
            let _ = writeln!(out, "{}{};", pad, print_signature(signature));
        }
        ClassMember::Method { signature, body } => {
            print_doc(out, signature.doc.as_ref(), level);
            let _ = writeln!(out, "{}{} {{", pad, print_signature(signature));
            for stmt in body {
                print_stmt(out, stmt, level + 1);
            }
            let _ = writeln!(out, "{}}}", pad);
        }
    }
}

fn print_doc(out: &mut String, doc: Option<&DocComment>, level: usize) {
    let Some(doc) = doc else {
        return;
    };
    let pad = INDENT.repeat(level);
    let _ = writeln!(out, "{}/**", pad);
    for line in &doc.lines {
        if line.is_empty() {
            let _ = writeln!(out, "{} *", pad);
        } else {
            for part in line.lines() {
                let _ = writeln!(out, "{} * {}", pad, part.trim_end().replace("*/", "*\\/"));
            }
        }
    }
    let _ = writeln!(out, "{} */", pad);
}

fn print_signature(signature: &MethodSignature) -> String {
    let params: Vec<String> = signature.params.iter().map(print_param).collect();
    format!(
        "{}({}): {}",
        signature.name,
        params.join(", "),
        print_type(&signature.returns)
    )
}

fn print_param(param: &Param) -> String {
    format!(
        "{}{}: {}",
        param.name,
        if param.optional { "?" } else { "" },
        print_type(&param.ty)
    )
}

/// Render a type expression
pub fn print_type(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::Named(name) => name.clone(),
        TypeExpr::Generic { name, args } => {
            let args: Vec<String> = args.iter().map(print_type).collect();
            format!("{}<{}>", name, args.join(", "))
        }
        TypeExpr::Union(members) => members
            .iter()
            .map(print_type)
            .collect::<Vec<_>>()
            .join(" | "),
        TypeExpr::TypeOf(path) => format!("typeof {}", path),
    }
}

fn print_stmt(out: &mut String, stmt: &Stmt, level: usize) {
    let pad = INDENT.repeat(level);
    match stmt {
        Stmt::Expr(expr) => {
            let _ = writeln!(out, "{}{};", pad, print_expr(expr, level));
        }
        Stmt::Return(expr) => {
            let _ = writeln!(out, "{}return {};", pad, print_expr(expr, level));
        }
    }
}

/// Render an expression whose first line starts at the given indentation level
pub fn print_expr(expr: &Expr, level: usize) -> String {
    match expr {
        Expr::Ident(name) => name.clone(),
        Expr::Str(s) => quote(s),
        Expr::Bool(b) => b.to_string(),
        Expr::Object(props) => {
            if props.is_empty() {
                return "{}".to_string();
            }
            let inner = INDENT.repeat(level + 1);
            let mut s = String::from("{\n");
            for (key, value) in props {
                let _ = writeln!(
                    s,
                    "{}{}: {},",
                    inner,
                    property_key(key),
                    print_expr(value, level + 1)
                );
            }
            s.push_str(&INDENT.repeat(level));
            s.push('}');
            s
        }
        Expr::Call { callee, args } => {
            format!("{}({})", print_expr(callee, level), print_args(args, level))
        }
        Expr::New { callee, args } => format!("new {}({})", callee, print_args(args, level)),
    }
}

/// Arguments go inline unless one of them spans several lines
fn print_args(args: &[Expr], level: usize) -> String {
    let multiline = args
        .iter()
        .any(|a| matches!(a, Expr::Object(props) if !props.is_empty()));

    if !multiline {
        return args
            .iter()
            .map(|a| print_expr(a, level))
            .collect::<Vec<_>>()
            .join(", ");
    }

    let inner = INDENT.repeat(level + 1);
    let mut s = String::from("\n");
    for arg in args {
        let _ = writeln!(s, "{}{},", inner, print_expr(arg, level + 1));
    }
    s.push_str(&INDENT.repeat(level));
    s
}

/// Single-quoted JS string literal
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn property_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        quote(key)
    }
}

/// Render a JSON value as a JS literal (unquoted keys, single-quoted strings)
pub fn js_literal(value: &Value, level: usize) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(items) => {
            if items.is_empty() {
                return "[]".to_string();
            }
            if items.iter().all(|v| !v.is_object() && !v.is_array()) {
                let parts: Vec<String> = items.iter().map(|v| js_literal(v, level)).collect();
                return format!("[{}]", parts.join(", "));
            }
            let inner = INDENT.repeat(level + 1);
            let mut s = String::from("[\n");
            for item in items {
                let _ = writeln!(s, "{}{},", inner, js_literal(item, level + 1));
            }
            s.push_str(&INDENT.repeat(level));
            s.push(']');
            s
        }
        Value::Object(map) => {
            if map.is_empty() {
                return "{}".to_string();
            }
            let inner = INDENT.repeat(level + 1);
            let mut s = String::from("{\n");
            for (key, value) in map {
                let _ = writeln!(
                    s,
                    "{}{}: {},",
                    inner,
                    property_key(key),
                    js_literal(value, level + 1)
                );
            }
            s.push_str(&INDENT.repeat(level));
            s.push('}');
            s
        }
    }
}

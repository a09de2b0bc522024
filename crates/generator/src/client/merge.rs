//! Reconciliation of the root client class with the generated resources

use super::syntax::{self, Segment};
use super::ClientResource;
use resource_codegen_common::{GeneratorError, Result};
use std::collections::HashSet;
use tree_sitter::Node;

const DEFAULT_INDENT: &str = "  ";

/// Who owns a piece of the client source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Produced by a previous run; replaced wholesale
    Generated,
    /// Hand written; kept byte for byte
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemberKind {
    Constructor,
    Property,
    Other,
}

#[derive(Debug)]
struct Member<'a> {
    text: &'a str,
    /// Whitespace and comments before the member itself
    leading: &'a str,
    kind: MemberKind,
    origin: Origin,
}

/// Rewrite the client source so that it imports and exposes exactly `resources`
///
/// Imports from `prefix` and the properties instantiating their classes are
/// regenerated; everything else is preserved. Running the function on its own
/// output returns the same text.
pub fn update_client_source(
    source: &str,
    resources: &[ClientResource],
    prefix: &str,
) -> Result<String> {
    let tree = syntax::parse(source)?;
    let statements = syntax::segments(
        source,
        &syntax::children(tree.root_node()),
        0,
        source.len(),
    );

    let (class_index, class_body) = statements
        .iter()
        .enumerate()
        .find_map(|(i, s)| s.node.and_then(syntax::exported_class_body).map(|b| (i, b)))
        .ok_or_else(|| {
            GeneratorError::Structure("No exported class declaration found in client".to_string())
        })?;

    // A comment leading the first statement stays at the top of the file,
    // unless it documents the class itself
    let header = match statements.first() {
        Some(first) if class_index != 0 && !first.leading(source).trim().is_empty() => {
            first.leading(source)
        }
        _ => "",
    };

    let mut generated_classes: HashSet<String> =
        resources.iter().map(|r| r.class.clone()).collect();
    let mut kept = Vec::with_capacity(statements.len());

    for (index, segment) in statements.iter().enumerate() {
        if index == class_index {
            kept.push(None);
            continue;
        }

        let text = segment.text(source);
        let text = if index == 0 { &text[header.len()..] } else { text };

        match segment.node.filter(|n| n.kind() == "import_statement") {
            Some(import) if import_origin(import, source, prefix) == Origin::Generated => {
                generated_classes.extend(imported_names(import, source));
            }
            _ => kept.push(Some(text)),
        }
    }

    let class = rewrite_class(
        source,
        &statements[class_index],
        class_body,
        resources,
        &generated_classes,
    );

    let mut out = String::with_capacity(source.len());
    out.push_str(header);
    for resource in resources {
        out.push_str(&format!(
            "import {{ {} }} from '{}{}';\n",
            resource.class, prefix, resource.file
        ));
    }
    for chunk in kept {
        out.push_str(chunk.unwrap_or(class.as_str()));
    }

    syntax::parse(&out)?;
    Ok(out)
}

/// Imports from the generated resources directory are generated
fn import_origin(import: Node<'_>, source: &str, prefix: &str) -> Origin {
    let generated = import
        .child_by_field_name("source")
        .map(|path| syntax::text(path, source).trim_matches(['\'', '"']))
        .is_some_and(|path| path.starts_with(prefix));

    if generated {
        Origin::Generated
    } else {
        Origin::Manual
    }
}

/// Local names bound by an import statement
fn imported_names(import: Node<'_>, source: &str) -> Vec<String> {
    let mut names = Vec::new();

    let clauses = syntax::named_children(import)
        .into_iter()
        .filter(|n| n.kind() == "import_clause");

    for binding in clauses.flat_map(syntax::named_children) {
        match binding.kind() {
            "identifier" => names.push(syntax::text(binding, source).to_string()),
            "namespace_import" => names.extend(
                syntax::named_children(binding)
                    .into_iter()
                    .filter(|n| n.kind() == "identifier")
                    .map(|n| syntax::text(n, source).to_string()),
            ),
            "named_imports" => names.extend(
                syntax::named_children(binding)
                    .into_iter()
                    .filter(|n| n.kind() == "import_specifier")
                    .filter_map(|spec| {
                        spec.child_by_field_name("alias")
                            .or_else(|| spec.child_by_field_name("name"))
                    })
                    .map(|n| syntax::text(n, source).to_string()),
            ),
            _ => {}
        }
    }

    names
}

/// Class name of a `new X(this)` initializer
fn instantiated_class<'s>(value: Node<'_>, source: &'s str) -> Option<&'s str> {
    if value.kind() != "new_expression" {
        return None;
    }

    let class = value
        .child_by_field_name("constructor")
        .filter(|n| n.kind() == "identifier")?;
    let arguments = value.child_by_field_name("arguments")?;
    let args: Vec<Node<'_>> = syntax::named_children(arguments)
        .into_iter()
        .filter(|n| n.kind() != "comment")
        .collect();

    matches!(args.as_slice(), [arg] if arg.kind() == "this").then(|| syntax::text(class, source))
}

/// Classify a class member once; the merge only reads the result
fn classify_member<'a>(
    segment: &Segment<'_>,
    source: &'a str,
    generated_classes: &HashSet<String>,
) -> Member<'a> {
    let (kind, origin) = match segment.node {
        Some(node) if node.kind() == "method_definition" => {
            let is_constructor = node
                .child_by_field_name("name")
                .is_some_and(|name| syntax::text(name, source) == "constructor");
            let kind = if is_constructor {
                MemberKind::Constructor
            } else {
                MemberKind::Other
            };
            (kind, Origin::Manual)
        }
        Some(node) if node.kind() == "public_field_definition" => {
            let generated = node
                .child_by_field_name("value")
                .and_then(|value| instantiated_class(value, source))
                .is_some_and(|class| generated_classes.contains(class));
            let origin = if generated {
                Origin::Generated
            } else {
                Origin::Manual
            };
            (MemberKind::Property, origin)
        }
        _ => (MemberKind::Other, Origin::Manual),
    };

    Member {
        text: segment.text(source),
        leading: segment.leading(source),
        kind,
        origin,
    }
}

/// Indentation of the first member, or two spaces
fn member_indent(members: &[Member<'_>]) -> String {
    members
        .first()
        .map(|m| &m.leading[m.leading.rfind('\n').map_or(0, |i| i + 1)..])
        .filter(|indent| !indent.is_empty() && indent.chars().all(|c| c == ' ' || c == '\t'))
        .unwrap_or(DEFAULT_INDENT)
        .to_string()
}

fn rewrite_class(
    source: &str,
    statement: &Segment<'_>,
    body: Node<'_>,
    resources: &[ClientResource],
    generated_classes: &HashSet<String>,
) -> String {
    // The body node spans the braces
    let open = body.start_byte() + 1;
    let close = body.end_byte().saturating_sub(1).max(open);
    let body_start = syntax::line_end(source, open).min(close);

    let nodes: Vec<Node<'_>> = syntax::children(body)
        .into_iter()
        .filter(|n| !matches!(n.kind(), "{" | "}"))
        .collect();
    let mut segments = syntax::segments(source, &nodes, body_start, close);

    // Trivia before the closing brace belongs to the tail
    let tail_start = match segments.last() {
        Some(last) if last.node.is_none() => {
            let start = last.start;
            segments.pop();
            start
        }
        _ => close,
    };

    let members: Vec<Member<'_>> = segments
        .iter()
        .map(|segment| classify_member(segment, source, generated_classes))
        .collect();

    let indent = member_indent(&members);
    let kept: Vec<&Member<'_>> = members
        .iter()
        .filter(|m| m.origin == Origin::Manual)
        .collect();
    let insert_at = kept
        .iter()
        .position(|m| m.kind == MemberKind::Constructor)
        .map_or(0, |i| i + 1);

    let properties: Vec<String> = resources
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let gap = if i == 0 && insert_at > 0 { "\n" } else { "" };
            format!("{}{}{} = new {}(this);\n", gap, indent, r.property, r.class)
        })
        .collect();

    let mut members_text = String::with_capacity(close - body_start);
    for member in &kept[..insert_at] {
        members_text.push_str(member.text);
    }
    for property in &properties {
        members_text.push_str(property);
    }
    for member in &kept[insert_at..] {
        members_text.push_str(member.text);
    }

    let members_text = if insert_at == 0 {
        members_text.trim_start_matches(['\n', '\r']).to_string()
    } else {
        members_text
    };

    let mut head = source[statement.start..body_start].to_string();
    if !members_text.is_empty() && !head.ends_with('\n') {
        head.push('\n');
    }

    format!(
        "{}{}{}",
        head,
        members_text,
        &source[tail_start..statement.end]
    )
}

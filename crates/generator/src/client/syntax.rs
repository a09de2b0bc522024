//! TypeScript syntax tree access for the client merge
//!
//! The client is parsed with tree-sitter. Statements and class members are
//! then cut into contiguous [`Segment`]s that carry their leading comments and
//! whitespace, so that concatenating the segments of a range restores it.

use resource_codegen_common::{GeneratorError, Result};
use tree_sitter::{Language, Node, Parser, Tree};

/// Node kinds that declare a class
const CLASS_KINDS: &[&str] = &["class_declaration", "abstract_class_declaration", "class"];

/// Parse TypeScript source, rejecting input with syntax errors
pub(crate) fn parse(source: &str) -> Result<Tree> {
    let language: Language = tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into();
    let mut parser = Parser::new();
    parser.set_language(&language).map_err(|e| {
        GeneratorError::Structure(format!("Failed to load TypeScript grammar: {}", e))
    })?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| GeneratorError::Structure("Failed to parse client source".to_string()))?;

    if let Some(node) = first_error(tree.root_node()) {
        return Err(GeneratorError::Structure(format!(
            "Client source has a syntax error at line {}",
            node.start_position().row + 1
        )));
    }

    Ok(tree)
}

fn first_error(root: Node<'_>) -> Option<Node<'_>> {
    if !root.has_error() {
        return None;
    }

    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        // Reverse so the earliest child is visited first
        stack.extend(children(node).into_iter().rev().filter(|c| c.has_error()));
    }
    None
}

pub(crate) fn children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let nodes = node.children(&mut cursor).collect();
    nodes
}

pub(crate) fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let nodes = node.named_children(&mut cursor).collect();
    nodes
}

pub(crate) fn text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    &source[node.byte_range()]
}

/// A statement or member together with its surrounding trivia
#[derive(Debug, Clone, Copy)]
pub(crate) struct Segment<'tree> {
    pub start: usize,
    pub end: usize,
    /// `None` for trailing trivia after the last node
    pub node: Option<Node<'tree>>,
}

impl<'tree> Segment<'tree> {
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.start..self.end]
    }

    /// Comments and whitespace before the node
    pub fn leading<'s>(&self, source: &'s str) -> &'s str {
        let lead_end = self.node.map_or(self.end, |n| n.start_byte());
        &source[self.start..lead_end]
    }
}

/// Cut `start..end` into one segment per node of `nodes`
///
/// Separators (`;`, `,`) and comments on the same line stay with the node
/// before them, other comments with the node after them. Each segment runs to
/// the end of its last line when nothing else follows on that line.
pub(crate) fn segments<'tree>(
    source: &str,
    nodes: &[Node<'tree>],
    start: usize,
    end: usize,
) -> Vec<Segment<'tree>> {
    // (node, end byte, end row)
    let mut units: Vec<(Node<'tree>, usize, usize)> = Vec::new();

    for &node in nodes {
        let last_row = units.last().map(|&(_, _, row)| row);
        let trailing = !node.is_named()
            || (node.kind() == "comment" && Some(node.start_position().row) == last_row);

        if trailing {
            if let Some(last) = units.last_mut() {
                last.1 = node.end_byte();
                last.2 = node.end_position().row;
            }
        } else if node.kind() != "comment" {
            units.push((node, node.end_byte(), node.end_position().row));
        }
    }

    let mut out = Vec::with_capacity(units.len() + 1);
    let mut cursor = start;
    for (node, unit_end, _) in units {
        let stop = line_end(source, unit_end).min(end);
        out.push(Segment {
            start: cursor,
            end: stop,
            node: Some(node),
        });
        cursor = stop;
    }

    if cursor < end {
        out.push(Segment {
            start: cursor,
            end,
            node: None,
        });
    }
    out
}

/// Offset just past the newline ending the line at `from`, when only blanks
/// remain on it
pub(crate) fn line_end(source: &str, from: usize) -> usize {
    let rest = &source[from..];
    let blanks = rest.len() - rest.trim_start_matches([' ', '\t', '\r']).len();
    if rest[blanks..].starts_with('\n') {
        from + blanks + 1
    } else {
        from
    }
}

/// Body of the class declared by an `export` statement
pub(crate) fn exported_class_body(statement: Node<'_>) -> Option<Node<'_>> {
    if statement.kind() != "export_statement" {
        return None;
    }

    named_children(statement)
        .into_iter()
        .find(|c| CLASS_KINDS.contains(&c.kind()))?
        .child_by_field_name("body")
}

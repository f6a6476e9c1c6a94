//! Top-level declaration lookup.

use crate::error::{LocateError, Result};
use crate::literal::{Literal, LiteralKind, Value};
use crate::parser::SyntaxTree;
use crate::walk::{walk, Descent, Visitor};
use govar_common::{SourceFile, Span};
use smol_str::SmolStr;
use std::ops::ControlFlow;
use tree_sitter::Node;

impl SyntaxTree<'_> {
    /// Find the first top-level `var` or `const` named `name` and decode its
    /// literal initializer.
    ///
    /// Only the file node and its declaration groups are searched; function
    /// bodies, type declarations and everything else are pruned.
    pub fn locate(&self, name: &str) -> Result<Option<Value>> {
        let mut visitor = DeclarationVisitor {
            source: self.source(),
            name,
        };
        match walk(&mut visitor, self.root_node()) {
            ControlFlow::Break(found) => found.map(Some),
            ControlFlow::Continue(()) => {
                log::debug!("no top-level declaration named {name}");
                Ok(None)
            }
        }
    }
}

/// Node kinds the declaration walk distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    File,
    ConstDecl,
    VarDecl,
    Other,
}

impl NodeKind {
    fn of(node: Node) -> Self {
        match node.kind() {
            "source_file" => NodeKind::File,
            "const_declaration" => NodeKind::ConstDecl,
            "var_declaration" => NodeKind::VarDecl,
            _ => NodeKind::Other,
        }
    }
}

struct DeclarationVisitor<'a> {
    source: &'a SourceFile,
    name: &'a str,
}

impl<'tree> Visitor<'tree> for DeclarationVisitor<'_> {
    type Break = Result<Value>;

    fn visit(&mut self, node: Node<'tree>) -> ControlFlow<Result<Value>, Descent> {
        match NodeKind::of(node) {
            NodeKind::File => ControlFlow::Continue(Descent::Children),
            kind @ (NodeKind::ConstDecl | NodeKind::VarDecl) => match self.search_group(node, kind) {
                Some(found) => ControlFlow::Break(found),
                None => ControlFlow::Continue(Descent::Prune),
            },
            NodeKind::Other => ControlFlow::Continue(Descent::Prune),
        }
    }
}

impl DeclarationVisitor<'_> {
    fn text(&self, node: Node) -> &str {
        self.source.text(span(node))
    }

    /// Scan one declaration group for the target name.
    fn search_group(&self, group: Node, kind: NodeKind) -> Option<Result<Value>> {
        // A const spec without values repeats the last value list in its group.
        let mut repeated: Option<Vec<Node>> = None;

        for spec in specs(group) {
            let values = match values(spec) {
                Some(values) => {
                    if kind == NodeKind::ConstDecl {
                        repeated = Some(values.clone());
                    }
                    Some(values)
                }
                None if kind == NodeKind::ConstDecl => repeated.clone(),
                None => None,
            };

            let mut cursor = spec.walk();
            // The `name` field can also cover the separating commas.
            let names: Vec<Node> = spec
                .children_by_field_name("name", &mut cursor)
                .filter(|n| n.kind() == "identifier")
                .collect();
            for (i, ident) in names.into_iter().enumerate() {
                if self.text(ident) != self.name {
                    continue;
                }
                let value = values.as_ref().and_then(|values| values.get(i).copied());
                return Some(self.resolve(ident, value));
            }
        }
        None
    }

    fn resolve(&self, ident: Node, value: Option<Node>) -> Result<Value> {
        let name = SmolStr::new(self.name);
        let Some(value) = value else {
            return Err(LocateError::NoInitializer {
                name,
                span: span(ident).into(),
            });
        };

        let value_span = span(value);
        let Some(kind) = LiteralKind::of(value.kind()) else {
            log::debug!("{name} is initialized by a {}", value.kind());
            return Err(LocateError::NotALiteral {
                name,
                span: value_span.into(),
            });
        };

        let literal = Literal::new(kind, self.text(value), value_span);
        log::debug!(
            "{name} found at {}: {kind} literal {}",
            self.source.location(value_span.start),
            literal.raw
        );
        literal.decode().map_err(|source| LocateError::Decode {
            name,
            kind,
            span: value_span.into(),
            source,
        })
    }
}

/// The specs of a declaration group, in source order.
fn specs(group: Node) -> Vec<Node> {
    let mut specs = vec![];
    let mut cursor = group.walk();
    for child in group.named_children(&mut cursor) {
        match child.kind() {
            "const_spec" | "var_spec" => specs.push(child),
            // Parenthesized groups may wrap their specs in a list node.
            "var_spec_list" | "const_spec_list" => {
                let mut inner = child.walk();
                specs.extend(
                    child
                        .named_children(&mut inner)
                        .filter(|n| matches!(n.kind(), "const_spec" | "var_spec")),
                );
            }
            _ => {}
        }
    }
    specs
}

/// The initializer expressions of a spec, or `None` if it has no `= ...`.
fn values(spec: Node) -> Option<Vec<Node>> {
    let list = spec.child_by_field_name("value")?;
    let mut cursor = list.walk();
    let values = list
        .named_children(&mut cursor)
        .filter(|n| !n.is_extra())
        .collect();
    Some(values)
}

fn span(node: Node) -> Span {
    Span::new(node.start_byte() as u32, node.end_byte() as u32)
}

//! Syntax validation.
//!
//! tree-sitter recovers from every error and accepts statements at file
//! scope, so a tree alone does not say whether a file is valid Go. This pass
//! collects every error node and every file-level construct that Go rejects.

use crate::walk::{walk, Descent, Visitor};
use govar_common::{Diagnostic, SourceFile, Span};
use std::convert::Infallible;
use std::ops::ControlFlow;
use tree_sitter::{Node, Tree};

/// Collect all syntax errors in `tree`, ordered by position.
pub(crate) fn check(tree: &Tree, source: &SourceFile) -> Vec<Diagnostic> {
    let mut errors = vec![];

    if let Some(offset) = source.invalid_utf8() {
        errors.push(
            Diagnostic::error(source, Span::new(offset, offset + 3), "illegal UTF-8 encoding")
                .with_label("not UTF-8"),
        );
    }

    let root = tree.root_node();
    let mut collector = ErrorNodes {
        source,
        errors: &mut errors,
    };
    let _ = walk(&mut collector, root);

    check_top_level(root, source, &mut errors);

    errors.sort_by_key(Diagnostic::offset);
    errors
}

struct ErrorNodes<'a> {
    source: &'a SourceFile,
    errors: &'a mut Vec<Diagnostic>,
}

impl<'tree> Visitor<'tree> for ErrorNodes<'_> {
    type Break = Infallible;

    fn visit(&mut self, node: Node<'tree>) -> ControlFlow<Infallible, Descent> {
        if node.is_missing() {
            let message = format!("expected `{}`", node.kind());
            self.errors.push(Diagnostic::error(self.source, span(node), message).with_label("missing"));
            ControlFlow::Continue(Descent::Prune)
        } else if node.is_error() {
            let message = match first_token(self.source, node) {
                "" => "unexpected end of file".to_string(),
                token => format!("unexpected `{token}`"),
            };
            self.errors.push(Diagnostic::error(self.source, span(node), message).with_label("unexpected"));
            ControlFlow::Continue(Descent::Prune)
        } else if node.has_error() {
            ControlFlow::Continue(Descent::Children)
        } else {
            ControlFlow::Continue(Descent::Prune)
        }
    }
}

/// Go requires a package clause first, then imports, then declarations.
fn check_top_level(root: Node, source: &SourceFile, errors: &mut Vec<Diagnostic>) {
    let mut cursor = root.walk();
    let items: Vec<Node> = root
        .named_children(&mut cursor)
        .filter(|n| !n.is_extra() && !n.is_error() && !n.is_missing())
        .collect();

    match items.first() {
        Some(first) if first.kind() == "package_clause" => {}
        Some(first) => errors.push(Diagnostic::error(
            source,
            span(*first),
            format!("expected 'package', found `{}`", first_token(source, *first)),
        )),
        None if !root.has_error() => errors.push(Diagnostic::error(
            source,
            Span::new(0, 0),
            "expected 'package', found 'EOF'",
        )),
        None => {}
    }

    let mut seen_declaration = false;
    for (i, item) in items.iter().enumerate() {
        match item.kind() {
            "package_clause" if i == 0 => {}
            "import_declaration" if seen_declaration => errors.push(
                Diagnostic::error(
                    source,
                    span(*item),
                    "imports must appear before other declarations",
                )
                .with_label("import"),
            ),
            "import_declaration" => {}
            "function_declaration" | "method_declaration" | "type_declaration"
            | "const_declaration" | "var_declaration" => seen_declaration = true,
            _ => errors.push(
                Diagnostic::error(
                    source,
                    span(*item),
                    format!("expected declaration, found `{}`", first_token(source, *item)),
                )
                .with_help("statements are only allowed inside function bodies"),
            ),
        }
    }
}

fn span(node: Node) -> Span {
    Span::new(node.start_byte() as u32, node.end_byte() as u32)
}

fn first_token<'a>(source: &'a SourceFile, node: Node) -> &'a str {
    source
        .text(span(node))
        .split_whitespace()
        .next()
        .unwrap_or("")
}

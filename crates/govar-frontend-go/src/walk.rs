use std::ops::ControlFlow;
use tree_sitter::Node;

/// Whether the walk enters the children of the node just visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descent {
    Children,
    Prune,
}

/// A pre-order tree visitor.
///
/// `visit` either decides whether to descend into the node's children or
/// breaks out of the walk with a result.
pub trait Visitor<'tree> {
    type Break;

    fn visit(&mut self, node: Node<'tree>) -> ControlFlow<Self::Break, Descent>;
}

/// Walk the subtree rooted at `root` in document order.
pub fn walk<'tree, V>(visitor: &mut V, root: Node<'tree>) -> ControlFlow<V::Break>
where
    V: Visitor<'tree>,
{
    let mut cursor = root.walk();
    loop {
        let descent = visitor.visit(cursor.node())?;
        if descent == Descent::Children && cursor.goto_first_child() {
            continue;
        }

        // The cursor cannot leave `root`, so reaching it again ends the walk.
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return ControlFlow::Continue(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::Parser;

    fn parse(source: &str) -> tree_sitter::Tree {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .unwrap();
        parser.parse(source, None).unwrap()
    }

    struct KindRecorder {
        kinds: Vec<String>,
        descend_into: &'static [&'static str],
    }

    impl<'tree> Visitor<'tree> for KindRecorder {
        type Break = ();

        fn visit(&mut self, node: Node<'tree>) -> ControlFlow<(), Descent> {
            self.kinds.push(node.kind().to_string());
            if self.descend_into.contains(&node.kind()) {
                ControlFlow::Continue(Descent::Children)
            } else {
                ControlFlow::Continue(Descent::Prune)
            }
        }
    }

    #[test]
    fn test_prune_skips_children() {
        let tree = parse("package p\n\nfunc f() { var x = 1 }\n");
        let mut recorder = KindRecorder {
            kinds: vec![],
            descend_into: &["source_file"],
        };
        let flow = walk(&mut recorder, tree.root_node());
        assert_eq!(flow, ControlFlow::Continue(()));
        assert_eq!(recorder.kinds[0], "source_file");
        assert!(recorder.kinds.iter().any(|k| k == "function_declaration"));
        assert!(!recorder.kinds.iter().any(|k| k == "var_declaration"));
    }

    #[test]
    fn test_break_stops_walk() {
        struct FirstIdentifier;

        impl<'tree> Visitor<'tree> for FirstIdentifier {
            type Break = usize;

            fn visit(&mut self, node: Node<'tree>) -> ControlFlow<usize, Descent> {
                if node.kind() == "identifier" {
                    ControlFlow::Break(node.start_byte())
                } else {
                    ControlFlow::Continue(Descent::Children)
                }
            }
        }

        let source = "package p\n\nvar a = 1\nvar b = 2\n";
        let tree = parse(source);
        let flow = walk(&mut FirstIdentifier, tree.root_node());
        assert_eq!(flow, ControlFlow::Break(source.find("a = 1").unwrap()));
    }
}

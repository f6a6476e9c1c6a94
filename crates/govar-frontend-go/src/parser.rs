use crate::error::{ParseError, Result};
use crate::syntax;
use govar_common::{Diagnostic, SourceFile, Span};
use tree_sitter::{Node, Parser, Tree};

/// A reusable tree-sitter parser configured for Go.
pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        let language = tree_sitter_go::LANGUAGE;
        parser.set_language(&language.into())?;
        Ok(Self { parser })
    }

    /// Parse a source file, rejecting it if it contains any syntax error.
    pub fn parse<'src>(&mut self, source: &'src SourceFile) -> Result<SyntaxTree<'src>> {
        let tree = self.parser.parse(&source.content, None).ok_or_else(|| {
            ParseError::new(vec![Diagnostic::error(
                source,
                Span::new(0, 0),
                "parser produced no syntax tree",
            )])
        })?;

        let errors = syntax::check(&tree, source);
        if !errors.is_empty() {
            log::debug!(
                "{}: {} syntax error(s)",
                source.path.display(),
                errors.len()
            );
            return Err(ParseError::new(errors).into());
        }

        Ok(SyntaxTree { tree, source })
    }
}

/// Parse Go source code into a syntax tree.
pub fn parse(source: &SourceFile) -> Result<SyntaxTree<'_>> {
    GoParser::new()?.parse(source)
}

/// A syntactically valid Go file together with its source.
pub struct SyntaxTree<'src> {
    tree: Tree,
    source: &'src SourceFile,
}

impl<'src> SyntaxTree<'src> {
    pub fn root_node(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn source(&self) -> &'src SourceFile {
        self.source
    }
}

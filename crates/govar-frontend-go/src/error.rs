use crate::literal::LiteralKind;
use crate::unquote::UnquoteError;
use govar_common::Diagnostic;
use miette::SourceSpan;
use smol_str::SmolStr;
use std::fmt;
use thiserror::Error;

/// Result type for frontend operations.
pub type Result<T> = std::result::Result<T, LocateError>;

/// Errors that can occur while locating a declaration.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum LocateError {
    /// The bundled Go grammar does not match the tree-sitter runtime.
    #[error("failed to load the Go grammar: {0}")]
    #[diagnostic(code(govar::language))]
    Language(#[from] tree_sitter::LanguageError),

    /// The source file is not valid Go.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    /// The name is declared but its initializer is an expression.
    #[error("{name} is declared but is not assigned to a literal")]
    #[diagnostic(
        code(govar::not_a_literal),
        help("only literal initializers are printed; expressions are never evaluated")
    )]
    NotALiteral {
        name: SmolStr,
        #[label("initializer is not a literal")]
        span: SourceSpan,
    },

    /// The name has no positional initializer value.
    #[error("{name} is declared without an initializer value")]
    #[diagnostic(code(govar::no_initializer))]
    NoInitializer {
        name: SmolStr,
        #[label("declared here")]
        span: SourceSpan,
    },

    /// The literal text could not be unescaped.
    #[error("error unquoting {kind} literal for {name}: {source}")]
    #[diagnostic(code(govar::decode))]
    Decode {
        name: SmolStr,
        kind: LiteralKind,
        #[label("malformed literal")]
        span: SourceSpan,
        source: UnquoteError,
    },
}

/// Every syntax error found in a source file, ordered by position.
///
/// Displays the first error, followed by a count of the rest.
#[derive(Debug, miette::Diagnostic)]
#[diagnostic(code(govar::parse))]
pub struct ParseError {
    #[related]
    errors: Vec<Diagnostic>,
}

impl ParseError {
    pub(crate) fn new(errors: Vec<Diagnostic>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => write!(f, "syntax error"),
            [first] => write!(f, "{first}"),
            [first, rest @ ..] => write!(f, "{first} (and {} more errors)", rest.len()),
        }
    }
}

impl std::error::Error for ParseError {}

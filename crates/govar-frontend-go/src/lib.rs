//! Go frontend: parses a Go source file with tree-sitter and locates
//! top-level `var` and `const` declarations by name.

mod error;
mod literal;
mod locate;
mod parser;
mod syntax;
mod unquote;
mod walk;

pub use error::{LocateError, ParseError, Result};
pub use literal::{Literal, LiteralKind, Value};
pub use parser::{parse, GoParser, SyntaxTree};
pub use unquote::{unquote_char, unquote_string, UnquoteError};
pub use walk::{walk, Descent, Visitor};

use govar_common::SourceFile;

/// Locate the top-level `var` or `const` named `name` and decode its literal.
///
/// Returns `Ok(None)` when no top-level declaration carries that name.
pub fn locate(source: &SourceFile, name: &str) -> Result<Option<Value>> {
    let tree = parser::parse(source)?;
    tree.locate(name)
}

use crate::unquote::{unquote_char, unquote_string, UnquoteError};
use govar_common::Span;
use std::borrow::Cow;
use std::fmt;

/// Literal kinds, as far as decoding is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    /// Rune literal: `'x'`.
    Char,
    /// Interpreted or raw string literal.
    String,
    /// Integer, float, imaginary and boolean literals, printed verbatim.
    Other,
}

impl LiteralKind {
    /// Classify a tree-sitter-go expression node kind.
    ///
    /// Returns `None` for anything that is not a literal, including
    /// identifiers such as `iota` and `nil`.
    pub fn of(node_kind: &str) -> Option<Self> {
        match node_kind {
            "rune_literal" => Some(LiteralKind::Char),
            "interpreted_string_literal" | "raw_string_literal" => Some(LiteralKind::String),
            "int_literal" | "float_literal" | "imaginary_literal" | "true" | "false" => {
                Some(LiteralKind::Other)
            }
            _ => None,
        }
    }
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LiteralKind::Char => "char",
            LiteralKind::String => "string",
            LiteralKind::Other => "basic",
        };
        f.write_str(name)
    }
}

/// A literal expression exactly as written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal<'src> {
    pub kind: LiteralKind,
    pub raw: &'src str,
    pub span: Span,
}

impl<'src> Literal<'src> {
    pub fn new(kind: LiteralKind, raw: &'src str, span: Span) -> Self {
        Self { kind, raw, span }
    }

    /// Decode the literal into the value it represents.
    pub fn decode(&self) -> Result<Value, UnquoteError> {
        let bytes = match self.kind {
            LiteralKind::Char => unquote_char(self.raw)?.to_string().into_bytes(),
            LiteralKind::String => unquote_string(self.raw)?,
            LiteralKind::Other => self.raw.as_bytes().to_vec(),
        };
        Ok(Value {
            kind: self.kind,
            bytes,
        })
    }
}

/// A decoded literal value.
///
/// Held as bytes: a Go string may contain arbitrary bytes through `\x` and
/// octal escapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    kind: LiteralKind,
    bytes: Vec<u8>,
}

impl Value {
    pub fn kind(&self) -> LiteralKind {
        self.kind
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

//! Syntax diagnostics reported against a source file.
//!
//! A [`Diagnostic`] displays as a single `path:line:column: message` line and
//! carries a labelled span for miette's graphical report.

use crate::source::{Location, SourceFile};
use crate::span::Span;
use miette::{Diagnostic as MietteDiagnostic, SourceSpan};
use thiserror::Error;

#[derive(Debug, Clone, Error, MietteDiagnostic)]
#[error("{location}: {message}")]
pub struct Diagnostic {
    pub message: String,
    pub location: Location,
    #[label("{label}")]
    pub span: SourceSpan,
    pub label: String,
    #[help]
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn error(source: &SourceFile, span: Span, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: source.location(span.start),
            span: span.into(),
            label: String::new(),
            help: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Byte offset the diagnostic points at.
    pub fn offset(&self) -> usize {
        self.span.offset()
    }
}

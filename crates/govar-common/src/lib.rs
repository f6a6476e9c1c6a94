mod span;
mod source;
mod diagnostic;

pub use span::Span;
pub use source::{Location, SourceFile};
pub use diagnostic::Diagnostic;

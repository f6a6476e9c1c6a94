use crate::span::Span;
use std::fmt;
use std::path::PathBuf;

/// A source file with its contents.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
    invalid_utf8: Option<u32>,
    line_starts: Vec<u32>,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let content = content.into();
        let line_starts = std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i as u32 + 1))
            .collect();

        Self {
            path: path.into(),
            content,
            invalid_utf8: None,
            line_starts,
        }
    }

    /// Build a source file from raw bytes.
    ///
    /// Invalid UTF-8 sequences are replaced with U+FFFD; the offset of the
    /// first one is kept so the parser can report it as a syntax error.
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(content) => Self::new(path, content),
            Err(err) => {
                let offset = err.utf8_error().valid_up_to() as u32;
                let content = String::from_utf8_lossy(err.as_bytes()).into_owned();
                let mut file = Self::new(path, content);
                file.invalid_utf8 = Some(offset);
                file
            }
        }
    }

    /// Byte offset of the first invalid UTF-8 sequence in the original bytes.
    pub fn invalid_utf8(&self) -> Option<u32> {
        self.invalid_utf8
    }

    /// Get the text covered by a span.
    pub fn text(&self, span: Span) -> &str {
        self.content
            .get(span.start as usize..span.end as usize)
            .unwrap_or("")
    }

    /// Get line and column (0-indexed) from byte offset.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let col = offset - self.line_starts[line];
        (line as u32, col)
    }

    /// Get the 1-indexed `path:line:column` location of a byte offset.
    pub fn location(&self, offset: u32) -> Location {
        let (line, column) = self.line_col(offset);
        Location {
            path: self.path.display().to_string(),
            line: line + 1,
            column: column + 1,
        }
    }
}

/// A human-readable position in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path, self.line, self.column)
    }
}

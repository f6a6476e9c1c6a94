use govar_common::SourceFile;
use govar_frontend_go::GoParser;
use smol_str::SmolStr;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use govar_frontend_go::{LiteralKind, LocateError, Value};

/// Result type for driver operations.
pub type Result<T> = std::result::Result<T, DriverError>;

/// Errors that end a lookup.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum DriverError {
    /// The source file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    #[diagnostic(code(govar::io))]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// No top-level declaration has the requested name.
    #[error("no such var or const: {name}")]
    #[diagnostic(
        code(govar::not_found),
        help("only top-level var and const declarations are searched")
    )]
    NotFound { name: SmolStr },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Locate(#[from] LocateError),
}

/// Lookup driver: reads Go files and resolves declarations in them.
pub struct Driver {
    parser: GoParser,
}

impl Driver {
    pub fn new() -> Result<Self> {
        Ok(Self {
            parser: GoParser::new()?,
        })
    }

    /// Read a source file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<SourceFile> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| DriverError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("read {} ({} bytes)", path.display(), bytes.len());
        Ok(SourceFile::from_bytes(path, bytes))
    }

    /// Resolve the top-level `var` or `const` named `name` in `source`.
    pub fn lookup(&mut self, source: &SourceFile, name: &str) -> Result<Value> {
        let tree = self.parser.parse(source)?;
        match tree.locate(name)? {
            Some(value) => {
                log::info!(
                    "{}: {name} = {} ({} bytes)",
                    source.path.display(),
                    value.to_string_lossy().escape_debug(),
                    value.as_bytes().len()
                );
                Ok(value)
            }
            None => Err(DriverError::NotFound { name: name.into() }),
        }
    }

    /// Read `path` and resolve `name` in it.
    pub fn lookup_file(&mut self, path: impl AsRef<Path>, name: &str) -> Result<Value> {
        let source = self.load(path)?;
        self.lookup(&source, name)
    }
}

//! Source loading utilities
//!
//! [`SourceLoader`] holds the text of one source file and runs transforms over it. The CLI
//! and the tests both go through it.
//!
//! # Example
//!
//! ```rust,ignore
//! use f2x_parser::fortran::loader::SourceLoader;
//!
//! // From file
//! let root = SourceLoader::from_path("legacy/solver.f").unwrap().parse().unwrap();
//!
//! // From string
//! let lines = SourceLoader::from_string("x = 1\n").lines().unwrap();
//! ```

use crate::fortran::ast::Node;
use crate::fortran::diagnostics::Diagnostics;
use crate::fortran::lexing::LogicalLine;
use crate::fortran::transforms::standard::{
    build_pipeline, ParseOptions, STRING_TO_LINES, STRING_TO_TREE,
};
use crate::fortran::transforms::{Transform, TransformError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Error that can occur when loading sources
#[derive(Debug, Clone)]
pub enum LoaderError {
    /// IO error when reading file
    IoError(String),
    /// Transform/parsing error
    TransformError(TransformError),
}

impl std::fmt::Display for LoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoaderError::IoError(msg) => write!(f, "IO error: {}", msg),
            LoaderError::TransformError(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for LoaderError {}

impl From<std::io::Error> for LoaderError {
    fn from(err: std::io::Error) -> Self {
        LoaderError::IoError(err.to_string())
    }
}

impl From<TransformError> for LoaderError {
    fn from(err: TransformError) -> Self {
        LoaderError::TransformError(err)
    }
}

/// Source text plus transform shortcuts
pub struct SourceLoader {
    source: String,
    path: Option<PathBuf>,
}

impl SourceLoader {
    /// Load from a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)
            .map_err(|e| LoaderError::IoError(format!("{}: {}", path.display(), e)))?;
        Ok(SourceLoader {
            source,
            path: Some(path.to_path_buf()),
        })
    }

    /// Load from a string
    pub fn from_string<S: Into<String>>(source: S) -> Self {
        SourceLoader {
            source: source.into(),
            path: None,
        }
    }

    /// Run a custom transform on the source
    ///
    /// This is the generic method that all shortcuts use internally.
    pub fn with<O: 'static>(&self, transform: &Transform<String, O>) -> Result<O, LoaderError> {
        Ok(transform.run(self.source.clone())?)
    }

    /// Parse with default settings. Shortcut for `.with(&STRING_TO_TREE)`.
    pub fn parse(&self) -> Result<Node, LoaderError> {
        self.with(&STRING_TO_TREE)
    }

    /// Parse with explicit settings, under a diagnostics span named after the file.
    pub fn parse_with(&self, options: &ParseOptions) -> Result<Node, LoaderError> {
        let diagnostics = match &self.path {
            Some(path) => Diagnostics::for_source(&path.display().to_string()),
            None => Diagnostics::for_source("<string>"),
        };
        let pipeline = build_pipeline(options, diagnostics)?;
        let root = self.with(&pipeline)?;
        debug!(nodes = root.node_count(), "parsed");
        Ok(root)
    }

    /// Logical lines after assembly, splitting and conditional filtering.
    pub fn lines(&self) -> Result<Vec<LogicalLine>, LoaderError> {
        self.with(&STRING_TO_LINES)
    }

    pub fn source(&self) -> String {
        self.source.clone()
    }

    /// Get a reference to the raw source string
    ///
    /// Use this when you don't need an owned copy.
    pub fn source_ref(&self) -> &str {
        &self.source
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fortran::ast::NodeKind;
    use crate::fortran::testing::sample_path;

    #[test]
    fn test_from_string() {
        let loader = SourceLoader::from_string("x = 1\n");
        assert_eq!(loader.source(), "x = 1\n");
        assert!(loader.path().is_none());
    }

    #[test]
    fn test_from_path() {
        let loader = SourceLoader::from_path(sample_path("subroutine.f90")).unwrap();
        assert!(!loader.source_ref().is_empty());
        assert!(loader.path().is_some());
    }

    #[test]
    fn test_from_path_nonexistent() {
        let err = SourceLoader::from_path("nonexistent.f90").err().unwrap();
        assert!(matches!(err, LoaderError::IoError(ref msg) if msg.starts_with("nonexistent.f90")));
    }

    #[test]
    fn test_parse_error_is_wrapped() {
        let err = SourceLoader::from_string("#define FOO 1\n").parse().unwrap_err();
        match err {
            LoaderError::TransformError(inner) => {
                assert_eq!(inner.parse_error().map(|e| e.line()), Some(1));
            }
            other => panic!("expected a transform error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_with_options() {
        let options = ParseOptions {
            drop_using: true,
            ..ParseOptions::default()
        };
        let root = SourceLoader::from_string("use mpi\ncall init\n")
            .parse_with(&options)
            .unwrap();
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].kind, NodeKind::Call);
    }

    #[test]
    fn test_loader_is_reusable() {
        let loader = SourceLoader::from_string("x = 1 +&\n&    2\n");
        assert_eq!(loader.lines().unwrap()[0].text, "x = 1 + 2");
        assert_eq!(loader.parse().unwrap().children.len(), 1);
    }
}

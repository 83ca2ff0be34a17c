//! Vetted sample programs
//!
//! Files live in `samples/` next to the crate manifest. The helpers panic on failure; they
//! are meant for tests only.

use crate::fortran::ast::Node;
use crate::fortran::loader::SourceLoader;
use std::path::{Path, PathBuf};

/// Absolute path of a sample file.
pub fn sample_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("samples").join(name)
}

pub fn load_sample(name: &str) -> SourceLoader {
    let path = sample_path(name);
    SourceLoader::from_path(&path)
        .unwrap_or_else(|e| panic!("Failed to read sample {}: {}", path.display(), e))
}

/// Parse a sample with default settings.
pub fn parse_sample(name: &str) -> Node {
    load_sample(name)
        .parse()
        .unwrap_or_else(|e| panic!("Failed to parse sample {}: {}", name, e))
}

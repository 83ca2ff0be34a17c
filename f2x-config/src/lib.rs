//! Shared configuration loader for the f2x toolchain.
//!
//! `defaults/f2x.default.toml` is embedded into every binary so that docs and runtime
//! behavior stay in sync. Applications layer user files on top of those defaults via
//! [`Loader`] before deserializing into [`F2xConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/f2x.default.toml");

/// Name of the optional per-project file picked up from the working directory.
pub const PROJECT_FILE: &str = "f2x.toml";

/// Top-level configuration consumed by f2x applications.
#[derive(Debug, Clone, Deserialize)]
pub struct F2xConfig {
    pub source: SourceConfig,
    pub classifier: ClassifierConfig,
    pub prune: PruneConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub fixed_form_comments: bool,
}

/// Lines to drop before they reach the rule table.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    pub discard: Vec<String>,
}

/// Tree rewriting passes, applied after a successful parse.
#[derive(Debug, Clone, Deserialize)]
pub struct PruneConfig {
    pub drop_using: bool,
    pub drop_assignments: Vec<String>,
    pub drop_empty_loops: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<F2xConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<F2xConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(config.source.fixed_form_comments);
        assert!(config.classifier.discard.is_empty());
        assert!(!config.prune.drop_using);
        assert_eq!(config.output.format, "dump");
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("prune.drop_using", true)
            .expect("override to apply")
            .set_override("output.format", "json")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(config.prune.drop_using);
        assert_eq!(config.output.format, "json");
    }

    #[test]
    fn file_layers_only_change_their_keys() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[prune]\ndrop_assignments = [\"^debug_\"]").expect("write config");

        let config = Loader::new().with_file(file.path()).build().expect("config to build");
        assert_eq!(config.prune.drop_assignments, vec!["^debug_"]);
        assert!(!config.prune.drop_empty_loops);
        assert!(config.source.fixed_form_comments);
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("does-not-exist/f2x.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, "dump");
    }

    #[test]
    fn missing_required_file_fails() {
        assert!(Loader::new().with_file("does-not-exist/f2x.toml").build().is_err());
    }
}

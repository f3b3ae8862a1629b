//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/orgtree/orgtree.toml`
//! 3. Environment variables: `ORGTREE_*` prefix

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Hierarchy file opened by default by `shell`, `show` and `tree`
    pub data_file: Option<PathBuf>,
    /// Write the tree back to its originating file when the shell exits
    pub autosave: bool,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = config_file_path() {
            if path.exists() {
                builder = builder.add_source(File::from(path));
            }
        }

        builder
            .add_source(Environment::with_prefix("ORGTREE").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Merged settings as TOML, for `config show`.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

/// Global config file location, `None` when no home directory is resolvable.
pub fn config_file_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "orgtree").map(|dirs| dirs.config_dir().join("orgtree.toml"))
}

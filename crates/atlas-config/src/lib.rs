//! # atlas-config
//!
//! Layered configuration loading for Atlas using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ATLAS_*` prefix, `__` as separator)
//! 2. Project-level `.atlas/config.toml`
//! 3. User-level `~/.config/atlas/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ATLAS_PATHS__LORE_DIR` -> `paths.lore_dir`,
//! `ATLAS_RESOLVER__ANCESTRY_DEPTH` -> `resolver.ancestry_depth`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use atlas_config::AtlasConfig;
//!
//! let config = AtlasConfig::load_with_dotenv(std::path::Path::new(".")).expect("config");
//! println!("corpus: {:?}", config.corpus.source_files);
//! ```

mod corpus;
mod error;
mod paths;
mod resolver;

pub use corpus::{CorpusConfig, DEFAULT_SKIP_HEADERS, DEFAULT_SOURCE_FILES};
pub use error::ConfigError;
pub use paths::PathsConfig;
pub use resolver::{DEFAULT_SKIP_NAMES, ResolverConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-local directory holding `config.toml`.
pub const PROJECT_DIR: &str = ".atlas";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AtlasConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
}

impl AtlasConfig {
    /// Load configuration for the project rooted at the current directory.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("."))
    }

    /// Load configuration for the project rooted at `root`.
    pub fn load_from(root: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_for(root).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Loads `root/.env` (falling back to the current directory's `.env`)
    /// before building the figment. This is the typical entry point for the CLI.
    pub fn load_with_dotenv(root: &Path) -> Result<Self, ConfigError> {
        let env_path = root.join(".env");
        if env_path.exists() {
            let _ = dotenvy::from_path(&env_path);
        } else {
            let _ = dotenvy::dotenv();
        }
        Self::load_from(root)
    }

    /// Build the figment provider chain for a project root.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment_for(root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = Self::project_config_path(root);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("ATLAS_").split("__"))
    }

    /// Path to the project-local config file.
    #[must_use]
    pub fn project_config_path(root: &Path) -> PathBuf {
        root.join(PROJECT_DIR).join("config.toml")
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("atlas").join("config.toml"))
    }

    /// Reject values that would make a pipeline run meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.corpus.source_files.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "corpus.source_files".to_string(),
                reason: "at least one source file is required".to_string(),
            });
        }
        if self.resolver.ancestry_depth == 0 {
            return Err(ConfigError::InvalidValue {
                field: "resolver.ancestry_depth".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.resolver.min_name_len == 0 {
            return Err(ConfigError::InvalidValue {
                field: "resolver.min_name_len".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

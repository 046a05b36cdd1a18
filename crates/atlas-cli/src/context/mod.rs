//! Per-invocation state shared by command handlers.

pub mod project_root;

use std::path::{Path, PathBuf};

use anyhow::Context;
use atlas_config::{AtlasConfig, PROJECT_DIR};
use atlas_store::DataStore;

pub use project_root::find_project_root;

/// Resolved project layout plus loaded configuration.
#[derive(Debug)]
pub struct AppContext {
    pub project_root: PathBuf,
    pub config: AtlasConfig,
    pub lore_dir: PathBuf,
    pub store: DataStore,
}

impl AppContext {
    /// Load configuration for `project_root` and resolve its directories.
    pub fn init(project_root: PathBuf) -> anyhow::Result<Self> {
        let config = AtlasConfig::load_with_dotenv(&project_root)
            .with_context(|| format!("failed to load config for {}", project_root.display()))?;
        Ok(Self::with_config(project_root, config))
    }

    #[must_use]
    pub fn with_config(project_root: PathBuf, config: AtlasConfig) -> Self {
        let lore_dir = config.paths.lore_dir_in(&project_root);
        let store = DataStore::new(config.paths.data_dir_in(&project_root));
        tracing::debug!(
            root = %project_root.display(),
            lore_dir = %lore_dir.display(),
            data_dir = %store.data_dir().display(),
            "resolved project layout"
        );
        Self {
            project_root,
            config,
            lore_dir,
            store,
        }
    }
}

/// Resolve the project root from `--project` or by walking up from the
/// current directory. Falls back to the current directory, since a bare
/// corpus checkout needs no `.atlas` directory.
pub fn resolve_project_root(project_override: Option<&str>) -> anyhow::Result<PathBuf> {
    if let Some(path) = project_override {
        let explicit = PathBuf::from(path);

        if explicit
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name == PROJECT_DIR)
        {
            return explicit
                .parent()
                .map(Path::to_path_buf)
                .context("invalid --project path: '.atlas' directory has no parent");
        }

        if explicit.is_dir() {
            return Ok(explicit);
        }

        anyhow::bail!(
            "invalid --project '{}': directory does not exist",
            explicit.display()
        );
    }

    let start = std::env::current_dir().context("failed to read current directory")?;
    Ok(find_project_root(&start).unwrap_or(start))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::{AppContext, resolve_project_root};
    use atlas_config::AtlasConfig;

    #[test]
    fn explicit_project_dir_is_used_as_is() {
        let temp = TempDir::new().expect("tempdir should create");
        let path = temp.path().to_str().expect("utf-8 temp path");
        let root = resolve_project_root(Some(path)).expect("root should resolve");
        assert_eq!(root, temp.path());
    }

    #[test]
    fn explicit_marker_dir_resolves_to_its_parent() {
        let temp = TempDir::new().expect("tempdir should create");
        let marker = temp.path().join(".atlas");
        std::fs::create_dir(&marker).expect(".atlas should create");

        let root = resolve_project_root(marker.to_str()).expect("root should resolve");
        assert_eq!(root, temp.path());
    }

    #[test]
    fn missing_explicit_project_is_an_error() {
        let temp = TempDir::new().expect("tempdir should create");
        let missing = temp.path().join("nowhere");
        assert!(resolve_project_root(missing.to_str()).is_err());
    }

    #[test]
    fn context_resolves_directories_against_the_root() {
        let temp = TempDir::new().expect("tempdir should create");
        let ctx = AppContext::with_config(temp.path().to_path_buf(), AtlasConfig::default());
        assert_eq!(ctx.lore_dir, temp.path().join("lore"));
        assert_eq!(ctx.store.data_dir(), temp.path().join("data"));
    }
}

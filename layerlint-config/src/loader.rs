// Reading build.json and its mainConfigFile from disk

use crate::build_config::BuildConfig;
use crate::error::ConfigError;
use crate::merge::{merge, EffectiveConfig};
use crate::runtime::RuntimeConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads configuration files relative to an explicit working directory
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    working_dir: PathBuf,
}

impl ConfigLoader {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Resolve `path` against the working directory (absolute paths are kept)
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.working_dir.join(path)
    }

    /// Read and parse a build.json file
    pub fn load_build_config(&self, path: impl AsRef<Path>) -> Result<BuildConfig, ConfigError> {
        let path = self.resolve(path);
        log::debug!("reading build config {}", path.display());

        let content = fs::read_to_string(&path).map_err(|source| {
            ConfigError::MissingBuildConfig {
                path: path.clone(),
                source,
            }
        })?;

        let config = BuildConfig::from_str(&content)
            .map_err(|source| ConfigError::MalformedConfig { path, source })?;
        config.check_main_config_file()?;

        Ok(config)
    }

    /// Read the require.js config named by `build`, or an empty one
    pub fn load_runtime_config(&self, build: &BuildConfig) -> Result<RuntimeConfig, ConfigError> {
        let Some(main_config_file) = build.main_config_file() else {
            return Ok(RuntimeConfig::empty());
        };

        let path = self.resolve(main_config_file);
        if fs::metadata(&path).is_err() {
            return Err(ConfigError::MissingRuntimeConfig { path });
        }
        log::debug!("reading require.js config {}", path.display());

        let source = fs::read_to_string(&path).map_err(|source| {
            ConfigError::UnreadableRuntimeConfig {
                path: path.clone(),
                source,
            }
        })?;

        RuntimeConfig::from_source(&source)
            .map_err(|source| ConfigError::MalformedConfig { path, source })
    }

    /// Load both files and merge them
    pub fn load(&self, build_config_path: impl AsRef<Path>) -> Result<EffectiveConfig, ConfigError> {
        let build = self.load_build_config(build_config_path)?;
        let runtime = self.load_runtime_config(&build)?;
        merge(&runtime, &build)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(".")
    }
}

// Lint driver: load, merge, collect, resolve, check

use crate::checker::{file_exists, module_file_path};
use crate::error::LintError;
use crate::names::collect_names;
use crate::resolver::{resolve_module_name, ResolutionSource};
use layerlint_config::{ConfigLoader, EffectiveConfig};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Outcome of checking a single module name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleCheck {
    /// Name as written in the build config
    pub name: String,
    pub source: ResolutionSource,
    /// Files probed, in preference order
    pub candidates: Vec<PathBuf>,
    pub exists: bool,
}

/// Checks build layers against the files under a modules root.
///
/// Every relative path (build config, `mainConfigFile`, modules root) is
/// resolved against the linter's working directory.
#[derive(Debug, Clone)]
pub struct Linter {
    loader: ConfigLoader,
    modules_root: PathBuf,
}

impl Linter {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            loader: ConfigLoader::new(working_dir),
            modules_root: PathBuf::from("."),
        }
    }

    /// Linter rooted at the process working directory
    pub fn from_current_dir() -> Result<Self, LintError> {
        let working_dir = std::env::current_dir().map_err(LintError::WorkingDir)?;
        Ok(Self::new(working_dir))
    }

    /// Directory module names are resolved under (default `.`)
    pub fn with_modules_root(mut self, modules_root: impl Into<PathBuf>) -> Self {
        self.modules_root = modules_root.into();
        self
    }

    pub fn working_dir(&self) -> &Path {
        self.loader.working_dir()
    }

    /// Modules root resolved against the working directory
    pub fn modules_root(&self) -> PathBuf {
        self.loader.resolve(&self.modules_root)
    }

    /// Names of modules declared in the build config that have no file
    pub fn lint(&self, build_config_path: impl AsRef<Path>) -> Result<Vec<String>, LintError> {
        let undefined = self
            .inspect(build_config_path)?
            .into_iter()
            .filter(|check| !check.exists)
            .map(|check| check.name)
            .collect();

        Ok(undefined)
    }

    /// Per-module resolution details for every name in the build config
    pub fn inspect(&self, build_config_path: impl AsRef<Path>) -> Result<Vec<ModuleCheck>, LintError> {
        let build_config_path = build_config_path.as_ref();
        let config = self.loader.load(build_config_path)?;
        let checks = self.check_config(&config);

        let undefined = checks.iter().filter(|check| !check.exists).count();
        log::info!(
            "{}: checked {} modules, {} undefined",
            build_config_path.display(),
            checks.len(),
            undefined
        );

        Ok(checks)
    }

    /// Check every module name of an already merged config
    pub fn check_config(&self, config: &EffectiveConfig) -> Vec<ModuleCheck> {
        let modules_root = self.modules_root();
        collect_names(config.modules())
            .iter()
            .map(|name| check_module(config, name, &modules_root))
            .collect()
    }
}

fn check_module(config: &EffectiveConfig, name: &str, modules_root: &Path) -> ModuleCheck {
    let resolution = resolve_module_name(config, name);
    let candidates: Vec<PathBuf> = resolution
        .names
        .iter()
        .map(|resolved| module_file_path(modules_root, resolved))
        .collect();
    let exists = candidates.iter().any(|candidate| file_exists(candidate));

    if exists {
        log::debug!("{}: found", name);
    } else {
        log::debug!("{}: no file at {:?}", name, candidates);
    }

    ModuleCheck {
        name: name.to_string(),
        source: resolution.source,
        candidates,
        exists,
    }
}

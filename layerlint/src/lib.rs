//! layerlint - find build layer modules that have no file on disk
//!
//! A require.js build config (`build.json`) declares layers: a root module
//! plus modules to include or exclude. This crate resolves each of those
//! names through the loader's `map['*']` and `paths` aliases and reports
//! the ones with no backing `.js` file.
//!
//! ```no_run
//! let undefined = layerlint::lint("build.json", None)?;
//! for name in &undefined {
//!     eprintln!("undefined module: {}", name);
//! }
//! # Ok::<(), layerlint::LintError>(())
//! ```

pub mod checker;
pub mod error;
pub mod linter;
pub mod names;
pub mod resolver;

use std::path::Path;

pub use checker::{file_exists, module_file_path, resolve_and_check, MODULE_EXTENSION};
pub use error::LintError;
pub use layerlint_config::{
    merge, BuildConfig, ConfigError, ConfigLoader, EffectiveConfig, Module, PathTarget,
    RuntimeConfig,
};
pub use linter::{Linter, ModuleCheck};
pub use names::{collect_names, ModuleNameSet};
pub use resolver::{resolve_module_name, Resolution, ResolutionSource};

/// Lint `build_config_path` from the process working directory.
///
/// `modules_root` defaults to the working directory itself.
pub fn lint(
    build_config_path: impl AsRef<Path>,
    modules_root: Option<&Path>,
) -> Result<Vec<String>, LintError> {
    let mut linter = Linter::from_current_dir()?;
    if let Some(root) = modules_root {
        linter = linter.with_modules_root(root);
    }
    linter.lint(build_config_path)
}

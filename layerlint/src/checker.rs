// File existence checks for resolved module names

use crate::resolver::resolve_module_name;
use layerlint_config::EffectiveConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension appended to module names that do not carry one
pub const MODULE_EXTENSION: &str = ".js";

/// Location of the file backing `resolved_name` under `modules_root`.
///
/// Names are always relative to the root: a leading `/` does not escape it.
/// `.js` is appended unless the name already ends with it; only the final
/// extension counts, so `foo.js/bar` becomes `foo.js/bar.js` and
/// `backbone.jsonp` becomes `backbone.jsonp.js`.
pub fn module_file_path(modules_root: &Path, resolved_name: &str) -> PathBuf {
    let relative = resolved_name.trim_start_matches('/');
    let path = modules_root.join(relative);

    if relative.ends_with(MODULE_EXTENSION) {
        return path;
    }

    let mut file_name = path.into_os_string();
    file_name.push(MODULE_EXTENSION);
    PathBuf::from(file_name)
}

/// Stat-based probe; any error reads as "not there"
pub fn file_exists(path: &Path) -> bool {
    fs::metadata(path).is_ok()
}

/// Whether `module_name` resolves to an existing file under `modules_root`
pub fn resolve_and_check(config: &EffectiveConfig, module_name: &str, modules_root: &Path) -> bool {
    resolve_module_name(config, module_name)
        .names
        .iter()
        .any(|name| file_exists(&module_file_path(modules_root, name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use layerlint_config::{merge, BuildConfig, RuntimeConfig};
    use tempfile::tempdir;

    fn plain_config() -> EffectiveConfig {
        let build = BuildConfig::from_str(r#"{"modules": []}"#).unwrap();
        merge(&RuntimeConfig::empty(), &build).unwrap()
    }

    #[test]
    fn test_extension_is_appended() {
        let path = module_file_path(Path::new("."), "app/main");
        assert_eq!(path, Path::new("./app/main.js"));
    }

    #[test]
    fn test_existing_extension_is_kept() {
        let path = module_file_path(Path::new("forks"), "vendor/foo.js");
        assert_eq!(path, Path::new("forks/vendor/foo.js"));
    }

    #[test]
    fn test_dotted_name_gets_extension() {
        let path = module_file_path(Path::new("lib"), "jquery.min");
        assert_eq!(path, Path::new("lib/jquery.min.js"));
    }

    #[test]
    fn test_only_final_extension_counts() {
        assert_eq!(
            module_file_path(Path::new("lib"), "foo.js/bar"),
            Path::new("lib/foo.js/bar.js")
        );
        assert_eq!(
            module_file_path(Path::new("lib"), "backbone.jsonp"),
            Path::new("lib/backbone.jsonp.js")
        );
    }

    #[test]
    fn test_leading_slash_stays_under_root() {
        let path = module_file_path(Path::new("forks"), "/abs/module");
        assert_eq!(path, Path::new("forks/abs/module.js"));
    }

    #[test]
    fn test_file_exists() {
        let tmp = tempdir().expect("tempdir");
        let file = tmp.path().join("foo.js");
        std::fs::write(&file, "define({});").expect("wrote foo.js");

        assert!(file_exists(&file));
        assert!(!file_exists(&tmp.path().join("bar.js")));
    }

    #[test]
    fn test_resolve_and_check() {
        let tmp = tempdir().expect("tempdir");
        std::fs::create_dir_all(tmp.path().join("app")).expect("created app dir");
        std::fs::write(tmp.path().join("app/main.js"), "").expect("wrote main.js");

        let config = plain_config();
        assert!(resolve_and_check(&config, "app/main", tmp.path()));
        assert!(resolve_and_check(&config, "app/main.js", tmp.path()));
        assert!(!resolve_and_check(&config, "app/other", tmp.path()));
    }

    #[test]
    fn test_probe_errors_are_absence() {
        let tmp = tempdir().expect("tempdir");
        std::fs::write(tmp.path().join("file.js"), "").expect("wrote file.js");

        // A path through a regular file fails to stat with ENOTDIR
        let config = plain_config();
        assert!(!resolve_and_check(&config, "file.js/inner", tmp.path()));
    }
}

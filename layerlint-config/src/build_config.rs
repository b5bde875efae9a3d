// Build layer configuration (build.json)

use crate::error::{describe, ConfigError, ReadError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One optimization layer of the build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Root module of the layer
    pub name: String,

    /// Extra modules bundled into the layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,

    /// Modules left out of the layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            include: None,
            exclude: None,
        }
    }

    pub fn with_include<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Every module name this layer refers to: name, includes, then excludes
    pub fn referenced_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str())
            .chain(self.include.iter().flatten().map(String::as_str))
            .chain(self.exclude.iter().flatten().map(String::as_str))
    }

    pub(crate) fn validate(&self, index: usize) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::shape(format!(
                "modules[{}]: name cannot be empty",
                index
            )));
        }

        for (field, entries) in [("include", &self.include), ("exclude", &self.exclude)] {
            if let Some(position) = entries.iter().flatten().position(|n| n.is_empty()) {
                return Err(ConfigError::shape(format!(
                    "modules[{}] ({}): {}[{}] cannot be empty",
                    index, self.name, field, position
                )));
            }
        }

        Ok(())
    }
}

/// The build configuration document.
///
/// Only `mainConfigFile` is interpreted here; every top-level field is kept
/// so the merger can lay it over the require.js configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildConfig {
    main_config_file: Option<String>,
    fields: Map<String, Value>,
}

impl BuildConfig {
    /// Parse build.json contents
    pub fn from_str(content: &str) -> Result<Self, ReadError> {
        match serde_json::from_str::<Value>(content)? {
            Value::Object(fields) => Ok(Self::from_fields(fields)),
            other => Err(ReadError::NotAnObject(describe(&other))),
        }
    }

    pub fn from_fields(fields: Map<String, Value>) -> Self {
        // An empty string means "no main config", like an absent key
        let main_config_file = match fields.get("mainConfigFile") {
            Some(Value::String(path)) if !path.is_empty() => Some(path.clone()),
            _ => None,
        };

        Self {
            main_config_file,
            fields,
        }
    }

    /// Path of the companion require.js config, relative to the working directory
    pub fn main_config_file(&self) -> Option<&str> {
        self.main_config_file.as_deref()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub(crate) fn check_main_config_file(&self) -> Result<(), ConfigError> {
        match self.fields.get("mainConfigFile") {
            None | Some(Value::Null) | Some(Value::String(_)) => Ok(()),
            Some(other) => Err(ConfigError::shape(format!(
                "mainConfigFile must be a string, found {}",
                describe(other)
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_build_config() {
        let json = r#"{
            "modules": [
                { "name": "foo" },
                { "name": "bar", "include": ["common"], "exclude": ["foo"] }
            ]
        }"#;

        let config = BuildConfig::from_str(json).unwrap();
        assert_eq!(config.main_config_file(), None);
        assert!(config.fields().contains_key("modules"));
    }

    #[test]
    fn test_main_config_file() {
        let config = BuildConfig::from_str(r#"{"mainConfigFile": "config.js", "modules": []}"#)
            .unwrap();
        assert_eq!(config.main_config_file(), Some("config.js"));

        let config = BuildConfig::from_str(r#"{"mainConfigFile": "", "modules": []}"#).unwrap();
        assert_eq!(config.main_config_file(), None);
    }

    #[test]
    fn test_main_config_file_shape() {
        let config = BuildConfig::from_str(r#"{"mainConfigFile": 3}"#).unwrap();
        assert!(matches!(
            config.check_main_config_file(),
            Err(ConfigError::ConfigShape(_))
        ));
    }

    #[test]
    fn test_not_an_object() {
        assert!(matches!(
            BuildConfig::from_str("[]"),
            Err(ReadError::NotAnObject("an array"))
        ));
        assert!(matches!(
            BuildConfig::from_str("{ modules: [] }"),
            Err(ReadError::Json(_))
        ));
    }

    #[test]
    fn test_referenced_names_order() {
        let module = Module::new("app")
            .with_include(["common", "util"])
            .with_exclude(["vendor/jquery"]);

        let names: Vec<_> = module.referenced_names().collect();
        assert_eq!(names, vec!["app", "common", "util", "vendor/jquery"]);
    }

    #[test]
    fn test_module_validation() {
        assert!(Module::new("app").validate(0).is_ok());
        assert!(Module::new("").validate(0).is_err());

        let err = Module::new("app")
            .with_include(["ok", ""])
            .validate(2)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid config: modules[2] (app): include[1] cannot be empty"
        );
    }
}

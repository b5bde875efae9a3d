// Overlay of the build config onto the require.js config

use crate::build_config::{BuildConfig, Module};
use crate::error::{describe, ConfigError};
use crate::runtime::RuntimeConfig;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Scope key of the `map` table that applies to every module
pub const WILDCARD_SCOPE: &str = "*";

/// Replacement for the first segment of a module name (`paths` entry)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathTarget {
    Single(String),
    /// require.js fallback list, tried in order
    Fallbacks(Vec<String>),
}

impl PathTarget {
    pub fn targets(&self) -> &[String] {
        match self {
            PathTarget::Single(target) => std::slice::from_ref(target),
            PathTarget::Fallbacks(targets) => targets,
        }
    }
}

impl From<&str> for PathTarget {
    fn from(target: &str) -> Self {
        PathTarget::Single(target.to_string())
    }
}

/// Build config laid over the runtime config, with the fields the linter
/// needs pulled out into typed form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectiveConfig {
    modules: Vec<Module>,
    paths: BTreeMap<String, PathTarget>,
    wildcard_map: BTreeMap<String, String>,
    fields: Map<String, Value>,
}

impl EffectiveConfig {
    /// Build layers, always taken from the build config
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Alias table keyed by first path segment
    pub fn paths(&self) -> &BTreeMap<String, PathTarget> {
        &self.paths
    }

    /// `map['*']`: full module name to replacement module name
    pub fn wildcard_map(&self) -> &BTreeMap<String, String> {
        &self.wildcard_map
    }

    /// Any merged top-level field, typed or not
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Shallow merge: every top-level field of `build` replaces the same field
/// of `runtime`; `modules` is only ever read from `build`.
pub fn merge(runtime: &RuntimeConfig, build: &BuildConfig) -> Result<EffectiveConfig, ConfigError> {
    let mut fields = runtime.fields().clone();
    if fields.remove("modules").is_some() {
        log::warn!("ignoring 'modules' in require.js config, layers come from the build config");
    }
    for (key, value) in build.fields() {
        fields.insert(key.clone(), value.clone());
    }

    let modules = modules_field(&fields)?;
    let paths = paths_field(&fields)?;
    let wildcard_map = wildcard_map_field(&fields)?;

    log::debug!(
        "effective config: {} layers, {} path aliases, {} wildcard map entries",
        modules.len(),
        paths.len(),
        wildcard_map.len()
    );

    Ok(EffectiveConfig {
        modules,
        paths,
        wildcard_map,
        fields,
    })
}

fn modules_field(fields: &Map<String, Value>) -> Result<Vec<Module>, ConfigError> {
    let value = match fields.get("modules") {
        Some(value @ Value::Array(_)) => value,
        Some(other) => {
            return Err(ConfigError::shape(format!(
                "modules must be an array, found {}",
                describe(other)
            )))
        }
        None => return Err(ConfigError::shape("build config has no modules")),
    };

    let modules: Vec<Module> = serde_json::from_value(value.clone())
        .map_err(|e| ConfigError::shape(format!("modules: {}", e)))?;

    for (index, module) in modules.iter().enumerate() {
        module.validate(index)?;
    }

    Ok(modules)
}

fn paths_field(fields: &Map<String, Value>) -> Result<BTreeMap<String, PathTarget>, ConfigError> {
    let entries = match fields.get("paths") {
        None | Some(Value::Null) => return Ok(BTreeMap::new()),
        Some(Value::Object(entries)) => entries,
        Some(other) => {
            return Err(ConfigError::shape(format!(
                "paths must be an object, found {}",
                describe(other)
            )))
        }
    };

    Ok(typed_entries(entries, "paths"))
}

fn wildcard_map_field(fields: &Map<String, Value>) -> Result<BTreeMap<String, String>, ConfigError> {
    let scopes = match fields.get("map") {
        None | Some(Value::Null) => return Ok(BTreeMap::new()),
        Some(Value::Object(scopes)) => scopes,
        Some(other) => {
            return Err(ConfigError::shape(format!(
                "map must be an object, found {}",
                describe(other)
            )))
        }
    };

    for scope in scopes.keys().filter(|k| k.as_str() != WILDCARD_SCOPE) {
        log::warn!("map scope '{}' is ignored, only '*' is applied", scope);
    }

    match scopes.get(WILDCARD_SCOPE) {
        None | Some(Value::Null) => Ok(BTreeMap::new()),
        Some(Value::Object(entries)) => Ok(typed_entries(entries, "map['*']")),
        Some(other) => Err(ConfigError::shape(format!(
            "map['*'] must be an object, found {}",
            describe(other)
        ))),
    }
}

/// Entries of an alias table that deserialize to `T`.
///
/// Values the reader could not evaluate come through as `null` and are
/// dropped, as is anything else of the wrong type.
fn typed_entries<T>(entries: &Map<String, Value>, table: &str) -> BTreeMap<String, T>
where
    T: serde::de::DeserializeOwned,
{
    entries
        .iter()
        .filter_map(|(key, value)| match T::deserialize(value) {
            Ok(target) => Some((key.clone(), target)),
            Err(_) => {
                log::warn!("{}: ignoring '{}', found {}", table, key, describe(value));
                None
            }
        })
        .collect()
}

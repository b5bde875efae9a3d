// require.js runtime configuration (mainConfigFile)

use crate::error::ReadError;
use crate::reader::read_config_source;
use serde_json::{Map, Value};

/// The module loader's own configuration, as read from `mainConfigFile`.
///
/// Empty when the build config does not name one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuntimeConfig {
    fields: Map<String, Value>,
}

impl RuntimeConfig {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a require.js config source (JavaScript or JSON)
    pub fn from_source(source: &str) -> Result<Self, ReadError> {
        read_config_source(source).map(Self::from_fields)
    }

    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty() {
        assert!(RuntimeConfig::empty().is_empty());
    }

    #[test]
    fn test_from_source() {
        let config =
            RuntimeConfig::from_source("require.config({ paths: { vendor: 'vendor' } });")
                .unwrap();
        assert_eq!(config.fields().get("paths"), Some(&json!({"vendor": "vendor"})));
    }
}

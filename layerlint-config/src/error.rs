// Error types for configuration loading

use layerlint_lexer::LexError;
use std::path::PathBuf;
use thiserror::Error;

/// Line/column position inside a configuration source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl SourceLocation {
    /// Convert a byte offset into a 1-based line/column pair
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = source.get(..offset).unwrap_or(source);
        let line = before.matches('\n').count() + 1;
        let column = match before.rfind('\n') {
            Some(newline) => before[newline + 1..].chars().count() + 1,
            None => before.chars().count() + 1,
        };

        Self { line, column }
    }
}

/// Failure to turn file contents into a configuration document
#[derive(Debug, Error)]
pub enum ReadError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("invalid token at {location}")]
    Lex {
        location: SourceLocation,
        #[source]
        source: LexError,
    },

    #[error("syntax error at {location}: {message}")]
    Syntax {
        location: SourceLocation,
        message: String,
    },

    #[error("no require.js configuration object found")]
    NoConfigObject,

    #[error("expected a configuration object, found {0}")]
    NotAnObject(&'static str),
}

/// Errors that abort a lint run before any module is checked
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The build config could not be read (usually: it does not exist)
    #[error("failed to read build config \"{path}\": {source}")]
    MissingBuildConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `mainConfigFile` names a file that is not there
    #[error("require.js config file does not exist at \"{path}\"")]
    MissingRuntimeConfig { path: PathBuf },

    #[error("failed to read require.js config file \"{path}\": {source}")]
    UnreadableRuntimeConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config \"{path}\": {source}")]
    MalformedConfig {
        path: PathBuf,
        #[source]
        source: ReadError,
    },

    /// Well-formed data that does not have the expected structure
    #[error("invalid config: {0}")]
    ConfigShape(String),
}

impl ConfigError {
    pub(crate) fn shape(message: impl Into<String>) -> Self {
        ConfigError::ConfigShape(message.into())
    }

    /// True when the file itself was absent, as opposed to unreadable or invalid
    pub fn is_not_found(&self) -> bool {
        match self {
            ConfigError::MissingBuildConfig { source, .. } => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            ConfigError::MissingRuntimeConfig { .. } => true,
            _ => false,
        }
    }
}

pub(crate) fn describe(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

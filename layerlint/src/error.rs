use layerlint_config::ConfigError;
use thiserror::Error;

/// Errors that abort a lint run; undefined modules are never errors
#[derive(Debug, Error)]
pub enum LintError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to determine the current working directory: {0}")]
    WorkingDir(#[source] std::io::Error),
}

impl LintError {
    pub fn config_error(&self) -> Option<&ConfigError> {
        match self {
            LintError::Config(err) => Some(err),
            LintError::WorkingDir(_) => None,
        }
    }
}

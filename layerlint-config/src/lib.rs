// layerlint-config - build layer and require.js configuration

pub mod build_config;
pub mod error;
pub mod loader;
pub mod merge;
pub mod reader;
pub mod runtime;

pub use build_config::{BuildConfig, Module};
pub use error::{ConfigError, ReadError, SourceLocation};
pub use loader::ConfigLoader;
pub use merge::{merge, EffectiveConfig, PathTarget, WILDCARD_SCOPE};
pub use reader::read_config_source;
pub use runtime::RuntimeConfig;

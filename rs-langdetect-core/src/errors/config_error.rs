//! Configuration errors.

/// Errors raised while loading a [`LoaderConfig`](crate::config::LoaderConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("Cannot read configuration: {0}")]
	Io(#[from] std::io::Error),

	#[error("Invalid configuration: {0}")]
	Parse(#[from] serde_json::Error),

	#[error("Invalid profile directory '{0}'")]
	InvalidProfileDir(String),
}

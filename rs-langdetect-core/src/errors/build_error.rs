//! Profile building errors.

use std::path::PathBuf;

use super::ProfileError;

/// Errors raised while building a profile from a corpus file.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
	#[error("Cannot read corpus {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error(transparent)]
	Profile(#[from] ProfileError),
}

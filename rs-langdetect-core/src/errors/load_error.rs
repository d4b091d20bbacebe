//! Bulk loading errors.
//!
//! Every variant names the language or folder at fault.

use std::io;
use std::path::PathBuf;

use super::{CodecError, LanguageIdError};

/// Errors raised while loading a set of profiles.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
	#[error("No language profile for '{language}' at {path}")]
	NotFound { language: String, path: String },

	#[error("Cannot read profile for '{language}' at {path}: {source}")]
	Unreadable {
		language: String,
		path: String,
		#[source]
		source: io::Error,
	},

	#[error("Broken profile for '{language}' at {path}: {source}")]
	Malformed {
		language: String,
		path: String,
		#[source]
		source: CodecError,
	},

	#[error("Profile at {path} is named '{found}', expected '{language}'")]
	NameMismatch { language: String, path: String, found: String },

	#[error(transparent)]
	InvalidLanguage(#[from] LanguageIdError),

	#[error("No such folder: {0}")]
	MissingFolder(PathBuf),

	#[error("Failed reading from folder {path}: {source}")]
	Folder {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
}

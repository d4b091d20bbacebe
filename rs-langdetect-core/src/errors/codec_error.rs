//! Profile serialization errors.

use std::io;

/// Errors raised while reading or writing a single profile.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
	#[error("I/O error: {0}")]
	Io(#[from] io::Error),

	#[error("Malformed profile: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Profile has no name")]
	MissingName,

	#[error("Profile '{language}' tracks unsupported gram lengths {lengths:?}")]
	InvalidGramLengths { language: String, lengths: Vec<usize> },

	#[error("Invalid entry '{gram}' in profile '{language}': {reason}")]
	InvalidEntry { language: String, gram: String, reason: String },
}

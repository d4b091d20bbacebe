//! Aggregation errors.

/// Errors raised while building or restoring an
/// [`NgramFrequencyData`](crate::model::frequency_data::NgramFrequencyData).
#[derive(Debug, thiserror::Error)]
pub enum FrequencyError {
	#[error("No language profiles provided")]
	NoProfiles,

	#[error("No gram lengths provided")]
	NoGramLengths,

	#[error("Language profile at position {index} has no name")]
	UnnamedProfile { index: usize },

	#[error("Language '{0}' provided more than once")]
	DuplicateLanguage(String),

	#[error("The language profile for '{language}' does not contain {length}-grams")]
	MissingGramLength { language: String, length: usize },

	#[error("Corrupt snapshot: {0}")]
	CorruptSnapshot(String),

	#[error("Snapshot encoding error: {0}")]
	Encoding(#[from] postcard::Error),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

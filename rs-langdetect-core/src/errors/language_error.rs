//! Language identifier errors.

/// Errors raised while parsing a language tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LanguageIdError {
	#[error("Empty language tag")]
	Empty,

	#[error("Invalid language tag '{tag}': {reason}")]
	Invalid { tag: String, reason: &'static str },
}

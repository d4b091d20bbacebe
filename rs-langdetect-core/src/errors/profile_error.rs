//! Language profile errors.

/// Errors raised by [`LanguageProfile`](crate::model::language_profile::LanguageProfile)
/// mutations. A rejected call leaves the profile untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
	#[error("Profile has no name, set one before adding n-grams")]
	Unnamed,

	#[error("Profile already named '{0}'")]
	AlreadyNamed(String),

	#[error("N-gram '{gram}' has length {length}, allowed lengths are {allowed:?}")]
	InvalidGramLength { gram: String, length: usize, allowed: Vec<usize> },

	#[error("Unsupported gram length set {0:?}")]
	UnsupportedGramLengths(Vec<usize>),

	#[error("Cannot merge profile '{other}' into '{this}': {reason}")]
	Mismatch { this: String, other: String, reason: &'static str },
}

use std::fmt;
use std::str::FromStr;

use crate::errors::LanguageIdError;

/// Tags of the profiles shipped with the library.
///
/// Update the count in the tests when adding a language.
pub const BUILT_IN_LANGUAGES: [&str; 71] = [
	"af", "an", "ar", "ast", "be", "br", "ca", "bg", "bn", "cs",
	"cy", "da", "de", "el", "en", "es", "et", "eu", "fa", "fi",
	"fr", "ga", "gl", "gu", "he", "hi", "hr", "ht", "hu", "id",
	"is", "it", "ja", "km", "kn", "ko", "lt", "lv", "mk", "ml",
	"mr", "ms", "mt", "ne", "nl", "no", "oc", "pa", "pl", "pt",
	"ro", "ru", "sk", "sl", "so", "sq", "sr", "sv", "sw", "ta",
	"te", "th", "tl", "tr", "uk", "ur", "vi", "wa", "yi", "zh-CN",
	"zh-TW",
];

const MAX_SUBTAG_LENGTH: usize = 8;

/// A validated language identifier in canonical BCP-47 form.
///
/// The canonical tag doubles as the lookup name of the profile resource,
/// so `zh-cn`, `zh_CN` and `ZH-cn` all resolve to the `zh-CN` profile.
///
/// # Invariants
/// - At least one subtag, the first one made of 2 to 8 ASCII letters
/// - Every subtag is 1 to 8 ASCII alphanumerics
/// - Stored in canonical case (`en`, `zh-Hant-TW`, `es-419`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LanguageId {
	tag: String,
}

impl LanguageId {
	/// Parses and canonicalizes a language tag.
	///
	/// `_` is accepted as a subtag separator on input.
	///
	/// # Errors
	/// Returns an error for empty tags, empty subtags, and any character
	/// other than ASCII alphanumerics and separators (dots included).
	pub fn parse(input: &str) -> Result<Self, LanguageIdError> {
		if input.is_empty() {
			return Err(LanguageIdError::Empty);
		}
		let invalid = |reason| LanguageIdError::Invalid { tag: input.to_owned(), reason };

		let mut canonical: Vec<String> = Vec::new();
		for (position, subtag) in input.split(['-', '_']).enumerate() {
			if subtag.is_empty() {
				return Err(invalid("empty subtag"));
			}
			if subtag.len() > MAX_SUBTAG_LENGTH {
				return Err(invalid("subtag longer than 8 characters"));
			}
			if !subtag.chars().all(|c| c.is_ascii_alphanumeric()) {
				return Err(invalid("subtags must be ASCII letters or digits"));
			}
			if position == 0 {
				if subtag.len() < 2 || !subtag.chars().all(|c| c.is_ascii_alphabetic()) {
					return Err(invalid("primary subtag must be 2 to 8 letters"));
				}
				canonical.push(subtag.to_ascii_lowercase());
			} else {
				canonical.push(Self::canonical_subtag(subtag));
			}
		}

		Ok(Self { tag: canonical.join("-") })
	}

	/// Case convention of BCP-47 for a non-primary subtag.
	fn canonical_subtag(subtag: &str) -> String {
		let alphabetic = subtag.chars().all(|c| c.is_ascii_alphabetic());
		let numeric = subtag.chars().all(|c| c.is_ascii_digit());
		match subtag.len() {
			// Script: Hant, Latn
			4 if alphabetic => {
				let lower = subtag.to_ascii_lowercase();
				let mut chars = lower.chars();
				match chars.next() {
					Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
					None => lower,
				}
			}
			// Region: CN, 419
			2 if alphabetic => subtag.to_ascii_uppercase(),
			3 if numeric => subtag.to_owned(),
			_ => subtag.to_ascii_lowercase(),
		}
	}

	/// Returns the identifiers of every built-in profile.
	pub fn built_in() -> Vec<LanguageId> {
		BUILT_IN_LANGUAGES
			.iter()
			.map(|tag| Self { tag: (*tag).to_owned() })
			.collect()
	}

	/// Returns `true` if the string parses as a language identifier.
	pub fn is_valid(input: &str) -> bool {
		Self::parse(input).is_ok()
	}

	/// Canonical tag, e.g. `zh-CN`.
	pub fn as_str(&self) -> &str {
		&self.tag
	}

	/// Primary language subtag, e.g. `zh` for `zh-CN`.
	pub fn primary(&self) -> &str {
		self.tag.split('-').next().unwrap_or(&self.tag)
	}
}

impl fmt::Display for LanguageId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.tag)
	}
}

impl FromStr for LanguageId {
	type Err = LanguageIdError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl AsRef<str> for LanguageId {
	fn as_ref(&self) -> &str {
		&self.tag
	}
}

use std::collections::{BTreeSet, HashMap, HashSet};
use std::ops::Index;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::language_profile::{LanguageProfile, MAX_GRAM_LENGTH};
use crate::errors::FrequencyError;

/// Relative frequencies of one n-gram, one slot per language.
///
/// Slot `i` belongs to the `i`-th language of the owning
/// [`NgramFrequencyData::language_list`]. Languages that never saw the
/// n-gram hold exactly `0.0`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(transparent)]
pub struct ProbabilityVector(Box<[f64]>);

impl ProbabilityVector {
	fn zeroed(languages: usize) -> Self {
		Self(vec![0.0; languages].into_boxed_slice())
	}

	/// Writes the slot of the language at `index`.
	///
	/// # Panics
	/// Panics if `index` is not a slot of this vector: slots and language
	/// positions must stay in lockstep.
	fn set(&mut self, index: usize, value: f64) {
		assert!(
			index < self.0.len(),
			"language index {} outside a vector of {} languages",
			index,
			self.0.len()
		);
		self.0[index] = value;
	}

	/// Number of slots, equal to the number of languages.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Frequency in the language at `index`, `None` past the end.
	pub fn get(&self, index: usize) -> Option<f64> {
		self.0.get(index).copied()
	}

	pub fn as_slice(&self) -> &[f64] {
		&self.0
	}

	pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
		self.0.iter().copied()
	}

	/// Index of the language with the highest frequency (first one on ties).
	pub fn max_language(&self) -> Option<usize> {
		let mut best: Option<(usize, f64)> = None;
		for (index, value) in self.iter().enumerate() {
			if best.is_none_or(|(_, max)| value > max) {
				best = Some((index, value));
			}
		}
		best.map(|(index, _)| index)
	}
}

impl Index<usize> for ProbabilityVector {
	type Output = f64;

	fn index(&self, index: usize) -> &f64 {
		&self.0[index]
	}
}

/// Cross-language n-gram frequency table built from several profiles.
///
/// For every n-gram it knows the languages in which it occurs, and how
/// frequent it is there relative to the other n-grams of the same length.
///
/// # Invariants
/// - `languages` keeps the order of the profiles given at construction
/// - Every vector has exactly `languages.len()` slots
/// - Every vector has at least one slot > 0: unknown n-grams have no entry
///
/// Immutable once built: share it (e.g. behind an `Arc`) and build a new
/// one to refresh the data. Deserialization checks the invariants.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(try_from = "RawFrequencyData")]
pub struct NgramFrequencyData {
	/// Language identifiers, in slot order.
	languages: Vec<String>,
	/// N-gram to per-language relative frequency.
	table: HashMap<String, ProbabilityVector>,
	/// Gram lengths the table was built for.
	gram_lengths: BTreeSet<usize>,
}

/// Unchecked serialized form of [`NgramFrequencyData`], same field order.
#[derive(Deserialize)]
struct RawFrequencyData {
	languages: Vec<String>,
	table: HashMap<String, ProbabilityVector>,
	gram_lengths: BTreeSet<usize>,
}

impl TryFrom<RawFrequencyData> for NgramFrequencyData {
	type Error = FrequencyError;

	fn try_from(raw: RawFrequencyData) -> Result<Self, Self::Error> {
		let data = Self { languages: raw.languages, table: raw.table, gram_lengths: raw.gram_lengths };
		data.validate()?;
		Ok(data)
	}
}

impl NgramFrequencyData {
	/// Builds the table from `profiles` for n-grams of the given lengths.
	///
	/// The language order is the iteration order of `profiles`.
	///
	/// # Errors
	/// - [`FrequencyError::NoProfiles`] / [`FrequencyError::NoGramLengths`]
	///   on empty input
	/// - [`FrequencyError::UnnamedProfile`] for a profile without name
	/// - [`FrequencyError::DuplicateLanguage`] if two profiles share a name.
	///   Stricter than accepting duplicates: two slots for one language
	///   would make [`language_index`](Self::language_index) ambiguous.
	/// - [`FrequencyError::MissingGramLength`] if a profile does not track
	///   one of the requested lengths
	pub fn create<'a, P, L>(profiles: P, gram_lengths: L) -> Result<Self, FrequencyError>
	where
		P: IntoIterator<Item = &'a LanguageProfile>,
		L: IntoIterator<Item = usize>,
	{
		let profiles: Vec<&LanguageProfile> = profiles.into_iter().collect();
		let gram_lengths: BTreeSet<usize> = gram_lengths.into_iter().collect();
		if profiles.is_empty() {
			return Err(FrequencyError::NoProfiles);
		}
		if gram_lengths.is_empty() {
			return Err(FrequencyError::NoGramLengths);
		}

		let mut languages = Vec::with_capacity(profiles.len());
		let mut seen = HashSet::new();
		for (index, profile) in profiles.iter().enumerate() {
			let language = profile.name().ok_or(FrequencyError::UnnamedProfile { index })?;
			if !seen.insert(language) {
				return Err(FrequencyError::DuplicateLanguage(language.to_owned()));
			}
			if let Some(&length) = gram_lengths.iter().find(|l| !profile.tracks_length(**l)) {
				return Err(FrequencyError::MissingGramLength { language: language.to_owned(), length });
			}
			languages.push(language.to_owned());
		}

		let mut table: HashMap<String, ProbabilityVector> = HashMap::new();
		for (index, profile) in profiles.iter().enumerate() {
			for &length in &gram_lengths {
				let total = profile.total_occurrences(length) as f64;
				for (gram, count) in profile.grams_of_length(length) {
					table
						.entry(gram.to_owned())
						.or_insert_with(|| ProbabilityVector::zeroed(languages.len()))
						.set(index, count as f64 / total);
				}
			}
			debug!("Added profile '{}' at slot {}", languages[index], index);
		}

		info!(
			"Built n-gram frequency table: {} languages, {} n-grams, lengths {:?}",
			languages.len(),
			table.len(),
			gram_lengths
		);
		Ok(Self { languages, table, gram_lengths })
	}

	/// All languages, in exactly the slot order of the probability vectors.
	pub fn language_list(&self) -> &[String] {
		&self.languages
	}

	/// Language of slot `index`.
	pub fn language(&self, index: usize) -> Option<&str> {
		self.languages.get(index).map(String::as_str)
	}

	/// Slot of a language in the probability vectors.
	pub fn language_index(&self, language: &str) -> Option<usize> {
		self.languages.iter().position(|l| l == language)
	}

	pub fn language_count(&self) -> usize {
		self.languages.len()
	}

	/// Frequencies of `ngram` per language.
	///
	/// Returns `None` if no profile knows the n-gram at one of the
	/// requested lengths. A returned vector always has a nonzero slot.
	pub fn probabilities(&self, ngram: &str) -> Option<&ProbabilityVector> {
		self.table.get(ngram)
	}

	pub fn contains(&self, ngram: &str) -> bool {
		self.table.contains_key(ngram)
	}

	/// Gram lengths the table was built for.
	pub fn gram_lengths(&self) -> impl Iterator<Item = usize> + '_ {
		self.gram_lengths.iter().copied()
	}

	/// Number of distinct n-grams.
	pub fn len(&self) -> usize {
		self.table.len()
	}

	pub fn is_empty(&self) -> bool {
		self.table.is_empty()
	}

	/// Iterates over every n-gram with its vector, in arbitrary order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &ProbabilityVector)> {
		self.table.iter().map(|(gram, vector)| (gram.as_str(), vector))
	}

	/// Serializes the table into a compact binary snapshot.
	pub fn to_bytes(&self) -> Result<Vec<u8>, FrequencyError> {
		Ok(postcard::to_stdvec(self)?)
	}

	/// Restores a table from [`to_bytes`](Self::to_bytes) output.
	///
	/// # Errors
	/// Returns an error if the bytes do not decode or break the
	/// table invariants.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, FrequencyError> {
		let raw: RawFrequencyData = postcard::from_bytes(bytes)?;
		Self::try_from(raw)
	}

	/// Writes a binary snapshot to `path`.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), FrequencyError> {
		std::fs::write(&path, self.to_bytes()?)?;
		debug!("Saved n-gram frequency snapshot to {}", path.as_ref().display());
		Ok(())
	}

	/// Loads a binary snapshot written by [`save`](Self::save).
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, FrequencyError> {
		let bytes = std::fs::read(&path)?;
		let data = Self::from_bytes(&bytes)?;
		info!(
			"Loaded n-gram frequency snapshot from {}: {} languages, {} n-grams",
			path.as_ref().display(),
			data.languages.len(),
			data.table.len()
		);
		Ok(data)
	}

	fn validate(&self) -> Result<(), FrequencyError> {
		if self.languages.is_empty() {
			return Err(FrequencyError::CorruptSnapshot("no languages".to_owned()));
		}
		if self.gram_lengths.is_empty() || self.gram_lengths.iter().any(|l| !(1..=MAX_GRAM_LENGTH).contains(l)) {
			return Err(FrequencyError::CorruptSnapshot(format!("invalid gram lengths {:?}", self.gram_lengths)));
		}
		for (gram, vector) in &self.table {
			if !self.gram_lengths.contains(&gram.chars().count()) {
				return Err(FrequencyError::CorruptSnapshot(format!("'{}' has an untracked length", gram)));
			}
			if vector.len() != self.languages.len() {
				return Err(FrequencyError::CorruptSnapshot(format!(
					"'{}' has {} slots for {} languages",
					gram,
					vector.len(),
					self.languages.len()
				)));
			}
			if !vector.iter().any(|value| value > 0.0) || vector.iter().any(|value| value.is_nan() || value < 0.0) {
				return Err(FrequencyError::CorruptSnapshot(format!("'{}' has invalid frequencies", gram)));
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn profile(name: &str, grams: &[(&str, usize)]) -> LanguageProfile {
		let mut profile = LanguageProfile::new(name);
		for (gram, count) in grams {
			for _ in 0..*count {
				profile.observe(gram).unwrap();
			}
		}
		profile
	}

	fn en_fr() -> (LanguageProfile, LanguageProfile) {
		(profile("en", &[("th", 10), ("he", 5)]), profile("fr", &[("le", 8)]))
	}

	#[test]
	fn relative_frequencies_per_language() {
		let (en, fr) = en_fr();
		let data = NgramFrequencyData::create([&en, &fr], [2]).unwrap();

		assert_eq!(data.language_list(), ["en", "fr"]);
		assert_eq!(data.probabilities("th").unwrap().as_slice(), [10.0 / 15.0, 0.0]);
		assert_eq!(data.probabilities("he").unwrap().as_slice(), [5.0 / 15.0, 0.0]);
		assert_eq!(data.probabilities("le").unwrap().as_slice(), [0.0, 1.0]);
		assert!(data.probabilities("xy").is_none());
		assert_eq!(data.len(), 3);
	}

	#[test]
	fn keeps_input_order() {
		let (en, fr) = en_fr();
		let data = NgramFrequencyData::create([&fr, &en], [2]).unwrap();
		assert_eq!(data.language(0), Some("fr"));
		assert_eq!(data.language(1), Some("en"));
		assert_eq!(data.language(2), None);
		assert_eq!(data.language_index("en"), Some(1));
		assert_eq!(data.probabilities("le").unwrap().as_slice(), [1.0, 0.0]);
	}

	#[test]
	fn ignores_lengths_not_requested() {
		let en = profile("en", &[("t", 4), ("th", 2), ("the", 1)]);
		let data = NgramFrequencyData::create([&en], [3]).unwrap();
		assert!(data.probabilities("t").is_none());
		assert!(data.probabilities("th").is_none());
		assert_eq!(data.probabilities("the").unwrap().as_slice(), [1.0]);
	}

	#[test]
	fn rejects_empty_input() {
		let (en, _) = en_fr();
		let none: [&LanguageProfile; 0] = [];
		assert!(matches!(NgramFrequencyData::create(none, [2]), Err(FrequencyError::NoProfiles)));
		assert!(matches!(
			NgramFrequencyData::create([&en], Vec::<usize>::new()),
			Err(FrequencyError::NoGramLengths)
		));
	}

	#[test]
	fn rejects_untracked_length_naming_the_language() {
		let en = profile("en", &[("th", 1)]);
		let fr = LanguageProfile::with_gram_lengths("fr", [1, 2]).unwrap();
		match NgramFrequencyData::create([&en, &fr], [2, 3]) {
			Err(FrequencyError::MissingGramLength { language, length }) => {
				assert_eq!(language, "fr");
				assert_eq!(length, 3);
			}
			other => panic!("unexpected result: {:?}", other),
		}
	}

	#[test]
	fn rejects_unnamed_and_duplicate_profiles() {
		let (en, _) = en_fr();
		let unnamed = LanguageProfile::unnamed();
		assert!(matches!(
			NgramFrequencyData::create([&en, &unnamed], [2]),
			Err(FrequencyError::UnnamedProfile { index: 1 })
		));
		assert!(matches!(
			NgramFrequencyData::create([&en, &en], [2]),
			Err(FrequencyError::DuplicateLanguage(_))
		));
	}

	#[test]
	fn snapshot_round_trip() {
		let (en, fr) = en_fr();
		let data = NgramFrequencyData::create([&en, &fr], [1, 2]).unwrap();
		let restored = NgramFrequencyData::from_bytes(&data.to_bytes().unwrap()).unwrap();
		assert_eq!(restored, data);

		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("frequencies.bin");
		data.save(&path).unwrap();
		assert_eq!(NgramFrequencyData::load(&path).unwrap(), data);
	}

	#[test]
	fn snapshot_rejects_garbage() {
		assert!(NgramFrequencyData::from_bytes(&[0xff, 0xff, 0xff]).is_err());
	}

	#[test]
	fn snapshot_rejects_broken_invariants() {
		let (en, fr) = en_fr();
		let data = NgramFrequencyData::create([&en, &fr], [2]).unwrap();

		let mut short = data.clone();
		short.table.insert("xy".to_owned(), ProbabilityVector::zeroed(1));
		let mut zeroed = data.clone();
		zeroed.table.insert("xy".to_owned(), ProbabilityVector::zeroed(2));
		let mut untracked = data.clone();
		let mut vector = ProbabilityVector::zeroed(2);
		vector.set(0, 1.0);
		untracked.table.insert("xyz".to_owned(), vector);

		for broken in [short, zeroed, untracked] {
			let bytes = broken.to_bytes().unwrap();
			assert!(matches!(NgramFrequencyData::from_bytes(&bytes), Err(FrequencyError::CorruptSnapshot(_))));
		}
	}

	#[test]
	fn deserialization_checks_invariants() {
		let (en, fr) = en_fr();
		let data = NgramFrequencyData::create([&en, &fr], [2]).unwrap();
		let json = serde_json::to_string(&data).unwrap();
		assert_eq!(serde_json::from_str::<NgramFrequencyData>(&json).unwrap(), data);

		let broken = [
			r#"{"languages":["en"],"table":{"ab":[0.5,0.5]},"gram_lengths":[2]}"#,
			r#"{"languages":["en"],"table":{"ab":[0.0]},"gram_lengths":[2]}"#,
			r#"{"languages":["en"],"table":{"abc":[1.0]},"gram_lengths":[2]}"#,
			r#"{"languages":[],"table":{},"gram_lengths":[2]}"#,
		];
		for json in broken {
			assert!(serde_json::from_str::<NgramFrequencyData>(json).is_err(), "{}", json);
		}
	}

	#[test]
	fn max_language_picks_highest_slot() {
		let en = profile("en", &[("ab", 1), ("cd", 3)]);
		let fr = profile("fr", &[("ab", 1)]);
		let data = NgramFrequencyData::create([&en, &fr], [2]).unwrap();
		assert_eq!(data.probabilities("ab").unwrap().max_language(), Some(1));
		assert_eq!(data.probabilities("cd").unwrap().max_language(), Some(0));
		assert_eq!(data.probabilities("cd").unwrap()[0], 0.75);
	}
}

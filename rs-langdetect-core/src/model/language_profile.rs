use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::debug;

use super::ngram;
use crate::errors::ProfileError;

/// Longest n-gram a profile can track.
pub const MAX_GRAM_LENGTH: usize = 3;

/// Lengths tracked by [`LanguageProfile::new`].
pub const DEFAULT_GRAM_LENGTHS: [usize; 3] = [1, 2, 3];

/// Strict pruning floor: an n-gram (length > 1) seen fewer than 2 times is
/// always dropped by [`LanguageProfile::prune`]. A count of exactly 2 is kept.
pub const MINIMUM_FREQUENCY: u64 = 2;

/// Share of the average 2-gram count below which a 2-gram is dropped.
///
/// A heuristic of this crate. Profiles produced by other tools may have
/// been pruned with a different rule.
pub const BIGRAM_CUTOFF_RATIO: f64 = 0.05;

/// Share of the average 3-gram count below which a 3-gram is dropped.
///
/// A heuristic of this crate, higher than [`BIGRAM_CUTOFF_RATIO`] since
/// trigrams are sparser and noisier.
pub const TRIGRAM_CUTOFF_RATIO: f64 = 0.10;

/// Relative cutoff for a gram length, `None` for lengths never pruned.
fn cutoff_ratio(length: usize) -> Option<f64> {
	match length {
		2 => Some(BIGRAM_CUTOFF_RATIO),
		3 => Some(TRIGRAM_CUTOFF_RATIO),
		_ => None,
	}
}

/// N-gram occurrence counts of one language.
///
/// # Responsibilities
/// - Count n-gram observations (directly or from raw text)
/// - Keep per-length occurrence totals in sync with the counts
/// - Prune rare long n-grams before the profile is persisted
/// - Merge partial profiles built in parallel
///
/// # Invariants
/// - Every key has a length (in `char`s) contained in `gram_lengths`
/// - Every count is >= 1
/// - `totals[l]` is the sum of the counts of the keys of length `l`
#[derive(Debug, Clone)]
pub struct LanguageProfile {
	/// Language identifier, `None` only while the profile is being assembled.
	name: Option<String>,
	/// Occurrence count per n-gram.
	grams: HashMap<String, u64>,
	/// Tracked n-gram lengths, all within `1..=MAX_GRAM_LENGTH`.
	gram_lengths: BTreeSet<usize>,
	/// Sum of counts per n-gram length.
	totals: BTreeMap<usize, u64>,
	/// Set once `prune` ran. Informational only.
	pruned: bool,
}

impl LanguageProfile {
	/// Creates an empty profile tracking 1, 2 and 3-grams.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: Some(name.into()),
			grams: HashMap::new(),
			gram_lengths: DEFAULT_GRAM_LENGTHS.into_iter().collect(),
			totals: BTreeMap::new(),
			pruned: false,
		}
	}

	/// Creates an empty profile tracking the given n-gram lengths.
	///
	/// # Errors
	/// Returns an error if `lengths` is empty or contains a length outside
	/// `1..=MAX_GRAM_LENGTH`.
	pub fn with_gram_lengths<I>(name: impl Into<String>, lengths: I) -> Result<Self, ProfileError>
	where
		I: IntoIterator<Item = usize>,
	{
		let gram_lengths = Self::validate_lengths(lengths)?;
		Ok(Self { gram_lengths, ..Self::new(name) })
	}

	/// Creates a profile without a name.
	///
	/// It rejects observations until [`set_name`](Self::set_name) is called.
	pub fn unnamed() -> Self {
		Self { name: None, ..Self::new(String::new()) }
	}

	/// Assigns the name of a profile created with [`unnamed`](Self::unnamed).
	///
	/// # Errors
	/// Returns an error if the profile already has a name.
	pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ProfileError> {
		if let Some(existing) = &self.name {
			return Err(ProfileError::AlreadyNamed(existing.clone()));
		}
		self.name = Some(name.into());
		Ok(())
	}

	/// Rebuilds a profile from stored data, recomputing the totals.
	///
	/// Callers are responsible for validating lengths and counts.
	pub(crate) fn restore(
		name: String,
		gram_lengths: BTreeSet<usize>,
		grams: HashMap<String, u64>,
		pruned: bool,
	) -> Self {
		let mut profile = Self { name: Some(name), grams, gram_lengths, totals: BTreeMap::new(), pruned };
		profile.recompute_totals();
		profile
	}

	pub(crate) fn validate_lengths<I>(lengths: I) -> Result<BTreeSet<usize>, ProfileError>
	where
		I: IntoIterator<Item = usize>,
	{
		let lengths: BTreeSet<usize> = lengths.into_iter().collect();
		if lengths.is_empty() || lengths.iter().any(|l| !(1..=MAX_GRAM_LENGTH).contains(l)) {
			return Err(ProfileError::UnsupportedGramLengths(lengths.into_iter().collect()));
		}
		Ok(lengths)
	}

	/// Records one occurrence of `gram`.
	///
	/// - If the n-gram already exists, its count is increased.
	/// - Otherwise, it is created with a count of 1.
	///
	/// # Errors
	/// - [`ProfileError::Unnamed`] if the profile has no name yet
	/// - [`ProfileError::InvalidGramLength`] if the length of `gram` is 0,
	///   above `MAX_GRAM_LENGTH` or not tracked by this profile
	///
	/// The profile is unchanged when an error is returned.
	pub fn observe(&mut self, gram: &str) -> Result<(), ProfileError> {
		if self.name.is_none() {
			return Err(ProfileError::Unnamed);
		}
		let length = gram.chars().count();
		if !self.gram_lengths.contains(&length) {
			return Err(ProfileError::InvalidGramLength {
				gram: gram.to_owned(),
				length,
				allowed: self.gram_lengths.iter().copied().collect(),
			});
		}

		match self.grams.get_mut(gram) {
			Some(count) => *count += 1,
			None => {
				self.grams.insert(gram.to_owned(), 1);
			}
		}
		*self.totals.entry(length).or_insert(0) += 1;
		Ok(())
	}

	/// Observes every tracked n-gram of a piece of training text.
	///
	/// Returns the number of n-grams observed.
	///
	/// # Errors
	/// Returns [`ProfileError::Unnamed`] if the profile has no name yet.
	pub fn observe_text(&mut self, text: &str) -> Result<usize, ProfileError> {
		if self.name.is_none() {
			return Err(ProfileError::Unnamed);
		}
		let lengths: Vec<usize> = self.gram_lengths.iter().copied().collect();
		let grams = ngram::extract(text, &lengths);
		for gram in &grams {
			self.observe(gram)?;
		}
		Ok(grams.len())
	}

	/// Drops rare long n-grams to bound the profile size.
	///
	/// For every tracked length `l > 1`, the average count of the n-grams
	/// of that length is computed and every n-gram whose count is below
	/// `max(MINIMUM_FREQUENCY, average * cutoff_ratio(l))` is removed.
	/// Removing entries raises the average, so the pass is repeated until
	/// it removes nothing. 1-grams are never removed and surviving counts
	/// are unchanged.
	///
	/// The result is a fixed point: pruning it again, whether or not it is
	/// marked as pruned, leaves it unchanged.
	///
	/// # Errors
	/// Returns [`ProfileError::Unnamed`] if the profile has no name.
	pub fn prune(&mut self) -> Result<(), ProfileError> {
		let Some(name) = self.name.clone() else {
			return Err(ProfileError::Unnamed);
		};
		if self.pruned {
			debug!("Profile '{}' is already pruned", name);
		}

		let before = self.grams.len();
		let mut passes = 0;
		loop {
			passes += 1;
			let thresholds = self.cutoff_thresholds();
			let remaining = self.grams.len();
			self.grams.retain(|gram, count| match thresholds.get(&gram.chars().count()) {
				Some(threshold) => (*count as f64) >= *threshold,
				None => true,
			});
			if self.grams.len() == remaining {
				break;
			}
			self.recompute_totals();
		}
		self.pruned = true;

		debug!("Pruned profile '{}': {} -> {} n-grams in {} passes", name, before, self.grams.len(), passes);
		Ok(())
	}

	/// Current pruning threshold of every prunable length present.
	fn cutoff_thresholds(&self) -> HashMap<usize, f64> {
		let mut distinct: BTreeMap<usize, u64> = BTreeMap::new();
		for gram in self.grams.keys() {
			*distinct.entry(gram.chars().count()).or_insert(0) += 1;
		}

		let mut thresholds = HashMap::new();
		for (&length, &count) in &distinct {
			if let Some(ratio) = cutoff_ratio(length) {
				let average = self.total_occurrences(length) as f64 / count as f64;
				thresholds.insert(length, (average * ratio).max(MINIMUM_FREQUENCY as f64));
			}
		}
		thresholds
	}

	/// Merges another profile of the same language into this one.
	///
	/// Counts of matching n-grams are summed. Intended for combining
	/// partial profiles built in parallel.
	///
	/// # Errors
	/// Returns an error if names or gram lengths differ, or if either
	/// profile is already pruned.
	pub fn merge(&mut self, other: &Self) -> Result<(), ProfileError> {
		let this = self.name.clone().unwrap_or_default();
		let mismatch = |reason| ProfileError::Mismatch {
			this: this.clone(),
			other: other.name.clone().unwrap_or_default(),
			reason,
		};
		if self.name.is_none() || self.name != other.name {
			return Err(mismatch("names differ"));
		}
		if self.gram_lengths != other.gram_lengths {
			return Err(mismatch("gram lengths differ"));
		}
		if self.pruned || other.pruned {
			return Err(mismatch("pruned profiles cannot be merged"));
		}

		for (gram, count) in &other.grams {
			*self.grams.entry(gram.clone()).or_insert(0) += count;
		}
		for (length, total) in &other.totals {
			*self.totals.entry(*length).or_insert(0) += total;
		}
		Ok(())
	}

	fn recompute_totals(&mut self) {
		self.totals.clear();
		for (gram, count) in &self.grams {
			*self.totals.entry(gram.chars().count()).or_insert(0) += count;
		}
	}

	/// Language identifier, `None` for an unnamed profile.
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// Count of `gram`, 0 if it was never observed (or was pruned).
	pub fn count(&self, gram: &str) -> u64 {
		self.grams.get(gram).copied().unwrap_or(0)
	}

	/// Sum of the counts of all n-grams of exactly `length` characters.
	pub fn total_occurrences(&self, length: usize) -> u64 {
		self.totals.get(&length).copied().unwrap_or(0)
	}

	/// Tracked n-gram lengths, in ascending order.
	pub fn gram_lengths(&self) -> impl Iterator<Item = usize> + '_ {
		self.gram_lengths.iter().copied()
	}

	pub fn tracks_length(&self, length: usize) -> bool {
		self.gram_lengths.contains(&length)
	}

	/// All stored n-grams with their counts, in arbitrary order.
	pub fn grams(&self) -> impl Iterator<Item = (&str, u64)> {
		self.grams.iter().map(|(gram, count)| (gram.as_str(), *count))
	}

	/// Stored n-grams of exactly `length` characters with their counts.
	pub fn grams_of_length(&self, length: usize) -> impl Iterator<Item = (&str, u64)> {
		self.grams().filter(move |(gram, _)| gram.chars().count() == length)
	}

	/// Number of distinct n-grams.
	pub fn len(&self) -> usize {
		self.grams.len()
	}

	pub fn is_empty(&self) -> bool {
		self.grams.is_empty()
	}

	pub fn is_pruned(&self) -> bool {
		self.pruned
	}
}

/// Profiles are equal when their names, counts and totals match.
impl PartialEq for LanguageProfile {
	fn eq(&self, other: &Self) -> bool {
		self.name == other.name && self.grams == other.grams && self.totals == other.totals
	}
}

impl Eq for LanguageProfile {}

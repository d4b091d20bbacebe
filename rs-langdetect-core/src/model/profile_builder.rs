use std::path::Path;
use std::sync::mpsc;
use std::thread;

use log::{debug, info};

use super::language_profile::{DEFAULT_GRAM_LENGTHS, LanguageProfile};
use crate::errors::{BuildError, ProfileError};
use crate::io::read_file;

/// Number of chunks per CPU core the corpus is split into.
const CHUNKS_PER_CPU: usize = 8;

/// Builds a [`LanguageProfile`] from a training corpus.
///
/// # Behavior
/// - Splits the corpus lines into chunks (CPU cores * factor)
/// - Builds one partial profile per chunk on its own thread
/// - Merges the partial profiles, then prunes if requested
///
/// Merging only sums counts, so the result does not depend on the chunking.
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
	name: String,
	gram_lengths: Vec<usize>,
	prune: bool,
}

impl ProfileBuilder {
	/// Creates a builder for 1, 2 and 3-grams that prunes the result.
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into(), gram_lengths: DEFAULT_GRAM_LENGTHS.to_vec(), prune: true }
	}

	/// Sets the n-gram lengths of the built profile.
	pub fn gram_lengths(mut self, lengths: impl IntoIterator<Item = usize>) -> Self {
		self.gram_lengths = lengths.into_iter().collect();
		self
	}

	/// Whether to prune the profile once built (default `true`).
	pub fn prune(mut self, prune: bool) -> Self {
		self.prune = prune;
		self
	}

	/// Builds the profile from a UTF-8 text file, one sentence per line.
	///
	/// # Errors
	/// Returns an error if the file cannot be read or the builder settings
	/// are invalid.
	pub fn build_from_file<P: AsRef<Path>>(&self, path: P) -> Result<LanguageProfile, BuildError> {
		let lines = read_file(&path).map_err(|source| BuildError::Io { path: path.as_ref().to_path_buf(), source })?;
		info!("Building profile '{}' from {} ({} lines)", self.name, path.as_ref().display(), lines.len());
		Ok(self.build_from_lines(&lines)?)
	}

	/// Builds the profile from in-memory lines.
	///
	/// # Errors
	/// Returns an error if the gram lengths are invalid.
	pub fn build_from_lines<S>(&self, lines: &[S]) -> Result<LanguageProfile, ProfileError>
	where
		S: AsRef<str> + Sync,
	{
		let mut profile = LanguageProfile::with_gram_lengths(self.name.clone(), self.gram_lengths.iter().copied())?;

		if !lines.is_empty() {
			let chunks = num_cpus::get() * CHUNKS_PER_CPU;
			let chunk_size = lines.len().div_ceil(chunks);

			let partials = thread::scope(|scope| {
				let (tx, rx) = mpsc::channel();
				for chunk in lines.chunks(chunk_size) {
					let tx = tx.clone();
					let mut partial = profile.clone();
					scope.spawn(move || {
						let result = chunk
							.iter()
							.try_for_each(|line| partial.observe_text(line.as_ref()).map(|_| ()));
						// The receiver outlives every worker inside the scope
						let _ = tx.send(result.map(|_| partial));
					});
				}
				drop(tx);
				rx.iter().collect::<Vec<_>>()
			});

			debug!("Merging {} partial profiles for '{}'", partials.len(), self.name);
			for partial in partials {
				profile.merge(&partial?)?;
			}
		}

		if self.prune {
			profile.prune()?;
		}
		info!("Built profile '{}' with {} n-grams", self.name, profile.len());
		Ok(profile)
	}
}

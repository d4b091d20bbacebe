//! Textual (JSON) form of a single language profile.
//!
//! ```json
//! {
//!   "name": "en",
//!   "gram_lengths": [1, 2, 3],
//!   "freq": { " t": 1520, "a": 9123, "the": 830 },
//!   "pruned": true
//! }
//! ```
//!
//! Per-length totals are not stored: they are recomputed from `freq` on
//! read. Legacy files carrying an `n_words` array instead of
//! `gram_lengths` are accepted, the array only tells which lengths are
//! tracked.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::errors::CodecError;
use crate::model::language_profile::{DEFAULT_GRAM_LENGTHS, LanguageProfile};

fn is_false(value: &bool) -> bool {
	!*value
}

/// On-disk record of a profile.
#[derive(Serialize, Deserialize, Debug)]
struct ProfileRecord {
	#[serde(default)]
	name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	gram_lengths: Option<Vec<usize>>,
	#[serde(default, skip_serializing)]
	n_words: Option<Vec<u64>>,
	freq: BTreeMap<String, u64>,
	#[serde(default, skip_serializing_if = "is_false")]
	pruned: bool,
}

/// Writes profiles in their textual form.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProfileWriter;

impl ProfileWriter {
	pub fn new() -> Self {
		Self
	}

	/// Writes `profile` to `writer`.
	///
	/// N-grams are written in sorted order so the output is deterministic.
	///
	/// # Errors
	/// Returns [`CodecError::MissingName`] for an unnamed profile, or the
	/// underlying write error.
	pub fn write<W: Write>(&self, profile: &LanguageProfile, writer: W) -> Result<(), CodecError> {
		let name = profile.name().filter(|name| !name.is_empty()).ok_or(CodecError::MissingName)?;
		let record = ProfileRecord {
			name: Some(name.to_owned()),
			gram_lengths: Some(profile.gram_lengths().collect()),
			n_words: None,
			freq: profile.grams().map(|(gram, count)| (gram.to_owned(), count)).collect(),
			pruned: profile.is_pruned(),
		};

		let mut writer = BufWriter::new(writer);
		serde_json::to_writer_pretty(&mut writer, &record)?;
		writer.write_all(b"\n")?;
		writer.flush()?;
		Ok(())
	}

	/// Writes `profile` to a file, atomically.
	///
	/// Parent folders are created; the file is first written next to its
	/// destination, then moved in place.
	pub fn write_to_path<P: AsRef<Path>>(&self, profile: &LanguageProfile, path: P) -> Result<(), CodecError> {
		let path = path.as_ref();
		let parent = match path.parent() {
			Some(parent) if !parent.as_os_str().is_empty() => parent,
			_ => Path::new("."),
		};
		fs::create_dir_all(parent)?;

		let temp_file = NamedTempFile::new_in(parent)?;
		self.write(profile, &temp_file)?;
		temp_file.persist(path).map_err(|e| CodecError::Io(e.error))?;

		debug!("Wrote profile '{}' to {}", profile.name().unwrap_or_default(), path.display());
		Ok(())
	}

	/// Returns the textual form of `profile`.
	pub fn write_to_string(&self, profile: &LanguageProfile) -> Result<String, CodecError> {
		let mut buffer = Vec::new();
		self.write(profile, &mut buffer)?;
		String::from_utf8(buffer).map_err(|e| CodecError::Io(std::io::Error::other(e)))
	}
}

/// Reads profiles from their textual form.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProfileReader;

impl ProfileReader {
	pub fn new() -> Self {
		Self
	}

	/// Reads a profile from UTF-8 JSON.
	///
	/// # Errors
	/// - [`CodecError::Json`] if the input is malformed or truncated
	/// - [`CodecError::MissingName`] if the name is absent or empty
	/// - [`CodecError::InvalidGramLengths`] / [`CodecError::InvalidEntry`]
	///   if a length or a count breaks the profile invariants
	pub fn read<R: Read>(&self, reader: R) -> Result<LanguageProfile, CodecError> {
		let record: ProfileRecord = serde_json::from_reader(BufReader::new(reader))?;
		Self::from_record(record)
	}

	/// Reads a profile from a JSON string.
	pub fn read_str(&self, json: &str) -> Result<LanguageProfile, CodecError> {
		let record: ProfileRecord = serde_json::from_str(json)?;
		Self::from_record(record)
	}

	/// Reads a profile from a file.
	pub fn read_from_path<P: AsRef<Path>>(&self, path: P) -> Result<LanguageProfile, CodecError> {
		self.read(File::open(path)?)
	}

	fn from_record(record: ProfileRecord) -> Result<LanguageProfile, CodecError> {
		let name = record.name.filter(|name| !name.is_empty()).ok_or(CodecError::MissingName)?;

		let lengths: BTreeSet<usize> = match (&record.gram_lengths, &record.n_words) {
			(Some(lengths), _) => lengths.iter().copied().collect(),
			(None, Some(n_words)) => (1..=n_words.len()).collect(),
			(None, None) if record.freq.is_empty() => DEFAULT_GRAM_LENGTHS.into_iter().collect(),
			(None, None) => record.freq.keys().map(|gram| gram.chars().count()).collect(),
		};
		let gram_lengths = LanguageProfile::validate_lengths(lengths.iter().copied()).map_err(|_| {
			CodecError::InvalidGramLengths { language: name.clone(), lengths: lengths.iter().copied().collect() }
		})?;

		let mut grams = HashMap::with_capacity(record.freq.len());
		for (gram, count) in record.freq {
			let invalid = |reason: String| CodecError::InvalidEntry {
				language: name.clone(),
				gram: gram.clone(),
				reason,
			};
			if count == 0 {
				return Err(invalid("count must be positive".to_owned()));
			}
			let length = gram.chars().count();
			if !gram_lengths.contains(&length) {
				return Err(invalid(format!("length {} is not tracked", length)));
			}
			grams.insert(gram, count);
		}

		Ok(LanguageProfile::restore(name, gram_lengths, grams, record.pruned))
	}
}

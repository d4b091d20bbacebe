//! Data model of the language identification profiles.
//!
//! - Language identifiers and the built-in catalog (`LanguageId`)
//! - N-gram extraction from training text
//! - Per-language occurrence counts (`LanguageProfile`)
//! - Parallel profile construction from a corpus (`ProfileBuilder`)
//! - Cross-language frequency table (`NgramFrequencyData`)

/// Validated BCP-47 style language identifiers.
pub mod language;

/// Character n-gram extraction.
pub mod ngram;

/// N-gram occurrence counts of one language.
///
/// Handles observation, pruning and merging of partial profiles.
pub mod language_profile;

/// Corpus to profile, built on worker threads.
pub mod profile_builder;

/// Immutable n-gram -> per-language frequency table.
pub mod frequency_data;

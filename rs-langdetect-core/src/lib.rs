//! N-gram based language identification data model.
//!
//! This crate provides the statistics a language detector works from:
//! - Per-language character n-gram profiles (counting, pruning, merging)
//! - Parallel profile construction from a training corpus
//! - A textual profile format and bulk, all-or-nothing profile loading
//! - An immutable cross-language n-gram frequency table
//!
//! The scoring of a text against the table is left to the caller.
//!
//! ```
//! use rs_langdetect_core::model::frequency_data::NgramFrequencyData;
//! use rs_langdetect_core::model::language_profile::LanguageProfile;
//!
//! let mut en = LanguageProfile::new("en");
//! en.observe_text("the weather is nice").unwrap();
//! let mut fr = LanguageProfile::new("fr");
//! fr.observe_text("le temps est beau").unwrap();
//!
//! let data = NgramFrequencyData::create([&en, &fr], [1, 2, 3]).unwrap();
//! let the = data.probabilities("the").unwrap();
//! assert_eq!(data.language(the.max_language().unwrap()), Some("en"));
//! assert!(data.probabilities("xyz").is_none());
//! ```

/// Language identifiers, profiles and the aggregated frequency table.
pub mod model;

/// Reading, writing and bulk loading of profiles.
pub mod profiles;

/// Loader configuration.
pub mod config;

/// Error types.
pub mod errors;

/// I/O utilities (file loading, folder listing).
///
/// Not exposed
pub(crate) mod io;

pub use config::LoaderConfig;
pub use errors::{BuildError, CodecError, ConfigError, FrequencyError, LanguageIdError, LoadError, ProfileError};
pub use model::frequency_data::{NgramFrequencyData, ProbabilityVector};
pub use model::language::LanguageId;
pub use model::language_profile::LanguageProfile;
pub use model::profile_builder::ProfileBuilder;
pub use profiles::{ProfileLoader, ProfileReader, ProfileWriter};

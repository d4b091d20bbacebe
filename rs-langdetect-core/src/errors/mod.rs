//! Error types, one enum per subsystem.

pub mod build_error;
pub mod codec_error;
pub mod config_error;
pub mod frequency_error;
pub mod language_error;
pub mod load_error;
pub mod profile_error;

pub use build_error::BuildError;
pub use codec_error::CodecError;
pub use config_error::ConfigError;
pub use frequency_error::FrequencyError;
pub use language_error::LanguageIdError;
pub use load_error::LoadError;
pub use profile_error::ProfileError;

//! Profile loader configuration (JSON).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Default name of the folder holding one profile file per language.
pub const DEFAULT_PROFILE_DIR: &str = "languages";

/// Where the profile loader looks for profiles.
///
/// ```json
/// { "root": "/usr/share/langdetect", "profile_dir": "languages" }
/// ```
///
/// A profile resolves to `profile_dir/<file name>` inside the store; for a
/// directory store the store itself is rooted at `root`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LoaderConfig {
	/// Filesystem root of the profile store, `None` for the current folder.
	#[serde(default)]
	pub root: Option<PathBuf>,
	/// Folder of the profiles, relative to the store root.
	#[serde(default = "default_profile_dir")]
	pub profile_dir: String,
}

fn default_profile_dir() -> String {
	DEFAULT_PROFILE_DIR.to_owned()
}

impl Default for LoaderConfig {
	fn default() -> Self {
		Self { root: None, profile_dir: default_profile_dir() }
	}
}

impl LoaderConfig {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the filesystem root.
	pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
		self.root = Some(root.into());
		self
	}

	/// Sets the profile folder name.
	pub fn with_profile_dir(mut self, profile_dir: impl Into<String>) -> Self {
		self.profile_dir = profile_dir.into();
		self
	}

	/// Parses a JSON configuration; missing fields take their defaults.
	pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
		let config: Self = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads a JSON configuration file.
	pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
		Self::from_json_str(&fs::read_to_string(path)?)
	}

	/// Resource path of a profile file inside the store.
	pub fn resource_path(&self, file_name: &str) -> String {
		let dir = self.profile_dir.trim_end_matches('/');
		if dir.is_empty() {
			file_name.to_owned()
		} else {
			format!("{}/{}", dir, file_name)
		}
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.profile_dir.split('/').any(|part| part == "..") {
			return Err(ConfigError::InvalidProfileDir(self.profile_dir.clone()));
		}
		Ok(())
	}
}

use std::path::Path;

use log::{debug, info};

use super::codec::ProfileReader;
use super::store::{DirectoryStore, ProfileStore};
use crate::config::LoaderConfig;
use crate::errors::{CodecError, LoadError};
use crate::io;
use crate::model::language::LanguageId;
use crate::model::language_profile::LanguageProfile;

/// Maps a language identifier to the file name of its profile.
pub type Resolver = Box<dyn Fn(&LanguageId) -> String + Send + Sync>;

/// Loads sets of language profiles from a [`ProfileStore`].
///
/// # Responsibilities
/// - Resolve identifiers to resource paths (`profile_dir/<resolver(id)>`)
/// - Read and parse every requested profile, eagerly
/// - Fail as a whole, naming the language, if any profile is missing,
///   unreadable, malformed or named after another language
///
/// # Notes
/// - Profiles are returned in request order.
/// - The default resolver uses the canonical tag (`zh-CN`) as file name.
pub struct ProfileLoader {
	store: Box<dyn ProfileStore>,
	config: LoaderConfig,
	resolver: Resolver,
	reader: ProfileReader,
}

impl ProfileLoader {
	/// Creates a loader over `store`, with the default resolver.
	pub fn new<S: ProfileStore + 'static>(store: S, config: LoaderConfig) -> Self {
		Self {
			store: Box::new(store),
			config,
			resolver: Box::new(|language: &LanguageId| language.as_str().to_owned()),
			reader: ProfileReader::new(),
		}
	}

	/// Creates a loader over a [`DirectoryStore`] rooted at `config.root`
	/// (the current folder when unset).
	pub fn from_config(config: LoaderConfig) -> Self {
		let root = io::normalize_folder(config.root.clone().unwrap_or_else(|| ".".into()));
		Self::new(DirectoryStore::new(root), config)
	}

	/// Replaces the identifier to file name resolution.
	pub fn with_resolver<F>(mut self, resolver: F) -> Self
	where
		F: Fn(&LanguageId) -> String + Send + Sync + 'static,
	{
		self.resolver = Box::new(resolver);
		self
	}

	pub fn config(&self) -> &LoaderConfig {
		&self.config
	}

	/// Resource path of the profile of `language`.
	pub fn resource_path(&self, language: &LanguageId) -> String {
		self.config.resource_path(&(self.resolver)(language))
	}

	/// Loads the profile of one language.
	///
	/// # Errors
	/// Returns an error naming `language` if its profile is missing,
	/// unreadable, malformed, or declares another language.
	pub fn read_language(&self, language: &LanguageId) -> Result<LanguageProfile, LoadError> {
		let path = self.resource_path(language);
		debug!("Loading profile '{}' from {}", language, self.store.locate(&path));

		let reader = self
			.store
			.open(&path)
			.map_err(|source| LoadError::Unreadable {
				language: language.to_string(),
				path: self.store.locate(&path),
				source,
			})?
			.ok_or_else(|| LoadError::NotFound { language: language.to_string(), path: self.store.locate(&path) })?;

		let profile = self
			.reader
			.read(reader)
			.map_err(|error| codec_to_load_error(language.as_str(), self.store.locate(&path), error))?;

		check_name(language, &profile, || self.store.locate(&path))?;
		Ok(profile)
	}

	/// Loads the profiles of `languages`, in order.
	///
	/// Either every profile is returned or the first failure is.
	pub fn read_languages(&self, languages: &[LanguageId]) -> Result<Vec<LanguageProfile>, LoadError> {
		let profiles = languages
			.iter()
			.map(|language| self.read_language(language))
			.collect::<Result<Vec<_>, _>>()?;
		info!("Loaded {} language profiles", profiles.len());
		Ok(profiles)
	}

	/// Same as [`read_languages`](Self::read_languages) for raw tags.
	///
	/// # Errors
	/// Also fails if a tag is not a valid language identifier.
	pub fn read_named<S: AsRef<str>>(&self, tags: &[S]) -> Result<Vec<LanguageProfile>, LoadError> {
		let languages = tags
			.iter()
			.map(|tag| LanguageId::parse(tag.as_ref()))
			.collect::<Result<Vec<_>, _>>()?;
		self.read_languages(&languages)
	}

	/// Loads every built-in profile, in catalog order.
	pub fn read_built_in(&self) -> Result<Vec<LanguageProfile>, LoadError> {
		self.read_languages(&LanguageId::built_in())
	}

	/// Loads every profile file of a folder.
	///
	/// Only regular files named after a language tag, without extension,
	/// are read; anything else is skipped. Profiles are sorted by file name.
	///
	/// # Errors
	/// Fails if the folder does not exist or cannot be listed, or if one of
	/// the profile files is unreadable or malformed.
	pub fn read_dir<P: AsRef<Path>>(path: P) -> Result<Vec<LanguageProfile>, LoadError> {
		let folder = io::normalize_folder(path);
		if !folder.is_dir() {
			return Err(LoadError::MissingFolder(folder));
		}

		let files = io::list_profile_files(&folder).map_err(|source| LoadError::Folder { path: folder.clone(), source })?;
		let reader = ProfileReader::new();
		let mut profiles = Vec::with_capacity(files.len());
		for file in files {
			let full_path = folder.join(&file);
			let profile = reader
				.read_from_path(&full_path)
				.map_err(|error| codec_to_load_error(&file, full_path.display().to_string(), error))?;
			profiles.push(profile);
		}

		info!("Loaded {} language profiles from {}", profiles.len(), folder.display());
		Ok(profiles)
	}
}

/// Splits codec failures into I/O problems and broken content.
fn codec_to_load_error(language: &str, path: String, error: CodecError) -> LoadError {
	match error {
		CodecError::Io(source) => LoadError::Unreadable { language: language.to_owned(), path, source },
		source => LoadError::Malformed { language: language.to_owned(), path, source },
	}
}

fn check_name<F>(language: &LanguageId, profile: &LanguageProfile, path: F) -> Result<(), LoadError>
where
	F: FnOnce() -> String,
{
	let found = profile.name().unwrap_or_default();
	match LanguageId::parse(found) {
		Ok(declared) if &declared == language => Ok(()),
		_ => Err(LoadError::NameMismatch { language: language.to_string(), path: path(), found: found.to_owned() }),
	}
}

//! Sources of profile bytes.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

/// Resolves resource paths (`languages/en`) to readable streams.
///
/// Implementations must be usable from any thread.
pub trait ProfileStore: Send + Sync {
	/// Opens the resource at `path`.
	///
	/// Returns `Ok(None)` if no such resource exists, and an error if it
	/// exists but cannot be opened.
	fn open(&self, path: &str) -> io::Result<Option<Box<dyn Read + '_>>>;

	/// Human readable location of `path`, used in error messages.
	fn locate(&self, path: &str) -> String {
		path.to_owned()
	}
}

/// Profiles stored as files below a root folder.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
	root: PathBuf,
}

impl DirectoryStore {
	pub fn new<P: AsRef<Path>>(root: P) -> Self {
		Self { root: root.as_ref().to_path_buf() }
	}

	pub fn root(&self) -> &Path {
		&self.root
	}
}

impl ProfileStore for DirectoryStore {
	fn open(&self, path: &str) -> io::Result<Option<Box<dyn Read + '_>>> {
		let full_path = self.root.join(path);
		if !full_path.exists() {
			return Ok(None);
		}
		if !full_path.is_file() {
			return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"));
		}
		Ok(Some(Box::new(File::open(full_path)?)))
	}

	fn locate(&self, path: &str) -> String {
		self.root.join(path).display().to_string()
	}
}

/// Profiles held in memory, typically embedded with `include_str!`.
///
/// ```
/// use rs_langdetect_core::profiles::store::MemoryStore;
///
/// let store = MemoryStore::new()
/// 	.with("languages/en", r#"{"name":"en","freq":{"th":10}}"#);
/// assert!(store.contains("languages/en"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
	resources: HashMap<String, Cow<'static, [u8]>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a resource, replacing any previous one at the same path.
	pub fn insert(&mut self, path: impl Into<String>, contents: impl Into<Cow<'static, [u8]>>) {
		self.resources.insert(path.into(), contents.into());
	}

	/// Builder flavour of [`insert`](Self::insert) for static text.
	pub fn with(mut self, path: impl Into<String>, contents: &'static str) -> Self {
		self.insert(path, contents.as_bytes());
		self
	}

	pub fn contains(&self, path: &str) -> bool {
		self.resources.contains_key(path)
	}

	pub fn len(&self) -> usize {
		self.resources.len()
	}

	pub fn is_empty(&self) -> bool {
		self.resources.is_empty()
	}
}

impl ProfileStore for MemoryStore {
	fn open(&self, path: &str) -> io::Result<Option<Box<dyn Read + '_>>> {
		Ok(self
			.resources
			.get(path)
			.map(|contents| Box::new(Cursor::new(&**contents)) as Box<dyn Read + '_>))
	}

	fn locate(&self, path: &str) -> String {
		format!("memory:{}", path)
	}
}

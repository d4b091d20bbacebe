use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use log::warn;

use crate::model::language::LanguageId;

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub(crate) fn normalize_folder<P: AsRef<Path>>(input: P) -> PathBuf {
	let input = input.as_ref();
	if input == Path::new(".") || input == Path::new("./") {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		input.to_path_buf()
	}
}

/// Returns `true` if a file name looks like a language profile.
///
/// Profile files are named after their language tag, without extension:
/// `en`, `zh-CN`. Dotted names (`en.json`, `.hidden`) never match.
pub(crate) fn is_profile_file_name(name: &str) -> bool {
	!name.contains('.') && LanguageId::is_valid(name)
}

/// Lists the language profile files of a directory, sorted by name.
///
/// Returns file names only (no paths). Subdirectories and files that do
/// not look like profiles are skipped.
pub(crate) fn list_profile_files<P: AsRef<Path>>(dir: P) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();
		if !path.is_file() {
			continue;
		}

		match path.file_name().and_then(|name| name.to_str()) {
			Some(name) if is_profile_file_name(name) => files.push(name.to_owned()),
			_ => warn!("Skipping {}: not a language profile", path.display()),
		}
	}

	files.sort();
	Ok(files)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn profile_file_names() {
		assert!(is_profile_file_name("en"));
		assert!(is_profile_file_name("zh-CN"));
		assert!(!is_profile_file_name("en.json"));
		assert!(!is_profile_file_name(".en"));
		assert!(!is_profile_file_name("my profile"));
		assert!(!is_profile_file_name("x"));
	}

	#[test]
	fn lists_only_profile_files() {
		let dir = tempfile::tempdir().unwrap();
		for name in ["fr", "en", "notes.txt", "zh-TW"] {
			fs::write(dir.path().join(name), "{}").unwrap();
		}
		fs::create_dir(dir.path().join("de")).unwrap();

		let files = list_profile_files(dir.path()).unwrap();
		assert_eq!(files, vec!["en", "fr", "zh-TW"]);
	}

	#[test]
	fn reads_lines() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("corpus");
		fs::write(&path, "one\r\ntwo\n").unwrap();
		assert_eq!(read_file(&path).unwrap(), vec!["one", "two"]);
	}

	#[test]
	fn normalizes_current_folder() {
		assert_eq!(normalize_folder("."), env::current_dir().unwrap());
		assert_eq!(normalize_folder("data/languages"), PathBuf::from("data/languages"));
	}
}

use std::path::{Path, PathBuf};
use std::{env, fs, io};

/// Reads a corpus or dictionary file line by line (`\n` or `\r\n`).
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	Ok(fs::read_to_string(filename)?.lines().map(str::to_owned).collect())
}

/// Builds the path of the binary cache sitting next to a corpus file.
///
/// Example:
/// `data/court.json` → `data/court.bin`
pub(crate) fn cache_path<P: AsRef<Path>>(input_path: P) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut output = PathBuf::from(parent);
	output.push(file_stem);
	output.set_extension("bin");

	Ok(output)
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/court.json"` → `"court"`
/// - `"phrases.txt"` → `"phrases"`
pub(crate) fn get_filename<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	input_path
		.as_ref()
		.file_stem()
		.map(|stem| stem.to_string_lossy().into_owned())
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Corpus path has no file stem"))
}

/// Resolves `"."` and `"./"` to the working directory; other data folders
/// are kept as given.
pub(crate) fn normalize_folder(input: &str) -> PathBuf {
	match input {
		"." | "./" => env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
		folder => PathBuf::from(folder),
	}
}

/// Lists all files in a directory whose extension is one of `extensions`.
///
/// Returns file names only (no paths), sorted so that loading order is stable.
pub(crate) fn list_files<P: AsRef<Path>>(dir: P, extensions: &[&str]) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if !path.is_file() {
			continue;
		}

		let matches = path
			.extension()
			.and_then(|e| e.to_str())
			.is_some_and(|e| extensions.contains(&e));
		if matches {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}

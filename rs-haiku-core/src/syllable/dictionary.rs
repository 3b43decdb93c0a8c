use std::collections::HashMap;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::io::read_file;
use crate::token::letters_only;

/// Authoritative word → syllable count mapping.
///
/// Keys are stored in letters-only form so lookups from the oracle
/// never need to care about case or punctuation.
///
/// # Formats
/// - JSON: `{"subpoena": 3, "court": 1}`
/// - Text: one `word count` pair per line
/// - Text (pronouncing-dictionary style): `WORD  W ER1 D`, where every
///   phoneme carrying a stress digit is a syllable nucleus
///
/// Blank lines and lines starting with `#` or `;;;` are ignored in text files.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct SyllableDictionary {
	entries: HashMap<String, usize>,
}

impl SyllableDictionary {
	/// Creates an empty dictionary.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts or replaces an entry.
	///
	/// The key is normalized; keys with no letters and zero counts are ignored.
	/// Returns `true` if the entry was stored.
	pub fn insert(&mut self, word: &str, syllables: usize) -> bool {
		let key = letters_only(word);
		if key.is_empty() || syllables == 0 {
			return false;
		}
		self.entries.insert(key, syllables);
		true
	}

	/// Returns the count for an already normalized word.
	pub fn get(&self, word: &str) -> Option<usize> {
		self.entries.get(word).copied()
	}

	/// Returns `true` if the (already normalized) word is present.
	pub fn contains(&self, word: &str) -> bool {
		self.entries.contains_key(word)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Loads a dictionary, choosing the format from the file extension.
	///
	/// `.json` files are parsed as a JSON object, everything else as text.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
		let path = path.as_ref();
		let dictionary = match path.extension().and_then(|e| e.to_str()) {
			Some("json") => Self::from_json(path)?,
			_ => Self::from_text(path)?,
		};
		info!("Loaded syllable dictionary {} ({} entries)", path.display(), dictionary.len());
		Ok(dictionary)
	}

	/// Reads a JSON object of `word: count` pairs.
	pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
		let bytes = std::fs::read(path)?;
		let raw: HashMap<String, usize> = serde_json::from_slice(&bytes)?;
		let mut dictionary = Self::new();
		for (word, syllables) in raw {
			if !dictionary.insert(&word, syllables) {
				warn!("Skipping dictionary entry {word:?}: {syllables}");
			}
		}
		Ok(dictionary)
	}

	/// Reads a text dictionary (see the type documentation for the formats).
	///
	/// Malformed lines are skipped with a warning rather than failing the load.
	pub fn from_text<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
		let lines = read_file(&path)?;
		let mut dictionary = Self::new();
		for (number, line) in lines.iter().enumerate() {
			match Self::parse_line(line) {
				Some(Some((word, syllables))) => {
					dictionary.insert(word, syllables);
				}
				Some(None) => warn!("Skipping malformed dictionary line {}: {:?}", number + 1, line),
				None => (),
			}
		}
		Ok(dictionary)
	}

	/// Parses one text line.
	///
	/// Returns `None` for lines to ignore, `Some(None)` for malformed lines.
	fn parse_line(line: &str) -> Option<Option<(&str, usize)>> {
		let line = line.trim();
		if line.is_empty() || line.starts_with('#') || line.starts_with(";;;") {
			return None;
		}

		let mut fields = line.split_whitespace();
		let word = fields.next()?;
		let rest: Vec<&str> = fields.collect();

		let syllables = match rest.as_slice() {
			[] => return Some(None),
			[count] if count.chars().all(|c| c.is_ascii_digit()) => count.parse().ok().filter(|&n| n > 0),
			phonemes => {
				let nuclei = phonemes
					.iter()
					.filter(|p| p.ends_with(|c: char| c.is_ascii_digit()))
					.count();
				(nuclei > 0).then_some(nuclei)
			}
		};

		// Alternate pronunciations look like "WORD(1)": keep the first one only
		let word = word.split('(').next().unwrap_or(word);
		Some(syllables.map(|s| (word, s)))
	}
}

impl FromIterator<(String, usize)> for SyllableDictionary {
	fn from_iter<I: IntoIterator<Item = (String, usize)>>(iter: I) -> Self {
		let mut dictionary = Self::new();
		for (word, syllables) in iter {
			dictionary.insert(&word, syllables);
		}
		dictionary
	}
}

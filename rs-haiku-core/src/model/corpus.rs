use std::collections::BTreeSet;
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::io::{cache_path, get_filename, read_file};
use crate::token::{extract, has_letters, tokenize};

/// Below this many phrases word extraction stays on the calling thread.
const PARALLEL_THRESHOLD: usize = 4096;

/// Shortest token (in characters) lifted out of phrases into the word corpus.
const MIN_WORD_LEN: usize = 2;

/// On-disk JSON layout of a corpus document.
///
/// Unknown keys (e.g. `backgroundSnippets`) are ignored.
#[derive(Deserialize)]
struct CorpusDocument {
	#[serde(default)]
	phrases: Vec<String>,
	#[serde(default)]
	words: Vec<String>,
}

/// The read-only material lines are mined from.
///
/// - `phrases`: free-form text, each mined for consecutive word runs
/// - `words`: distinct extracted tokens, usable one by one
/// - `names`: names of the corpus files merged into this corpus
///
/// # Invariants
/// - every phrase contains at least one letter
/// - `words` is deduplicated, sorted, and holds extracted (lower-cased,
///   `[a-z']` only) tokens
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Corpus {
	phrases: Vec<String>,
	words: Vec<String>,
	names: Vec<String>,
}

impl Corpus {
	/// Builds a corpus from explicit phrases and words.
	///
	/// Words are cleaned and deduplicated; phrases without letters are dropped.
	pub fn new<P, W>(phrases: P, words: W) -> Self
	where
		P: IntoIterator,
		P::Item: Into<String>,
		W: IntoIterator,
		W::Item: AsRef<str>,
	{
		let phrases: Vec<String> = phrases
			.into_iter()
			.map(Into::into)
			.filter(|p| has_letters(p))
			.collect();
		let words: BTreeSet<String> = words.into_iter().filter_map(|w| extract(w.as_ref())).collect();

		Self { phrases, words: words.into_iter().collect(), names: Vec::new() }
	}

	/// Builds a corpus from phrases only, deriving the word corpus from them.
	pub fn from_phrases<P>(phrases: P) -> Self
	where
		P: IntoIterator,
		P::Item: Into<String>,
	{
		let mut corpus = Self::new(phrases, Vec::<String>::new());
		corpus.words = Self::extract_words(&corpus.phrases);
		corpus
	}

	/// Loads a corpus file, using the sibling `.bin` cache when it is fresh.
	///
	/// - `.json` files are read as `{"phrases": [...], "words": [...]}`
	/// - any other extension is read as one phrase per line
	/// - after a successful parse, the corpus is serialized with `postcard`
	///   next to the source for fast reloading
	///
	/// The corpus name (file stem) is recorded in `names`.
	pub fn load<P: AsRef<Path>>(filepath: P) -> Result<Self, LoadError> {
		let filepath = filepath.as_ref();
		let binary_data_path = cache_path(filepath)?;

		let mut corpus = if Self::cache_is_fresh(filepath, &binary_data_path) {
			debug!("Reading corpus cache {}", binary_data_path.display());
			let bytes = std::fs::read(&binary_data_path)?;
			postcard::from_bytes(&bytes)?
		} else {
			let corpus = match filepath.extension().and_then(|e| e.to_str()) {
				Some("json") => Self::from_json(filepath)?,
				_ => Self::from_text(filepath)?,
			};
			if let Err(e) = corpus.write_cache(&binary_data_path) {
				warn!("Could not write corpus cache {}: {e}", binary_data_path.display());
			}
			corpus
		};

		corpus.names = vec![get_filename(filepath)?];
		info!(
			"Loaded corpus {} ({} phrases, {} words)",
			filepath.display(),
			corpus.phrases.len(),
			corpus.words.len()
		);
		Ok(corpus)
	}

	/// Reads a JSON corpus document.
	///
	/// When the document carries no word list, words are derived from the phrases.
	pub fn from_json<P: AsRef<Path>>(filepath: P) -> Result<Self, LoadError> {
		let bytes = std::fs::read(filepath)?;
		let document: CorpusDocument = serde_json::from_slice(&bytes)?;

		if document.words.is_empty() {
			Ok(Self::from_phrases(document.phrases))
		} else {
			Ok(Self::new(document.phrases, document.words))
		}
	}

	/// Reads a plain text corpus: one phrase per line.
	///
	/// Lines of three characters or fewer (after trimming) are skipped.
	pub fn from_text<P: AsRef<Path>>(filepath: P) -> Result<Self, LoadError> {
		let lines = read_file(filepath)?;
		Ok(Self::from_phrases(
			lines.into_iter().filter(|line| line.trim().chars().count() > 3),
		))
	}

	/// The cache is used only if it exists and is not older than the source.
	fn cache_is_fresh(source: &Path, cache: &Path) -> bool {
		let modified = |p: &Path| std::fs::metadata(p).and_then(|m| m.modified());
		match (modified(source), modified(cache)) {
			(Ok(source), Ok(cache)) => cache >= source,
			(Err(_), Ok(_)) => true,
			_ => false,
		}
	}

	fn write_cache(&self, binary_data_path: &Path) -> Result<(), LoadError> {
		let bytes = postcard::to_stdvec(self)?;
		std::fs::write(binary_data_path, bytes)?;
		Ok(())
	}

	/// Extracts the distinct words (length >= 2) of a set of phrases.
	///
	/// # Behavior
	/// - Small inputs are processed on the calling thread.
	/// - Large inputs are split into `cpus * 8` chunks, each handled by a
	///   worker thread producing a partial word set; the partial sets are
	///   collected over an MPSC channel and merged.
	pub fn extract_words(phrases: &[String]) -> Vec<String> {
		let words_of = |chunk: &[String]| -> BTreeSet<String> {
			chunk
				.iter()
				.flat_map(|phrase| tokenize(phrase))
				.filter(|word| word.chars().count() >= MIN_WORD_LEN)
				.collect()
		};

		if phrases.len() < PARALLEL_THRESHOLD {
			return words_of(phrases).into_iter().collect();
		}

		let chunks = num_cpus::get() * 8;
		let chunk_size = phrases.len().div_ceil(chunks);

		let (tx, rx) = mpsc::channel();
		for chunk in phrases.chunks(chunk_size) {
			let tx = tx.clone();
			let chunk: Vec<String> = chunk.to_vec();

			thread::spawn(move || {
				// The receiver outlives every sender
				let _ = tx.send(words_of(&chunk));
			});
		}
		drop(tx);

		let mut words = BTreeSet::new();
		for partial in rx.iter() {
			words.extend(partial);
		}
		words.into_iter().collect()
	}

	/// Merges another corpus into this one.
	///
	/// - Phrases are appended (order preserved)
	/// - Words are unioned (the result stays sorted and deduplicated)
	/// - Corpus names are appended
	pub fn merge(&mut self, other: &Self) {
		self.phrases.extend(other.phrases.iter().cloned());

		let words: BTreeSet<String> = self.words.drain(..).chain(other.words.iter().cloned()).collect();
		self.words = words.into_iter().collect();

		self.names.extend(other.names.iter().cloned());
	}

	pub fn phrases(&self) -> &[String] {
		&self.phrases
	}

	pub fn words(&self) -> &[String] {
		&self.words
	}

	/// Returns the names of the corpus files loaded into this corpus.
	pub fn names(&self) -> &[String] {
		&self.names
	}

	pub fn is_empty(&self) -> bool {
		self.phrases.is_empty() && self.words.is_empty()
	}
}

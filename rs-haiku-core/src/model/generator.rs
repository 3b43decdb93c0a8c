use std::path::Path;

use log::{debug, info, warn};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::LoadError;
use crate::io;
use crate::model::boundary::{BoundaryFilter, is_good_ending, is_good_start};
use crate::model::buckets::SyllableBuckets;
use crate::model::corpus::Corpus;
use crate::model::generation_input::{FALLBACK_LINE, GenerationInput};
use crate::model::line::{HAIKU_PATTERN, Haiku, Line, LineOrigin};
use crate::syllable::dictionary::SyllableDictionary;
use crate::syllable::oracle::SyllableOracle;
use crate::token::{clean_phrase, tokenize};

/// Extensions recognized as corpus files in a data folder.
pub const CORPUS_EXTENSIONS: &[&str] = &["json", "txt"];

/// High-level generator producing syllable-exact lines.
///
/// # Responsibilities
/// - Own the corpus and the syllable oracle (both read-only during generation)
/// - Build single lines through three strategies of decreasing quality
/// - Assemble 5-7-5 haikus
///
/// Generation takes `&self`, so a `Generator` can be shared between threads.
#[derive(Clone, Debug, Default)]
pub struct Generator {
	corpus: Corpus,
	oracle: SyllableOracle,
}

impl Generator {
	pub fn new(corpus: Corpus, oracle: SyllableOracle) -> Self {
		Self { corpus, oracle }
	}

	/// Creates a generator by loading every corpus file of a directory.
	///
	/// # Parameters
	/// - `folder`: directory containing `.json` and/or `.txt` corpora.
	///   Both `"folder"` and `"folder/"` are accepted.
	///
	/// # Errors
	/// - Returns an error if the path is not a directory.
	/// - Returns an error if a corpus fails to load.
	///
	/// # Notes
	/// - All corpora are merged into one.
	/// - Subdirectories are ignored.
	/// - No dictionary is loaded; see `load_dictionary`.
	pub fn from_folder<P: AsRef<Path>>(folder: P) -> Result<Self, LoadError> {
		let folder = Self::resolve_folder(folder)?;
		let names = Self::available_corpora(&folder)?;
		let names: Vec<&str> = names.iter().map(String::as_str).collect();

		let mut generator = Self::default();
		generator.load_corpora(&folder, &names)?;
		Ok(generator)
	}

	/// Lists the corpus names (file stems) available in a directory.
	pub fn available_corpora<P: AsRef<Path>>(folder: P) -> Result<Vec<String>, LoadError> {
		let mut names = Vec::new();
		for file in io::list_files(folder, CORPUS_EXTENSIONS)? {
			let name = io::get_filename(&file)?;
			if !names.contains(&name) {
				names.push(name);
			}
		}
		Ok(names)
	}

	/// Replaces the corpus with the merge of the named corpora of a directory.
	///
	/// For each name, `<name>.json` is preferred over `<name>.txt`.
	///
	/// # Errors
	/// Returns an error if a name matches no file or a file fails to load.
	/// The current corpus is left untouched in that case.
	pub fn load_corpora<P: AsRef<Path>>(&mut self, folder: P, names: &[&str]) -> Result<(), LoadError> {
		let folder = folder.as_ref();
		let mut corpus = Corpus::default();

		for name in names {
			let path = CORPUS_EXTENSIONS
				.iter()
				.map(|extension| folder.join(format!("{name}.{extension}")))
				.find(|path| path.is_file())
				.ok_or_else(|| LoadError::InvalidPath(format!("No corpus named {name} in {}", folder.display())))?;
			corpus.merge(&Corpus::load(path)?);
		}

		info!("Corpus ready: {} phrases, {} words", corpus.phrases().len(), corpus.words().len());
		self.corpus = corpus;
		Ok(())
	}

	/// Loads a syllable dictionary from disk and hands it to the oracle.
	///
	/// Later calls see the new counts immediately.
	pub fn load_dictionary<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadError> {
		let dictionary = SyllableDictionary::load(path)?;
		self.oracle.load_dictionary(dictionary);
		Ok(())
	}

	pub fn set_corpus(&mut self, corpus: Corpus) {
		self.corpus = corpus;
	}

	pub fn corpus(&self) -> &Corpus {
		&self.corpus
	}

	pub fn oracle(&self) -> &SyllableOracle {
		&self.oracle
	}

	pub fn oracle_mut(&mut self) -> &mut SyllableOracle {
		&mut self.oracle
	}

	fn resolve_folder<P: AsRef<Path>>(folder: P) -> Result<std::path::PathBuf, LoadError> {
		let string_path = folder
			.as_ref()
			.to_str()
			.ok_or_else(|| LoadError::InvalidPath("Invalid folder path".to_owned()))?;
		let folder = io::normalize_folder(string_path);

		if !folder.is_dir() {
			return Err(LoadError::InvalidPath(format!("Expected a directory, got: {}", folder.display())));
		}
		Ok(folder)
	}

	/// Builds a haiku (5, 7, 5) using the thread-local RNG.
	pub fn generate_haiku(&self, input: &GenerationInput) -> Haiku {
		self.generate_haiku_with_rng(input, &mut rand::rng())
	}

	/// Builds a haiku (5, 7, 5) with a caller-supplied RNG.
	///
	/// Each line's count is recomputed from its text, so the literal fallback
	/// reports its real count rather than the target.
	pub fn generate_haiku_with_rng<R: Rng + ?Sized>(&self, input: &GenerationInput, rng: &mut R) -> Haiku {
		let lines = HAIKU_PATTERN.map(|target| {
			let mut line = self.build_line_with_rng(target, input, rng);
			line.syllables = self.oracle.count_phrase(&line.text);
			line
		});
		Haiku { lines }
	}

	/// Builds one line of exactly `target` syllables using the thread-local RNG.
	///
	/// See `build_line_with_rng`.
	pub fn build_line(&self, target: usize, input: &GenerationInput) -> Line {
		self.build_line_with_rng(target, input, &mut rand::rng())
	}

	/// Builds one line of exactly `target` syllables.
	///
	/// # Behavior
	/// - Up to `max_attempts` iterations, each mining a random phrase
	///   (whole, then consecutive runs of words).
	/// - Past `word_assembly_after` iterations, each iteration also tries to
	///   assemble random words from the word corpus.
	/// - If all iterations fail, falls back to a greedy fill from syllable
	///   buckets, and finally to `FALLBACK_LINE`.
	///
	/// Never fails. Every line except the literal fallback has exactly
	/// `target` syllables, does not start with a weak start and does not end
	/// on a weak ending.
	pub fn build_line_with_rng<R: Rng + ?Sized>(&self, target: usize, input: &GenerationInput, rng: &mut R) -> Line {
		if target == 0 {
			return Line::new(String::new(), 0, LineOrigin::Empty);
		}

		let filter = BoundaryFilter::new(&self.oracle, input.strict_known_only);
		let has_words = !self.corpus.words().is_empty();

		for attempt in 0..input.max_attempts() {
			if let Some(line) = self.mine_phrase(target, &filter, rng) {
				debug!("Phrase line after {} attempts: {:?}", attempt + 1, line.text);
				return line;
			}

			if attempt > input.word_assembly_after() && has_words {
				if let Some(line) = self.assemble_words(target, input, &filter, rng) {
					debug!("Assembled line after {} attempts: {:?}", attempt + 1, line.text);
					return line;
				}
			}
		}

		self.fill_greedy(target, input, &filter, rng)
	}

	fn make_line(&self, text: String, origin: LineOrigin) -> Line {
		let syllables = self.oracle.count_phrase(&text);
		Line::new(text, syllables, origin)
	}

	/// Phrase mining: whole phrase first, then one greedy scan per start offset.
	///
	/// A scan stops at the first run reaching the target (accepted or not) or
	/// at the first overshoot; there is no backtracking inside an offset.
	fn mine_phrase<R: Rng + ?Sized>(&self, target: usize, filter: &BoundaryFilter, rng: &mut R) -> Option<Line> {
		let phrase = self.corpus.phrases().choose(rng)?;

		if self.oracle.count_phrase(phrase) == target {
			let cleaned = clean_phrase(phrase);
			let words: Vec<&str> = cleaned.split_whitespace().collect();
			if filter.accepts(&words) {
				return Some(self.make_line(cleaned, LineOrigin::WholePhrase));
			}
		}

		let tokens = tokenize(phrase);
		let counts: Vec<usize> = tokens.iter().map(|t| self.oracle.count(t)).collect();

		for start in 0..tokens.len() {
			let mut syllables = 0;
			for end in start..tokens.len() {
				syllables += counts[end];
				if syllables > target {
					break;
				}
				// At least two words
				if syllables == target && end > start {
					let selected = &tokens[start..=end];
					if filter.accepts(selected) {
						return Some(self.make_line(selected.join(" "), LineOrigin::PhraseFragment));
					}
					break;
				}
			}
		}

		None
	}

	/// Word-by-word assembly from random corpus words.
	///
	/// Every rejected draw (weak final word, weak first word, overshoot or a
	/// word without syllables) counts as stuck; the attempt is abandoned after
	/// `max_stuck` of them.
	fn assemble_words<R: Rng + ?Sized>(
		&self,
		target: usize,
		input: &GenerationInput,
		filter: &BoundaryFilter,
		rng: &mut R,
	) -> Option<Line> {
		let words = self.corpus.words();
		let mut selected: Vec<&str> = Vec::new();
		let mut syllables = 0;
		let mut stuck = 0;

		while syllables < target && stuck < input.max_stuck {
			let word = words.choose(rng)?.as_str();
			let count = self.oracle.count(word);
			let total = syllables + count;

			if count == 0 || total > target {
				stuck += 1;
			} else if total == target {
				if is_good_ending(word) {
					selected.push(word);
					syllables = total;
				} else {
					stuck += 1;
				}
			} else if selected.is_empty() && !is_good_start(word) {
				stuck += 1;
			} else {
				selected.push(word);
				syllables = total;
			}
		}

		if syllables == target && selected.len() >= 2 && filter.accepts(&selected) {
			Some(self.make_line(selected.join(" "), LineOrigin::WordAssembly))
		} else {
			None
		}
	}

	/// Greedy fill from syllable buckets, then the literal fallback.
	fn fill_greedy<R: Rng + ?Sized>(
		&self,
		target: usize,
		input: &GenerationInput,
		filter: &BoundaryFilter,
		rng: &mut R,
	) -> Line {
		let buckets = SyllableBuckets::new(self.corpus.words(), &self.oracle, target);

		if !buckets.is_empty() {
			for _ in 0..input.greedy_attempts {
				let Some(words) = Self::greedy_words(&buckets, target, input.max_stuck, rng) else {
					continue;
				};
				if filter.accepts(&words) {
					debug!("Greedy line: {:?}", words);
					return self.make_line(words.join(" "), LineOrigin::Greedy);
				}
			}
		}

		warn!("No {target}-syllable line found, using the fallback line");
		self.make_line(FALLBACK_LINE.to_owned(), LineOrigin::Fallback)
	}

	/// One greedy attempt.
	///
	/// # Behavior
	/// - With 3 or fewer syllables left, finish on a good ending of the exact
	///   size if there is one.
	/// - Otherwise finish on any word of the exact size if there is one.
	/// - Otherwise append a random word that fits; a weak first word is
	///   redrawn (at most `max_redraws` times).
	///
	/// Returns `None` when no word fits the remaining syllables.
	fn greedy_words<'a, R: Rng + ?Sized>(
		buckets: &SyllableBuckets<'a>,
		target: usize,
		max_redraws: usize,
		rng: &mut R,
	) -> Option<Vec<&'a str>> {
		let mut words: Vec<&'a str> = Vec::new();
		let mut remaining = target;
		let mut redraws = 0;

		while remaining > 0 {
			let exact = buckets.exact(remaining);

			if remaining <= 3 {
				let good: Vec<&'a str> = exact.iter().copied().filter(|w| is_good_ending(w)).collect();
				if let Some(&word) = good.choose(rng) {
					words.push(word);
					break;
				}
			}

			if let Some(&word) = exact.choose(rng) {
				words.push(word);
				break;
			}

			let (word, syllables) = buckets.pick_at_most(remaining, rng)?;
			if words.is_empty() && !is_good_start(word) {
				redraws += 1;
				if redraws >= max_redraws {
					return None;
				}
				continue;
			}
			words.push(word);
			remaining -= syllables;
		}

		Some(words)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn generator(phrases: &[&str], words: &[&str]) -> Generator {
		Generator::new(
			Corpus::new(phrases.iter().copied(), words.iter().copied()),
			SyllableOracle::new(),
		)
	}

	#[test]
	fn zero_target_is_empty() {
		let line = generator(&[], &["calm"]).build_line(0, &GenerationInput::default());
		assert_eq!(line.text, "");
		assert_eq!(line.origin, LineOrigin::Empty);
	}

	#[test]
	fn empty_corpora_fall_back() {
		let generator = generator(&[], &[]);
		for target in [5, 7] {
			let line = generator.build_line(target, &GenerationInput::default());
			assert_eq!(line.text, FALLBACK_LINE);
			assert_eq!(line.origin, LineOrigin::Fallback);
		}
	}

	#[test]
	fn whole_phrase_is_cleaned() {
		let generator = generator(&["Quiet COURT, calm gavel!"], &[]);
		let line = generator.build_line(5, &GenerationInput::default());
		assert_eq!(line.text, "quiet court calm gavel");
		assert_eq!(line.origin, LineOrigin::WholePhrase);
		assert_eq!(line.syllables, 5);
	}

	#[test]
	fn fragment_respects_boundaries() {
		let generator = generator(&["the quiet court of law moves slowly"], &[]);
		let mut rng = StdRng::seed_from_u64(3);
		let line = generator.build_line_with_rng(5, &GenerationInput::default(), &mut rng);

		assert_eq!(line.text, "the quiet court of law");
		assert_eq!(line.origin, LineOrigin::PhraseFragment);
		assert_eq!(generator.oracle().count_phrase(&line.text), 5);
	}

	#[test]
	fn fragment_skips_weak_endings() {
		// "calm of the" is rejected, "of the gavel" overshoots
		let generator = generator(&["calm of the gavel law"], &[]);
		let line = generator.build_line(3, &GenerationInput::default());
		assert_eq!(line.text, "the gavel");
		assert_eq!(line.origin, LineOrigin::PhraseFragment);
	}

	#[test]
	fn single_word_phrase_runs_are_rejected() {
		let generator = generator(&["testimony calm"], &[]);
		let mut input = GenerationInput::default();
		input.set_max_attempts(5).unwrap();
		input.greedy_attempts = 1;
		let line = generator.build_line(4, &input);
		assert_eq!(line.origin, LineOrigin::Fallback);
	}

	#[test]
	fn word_assembly_hits_target() {
		let generator = generator(&[], &["calm", "law", "the"]);
		let mut input = GenerationInput::default();
		input.set_word_assembly_after(0).unwrap();
		let mut rng = StdRng::seed_from_u64(11);

		let line = generator.build_line_with_rng(5, &input, &mut rng);
		assert_ne!(line.origin, LineOrigin::Fallback);
		assert_eq!(line.syllables, 5);
		assert!(is_good_ending(line.words().last().unwrap()));
	}

	#[test]
	fn greedy_prefers_good_endings() {
		let generator = generator(&[], &["the", "calm"]);
		let buckets = SyllableBuckets::new(generator.corpus().words(), generator.oracle(), 3);
		let mut rng = StdRng::seed_from_u64(5);

		for _ in 0..20 {
			let words = Generator::greedy_words(&buckets, 3, 50, &mut rng).unwrap();
			assert_eq!(words.len(), 3);
			assert_eq!(words.last(), Some(&"calm"));
		}
	}

	#[test]
	fn greedy_redraws_are_bounded() {
		let generator = generator(&[], &["and"]);
		let buckets = SyllableBuckets::new(generator.corpus().words(), generator.oracle(), 5);
		let mut rng = StdRng::seed_from_u64(9);
		assert_eq!(Generator::greedy_words(&buckets, 5, 50, &mut rng), None);

		let line = generator.build_line_with_rng(5, &GenerationInput::default(), &mut rng);
		assert!(line.is_fallback());
	}

	#[test]
	fn haiku_counts_follow_pattern() {
		let generator = generator(
			&["quiet court calm gavel", "sealed records drift slowly away", "the quiet court of law"],
			&["calm", "law", "court", "gavel", "river"],
		);
		let mut rng = StdRng::seed_from_u64(42);
		let haiku = generator.generate_haiku_with_rng(&GenerationInput::default(), &mut rng);

		assert!(!haiku.is_degraded());
		assert_eq!(haiku.counts(), HAIKU_PATTERN);
	}

	#[test]
	fn seeded_generation_is_reproducible() {
		let generator = generator(&[], &["calm", "law", "court", "gavel", "river", "silent"]);
		let input = GenerationInput::default();

		let first = generator.build_line_with_rng(7, &input, &mut StdRng::seed_from_u64(1));
		let second = generator.build_line_with_rng(7, &input, &mut StdRng::seed_from_u64(1));
		assert_eq!(first, second);
	}
}

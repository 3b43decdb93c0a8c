use crate::token::{has_letters, letters_only};

use super::dictionary::SyllableDictionary;
use super::exceptions;

const VOWELS: &[u8] = b"aeiouy";

/// Answers "how many syllables does this token have?".
///
/// Lookup order:
/// 1. the loaded `SyllableDictionary`, if any (authoritative)
/// 2. the built-in exception table
/// 3. the vowel-group heuristic (`estimate`)
///
/// The oracle re-checks the dictionary on every call, so loading one late
/// simply changes the answers of subsequent calls.
#[derive(Clone, Debug, Default)]
pub struct SyllableOracle {
	dictionary: Option<SyllableDictionary>,
}

impl SyllableOracle {
	/// Creates an oracle without a dictionary.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an oracle backed by the given dictionary.
	pub fn with_dictionary(dictionary: SyllableDictionary) -> Self {
		Self { dictionary: Some(dictionary) }
	}

	/// Replaces the current dictionary.
	pub fn load_dictionary(&mut self, dictionary: SyllableDictionary) {
		self.dictionary = Some(dictionary);
	}

	pub fn has_dictionary(&self) -> bool {
		self.dictionary.is_some()
	}

	pub fn dictionary(&self) -> Option<&SyllableDictionary> {
		self.dictionary.as_ref()
	}

	/// Returns the syllable count of a single token.
	///
	/// Always `>= 1` for a token with at least one letter, `0` otherwise.
	pub fn count(&self, token: &str) -> usize {
		let word = letters_only(token);
		if word.is_empty() {
			return 0;
		}

		if let Some(syllables) = self.dictionary.as_ref().and_then(|d| d.get(&word)) {
			return syllables;
		}

		exceptions::lookup(&word).unwrap_or_else(|| estimate(&word))
	}

	/// Sums `count` over the whitespace separated tokens of a phrase.
	///
	/// Tokens without letters (numbers, punctuation) contribute nothing.
	pub fn count_phrase(&self, text: &str) -> usize {
		text.split_whitespace()
			.filter(|t| has_letters(t))
			.map(|t| self.count(t))
			.sum()
	}

	/// Returns `true` if the dictionary is loaded and contains the token.
	///
	/// Without a dictionary nothing is considered known.
	pub fn is_known_word(&self, token: &str) -> bool {
		match &self.dictionary {
			Some(dictionary) => dictionary.contains(&letters_only(token)),
			None => false,
		}
	}
}

/// Heuristic syllable estimate for a letters-only, lower-cased word.
///
/// Counts vowel groups, then corrects a few common English spellings:
/// - silent final `e` (but not `-le`, `-ee`, `-ie`, `-ye`)
/// - silent past tense `-ed` (except after `t` / `d`)
/// - `-ious` / `-eous` and `-ia` / `-io` which hide a vowel group
///
/// Never returns less than 1.
pub fn estimate(word: &str) -> usize {
	let bytes = word.as_bytes();

	let mut count: isize = 0;
	let mut previous_vowel = false;
	for b in bytes {
		let vowel = VOWELS.contains(b);
		if vowel && !previous_vowel {
			count += 1;
		}
		previous_vowel = vowel;
	}

	if word.ends_with('e')
		&& !["le", "ee", "ie", "ye"].iter().any(|s| word.ends_with(s))
		&& word.len() > 2
	{
		count -= 1;
	}

	if word.ends_with("ed") && word.len() > 3 {
		let before = bytes[bytes.len() - 3];
		if before != b't' && before != b'd' {
			count -= 1;
		}
	}

	if word.ends_with("ious") || word.ends_with("eous") {
		count += 1;
	}

	if word.ends_with("ia") || word.ends_with("io") {
		count += 1;
	}

	count.max(1) as usize
}

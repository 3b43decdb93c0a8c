use std::collections::HashSet;
use std::sync::LazyLock;

use crate::syllable::oracle::SyllableOracle;
use crate::token::letters_only;

/// Words a line must not end on: articles, prepositions, conjunctions,
/// auxiliaries and modals, pronouns, demonstratives and quantifiers.
const WEAK_ENDINGS: &[&str] = &[
	"the", "a", "an", "and", "or", "but", "of", "to", "in", "on", "at",
	"by", "for", "with", "from", "as", "is", "was", "were", "are", "be",
	"that", "this", "these", "those", "it", "its", "my", "his", "her",
	"our", "your", "their", "not", "no", "so", "if", "then", "than",
	"had", "has", "have", "been", "being", "do", "did", "does", "will",
	"would", "could", "should", "shall", "may", "might", "can", "just",
	"very", "also", "about", "into", "onto", "upon", "over", "under",
	"between", "through", "during", "before", "after", "while", "when",
	"where", "which", "who", "whom", "whose", "what", "how", "because",
	"although", "whether", "i", "we", "you", "he", "she", "they",
	"me", "him", "us", "them", "some", "any", "each", "every",
];

/// Coordinating conjunctions a line must not start with.
const WEAK_STARTS: &[&str] = &["and", "or", "but", "so", "yet", "nor", "for"];

static WEAK_ENDING_SET: LazyLock<HashSet<&'static str>> =
	LazyLock::new(|| WEAK_ENDINGS.iter().copied().collect());

static WEAK_START_SET: LazyLock<HashSet<&'static str>> =
	LazyLock::new(|| WEAK_STARTS.iter().copied().collect());

/// Returns `true` if the word may close a line.
///
/// The word is reduced to its letters-only form first; an empty result never ends well.
pub fn is_good_ending(word: &str) -> bool {
	let word = letters_only(word);
	!word.is_empty() && !WEAK_ENDING_SET.contains(word.as_str())
}

/// Returns `true` if the word may open a line.
pub fn is_good_start(word: &str) -> bool {
	let word = letters_only(word);
	!word.is_empty() && !WEAK_START_SET.contains(word.as_str())
}

/// Checks the last word of a candidate. Empty candidates fail.
pub fn ends_well<S: AsRef<str>>(words: &[S]) -> bool {
	words.last().is_some_and(|w| is_good_ending(w.as_ref()))
}

/// Checks the first word of a candidate. Empty candidates fail.
pub fn starts_well<S: AsRef<str>>(words: &[S]) -> bool {
	words.first().is_some_and(|w| is_good_start(w.as_ref()))
}

/// Acceptance test applied to every candidate line.
///
/// Combines the boundary checks with the optional all-known check. The
/// all-known check only bites when `strict_known_only` is set *and* the
/// oracle has a dictionary; otherwise it is skipped.
#[derive(Clone, Copy, Debug)]
pub struct BoundaryFilter<'a> {
	oracle: &'a SyllableOracle,
	strict_known_only: bool,
}

impl<'a> BoundaryFilter<'a> {
	pub fn new(oracle: &'a SyllableOracle, strict_known_only: bool) -> Self {
		Self { oracle, strict_known_only }
	}

	/// Returns `true` if every word is dictionary-known, or if the check is off.
	pub fn all_known<S: AsRef<str>>(&self, words: &[S]) -> bool {
		if !self.strict_known_only || !self.oracle.has_dictionary() {
			return true;
		}
		words.iter().all(|w| self.oracle.is_known_word(w.as_ref()))
	}

	/// Full acceptance test: good start, good ending, and (optionally) all known.
	pub fn accepts<S: AsRef<str>>(&self, words: &[S]) -> bool {
		starts_well(words) && ends_well(words) && self.all_known(words)
	}
}

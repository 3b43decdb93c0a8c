use std::collections::BTreeMap;

use rand::Rng;

use crate::syllable::oracle::SyllableOracle;

/// Words grouped by syllable count, for the greedy fill.
///
/// Only words with `1 <= count <= max_syllables` are kept.
#[derive(Debug)]
pub(crate) struct SyllableBuckets<'a> {
	buckets: BTreeMap<usize, Vec<&'a str>>,
}

impl<'a> SyllableBuckets<'a> {
	pub(crate) fn new(words: &'a [String], oracle: &SyllableOracle, max_syllables: usize) -> Self {
		let mut buckets: BTreeMap<usize, Vec<&'a str>> = BTreeMap::new();
		for word in words {
			let syllables = oracle.count(word);
			if (1..=max_syllables).contains(&syllables) {
				buckets.entry(syllables).or_default().push(word);
			}
		}
		Self { buckets }
	}

	/// Returns the words with exactly `syllables` syllables.
	pub(crate) fn exact(&self, syllables: usize) -> &[&'a str] {
		self.buckets.get(&syllables).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Picks one `(word, syllables)` pair uniformly among all words with at
	/// most `max` syllables.
	///
	/// Uses a single draw and a cumulative subtraction over the buckets
	/// instead of materializing the candidate list.
	///
	/// Returns `None` if no word is eligible.
	pub(crate) fn pick_at_most<R: Rng + ?Sized>(&self, max: usize, rng: &mut R) -> Option<(&'a str, usize)> {
		let total: usize = self.buckets.range(..=max).map(|(_, words)| words.len()).sum();
		if total == 0 {
			return None;
		}

		let mut r = rng.random_range(0..total);
		for (syllables, words) in self.buckets.range(..=max) {
			if r < words.len() {
				return Some((words[r], *syllables));
			}
			r -= words.len();
		}
		None
	}

	pub(crate) fn is_empty(&self) -> bool {
		self.buckets.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn words(list: &[&str]) -> Vec<String> {
		list.iter().map(|w| (*w).to_owned()).collect()
	}

	#[test]
	fn buckets_by_count() {
		let oracle = SyllableOracle::new();
		let words = words(&["calm", "gavel", "testimony", "law", "federal"]);
		let buckets = SyllableBuckets::new(&words, &oracle, 3);

		assert_eq!(buckets.exact(1), ["calm", "law"]);
		assert_eq!(buckets.exact(2), ["gavel"]);
		assert_eq!(buckets.exact(3), ["federal"]);
		assert!(buckets.exact(4).is_empty());
	}

	#[test]
	fn pick_respects_bound() {
		let oracle = SyllableOracle::new();
		let words = words(&["calm", "gavel", "federal"]);
		let buckets = SyllableBuckets::new(&words, &oracle, 5);
		let mut rng = StdRng::seed_from_u64(7);

		for _ in 0..100 {
			let (word, syllables) = buckets.pick_at_most(2, &mut rng).unwrap();
			assert!(syllables <= 2);
			assert_ne!(word, "federal");
		}
		assert_eq!(buckets.pick_at_most(0, &mut rng), None);
	}

	#[test]
	fn empty_corpus_has_no_buckets() {
		let oracle = SyllableOracle::new();
		let buckets = SyllableBuckets::new(&[], &oracle, 5);
		assert!(buckets.is_empty());
		let mut rng = StdRng::seed_from_u64(1);
		assert_eq!(buckets.pick_at_most(5, &mut rng), None);
	}
}

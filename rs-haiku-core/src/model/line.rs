use serde::{Deserialize, Serialize};

/// Syllable targets of the three haiku lines.
pub const HAIKU_PATTERN: [usize; 3] = [5, 7, 5];

/// Which strategy produced a line, from best to worst quality.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LineOrigin {
	/// A whole corpus phrase matched the target.
	WholePhrase,
	/// A run of consecutive words from a corpus phrase.
	PhraseFragment,
	/// Random words from the word corpus, drawn one at a time.
	WordAssembly,
	/// Greedy fill from syllable buckets.
	Greedy,
	/// The literal placeholder; the syllable target is not guaranteed.
	Fallback,
	/// Target of zero syllables.
	Empty,
}

/// A generated line and its syllable count.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Line {
	pub text: String,
	pub syllables: usize,
	pub origin: LineOrigin,
}

impl Line {
	pub(crate) fn new(text: String, syllables: usize, origin: LineOrigin) -> Self {
		Self { text, syllables, origin }
	}

	/// Returns the whitespace separated words of the line.
	pub fn words(&self) -> impl Iterator<Item = &str> {
		self.text.split_whitespace()
	}

	/// Returns `true` if this is the literal placeholder line.
	pub fn is_fallback(&self) -> bool {
		self.origin == LineOrigin::Fallback
	}
}

/// Three lines following `HAIKU_PATTERN`.
///
/// Each line's `syllables` is recounted from its text, so what gets displayed
/// and what was generated always agree.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Haiku {
	pub lines: [Line; 3],
}

impl Haiku {
	/// Returns the syllable counts of the three lines.
	pub fn counts(&self) -> [usize; 3] {
		[self.lines[0].syllables, self.lines[1].syllables, self.lines[2].syllables]
	}

	/// Returns `true` if any line is the literal placeholder.
	pub fn is_degraded(&self) -> bool {
		self.lines.iter().any(Line::is_fallback)
	}
}

impl std::fmt::Display for Haiku {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		for line in &self.lines {
			writeln!(f, "{}", line.text)?;
		}
		let [a, b, c] = self.counts();
		write!(f, "{a} \u{2022} {b} \u{2022} {c}")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn line(text: &str, syllables: usize, origin: LineOrigin) -> Line {
		Line::new(text.to_owned(), syllables, origin)
	}

	#[test]
	fn display_prints_counts() {
		let haiku = Haiku {
			lines: [
				line("the quiet court rests", 5, LineOrigin::PhraseFragment),
				line("sealed documents drift away", 7, LineOrigin::WordAssembly),
				line("silence falls here", 4, LineOrigin::Fallback),
			],
		};
		assert_eq!(
			haiku.to_string(),
			"the quiet court rests\nsealed documents drift away\nsilence falls here\n5 \u{2022} 7 \u{2022} 4"
		);
		assert!(haiku.is_degraded());
		assert_eq!(haiku.lines[0].words().count(), 4);
	}

	#[test]
	fn origin_serializes_snake_case() {
		let json = serde_json::to_string(&LineOrigin::WholePhrase).unwrap();
		assert_eq!(json, "\"whole_phrase\"");
	}
}

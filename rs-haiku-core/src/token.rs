//! Token cleaning helpers shared by the syllable oracle and the line generator.
//!
//! Two cleaned forms exist:
//! - the *letters* form keeps `[a-z]` only and is used for counting,
//!   dictionary lookups and boundary checks
//! - the *extracted* form keeps `[a-z']` and is what ends up in generated lines

/// Lower-cases a raw token and keeps ASCII letters only.
///
/// Examples:
/// - `"Subpoena!"` → `"subpoena"`
/// - `"don't"` → `"dont"`
/// - `"2005"` → `""`
pub fn letters_only(raw: &str) -> String {
	raw.chars()
		.filter(|c| c.is_ascii_alphabetic())
		.map(|c| c.to_ascii_lowercase())
		.collect()
}

/// Lower-cases a raw token and keeps ASCII letters and apostrophes.
///
/// Returns `None` when nothing usable is left.
pub fn extract(raw: &str) -> Option<String> {
	let token: String = raw
		.chars()
		.filter(|c| c.is_ascii_alphabetic() || *c == '\'')
		.map(|c| c.to_ascii_lowercase())
		.collect();

	if has_letters(&token) { Some(token) } else { None }
}

/// Returns `true` if the text contains at least one ASCII letter.
pub fn has_letters(raw: &str) -> bool {
	raw.chars().any(|c| c.is_ascii_alphabetic())
}

/// Splits a phrase on whitespace and returns its extracted tokens.
///
/// Pure punctuation or numeric chunks are dropped.
pub fn tokenize(phrase: &str) -> Vec<String> {
	phrase.split_whitespace().filter_map(extract).collect()
}

/// Cleans a whole phrase for output.
///
/// - Removes everything but ASCII word characters and apostrophes
/// - Collapses whitespace runs into single spaces
/// - Lower-cases everything
pub fn clean_phrase(phrase: &str) -> String {
	phrase
		.split_whitespace()
		.map(|chunk| {
			chunk
				.chars()
				.filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '\'')
				.map(|c| c.to_ascii_lowercase())
				.collect::<String>()
		})
		.filter(|chunk| !chunk.is_empty())
		.collect::<Vec<_>>()
		.join(" ")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn letters_only_strips_everything_else() {
		assert_eq!(letters_only("Subpoena!"), "subpoena");
		assert_eq!(letters_only("don't"), "dont");
		assert_eq!(letters_only("--"), "");
	}

	#[test]
	fn extract_keeps_apostrophes() {
		assert_eq!(extract("Don't,"), Some("don't".to_owned()));
		assert_eq!(extract("1999"), None);
		assert_eq!(extract("'"), None);
	}

	#[test]
	fn tokenize_drops_non_words() {
		assert_eq!(
			tokenize("  The court -- of LAW, 2005 "),
			vec!["the", "court", "of", "law"]
		);
	}

	#[test]
	fn clean_phrase_collapses_whitespace() {
		assert_eq!(clean_phrase("The  Judge's\tgavel, fell!"), "the judge's gavel fell");
		assert_eq!(clean_phrase(" ... "), "");
	}

	#[test]
	fn clean_phrase_keeps_ascii_only() {
		assert_eq!(clean_phrase("Naïve CAFÉ owls"), "nave caf owls");
		assert_eq!(clean_phrase("— ¿"), "");
	}
}

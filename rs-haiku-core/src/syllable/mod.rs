//! Syllable counting for English words.
//!
//! - `SyllableOracle`: dictionary first, exception table second, heuristic last
//! - `SyllableDictionary`: optional authoritative word → count mapping

/// The counting oracle and its vowel-group heuristic.
pub mod oracle;

/// Loadable word → syllable count dictionaries (JSON or text).
pub mod dictionary;

/// Built-in table of irregular words. Not exposed.
mod exceptions;

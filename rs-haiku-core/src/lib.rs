//! Syllable-exact haiku generation library.
//!
//! This crate provides:
//! - A syllable oracle for English words (dictionary, exception table, heuristic)
//! - Phrase/word corpora loaded from disk with a binary cache
//! - A randomized multi-strategy search building lines of an exact syllable count
//! - 5-7-5 haiku assembly
//!
//! Generation never fails: under pressure it degrades to a greedy fill and,
//! as a last resort, to a fixed placeholder line.

/// Line generation: corpus, filters, generator, output types.
pub mod model;

/// Syllable counting: oracle and dictionaries.
pub mod syllable;

/// Token cleaning helpers.
pub mod token;

/// Errors raised while loading data from disk.
pub mod error;

/// I/O utilities (file loading, path helpers, directory listing).
pub(crate) mod io;

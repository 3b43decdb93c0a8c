//! Top-level module for syllable-exact line generation.
//!
//! This module provides:
//! - The corpus lines are mined from (`Corpus`)
//! - Boundary filters rejecting dangling function words
//! - Tuning parameters (`GenerationInput`)
//! - Generated lines and haikus (`Line`, `Haiku`)
//! - The high-level generation interface (`Generator`)

/// High-level interface building lines and haikus.
///
/// Owns the corpus and the syllable oracle, runs the three search
/// strategies and the literal fallback.
pub mod generator;

/// Phrase and word corpora.
///
/// Supports loading from JSON or text files, binary caching,
/// parallel word extraction and merging.
pub mod corpus;

/// Weak-start / weak-ending word lists and the acceptance filter.
pub mod boundary;

/// Generation parameters: attempt budgets and the known-word switch.
pub mod generation_input;

/// Output types: `Line`, `LineOrigin`, `Haiku`.
pub mod line;

/// Syllable buckets used by the greedy fallback.
/// This module is not exposed publicly.
mod buckets;

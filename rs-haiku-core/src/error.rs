use std::io;

use thiserror::Error;

/// Errors raised while loading corpora or syllable dictionaries from disk.
///
/// Generation itself never fails; only acquisition does.
#[derive(Debug, Error)]
pub enum LoadError {
	#[error("I/O error: {0}")]
	Io(#[from] io::Error),

	#[error("invalid JSON: {0}")]
	Json(#[from] serde_json::Error),

	#[error("binary cache error: {0}")]
	Cache(#[from] postcard::Error),

	#[error("invalid path: {0}")]
	InvalidPath(String),
}

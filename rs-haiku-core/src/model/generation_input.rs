/// Default number of outer search iterations (phrase mining + word assembly).
pub const DEFAULT_MAX_ATTEMPTS: usize = 300;

/// Default iteration after which word-by-word assembly joins the search.
pub const DEFAULT_WORD_ASSEMBLY_AFTER: usize = 150;

/// Default number of rejected draws before a word assembly attempt gives up.
pub const DEFAULT_MAX_STUCK: usize = 50;

/// Default number of greedy bucket-fill attempts.
pub const DEFAULT_GREEDY_ATTEMPTS: usize = 20;

/// Largest accepted `max_attempts`.
pub const MAX_ATTEMPTS_LIMIT: usize = 100_000;

/// Line returned when every strategy fails.
pub const FALLBACK_LINE: &str = "silence falls here";

/// Tuning parameters for line generation.
///
/// The thresholds trade output quality against latency: together they bound
/// the worst-case work of a single `build_line` call.
///
/// # Invariants
/// - `max_attempts >= 1`
/// - `word_assembly_after < max_attempts`
/// - `max_stuck >= 1`
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationInput {
	/// Outer loop bound shared by phrase mining and word assembly.
	max_attempts: usize,

	/// Word assembly only runs on iterations strictly greater than this.
	word_assembly_after: usize,

	/// Rejected draws allowed per word assembly attempt (also bounds
	/// weak-start redraws in the greedy fallback).
	pub max_stuck: usize,

	/// Number of greedy bucket-fill attempts before the literal fallback.
	pub greedy_attempts: usize,

	/// Require every word to be dictionary-known (ignored without a dictionary).
	pub strict_known_only: bool,
}

impl Default for GenerationInput {
	fn default() -> Self {
		Self {
			max_attempts: DEFAULT_MAX_ATTEMPTS,
			word_assembly_after: DEFAULT_WORD_ASSEMBLY_AFTER,
			max_stuck: DEFAULT_MAX_STUCK,
			greedy_attempts: DEFAULT_GREEDY_ATTEMPTS,
			strict_known_only: false,
		}
	}
}

impl GenerationInput {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn max_attempts(&self) -> usize {
		self.max_attempts
	}

	pub fn word_assembly_after(&self) -> usize {
		self.word_assembly_after
	}

	/// Sets the outer attempt budget.
	///
	/// The word assembly threshold keeps its ratio to the budget
	/// (half of it by default).
	///
	/// # Errors
	/// Returns an error if `max_attempts` is zero or above `MAX_ATTEMPTS_LIMIT`.
	pub fn set_max_attempts(&mut self, max_attempts: usize) -> Result<(), String> {
		if max_attempts == 0 {
			return Err("max_attempts must be at least 1".to_owned());
		}
		if max_attempts > MAX_ATTEMPTS_LIMIT {
			return Err(format!("max_attempts must be at most {MAX_ATTEMPTS_LIMIT}, got {max_attempts}"));
		}
		let scaled = self
			.word_assembly_after
			.checked_mul(max_attempts)
			.ok_or_else(|| format!("max_attempts {max_attempts} is too large"))?;
		self.word_assembly_after = scaled / self.max_attempts;
		self.max_attempts = max_attempts;
		Ok(())
	}

	/// Sets the iteration after which word assembly kicks in.
	///
	/// # Errors
	/// Returns an error if the value is not below `max_attempts`.
	pub fn set_word_assembly_after(&mut self, word_assembly_after: usize) -> Result<(), String> {
		if word_assembly_after >= self.max_attempts {
			return Err(format!(
				"word_assembly_after must be below max_attempts ({}), got {}",
				self.max_attempts, word_assembly_after
			));
		}
		self.word_assembly_after = word_assembly_after;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults() {
		let input = GenerationInput::default();
		assert_eq!(input.max_attempts(), 300);
		assert_eq!(input.word_assembly_after(), 150);
		assert_eq!(input.max_stuck, 50);
		assert_eq!(input.greedy_attempts, 20);
		assert!(!input.strict_known_only);
	}

	#[test]
	fn max_attempts_scales_threshold() {
		let mut input = GenerationInput::default();
		input.set_max_attempts(30).unwrap();
		assert_eq!(input.max_attempts(), 30);
		assert_eq!(input.word_assembly_after(), 15);
		assert!(input.set_max_attempts(0).is_err());
	}

	#[test]
	fn max_attempts_is_capped() {
		let mut input = GenerationInput::default();
		assert!(input.set_max_attempts(usize::MAX).is_err());
		assert!(input.set_max_attempts(MAX_ATTEMPTS_LIMIT + 1).is_err());
		assert_eq!(input, GenerationInput::default());

		input.set_max_attempts(MAX_ATTEMPTS_LIMIT).unwrap();
		assert_eq!(input.max_attempts(), MAX_ATTEMPTS_LIMIT);
		assert_eq!(input.word_assembly_after(), MAX_ATTEMPTS_LIMIT / 2);
	}

	#[test]
	fn threshold_must_stay_below_budget() {
		let mut input = GenerationInput::default();
		assert!(input.set_word_assembly_after(300).is_err());
		input.set_word_assembly_after(0).unwrap();
		assert_eq!(input.word_assembly_after(), 0);
	}
}

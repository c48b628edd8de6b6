use log::debug;
use rand::Rng;

use super::markov_chain::{MarkovChain, Mode};
use super::tokenizer::{PUNCTUATION, is_terminal};
use crate::error::{ConfigError, ModelError};

/// Default number of pieces (seed included) after which generation stops.
pub const DEFAULT_MAX_PIECES: usize = 42;

/// Default marker appended when generation is cut.
pub const DEFAULT_ELLIPSIS: &str = "...";

/// Input parameters for sentence generation.
///
/// # Responsibilities
/// - Select the prediction `mode`
/// - Bound the number of emitted pieces
/// - Hold the marker appended to a cut sentence
///
/// # Invariants
/// - `max_pieces >= 1`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationInput {
	/// Next-token selection strategy.
	pub mode: Mode,

	/// Once more than this many pieces (seed included) are emitted, the
	/// sentence is cut.
	max_pieces: usize,

	/// Marker appended to a cut sentence.
	ellipsis: String,
}

impl Default for GenerationInput {
	fn default() -> Self {
		Self { mode: Mode::Deterministic, max_pieces: DEFAULT_MAX_PIECES, ellipsis: DEFAULT_ELLIPSIS.to_owned() }
	}
}

impl GenerationInput {
	/// Creates an input with default bounds for the given mode.
	pub fn new(mode: Mode) -> Self {
		Self { mode, ..Self::default() }
	}

	/// Returns the current piece cap.
	pub fn max_pieces(&self) -> usize {
		self.max_pieces
	}

	/// Returns the marker appended to a cut sentence.
	pub fn ellipsis(&self) -> &str {
		&self.ellipsis
	}

	/// Sets the piece cap.
	///
	/// # Errors
	/// Returns an error if `max_pieces` is zero.
	pub fn set_max_pieces(&mut self, max_pieces: usize) -> Result<(), ConfigError> {
		if max_pieces == 0 {
			return Err(ConfigError::Validation("max_pieces must be >= 1".to_owned()));
		}
		self.max_pieces = max_pieces;
		Ok(())
	}

	/// Sets the marker appended to a cut sentence.
	///
	/// # Errors
	/// Returns an error if the marker contains whitespace.
	pub fn set_ellipsis(&mut self, ellipsis: &str) -> Result<(), ConfigError> {
		if ellipsis.chars().any(char::is_whitespace) {
			return Err(ConfigError::Validation("ellipsis must not contain whitespace".to_owned()));
		}
		self.ellipsis = ellipsis.to_owned();
		Ok(())
	}
}

/// Renders generated pieces as a sentence.
///
/// - Joins the pieces with single spaces
/// - Removes the space in front of `.`, `,`, `!` and `?`
/// - Uppercases the first character and lowercases the rest
///
/// Example:
/// `["hello", "World", "."]` → `"Hello world."`
pub fn format_sentence<S: AsRef<str>>(pieces: &[S]) -> String {
	let mut sentence = pieces.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ");
	for punctuation in PUNCTUATION {
		sentence = sentence.replace(&format!(" {punctuation}"), &punctuation.to_string());
	}

	let mut chars = sentence.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
		None => sentence,
	}
}

impl MarkovChain {
	/// Generates a sentence continuing `seed_phrase` with default bounds.
	///
	/// See [`MarkovChain::generate_with`].
	pub fn generate<R: Rng + ?Sized>(&self, seed_phrase: &str, mode: Mode, rng: &mut R) -> Result<String, ModelError> {
		self.generate_with(seed_phrase, &GenerationInput::new(mode), rng)
	}

	/// Generates a sentence continuing `seed_phrase`.
	///
	/// # Behavior
	/// - The last whitespace-delimited word of the seed is the first token,
	///   looked up as is (case-sensitive).
	/// - Tokens are predicted until `.`, `!` or `?` is reached.
	/// - Once more than `max_pieces` pieces (seed included) are emitted,
	///   the ellipsis marker is appended and generation stops.
	/// - The output is rendered by [`format_sentence`].
	///
	/// # Errors
	/// - [`ModelError::EmptySeed`] if the seed holds no word.
	/// - Any error of [`MarkovChain::predict`], propagated as is.
	pub fn generate_with<R: Rng + ?Sized>(
		&self,
		seed_phrase: &str,
		input: &GenerationInput,
		rng: &mut R,
	) -> Result<String, ModelError> {
		let mut current = seed_phrase.split_whitespace().next_back().ok_or(ModelError::EmptySeed)?;
		let mut pieces: Vec<&str> = vec![seed_phrase];

		while !is_terminal(current) {
			if pieces.len() > input.max_pieces {
				pieces.push(input.ellipsis());
				break;
			}
			current = self.predict(current, input.mode, rng)?;
			pieces.push(current);
		}

		debug!("Generated {} pieces from '{seed_phrase}'", pieces.len());
		Ok(format_sentence(&pieces))
	}
}

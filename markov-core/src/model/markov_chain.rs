use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::tokenizer::tokenize;
use super::transition_matrix::{TransitionMatrix, TransitionRow};
use super::vocabulary::Vocabulary;
use crate::error::ModelError;

/// Next-token selection strategy.
///
/// # Variants
/// - `Deterministic`: most likely continuation (arg-max of the row).
/// - `Stochastic`: continuation sampled from the row distribution.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
	#[default]
	Deterministic,
	Stochastic,
}

/// First-order Markov chain over word and punctuation tokens.
///
/// The model is trained once, at construction, and is read-only afterwards:
/// prediction only borrows it, so it can be shared between threads.
///
/// ## Responsibilities:
/// - Tokenize the corpus and build the vocabulary
/// - Build the transition matrix
/// - Predict the next token, deterministically or by sampling
///
/// ## Invariants
/// - `transitions.len() == vocabulary.len()`
#[derive(Clone, Debug)]
pub struct MarkovChain {
	vocabulary: Vocabulary,
	transitions: TransitionMatrix,
}

impl MarkovChain {
	/// Trains a model on `corpus`.
	///
	/// An empty corpus gives an empty model on which every lookup fails.
	pub fn new(corpus: &str) -> Self {
		let tokens = tokenize(corpus);
		let (vocabulary, indices) = Vocabulary::with_indices(&tokens);
		info!("Length of vocabulary: {}", vocabulary.len());

		info!("Training on {} tokens...", tokens.len());
		let transitions = TransitionMatrix::build(&indices, vocabulary.len());
		info!("Training done");

		Self { vocabulary, transitions }
	}

	/// Returns the trained vocabulary.
	pub fn vocabulary(&self) -> &Vocabulary {
		&self.vocabulary
	}

	/// Returns the trained transition matrix.
	pub fn transitions(&self) -> &TransitionMatrix {
		&self.transitions
	}

	/// Predicts the token following `token`.
	///
	/// - `Deterministic` returns the arg-max of the row (lowest index on
	///   ties) and never touches `rng`.
	/// - `Stochastic` draws exactly one uniform value `r` in `[0, 1)` and
	///   walks the row from the most to the least likely token (higher index
	///   first on ties), returning the first token whose cumulative
	///   probability exceeds `r`.
	///
	/// # Errors
	/// - [`ModelError::UnknownToken`] if `token` is not in the vocabulary.
	/// - [`ModelError::DegenerateRow`] if `token` was never followed by
	///   another token during training.
	pub fn predict<R: Rng + ?Sized>(&self, token: &str, mode: Mode, rng: &mut R) -> Result<&str, ModelError> {
		let from = self.vocabulary.index_of(token)?;
		let row = match self.transitions.row(from) {
			Some(row) if !row.is_degenerate() => row,
			_ => return Err(ModelError::DegenerateRow(token.to_owned())),
		};

		let next = match mode {
			Mode::Deterministic => row.argmax(),
			Mode::Stochastic => Self::sample(row, rng.random::<f64>()),
		};

		let next = next
			.and_then(|index| self.vocabulary.token(index))
			.ok_or_else(|| ModelError::DegenerateRow(token.to_owned()))?;
		debug!("{token} -> {next} ({mode:?})");
		Ok(next)
	}

	/// Selects an index from `row` given a uniform draw `r`.
	///
	/// Falls back to the last visited transition when rounding leaves the
	/// cumulative sum at or below `r`.
	fn sample(row: &TransitionRow, r: f64) -> Option<usize> {
		let mut cumulative = 0.0;
		let mut fallback = None;
		for transition in row.sampling_order() {
			cumulative += transition.probability;
			if r < cumulative {
				return Some(transition.to);
			}
			fallback = Some(transition.to);
		}
		fallback
	}
}

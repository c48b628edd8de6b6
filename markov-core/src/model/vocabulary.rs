use std::collections::{BTreeSet, HashMap};

use crate::error::ModelError;

/// Sorted set of distinct tokens observed in a corpus.
///
/// Indices are contiguous from `0` to `len - 1` and follow the sort order
/// of the tokens, not the order in which they appeared in the corpus.
///
/// # Invariants
/// - No duplicate tokens
/// - `tokens` is sorted ascending
/// - `indices[tokens[i]] == i` for every `i`
#[derive(Clone, Debug, Default)]
pub struct Vocabulary {
	/// Index → token, sorted.
	tokens: Vec<String>,
	/// Token → index.
	indices: HashMap<String, usize>,
}

impl Vocabulary {
	/// Builds the vocabulary of a token sequence.
	pub fn new<I, S>(tokens: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let sorted: BTreeSet<String> = tokens.into_iter().map(|t| t.as_ref().to_owned()).collect();
		Self::from_sorted(sorted.into_iter().collect())
	}

	/// Builds the vocabulary of `tokens` along with the index of every token.
	///
	/// `indices[k]` is the vocabulary index of `tokens[k]`, so the sequence
	/// never needs a lookup that could miss.
	pub fn with_indices<S: AsRef<str>>(tokens: &[S]) -> (Self, Vec<usize>) {
		let mut order: Vec<usize> = (0..tokens.len()).collect();
		order.sort_by(|&a, &b| tokens[a].as_ref().cmp(tokens[b].as_ref()));

		let mut sorted: Vec<String> = Vec::new();
		let mut indices = vec![0; tokens.len()];
		for position in order {
			let token = tokens[position].as_ref();
			if sorted.last().map(String::as_str) != Some(token) {
				sorted.push(token.to_owned());
			}
			indices[position] = sorted.len() - 1;
		}

		(Self::from_sorted(sorted), indices)
	}

	/// Indexes an already sorted and deduplicated token list.
	fn from_sorted(tokens: Vec<String>) -> Self {
		let indices = tokens
			.iter()
			.enumerate()
			.map(|(index, token)| (token.clone(), index))
			.collect();

		Self { tokens, indices }
	}

	/// Returns the number of distinct tokens.
	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	/// Returns true if no token was observed.
	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	/// Returns true if `token` is part of the vocabulary.
	pub fn contains(&self, token: &str) -> bool {
		self.indices.contains_key(token)
	}

	/// Returns the index of `token`.
	///
	/// # Errors
	/// Returns [`ModelError::UnknownToken`] if the token was never observed.
	pub fn index_of(&self, token: &str) -> Result<usize, ModelError> {
		self.indices
			.get(token)
			.copied()
			.ok_or_else(|| ModelError::UnknownToken(token.to_owned()))
	}

	/// Returns the token at `index`, or `None` if out of range.
	pub fn token(&self, index: usize) -> Option<&str> {
		self.tokens.get(index).map(String::as_str)
	}

	/// Iterates over the tokens in index order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.tokens.iter().map(String::as_str)
	}
}

use std::cmp::Ordering;
use std::collections::HashMap;

use log::debug;

/// One observed edge of the chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
	/// Vocabulary index of the next token.
	pub to: usize,
	/// Number of times the edge was observed.
	pub count: usize,
	/// `count` divided by the row total.
	pub probability: f64,
}

/// Outgoing distribution of a single token.
///
/// Only observed transitions are stored; every other cell of the row
/// reads as probability `0.0`.
#[derive(Clone, Debug, PartialEq)]
pub enum TransitionRow {
	/// The token was never followed by another token, the row total is zero
	/// and its normalized distribution is undefined.
	Degenerate,
	/// Observed transitions, sorted by ascending `to`.
	Distribution { total: usize, transitions: Vec<Transition> },
}

impl TransitionRow {
	/// Normalizes occurrence counts into a row.
	fn from_counts(counts: HashMap<usize, usize>) -> Self {
		let total: usize = counts.values().sum();
		if total == 0 {
			return TransitionRow::Degenerate;
		}

		let mut transitions: Vec<Transition> = counts
			.into_iter()
			.map(|(to, count)| Transition { to, count, probability: count as f64 / total as f64 })
			.collect();
		transitions.sort_by_key(|transition| transition.to);

		TransitionRow::Distribution { total, transitions }
	}

	/// Returns true if the row has no outgoing transition.
	pub fn is_degenerate(&self) -> bool {
		matches!(self, TransitionRow::Degenerate)
	}

	/// Returns the probability of moving to `to`, `None` for a degenerate row.
	pub fn probability(&self, to: usize) -> Option<f64> {
		match self {
			TransitionRow::Degenerate => None,
			TransitionRow::Distribution { transitions, .. } => Some(
				transitions
					.binary_search_by_key(&to, |transition| transition.to)
					.map(|position| transitions[position].probability)
					.unwrap_or(0.0),
			),
		}
	}

	/// Returns the index holding the highest probability.
	///
	/// Ties resolve to the lowest index. `None` for a degenerate row.
	pub fn argmax(&self) -> Option<usize> {
		let TransitionRow::Distribution { transitions, .. } = self else {
			return None;
		};

		let mut best: Option<&Transition> = None;
		for transition in transitions {
			match best {
				Some(b) if transition.probability <= b.probability => (),
				_ => best = Some(transition),
			}
		}
		best.map(|transition| transition.to)
	}

	/// Returns the transitions ordered for cumulative sampling.
	///
	/// Descending by probability; equal probabilities visit the higher
	/// index first. Empty for a degenerate row.
	pub fn sampling_order(&self) -> Vec<Transition> {
		let TransitionRow::Distribution { transitions, .. } = self else {
			return Vec::new();
		};

		let mut ordered = transitions.clone();
		ordered.sort_by(|a, b| match b.probability.total_cmp(&a.probability) {
			Ordering::Equal => b.to.cmp(&a.to),
			other => other,
		});
		ordered
	}

	/// Sum of the row, `None` for a degenerate row.
	pub fn sum(&self) -> Option<f64> {
		match self {
			TransitionRow::Degenerate => None,
			TransitionRow::Distribution { transitions, .. } => {
				Some(transitions.iter().map(|transition| transition.probability).sum())
			}
		}
	}
}

/// Square matrix of transition probabilities indexed by vocabulary index.
///
/// # Invariants
/// - One row per vocabulary token
/// - Every non-degenerate row sums to 1.0 (up to rounding)
/// - Never mutated after [`TransitionMatrix::build`]
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionMatrix {
	rows: Vec<TransitionRow>,
}

impl TransitionMatrix {
	/// Counts every adjacent pair of `indices` and normalizes each row.
	///
	/// `indices` is the tokenized corpus mapped through a vocabulary of
	/// `size` tokens, every index must be below `size`. The last index
	/// contributes no outgoing pair.
	pub fn build(indices: &[usize], size: usize) -> Self {
		let mut counts: Vec<HashMap<usize, usize>> = vec![HashMap::new(); size];

		for pair in indices.windows(2) {
			*counts[pair[0]].entry(pair[1]).or_insert(0) += 1;
		}

		let rows: Vec<TransitionRow> = counts.into_iter().map(TransitionRow::from_counts).collect();
		debug!(
			"Built {} rows ({} degenerate)",
			rows.len(),
			rows.iter().filter(|row| row.is_degenerate()).count()
		);

		Self { rows }
	}

	/// Returns the matrix dimension (vocabulary length).
	pub fn len(&self) -> usize {
		self.rows.len()
	}

	/// Returns true if the matrix has no row.
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// Returns the row of `from`, or `None` if out of range.
	pub fn row(&self, from: usize) -> Option<&TransitionRow> {
		self.rows.get(from)
	}

	/// Returns P(`to` | `from`).
	///
	/// `None` if `from` is out of range or its row is degenerate.
	pub fn probability(&self, from: usize, to: usize) -> Option<f64> {
		self.row(from)?.probability(to)
	}

	/// Returns the number of observed `from` → `to` transitions.
	pub fn count(&self, from: usize, to: usize) -> usize {
		match self.row(from) {
			Some(TransitionRow::Distribution { transitions, .. }) => transitions
				.binary_search_by_key(&to, |transition| transition.to)
				.map(|position| transitions[position].count)
				.unwrap_or(0),
			_ => 0,
		}
	}

	/// Returns the number of observed transitions leaving `from`.
	pub fn row_total(&self, from: usize) -> usize {
		match self.row(from) {
			Some(TransitionRow::Distribution { total, .. }) => *total,
			_ => 0,
		}
	}

	/// Returns true if `from` has no outgoing transition.
	pub fn is_degenerate(&self, from: usize) -> bool {
		self.row(from).is_none_or(TransitionRow::is_degenerate)
	}
}

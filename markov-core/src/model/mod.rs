//! Top-level module for the Markov chain model.
//!
//! Components, leaves first:
//! - Tokenization of raw text (`tokenizer`)
//! - Sorted vocabulary with stable indices (`Vocabulary`)
//! - Row-stochastic transition matrix (`TransitionMatrix`)
//! - The trained model and its predictor (`MarkovChain`)
//! - Sentence generation and its configuration (`GenerationInput`)

/// Splits raw text into word and punctuation tokens.
pub mod tokenizer;

/// Sorted, deduplicated set of tokens with O(1) index lookup.
pub mod vocabulary;

/// Adjacency counting and row normalization.
///
/// Degenerate rows (no outgoing transition) are kept as an explicit marker.
pub mod transition_matrix;

/// Trained model: vocabulary, transition matrix and next-token prediction.
pub mod markov_chain;

/// Sentence generation loop, termination rule and output formatting.
pub mod generator;

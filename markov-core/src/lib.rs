//! Word-level Markov chain text generation library.
//!
//! This crate provides a first-order Markov chain over a token stream:
//! - Punctuation-aware tokenization
//! - A sorted vocabulary with stable indices
//! - A row-stochastic transition matrix
//! - Deterministic (arg-max) and stochastic (sampled) next-token prediction
//! - Bounded sentence generation from a seed phrase
//!
//! Corpus loading is kept in `io`; the trained model never touches the disk.

/// Core Markov chain model and generation logic.
pub mod model;

/// Error types shared by the model and its configuration.
pub mod error;

/// I/O utilities (record loading, corpus assembly).
pub mod io;

pub use error::{ConfigError, ModelError};
pub use model::generator::GenerationInput;
pub use model::markov_chain::{MarkovChain, Mode};

use thiserror::Error;

/// Errors raised by prediction and generation.
///
/// None of these are recovered inside the crate: a best-guess token would
/// corrupt the generated sequence, so callers get the failure as is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
	/// The token was never observed in the training corpus.
	#[error("token '{0}' not in vocabulary")]
	UnknownToken(String),

	/// The token was observed but never followed by another token.
	#[error("token '{0}' has no observed outgoing transition")]
	DegenerateRow(String),

	/// The seed phrase holds no whitespace-delimited word.
	#[error("seed phrase is empty")]
	EmptySeed,
}

/// Errors raised while building or validating configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
	/// A value is out of its accepted range.
	#[error("invalid configuration: {0}")]
	Validation(String),

	/// An environment variable could not be read.
	#[error("env var {key}: {message}")]
	EnvVar { key: String, message: String },

	/// An environment variable was set but could not be parsed.
	#[error("env var {key}={value:?}: {message}")]
	Parse { key: String, value: String, message: String },
}

//! Server configuration read from `MARKOV_*` environment variables.

use std::path::PathBuf;

use markov_core::ConfigError;

/// Prefix shared by every environment variable of the server.
pub const ENV_PREFIX: &str = "MARKOV_";

const ENV_CORPUS_PATH: &str = "CORPUS_PATH";
const ENV_HOST: &str = "HOST";
const ENV_PORT: &str = "PORT";
const ENV_SEED: &str = "SEED";

/// Settings needed to train the model and bind the HTTP server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
	/// Record file the model is trained on (one record per line).
	pub corpus_path: PathBuf,
	pub host: String,
	pub port: u16,
	/// Seed of the random source; OS entropy when unset.
	pub seed: Option<u64>,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			corpus_path: PathBuf::from("./data/dialogue.txt"),
			host: "127.0.0.1".to_owned(),
			port: 5000,
			seed: None,
		}
	}
}

/// Returns the full environment variable key for a suffix (`PORT` → `MARKOV_PORT`).
pub fn env_key(suffix: &str) -> String {
	format!("{ENV_PREFIX}{suffix}")
}

/// Reads an environment variable, `None` if unset.
///
/// # Errors
/// Returns [`ConfigError::EnvVar`] if the value is not valid Unicode.
fn env_string(key: &str) -> Result<Option<String>, ConfigError> {
	match std::env::var(key) {
		Ok(s) => Ok(Some(s)),
		Err(std::env::VarError::NotPresent) => Ok(None),
		Err(e) => Err(ConfigError::EnvVar { key: key.to_owned(), message: e.to_string() }),
	}
}

/// Reads and parses an environment variable, `None` if unset.
///
/// # Errors
/// Returns [`ConfigError::Parse`] if the value does not parse into `T`.
fn env_parsed<T>(key: &str) -> Result<Option<T>, ConfigError>
where
	T: std::str::FromStr,
	T::Err: std::fmt::Display,
{
	let Some(value) = env_string(key)? else {
		return Ok(None);
	};
	value
		.parse()
		.map(Some)
		.map_err(|e: T::Err| ConfigError::Parse { key: key.to_owned(), value, message: e.to_string() })
}

impl ServerConfig {
	/// Builds the configuration from the environment, falling back to
	/// [`ServerConfig::default`] for every unset variable.
	///
	/// # Errors
	/// Returns [`ConfigError`] if a set variable is invalid.
	pub fn from_env() -> Result<Self, ConfigError> {
		let default = Self::default();

		let config = Self {
			corpus_path: env_string(&env_key(ENV_CORPUS_PATH))?.map(PathBuf::from).unwrap_or(default.corpus_path),
			host: env_string(&env_key(ENV_HOST))?.unwrap_or(default.host),
			port: env_parsed(&env_key(ENV_PORT))?.unwrap_or(default.port),
			seed: env_parsed(&env_key(ENV_SEED))?.or(default.seed),
		};
		config.validate()?;
		Ok(config)
	}

	/// Checks value ranges.
	///
	/// # Errors
	/// Returns [`ConfigError::Validation`] on an empty host or a zero port.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.host.trim().is_empty() {
			return Err(ConfigError::Validation("host must not be empty".to_owned()));
		}
		if self.port == 0 {
			return Err(ConfigError::Validation("port must be > 0".to_owned()));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Mutex;

	/// Env tests share the process environment.
	static ENV_LOCK: Mutex<()> = Mutex::new(());

	fn clear() {
		for suffix in [ENV_CORPUS_PATH, ENV_HOST, ENV_PORT, ENV_SEED] {
			// SAFETY: serialized by ENV_LOCK
			unsafe { std::env::remove_var(env_key(suffix)) };
		}
	}

	#[test]
	fn falls_back_to_defaults() {
		let _guard = ENV_LOCK.lock().unwrap();
		clear();
		assert_eq!(ServerConfig::from_env().unwrap(), ServerConfig::default());
	}

	#[test]
	fn reads_overrides() {
		let _guard = ENV_LOCK.lock().unwrap();
		clear();
		// SAFETY: serialized by ENV_LOCK
		unsafe {
			std::env::set_var(env_key(ENV_PORT), "8080");
			std::env::set_var(env_key(ENV_SEED), "7");
			std::env::set_var(env_key(ENV_CORPUS_PATH), "/tmp/records.txt");
		}
		let config = ServerConfig::from_env().unwrap();
		clear();

		assert_eq!(config.port, 8080);
		assert_eq!(config.seed, Some(7));
		assert_eq!(config.corpus_path, PathBuf::from("/tmp/records.txt"));
		assert_eq!(config.host, "127.0.0.1");
	}

	#[test]
	fn invalid_values_are_rejected() {
		let _guard = ENV_LOCK.lock().unwrap();
		clear();
		// SAFETY: serialized by ENV_LOCK
		unsafe { std::env::set_var(env_key(ENV_PORT), "not_a_port") };
		let result = ServerConfig::from_env();
		clear();
		assert!(matches!(result, Err(ConfigError::Parse { ref key, .. }) if key == "MARKOV_PORT"));

		let config = ServerConfig { port: 0, ..ServerConfig::default() };
		assert!(config.validate().is_err());
	}
}

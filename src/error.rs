use std::path::PathBuf;

/// Library-level structured errors for conn.
///
/// The binary wraps these with `anyhow` for context chains. Most of them are
/// only ever logged: host resolution degrades to running the command unchanged.
#[derive(Debug, thiserror::Error)]
pub enum ConnError {
	#[error("Failed to read config file: {path}")]
	ConfigRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Invalid value for option {key}: {value} ({reason})")]
	InvalidOption {
		key: String,
		value: String,
		reason: String,
	},

	#[error("Unknown option: {key}")]
	UnknownOption { key: String },

	#[error("Failed to read host source: {path}")]
	ListerRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Missing argument for lister: {lister}")]
	ListerArgument { lister: String },

	#[error("Invalid regex pattern: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Failed to read cache file: {path}")]
	CacheRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write cache file: {path}")]
	CacheWrite {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Command execution failed: {command}")]
	CommandFailed {
		command: String,
		#[source]
		source: std::io::Error,
	},

	#[error("Command not found: {command}")]
	CommandNotFound { command: String },
}

/// Result type alias using ConnError.
pub type Result<T> = std::result::Result<T, ConnError>;

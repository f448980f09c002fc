use crate::config::paths::config_path;
use crate::config::types::Options;
use crate::error::{ConnError, Result};
use std::path::Path;
use tracing::{debug, warn};

/// Load a config file and apply it on top of `options`.
///
/// Per-line problems are logged and skipped. Only an unreadable file is an
/// error, and callers are expected to carry on with the defaults.
pub fn load_config(path: &Path, options: &mut Options) -> Result<()> {
	let content = std::fs::read_to_string(path).map_err(|source| ConnError::ConfigRead {
		path: path.to_path_buf(),
		source,
	})?;

	for problem in parse_config_str(&content, options) {
		warn!("{problem}");
	}
	debug!("loaded config: {}", path.display());

	Ok(())
}

/// Compiled-in defaults overlaid with the config file, when it can be read.
pub fn load_options() -> Options {
	let mut options = Options::default();
	let path = config_path(&options);
	if let Err(e) = load_config(&path, &mut options) {
		warn!("{e}, using defaults");
	}
	options
}

/// Apply key=value lines to `options`, returning the lines that were rejected.
///
/// Lines starting with `#` are comments, lines without `=` are ignored. Keys
/// and values are trimmed of spaces and quote characters.
pub fn parse_config_str(content: &str, options: &mut Options) -> Vec<ConnError> {
	let mut problems = Vec::new();

	for line in content.lines() {
		let line = line.trim_start();
		if line.starts_with('#') {
			continue;
		}

		let Some((key, value)) = line.split_once('=') else {
			continue;
		};

		let key = trim_quoted(key);
		let value = trim_quoted(value);

		if let Err(e) = options.set(key, value) {
			problems.push(e);
		}
	}

	problems
}

fn trim_quoted(s: &str) -> &str {
	s.trim_matches(|c| c == ' ' || c == '\'' || c == '"')
}

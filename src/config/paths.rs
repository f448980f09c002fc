use crate::config::types::Options;
use std::path::PathBuf;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "CONN_CONFIG";

/// Replace a leading `~/` with the user's home directory.
///
/// Paths without the prefix, or when no home directory can be found, are
/// returned as-is.
pub fn expand_path(path: &str) -> PathBuf {
	if let Some(rest) = path.strip_prefix("~/")
		&& let Some(home) = dirs::home_dir()
	{
		return home.join(rest);
	}
	PathBuf::from(path)
}

/// Resolve the config file to load: `$CONN_CONFIG` if set, else the default.
pub fn config_path(options: &Options) -> PathBuf {
	match std::env::var(CONFIG_ENV_VAR) {
		Ok(path) if !path.is_empty() => expand_path(&path),
		_ => expand_path(&options.conf_file),
	}
}

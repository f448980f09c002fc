//! Running the real ssh/scp binary.

use crate::error::{ConnError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Execute a command with stdin, stdout and stderr passed through.
pub fn execute_command(binary: &Path, args: &[String]) -> Result<ExitStatus> {
	let mut cmd = Command::new(binary);
	cmd.args(args)
		.stdin(Stdio::inherit())
		.stdout(Stdio::inherit())
		.stderr(Stdio::inherit());

	cmd.status().map_err(|source| {
		let command = binary.to_string_lossy().to_string();
		if source.kind() == std::io::ErrorKind::NotFound {
			ConnError::CommandNotFound { command }
		} else {
			ConnError::CommandFailed { command, source }
		}
	})
}

/// Resolve a command name to its full path.
///
/// Absolute paths must exist. Anything else is searched for on PATH.
pub fn resolve_command(command: &str) -> Option<PathBuf> {
	let path = Path::new(command);

	if path.is_absolute() {
		return path.exists().then(|| path.to_path_buf());
	}

	let path_var = std::env::var_os("PATH")?;
	std::env::split_paths(&path_var)
		.map(|dir| dir.join(command))
		.find(|full_path| full_path.exists())
}

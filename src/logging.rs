//! Logging setup.
//!
//! The wrapper stays quiet by default so nothing ends up mixed into the
//! wrapped tool's output. `--debug` switches to debug level; `RUST_LOG`
//! overrides both.

use std::io::{IsTerminal, stderr};
use tracing_subscriber::{EnvFilter, fmt::layer, prelude::*};

/// Install the global subscriber, writing to stderr. Later calls are no-ops.
pub fn init_logging(debug: bool) {
	let level = if debug { "debug" } else { "error" };
	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

	let _ = tracing_subscriber::registry()
		.with(env_filter)
		.with(
			layer()
				.with_writer(stderr)
				.with_target(false)
				.with_ansi(stderr().is_terminal()),
		)
		.try_init();
}

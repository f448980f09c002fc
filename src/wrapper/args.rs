/// A command-line argument of the form `[user@]abbrev[:path]`.
///
/// `prefix + abbrev + suffix` always reproduces the original argument.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostToken {
	/// `user@`, or empty.
	pub prefix: String,

	/// The part to expand into a host name.
	pub abbrev: String,

	/// `:path`, or empty.
	pub suffix: String,
}

impl HostToken {
	/// Split on the first `@` and then the first `:` after it.
	pub fn split(arg: &str) -> Self {
		let (prefix, rest) = match arg.find('@') {
			Some(i) => arg.split_at(i + 1),
			None => ("", arg),
		};
		let (abbrev, suffix) = match rest.find(':') {
			Some(i) => rest.split_at(i),
			None => (rest, ""),
		};

		HostToken {
			prefix: prefix.to_string(),
			abbrev: abbrev.to_string(),
			suffix: suffix.to_string(),
		}
	}

	/// Reattach prefix and suffix around a resolved host.
	pub fn join(&self, host: &str) -> String {
		format!("{}{}{}", self.prefix, host, self.suffix)
	}
}

/// Result of scanning an argument vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
	/// Arguments for the real tool, wrapper flags removed. `args[0]` is the program name.
	pub args: Vec<String>,

	/// Double-dash flags meant for the wrapper itself.
	pub wrapper_flags: Vec<String>,

	/// Index into `args` of the host token, if one was found.
	pub host_index: Option<usize>,

	/// Leave the arguments alone entirely.
	pub skip: bool,
}

/// Tool-specific knowledge of where the host sits in an argument vector.
pub trait ArgParser {
	fn parse(&self, argv: &[String]) -> ParsedArgs;
}

/// ssh: the first operand that is not an option or an option's value.
#[derive(Debug, Clone, Copy, Default)]
pub struct SshArgs;

impl SshArgs {
	/// Option letters that take a value.
	pub const ARG_LETTERS: &'static str = "bcDeFiLlmopRS";

	/// Whether an option cluster ends in a letter whose value is the next argument.
	fn wants_next(cluster: &str) -> bool {
		for (i, c) in cluster.char_indices() {
			if Self::ARG_LETTERS.contains(c) {
				return i + c.len_utf8() == cluster.len();
			}
		}
		false
	}
}

impl ArgParser for SshArgs {
	fn parse(&self, argv: &[String]) -> ParsedArgs {
		let mut parsed = ParsedArgs::default();
		let Some((program, rest)) = argv.split_first() else {
			return parsed;
		};
		parsed.args.push(program.clone());

		let mut value_next = false;
		for (i, arg) in rest.iter().enumerate() {
			// ssh only has single-dash options, so double dashes belong to us.
			if arg.starts_with("--") {
				parsed.wrapper_flags.push(arg.clone());
				continue;
			}

			parsed.args.push(arg.clone());

			if value_next {
				value_next = false;
				continue;
			}

			if arg.starts_with('-') {
				value_next = Self::wants_next(arg);
				continue;
			}

			parsed.host_index = Some(parsed.args.len() - 1);
			parsed.args.extend_from_slice(&rest[i + 1..]);
			break;
		}

		parsed
	}
}

/// scp: the first argument containing `:`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScpArgs;

impl ArgParser for ScpArgs {
	fn parse(&self, argv: &[String]) -> ParsedArgs {
		let mut parsed = ParsedArgs::default();
		let Some((program, rest)) = argv.split_first() else {
			return parsed;
		};
		parsed.args.push(program.clone());

		for (i, arg) in rest.iter().enumerate() {
			if arg.starts_with("--") {
				parsed.wrapper_flags.push(arg.clone());
				continue;
			}

			// -t / -f: scp running as the remote end of a transfer
			if arg == "-t" || arg == "-f" {
				parsed.skip = true;
			}

			parsed.args.push(arg.clone());

			if arg.contains(':') {
				parsed.host_index = Some(parsed.args.len() - 1);
				parsed.args.extend_from_slice(&rest[i + 1..]);
				break;
			}
		}

		parsed
	}
}

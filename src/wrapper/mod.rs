//! The ssh/scp wrapper itself.
//!
//! A [`Wrapper`] goes through parse, expand and decide in that order:
//! wrapper flags are pulled out of the arguments, the host token is expanded
//! against the known hosts, and the result is either a listing or a command
//! line to run.

pub mod args;

pub use args::{ArgParser, HostToken, ParsedArgs, ScpArgs, SshArgs};

use crate::config::Options;
use crate::hosts::{CacheStore, HostCache, ListerRegistry};
use crate::matching::{MatcherRegistry, resolve};
use std::path::Path;
use tracing::debug;

/// The wrapped tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
	Ssh,
	Scp,
}

impl Tool {
	pub fn from_name(name: &str) -> Option<Self> {
		match name {
			"ssh" => Some(Tool::Ssh),
			"scp" => Some(Tool::Scp),
			_ => None,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Tool::Ssh => "ssh",
			Tool::Scp => "scp",
		}
	}

	/// Configured path of the real binary.
	pub fn binary<'a>(&self, options: &'a Options) -> &'a str {
		match self {
			Tool::Ssh => options.ssh_bin.as_str(),
			Tool::Scp => options.scp_bin.as_str(),
		}
	}

	fn parse(&self, argv: &[String]) -> ParsedArgs {
		match self {
			Tool::Ssh => SshArgs.parse(argv),
			Tool::Scp => ScpArgs.parse(argv),
		}
	}
}

/// Double-dash flags understood by the wrapper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrapperFlags {
	/// `--update`: rebuild the host cache.
	pub update: bool,

	/// `--list`: print candidates instead of running.
	pub list: bool,

	/// `--debug`: verbose logging.
	pub debug: bool,

	/// Anything else with a double dash. Dropped.
	pub unknown: Vec<String>,
}

impl WrapperFlags {
	pub fn from_args(flags: &[String]) -> Self {
		let mut parsed = WrapperFlags::default();
		for flag in flags {
			match flag.as_str() {
				"--update" => parsed.update = true,
				"--list" => parsed.list = true,
				"--debug" => parsed.debug = true,
				_ => parsed.unknown.push(flag.clone()),
			}
		}
		parsed
	}
}

/// Everything needed to turn an abbreviation into candidate hosts.
pub struct Resolver<'a, S: CacheStore> {
	pub cache: &'a HostCache<S>,
	pub listers: &'a ListerRegistry,
	pub matchers: &'a MatcherRegistry,
	pub lister_spec: &'a str,
	pub matcher_spec: &'a str,
}

impl<'a, S: CacheStore> Resolver<'a, S> {
	pub fn new(
		options: &'a Options,
		cache: &'a HostCache<S>,
		listers: &'a ListerRegistry,
		matchers: &'a MatcherRegistry,
	) -> Self {
		Resolver {
			cache,
			listers,
			matchers,
			lister_spec: &options.lister,
			matcher_spec: &options.matcher,
		}
	}

	/// Candidate hosts for `abbrev`. Empty when no host list is available.
	pub fn expand(&self, abbrev: &str, force_update: bool) -> Vec<String> {
		let hosts = self
			.cache
			.get_hosts(self.listers, self.lister_spec, force_update);
		if hosts.is_empty() {
			return hosts;
		}
		resolve(self.matchers, self.matcher_spec, abbrev, &hosts)
	}
}

/// What to do once expansion is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
	/// Print the candidates. `ambiguous` is false when listing was requested.
	List { ambiguous: bool, hosts: Vec<String> },

	/// Run `binary` with `args` (program name not included).
	Run { binary: String, args: Vec<String> },
}

impl Decision {
	/// Listing text, or `None` when the tool should run.
	pub fn listing(&self) -> Option<String> {
		let Decision::List { ambiguous, hosts } = self else {
			return None;
		};
		let mut out = String::from(if *ambiguous {
			"more than one host:\n"
		} else {
			"host list:\n"
		});
		for host in hosts {
			out.push_str("  ");
			out.push_str(host);
			out.push('\n');
		}
		Some(out)
	}
}

/// One wrapped invocation.
#[derive(Debug, Clone)]
pub struct Wrapper {
	tool: Tool,
	args: Vec<String>,
	host_index: Option<usize>,
	token: HostToken,
	hosts: Vec<String>,
	update: bool,
	list: bool,
	skip: bool,
}

impl Wrapper {
	/// Pick the tool from the program name (`ssh` symlink) or the first
	/// argument (`conn ssh ...`). `None` if neither names a known tool.
	pub fn new(argv: &[String]) -> Option<Self> {
		argv.iter().take(2).enumerate().find_map(|(i, arg)| {
			let name = Path::new(arg).file_name()?.to_str()?;
			let tool = Tool::from_name(name)?;
			Some(Wrapper {
				tool,
				args: argv[i..].to_vec(),
				host_index: None,
				token: HostToken::default(),
				hosts: Vec::new(),
				update: false,
				list: false,
				skip: false,
			})
		})
	}

	pub fn tool(&self) -> Tool {
		self.tool
	}

	/// Current argument vector, program name first.
	pub fn args(&self) -> &[String] {
		&self.args
	}

	pub fn host_index(&self) -> Option<usize> {
		self.host_index
	}

	pub fn hosts(&self) -> &[String] {
		&self.hosts
	}

	/// Strip wrapper flags out of the arguments and locate the host token.
	pub fn parse_args(&mut self) -> WrapperFlags {
		let parsed = self.tool.parse(&self.args);
		debug!(
			"args after parse: [a:{:?}] [w:{:?}]",
			parsed.args, parsed.wrapper_flags
		);

		self.args = parsed.args;
		self.host_index = parsed.host_index;
		self.skip = parsed.skip;

		let flags = WrapperFlags::from_args(&parsed.wrapper_flags);
		if !flags.unknown.is_empty() {
			debug!("ignoring wrapper flags: {:?}", flags.unknown);
		}
		if flags.update {
			self.force_update();
		}
		self.list |= flags.list;
		flags
	}

	/// Rebuild the host cache regardless of its age.
	pub fn force_update(&mut self) {
		debug!("force cache update");
		self.update = true;
	}

	/// Expand the host token into candidate hosts.
	pub fn expand<S: CacheStore>(&mut self, resolver: &Resolver<'_, S>) -> &[String] {
		if self.skip {
			debug!("remote scp, not expanding");
			return &self.hosts;
		}
		let Some(index) = self.host_index else {
			return &self.hosts;
		};

		self.token = HostToken::split(&self.args[index]);
		self.hosts = resolver.expand(&self.token.abbrev, self.update);
		&self.hosts
	}

	/// List or run. A unique candidate replaces the host token.
	pub fn decide(mut self, options: &Options) -> Decision {
		if self.list || self.hosts.len() > 1 {
			return Decision::List {
				ambiguous: !self.list,
				hosts: self.hosts,
			};
		}

		if let (Some(index), [host]) = (self.host_index, self.hosts.as_slice()) {
			self.args[index] = self.token.join(host);
		}
		debug!("call {}: {:?}", self.tool.as_str(), self.args);

		Decision::Run {
			binary: self.tool.binary(options).to_string(),
			args: self.args.split_off(1),
		}
	}
}

/// Banner for invocations that name no known tool.
pub fn usage(sep: &str) -> String {
	format!(
		"conn version: {version}\n\
		 Usage: conn <ssh|scp> [program specified args]\n\
		 \x20      or make symbolic link named <ssh|scp>\n\
		 \n\
		 \x20      use `{sep}' to separate host parts, e.g.:\n\
		 \x20        $ conn ssh example{sep}www{sep}com\n",
		version = env!("CARGO_PKG_VERSION"),
	)
}

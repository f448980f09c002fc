use crate::config::expand_path;
use crate::error::{ConnError, Result};
use std::collections::HashMap;
use std::net::IpAddr;
use tracing::{debug, warn};

/// A source of host names. The argument is lister specific, often a path.
pub trait Lister {
	fn list(&self, arg: &str) -> Result<Vec<String>>;
}

impl<F> Lister for F
where
	F: Fn(&str) -> Result<Vec<String>>,
{
	fn list(&self, arg: &str) -> Result<Vec<String>> {
		self(arg)
	}
}

/// Named listers. Filled once at startup, then only looked up.
#[derive(Default)]
pub struct ListerRegistry {
	listers: HashMap<String, Box<dyn Lister>>,
}

impl ListerRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registry with `khost`, `sshconfig` and `file`.
	pub fn with_builtins() -> Self {
		let mut registry = Self::new();
		registry.register("khost", list_known_hosts);
		registry.register("sshconfig", list_ssh_config);
		registry.register("file", list_file);
		registry
	}

	/// Add a lister, replacing any previous one with the same name.
	pub fn register(&mut self, name: &str, lister: impl Lister + 'static) {
		self.listers.insert(name.to_string(), Box::new(lister));
	}

	pub fn lookup(&self, name: &str) -> Option<&dyn Lister> {
		self.listers.get(name).map(|l| l.as_ref())
	}
}

/// Run every `name|arg` entry of a comma-separated lister spec, in order.
///
/// Malformed entries, unknown listers and failing listers are logged and
/// contribute nothing.
pub fn list_hosts(registry: &ListerRegistry, spec: &str) -> Vec<String> {
	let mut hosts = Vec::new();

	for entry in spec.split(',') {
		let entry = entry.trim();
		if entry.is_empty() {
			continue;
		}

		let parts: Vec<&str> = entry.split('|').collect();
		if parts.len() != 2 {
			warn!("lister syntax error: {entry}");
			continue;
		}
		let (name, arg) = (parts[0], parts[1]);

		let Some(lister) = registry.lookup(name) else {
			warn!("no such lister: {name}");
			continue;
		};

		match lister.list(arg) {
			Ok(found) if found.is_empty() => debug!("lister {name} returned nothing"),
			Ok(found) => {
				debug!("lister {name} got {} hosts", found.len());
				hosts.extend(found);
			}
			Err(e) => warn!("list failed: [{name}] {e}"),
		}
	}

	hosts
}

fn read_source(arg: &str, default: &str) -> Result<String> {
	let path = expand_path(if arg.is_empty() { default } else { arg });
	std::fs::read_to_string(&path).map_err(|source| ConnError::ListerRead { path, source })
}

/// `khost`: host names from a known_hosts file (default `~/.ssh/known_hosts`).
pub fn list_known_hosts(arg: &str) -> Result<Vec<String>> {
	let content = read_source(arg, "~/.ssh/known_hosts")?;
	Ok(parse_known_hosts(&content))
}

/// Extract host aliases from known_hosts content.
///
/// Only `aliases keytype key` lines count. Hashed entries (`|1|...`), IP
/// literals and `[host]:port` style aliases are skipped.
pub fn parse_known_hosts(content: &str) -> Vec<String> {
	let mut hosts = Vec::new();

	for line in content.lines() {
		if line.starts_with('#') || line.trim().is_empty() || line.starts_with('|') {
			continue;
		}

		let fields: Vec<&str> = line.split_whitespace().collect();
		if fields.len() != 3 {
			continue;
		}

		for alias in fields[0].split(',') {
			if alias.is_empty() || alias.parse::<IpAddr>().is_ok() || alias.contains(':') {
				continue;
			}
			hosts.push(alias.to_string());
		}
	}

	hosts
}

/// `sshconfig`: `Host` patterns from an ssh config file (default `~/.ssh/config`).
pub fn list_ssh_config(arg: &str) -> Result<Vec<String>> {
	let content = read_source(arg, "~/.ssh/config")?;
	Ok(parse_ssh_config(&content))
}

/// Concrete `Host` names of an ssh config. Wildcards and negations are skipped.
pub fn parse_ssh_config(content: &str) -> Vec<String> {
	let mut hosts = Vec::new();

	for line in content.lines() {
		let line = line.trim();
		if line.is_empty() || line.starts_with('#') {
			continue;
		}

		let mut words = line.split_whitespace();
		let Some(keyword) = words.next() else {
			continue;
		};
		if !keyword.eq_ignore_ascii_case("host") {
			continue;
		}

		for pattern in words {
			if pattern.contains(['*', '?']) || pattern.starts_with('!') {
				continue;
			}
			hosts.push(pattern.to_string());
		}
	}

	hosts
}

/// `file`: a plain host list, one name per line. The argument is the path.
pub fn list_file(arg: &str) -> Result<Vec<String>> {
	if arg.is_empty() {
		return Err(ConnError::ListerArgument {
			lister: "file".to_string(),
		});
	}
	let path = expand_path(arg);
	let content =
		std::fs::read_to_string(&path).map_err(|source| ConnError::ListerRead { path, source })?;

	Ok(content
		.lines()
		.map(str::trim)
		.filter(|l| !l.is_empty() && !l.starts_with('#'))
		.map(str::to_string)
		.collect())
}

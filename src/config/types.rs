use crate::error::{ConnError, Result};
use std::time::Duration;

/// Process-wide options. Populated once at startup, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
	/// Path of the real ssh binary.
	pub ssh_bin: String,

	/// Path of the real scp binary.
	pub scp_bin: String,

	/// Config file location. Only meaningful as a default; see [`crate::config::config_path`].
	pub conf_file: String,

	/// Where the host list cache is persisted.
	pub cache_file: String,

	/// How long a cache stays fresh. Zero means it never expires.
	pub cache_expire: Duration,

	/// Separator between keys of an abbreviation.
	pub sep: String,

	/// Comma-separated matcher chain, tried in order.
	pub matcher: String,

	/// Comma-separated `name|arg` lister chain.
	pub lister: String,

	/// Regex for the `alias_regexp` matcher.
	pub alias_regexp: Option<String>,

	/// Replacement template for the `alias_regexp` matcher.
	pub alias_template: Option<String>,
}

impl Default for Options {
	fn default() -> Self {
		Options {
			ssh_bin: "/usr/bin/ssh".to_string(),
			scp_bin: "/usr/bin/scp".to_string(),
			conf_file: "~/.conn.conf".to_string(),
			cache_file: "~/.conn.cache".to_string(),
			cache_expire: Duration::from_secs(3600 * 24),
			sep: ".".to_string(),
			matcher: "subtoken, token, substring, string".to_string(),
			lister: "khost|".to_string(),
			alias_regexp: None,
			alias_template: None,
		}
	}
}

type Setter = fn(&mut Options, &str) -> Result<()>;

/// Every recognised config key and how it is applied.
const SCHEMA: &[(&str, Setter)] = &[
	("ssh_bin", |o, v| {
		o.ssh_bin = v.to_string();
		Ok(())
	}),
	("scp_bin", |o, v| {
		o.scp_bin = v.to_string();
		Ok(())
	}),
	("conf_file", |o, v| {
		o.conf_file = v.to_string();
		Ok(())
	}),
	("cache_file", |o, v| {
		o.cache_file = v.to_string();
		Ok(())
	}),
	("cache_expire", set_cache_expire),
	("sep", |o, v| {
		o.sep = v.to_string();
		Ok(())
	}),
	("matcher", |o, v| {
		o.matcher = v.to_string();
		Ok(())
	}),
	("lister", |o, v| {
		o.lister = v.to_string();
		Ok(())
	}),
	("alias_regexp", |o, v| {
		o.alias_regexp = Some(v.to_string());
		Ok(())
	}),
	("alias_template", |o, v| {
		o.alias_template = Some(v.to_string());
		Ok(())
	}),
];

fn set_cache_expire(options: &mut Options, value: &str) -> Result<()> {
	let secs: u64 = value.parse().map_err(|e: std::num::ParseIntError| {
		ConnError::InvalidOption {
			key: "cache_expire".to_string(),
			value: value.to_string(),
			reason: e.to_string(),
		}
	})?;
	options.cache_expire = Duration::from_secs(secs);
	Ok(())
}

impl Options {
	/// Apply a single `key = value` pair.
	pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
		let (_, setter) = SCHEMA
			.iter()
			.find(|(name, _)| *name == key)
			.ok_or_else(|| ConnError::UnknownOption {
				key: key.to_string(),
			})?;
		setter(self, value)
	}

	/// Effective options as `(key, value)` pairs, in schema order.
	pub fn entries(&self) -> Vec<(&'static str, String)> {
		vec![
			("ssh_bin", self.ssh_bin.clone()),
			("scp_bin", self.scp_bin.clone()),
			("conf_file", self.conf_file.clone()),
			("cache_file", self.cache_file.clone()),
			("cache_expire", self.cache_expire.as_secs().to_string()),
			("sep", self.sep.clone()),
			("matcher", self.matcher.clone()),
			("lister", self.lister.clone()),
			(
				"alias_regexp",
				self.alias_regexp.clone().unwrap_or_default(),
			),
			(
				"alias_template",
				self.alias_template.clone().unwrap_or_default(),
			),
		]
	}
}

use crate::config::Options;
use crate::error::{ConnError, Result};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::warn;

/// Filters a host list down to the entries a pattern selects.
pub trait Matcher {
	fn matches(&self, pattern: &str, hosts: &[String]) -> Vec<String>;
}

impl<F> Matcher for F
where
	F: Fn(&str, &[String]) -> Vec<String>,
{
	fn matches(&self, pattern: &str, hosts: &[String]) -> Vec<String> {
		self(pattern, hosts)
	}
}

/// Named matchers. Filled once at startup, then only looked up.
#[derive(Default)]
pub struct MatcherRegistry {
	matchers: HashMap<String, Box<dyn Matcher>>,
}

impl MatcherRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registry with `string`, `substring`, `token`, `subtoken`, plus
	/// `alias_regexp` when the options configure a valid one.
	pub fn with_builtins(options: &Options) -> Self {
		let mut registry = Self::new();
		registry.register("string", match_string);
		registry.register("substring", match_substring);
		registry.register("token", TokenMatcher::exact(&options.sep));
		registry.register("subtoken", TokenMatcher::partial(&options.sep));

		if let Some(ref pattern) = options.alias_regexp {
			let template = options.alias_template.as_deref().unwrap_or_default();
			match AliasMatcher::new(pattern, template) {
				Ok(alias) => registry.register("alias_regexp", alias),
				Err(e) => warn!("{e}"),
			}
		}

		registry
	}

	/// Add a matcher, replacing any previous one with the same name.
	pub fn register(&mut self, name: &str, matcher: impl Matcher + 'static) {
		self.matchers.insert(name.to_string(), Box::new(matcher));
	}

	pub fn lookup(&self, name: &str) -> Option<&dyn Matcher> {
		self.matchers.get(name).map(|m| m.as_ref())
	}
}

/// `string`: entries exactly equal to the pattern.
pub fn match_string(pattern: &str, hosts: &[String]) -> Vec<String> {
	hosts.iter().filter(|h| *h == pattern).cloned().collect()
}

/// `substring`: entries containing the pattern.
pub fn match_substring(pattern: &str, hosts: &[String]) -> Vec<String> {
	hosts
		.iter()
		.filter(|h| h.contains(pattern))
		.cloned()
		.collect()
}

/// Host name parts: maximal runs of anything but `.` and `-`.
static PART: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^.-]+").unwrap());

/// `token` / `subtoken`: every separator-delimited key of the pattern must
/// match some part of the host name, exactly or as a substring.
#[derive(Debug, Clone)]
pub struct TokenMatcher {
	separator: String,
	exact: bool,
}

impl TokenMatcher {
	pub fn exact(separator: &str) -> Self {
		TokenMatcher {
			separator: separator.to_string(),
			exact: true,
		}
	}

	pub fn partial(separator: &str) -> Self {
		TokenMatcher {
			separator: separator.to_string(),
			exact: false,
		}
	}

	fn keys<'p>(&self, pattern: &'p str) -> Vec<&'p str> {
		if self.separator.is_empty() {
			vec![pattern]
		} else {
			pattern.split(self.separator.as_str()).collect()
		}
	}

	fn key_matches(&self, key: &str, part: &str) -> bool {
		if self.exact {
			key == part
		} else {
			part.contains(key)
		}
	}
}

impl Matcher for TokenMatcher {
	fn matches(&self, pattern: &str, hosts: &[String]) -> Vec<String> {
		let keys = self.keys(pattern);

		hosts
			.iter()
			.filter(|host| {
				let parts: Vec<&str> = PART.find_iter(host).map(|m| m.as_str()).collect();
				keys.iter()
					.all(|key| parts.iter().any(|part| self.key_matches(key, part)))
			})
			.cloned()
			.collect()
	}
}

/// `alias_regexp`: rewrites a pattern matching the regex into a host name
/// by expanding the template with the captured groups (`$1`, `${name}`).
///
/// Ignores the candidate list; yields one host or none.
#[derive(Debug, Clone)]
pub struct AliasMatcher {
	regex: Regex,
	template: String,
}

impl AliasMatcher {
	pub fn new(pattern: &str, template: &str) -> Result<Self> {
		let regex = Regex::new(pattern).map_err(|source| ConnError::InvalidRegex {
			pattern: pattern.to_string(),
			source,
		})?;
		Ok(AliasMatcher {
			regex,
			template: template.to_string(),
		})
	}
}

impl Matcher for AliasMatcher {
	fn matches(&self, pattern: &str, _hosts: &[String]) -> Vec<String> {
		let Some(caps) = self.regex.captures(pattern) else {
			return Vec::new();
		};
		let mut host = String::new();
		caps.expand(&self.template, &mut host);
		vec![host]
	}
}

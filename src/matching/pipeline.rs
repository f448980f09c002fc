use crate::matching::matcher::MatcherRegistry;
use tracing::debug;

/// Narrow `hosts` by running the matchers named in `matcher_spec` in order.
///
/// Each matcher sees the candidates left by the previous one. A single match
/// ends the chain, an empty result is discarded, several matches become the
/// new candidate set. Unknown matcher names are skipped. If no matcher ever
/// matches, the result is empty.
pub fn resolve(
	registry: &MatcherRegistry,
	matcher_spec: &str,
	pattern: &str,
	hosts: &[String],
) -> Vec<String> {
	let mut candidates = hosts.to_vec();
	let mut result = Vec::new();

	for name in matcher_spec.split(',').map(str::trim) {
		let Some(matcher) = registry.lookup(name) else {
			continue;
		};

		let matched = matcher.matches(pattern, &candidates);
		debug!("matched {} by matcher {name}", matched.len());

		match matched.len() {
			0 => continue,
			1 => return matched,
			_ => {
				candidates = matched;
				result.clone_from(&candidates);
			}
		}
	}

	result
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::Options;
	use crate::matching::matcher::match_substring;
	use std::cell::Cell;
	use std::rc::Rc;

	fn hosts(names: &[&str]) -> Vec<String> {
		names.iter().map(|s| s.to_string()).collect()
	}

	fn builtins() -> MatcherRegistry {
		MatcherRegistry::with_builtins(&Options::default())
	}

	#[test]
	fn test_unique_match_short_circuits() {
		let calls = Rc::new(Cell::new(0));
		let counter = Rc::clone(&calls);

		let mut registry = builtins();
		registry.register("substring", move |p: &str, h: &[String]| {
			counter.set(counter.get() + 1);
			match_substring(p, h)
		});

		let list = hosts(&["foo", "foobar", "barfoo"]);
		assert_eq!(resolve(&registry, "string,substring", "foo", &list), vec!["foo"]);
		assert_eq!(calls.get(), 0);
	}

	#[test]
	fn test_empty_result_falls_through() {
		let list = hosts(&["foobar", "bazqux"]);
		assert_eq!(
			resolve(&builtins(), "string,substring", "foo", &list),
			vec!["foobar"]
		);
	}

	#[test]
	fn test_progressive_refinement() {
		let seen = Rc::new(Cell::new(0));
		let counter = Rc::clone(&seen);

		let mut registry = builtins();
		registry.register("spy", move |_: &str, h: &[String]| {
			counter.set(h.len());
			h.to_vec()
		});

		let list = hosts(&["web1.a.com", "web2.a.com", "web1.b.com", "db.a.com"]);
		let result = resolve(&registry, "substring, spy", "web", &list);

		assert_eq!(seen.get(), 3);
		assert_eq!(result, vec!["web1.a.com", "web2.a.com", "web1.b.com"]);
	}

	#[test]
	fn test_no_match_returns_nothing() {
		let list = hosts(&["alpha", "beta"]);
		assert!(resolve(&builtins(), "string, token", "gamma", &list).is_empty());

		let single = hosts(&["web1.prod.example.com"]);
		assert!(resolve(&builtins(), &Options::default().matcher, "192.168.1.5", &single).is_empty());
	}

	#[test]
	fn test_unregistered_only_chain_returns_nothing() {
		let list = hosts(&["alpha", "beta"]);
		assert!(resolve(&builtins(), "nope", "alpha", &list).is_empty());
	}

	#[test]
	fn test_unknown_matcher_skipped() {
		let list = hosts(&["alpha", "beta"]);
		assert_eq!(
			resolve(&builtins(), "nope, , substring", "alp", &list),
			vec!["alpha"]
		);
	}

	#[test]
	fn test_default_chain() {
		let list = hosts(&["www.example.com", "www.example.org", "mail.example.com"]);
		let chain = Options::default().matcher;

		assert_eq!(
			resolve(&builtins(), &chain, "ww.com", &list),
			vec!["www.example.com"]
		);
		assert_eq!(
			resolve(&builtins(), &chain, "examp", &list),
			list
		);
		assert!(resolve(&builtins(), &chain, "newbox", &list).is_empty());
	}

	#[test]
	fn test_alias_in_chain() {
		let options = Options {
			alias_regexp: Some(r"^w(\d+)$".to_string()),
			alias_template: Some("web$1.example.com".to_string()),
			..Default::default()
		};
		let registry = MatcherRegistry::with_builtins(&options);
		let list = hosts(&["web1.example.com", "web2.example.com"]);

		assert_eq!(
			resolve(&registry, "alias_regexp, substring", "w7", &list),
			vec!["web7.example.com"]
		);
		assert_eq!(
			resolve(&registry, "alias_regexp, substring", "web2", &list),
			vec!["web2.example.com"]
		);
	}
}

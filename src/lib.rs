//! conn - ssh/scp wrapper that expands abbreviated host names.
//!
//! This library provides the pieces behind the `conn` binary:
//! - Configuration loading from a key=value file
//! - Listers that collect host names (known_hosts, ssh config, plain files)
//! - A time-expiring cache in front of the listers
//! - Matchers chained to narrow the host list down to one candidate
//! - Per-tool argument parsing and the wrapper that ties it together
//!
//! # Example
//!
//! ```no_run
//! use conn_cli::config::Options;
//! use conn_cli::hosts::{FileCache, HostCache, ListerRegistry};
//! use conn_cli::matching::MatcherRegistry;
//! use conn_cli::wrapper::{Decision, Resolver, Wrapper};
//!
//! let options = Options::default();
//! let listers = ListerRegistry::with_builtins();
//! let matchers = MatcherRegistry::with_builtins(&options);
//! let cache = HostCache::new(FileCache::new("/tmp/conn.cache"), options.cache_expire);
//! let resolver = Resolver::new(&options, &cache, &listers, &matchers);
//!
//! let argv: Vec<String> = ["ssh", "web.prod"].iter().map(|s| s.to_string()).collect();
//! let mut wrapper = Wrapper::new(&argv).unwrap();
//! wrapper.parse_args();
//! wrapper.expand(&resolver);
//! if let Decision::Run { binary, args } = wrapper.decide(&options) {
//!     println!("{binary} {}", args.join(" "));
//! }
//! ```

pub mod config;
pub mod error;
pub mod exec;
pub mod hosts;
pub mod logging;
pub mod matching;
pub mod wrapper;

pub use error::{ConnError, Result};

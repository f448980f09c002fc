//! Host abbreviation matching for conn.
//!
//! This module handles:
//! - The matcher registry and the built-in matchers
//! - Chaining matchers to narrow a host list down to one candidate

pub mod matcher;
pub mod pipeline;

pub use matcher::{AliasMatcher, Matcher, MatcherRegistry, TokenMatcher};
pub use pipeline::resolve;

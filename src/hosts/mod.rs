//! Host sources for conn.
//!
//! This module handles:
//! - The lister registry and the built-in listers
//! - The time-expiring host list cache in front of them

pub mod cache;
pub mod lister;

pub use cache::{CacheRecord, CacheStore, FileCache, HostCache};
pub use lister::{Lister, ListerRegistry, list_hosts};

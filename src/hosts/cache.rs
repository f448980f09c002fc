use crate::error::{ConnError, Result};
use crate::hosts::lister::{ListerRegistry, list_hosts};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};

/// A persisted host list and when it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRecord {
	pub hosts: Vec<String>,
	pub modified: SystemTime,
}

/// Storage behind the host cache.
pub trait CacheStore {
	/// The stored record, or `None` if nothing has been cached yet.
	fn read(&self) -> Result<Option<CacheRecord>>;

	/// Replace the stored list.
	fn write(&self, hosts: &[String]) -> Result<()>;
}

/// Newline-joined host list in a plain file; freshness is the file mtime.
#[derive(Debug, Clone)]
pub struct FileCache {
	path: PathBuf,
}

impl FileCache {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		FileCache { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	fn read_error(&self, source: std::io::Error) -> ConnError {
		ConnError::CacheRead {
			path: self.path.clone(),
			source,
		}
	}
}

impl CacheStore for FileCache {
	fn read(&self) -> Result<Option<CacheRecord>> {
		let metadata = match std::fs::metadata(&self.path) {
			Ok(metadata) => metadata,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
			Err(e) => return Err(self.read_error(e)),
		};
		let modified = metadata.modified().map_err(|e| self.read_error(e))?;
		let content = std::fs::read_to_string(&self.path).map_err(|e| self.read_error(e))?;

		let hosts = content
			.lines()
			.filter(|l| !l.is_empty())
			.map(str::to_string)
			.collect();

		Ok(Some(CacheRecord { hosts, modified }))
	}

	fn write(&self, hosts: &[String]) -> Result<()> {
		std::fs::write(&self.path, hosts.join("\n")).map_err(|source| ConnError::CacheWrite {
			path: self.path.clone(),
			source,
		})
	}
}

/// Host list retrieval with a time-expiring cache in front of the listers.
pub struct HostCache<S: CacheStore> {
	store: S,
	expire: Duration,
}

impl<S: CacheStore> HostCache<S> {
	/// `expire` of zero means a cached list never goes stale.
	pub fn new(store: S, expire: Duration) -> Self {
		HostCache { store, expire }
	}

	pub fn store(&self) -> &S {
		&self.store
	}

	fn is_fresh(&self, record: &CacheRecord, now: SystemTime) -> bool {
		if self.expire.is_zero() {
			return true;
		}
		record
			.modified
			.checked_add(self.expire)
			.is_none_or(|deadline| now < deadline)
	}

	/// The host list, served from cache when fresh unless `force_update`.
	///
	/// A rebuild runs every lister in `lister_spec` and overwrites the cache.
	/// An empty result means no server list is available.
	pub fn get_hosts(
		&self,
		listers: &ListerRegistry,
		lister_spec: &str,
		force_update: bool,
	) -> Vec<String> {
		if !force_update {
			match self.store.read() {
				Ok(Some(record)) if self.is_fresh(&record, SystemTime::now()) => {
					debug!("using cache ({} hosts)", record.hosts.len());
					return record.hosts;
				}
				Ok(Some(_)) => debug!("cache expired"),
				Ok(None) => debug!("no cache yet"),
				Err(e) => warn!("{e}"),
			}
		}

		debug!("building cache");
		let hosts = list_hosts(listers, lister_spec);
		if hosts.is_empty() {
			warn!("cannot get server list");
			return hosts;
		}

		if let Err(e) = self.store.write(&hosts) {
			warn!("{e}");
		}
		hosts
	}
}

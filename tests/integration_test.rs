#![allow(deprecated)] // assert_cmd::Command::cargo_bin is deprecated but replacement requires nightly

use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// A scratch setup: config, known_hosts and cache all inside a temp dir.
struct Fixture {
	dir: tempfile::TempDir,
}

impl Fixture {
	fn new(known_hosts: &str) -> Self {
		Self::with_config(known_hosts, "")
	}

	/// `extra` is appended to the generated config.
	fn with_config(known_hosts: &str, extra: &str) -> Self {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("known_hosts"), known_hosts).unwrap();

		let config = format!(
			"# test config\n\
			 ssh_bin = echo\n\
			 scp_bin = echo\n\
			 cache_file = \"{cache}\"\n\
			 cache_expire = 3600\n\
			 lister = 'khost|{known}'\n\
			 {extra}\n",
			cache = dir.path().join("conn.cache").display(),
			known = dir.path().join("known_hosts").display(),
		);
		fs::write(dir.path().join("conn.conf"), config).unwrap();

		Fixture { dir }
	}

	fn path(&self, name: &str) -> PathBuf {
		self.dir.path().join(name)
	}

	fn cmd(&self) -> assert_cmd::Command {
		let mut cmd = conn_cmd();
		cmd.env("CONN_CONFIG", self.path("conn.conf"));
		cmd
	}
}

fn conn_cmd() -> assert_cmd::Command {
	let mut cmd = assert_cmd::Command::cargo_bin("conn").unwrap();
	cmd.env_remove("RUST_LOG");
	cmd
}

const KNOWN_HOSTS: &str = "\
# production
web1.prod.example.com,10.0.0.11 ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAI
web2.prod.example.com,10.0.0.12 ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAI
db.prod.example.com ssh-rsa AAAAB3NzaC1yc2EAAAABIwAAAQEA
[bastion.example.com]:2222 ssh-rsa AAAAB3NzaC1yc2EAAAABIwAAAQEA
|1|F1E1KeoE/eEWhi10WpGv4OdiO6Y=|3988QV0VE8wmZL7suNrYQLITLCg= ssh-rsa AAAA
";

// ============================================================================
// Non-wrapping invocations
// ============================================================================

#[test]
fn test_no_args_prints_usage() {
	conn_cmd()
		.env("CONN_CONFIG", "/nonexistent/conn.conf")
		.assert()
		.success()
		.stdout(predicate::str::contains("Usage: conn <ssh|scp>"))
		.stdout(predicate::str::contains("$ conn ssh example.www.com"));
}

#[test]
fn test_unknown_command_prints_usage() {
	conn_cmd()
		.env("CONN_CONFIG", "/nonexistent/conn.conf")
		.args(["rsync", "host:/x", "."])
		.assert()
		.success()
		.stdout(predicate::str::contains("Usage: conn <ssh|scp>"));
}

#[test]
fn test_usage_uses_configured_separator() {
	let fixture = Fixture::with_config("", "sep = /");

	fixture
		.cmd()
		.assert()
		.success()
		.stdout(predicate::str::contains("$ conn ssh example/www/com"));
}

#[test]
fn test_version_flag() {
	conn_cmd()
		.arg("--version")
		.assert()
		.success()
		.stdout(predicate::str::contains("conn"));
}

#[test]
fn test_config_show_defaults_when_missing() {
	conn_cmd()
		.env("CONN_CONFIG", "/nonexistent/conn.conf")
		.args(["config", "show"])
		.assert()
		.success()
		.stdout(predicate::str::contains("not found"))
		.stdout(predicate::str::contains("ssh_bin = /usr/bin/ssh"))
		.stdout(predicate::str::contains(
			"matcher = subtoken, token, substring, string",
		));
}

#[test]
fn test_config_show_applies_file() {
	let fixture = Fixture::with_config("", "sep = -\nfavourite_colour = blue");

	fixture
		.cmd()
		.args(["config", "show"])
		.assert()
		.success()
		.stdout(predicate::str::contains("sep = -"))
		.stdout(predicate::str::contains("ssh_bin = echo"))
		.stdout(predicate::str::contains("cache_expire = 3600"));
}

#[test]
fn test_config_path() {
	let fixture = Fixture::new("");

	fixture
		.cmd()
		.args(["config", "path"])
		.assert()
		.success()
		.stdout(predicate::str::contains(
			fixture.path("conn.conf").to_string_lossy().to_string(),
		));
}

// ============================================================================
// Host expansion (Unix only - the wrapped binary is echo)
// ============================================================================

#[cfg(unix)]
#[test]
fn test_ssh_expands_unique_host() {
	let fixture = Fixture::new("host.example.com ssh-rsa AAAA\n");

	fixture
		.cmd()
		.args(["ssh", "host.example"])
		.assert()
		.success()
		.stdout("host.example.com\n");
}

#[cfg(unix)]
#[test]
fn test_ssh_keeps_options_user_and_command() {
	let fixture = Fixture::new(KNOWN_HOSTS);

	fixture
		.cmd()
		.args(["ssh", "-p", "22", "root@db", "uptime"])
		.assert()
		.success()
		.stdout("-p 22 root@db.prod.example.com uptime\n");
}

#[cfg(unix)]
#[test]
fn test_ssh_ambiguous_lists_candidates() {
	let fixture = Fixture::new(KNOWN_HOSTS);

	fixture
		.cmd()
		.args(["ssh", "web"])
		.assert()
		.success()
		.stdout(
			"more than one host:\n  web1.prod.example.com\n  web2.prod.example.com\n",
		);
}

#[cfg(unix)]
#[test]
fn test_list_flag_lists_single_match() {
	let fixture = Fixture::new(KNOWN_HOSTS);

	fixture
		.cmd()
		.args(["ssh", "--list", "web2"])
		.assert()
		.success()
		.stdout("host list:\n  web2.prod.example.com\n");
}

#[cfg(unix)]
#[test]
fn test_scp_expands_host_with_path() {
	let fixture = Fixture::new(KNOWN_HOSTS);

	fixture
		.cmd()
		.args(["scp", "-r", "./dist", "deploy@web1:/srv/app"])
		.assert()
		.success()
		.stdout("-r ./dist deploy@web1.prod.example.com:/srv/app\n");
}

#[cfg(unix)]
#[test]
fn test_scp_remote_role_not_expanded() {
	let fixture = Fixture::new(KNOWN_HOSTS);

	fixture
		.cmd()
		.args(["scp", "-t", "web1:/tmp"])
		.assert()
		.success()
		.stdout("-t web1:/tmp\n");
}

#[cfg(unix)]
#[test]
fn test_missing_known_hosts_runs_unchanged() {
	let fixture = Fixture::new("");
	fs::remove_file(fixture.path("known_hosts")).unwrap();

	fixture
		.cmd()
		.args(["ssh", "somehost"])
		.assert()
		.success()
		.stdout("somehost\n");

	assert!(!fixture.path("conn.cache").exists());
}

#[cfg(unix)]
#[test]
fn test_unmatched_host_runs_unchanged() {
	let fixture = Fixture::new(KNOWN_HOSTS);

	fixture
		.cmd()
		.args(["ssh", "unknownhost"])
		.assert()
		.success()
		.stdout("unknownhost\n");

	fixture
		.cmd()
		.args(["ssh", "admin@10.0.0.11", "uptime"])
		.assert()
		.success()
		.stdout("admin@10.0.0.11 uptime\n");
}

#[cfg(unix)]
#[test]
fn test_single_known_host_not_substituted_for_mismatch() {
	let fixture = Fixture::new("web1.prod.example.com ssh-rsa AAAA\n");

	fixture
		.cmd()
		.args(["ssh", "192.168.1.5"])
		.assert()
		.success()
		.stdout("192.168.1.5\n");
}

#[cfg(unix)]
#[test]
fn test_cache_served_until_update() {
	let fixture = Fixture::new("old.example.com ssh-rsa AAAA\n");

	fixture
		.cmd()
		.args(["ssh", "old"])
		.assert()
		.success()
		.stdout("old.example.com\n");
	assert_eq!(
		fs::read_to_string(fixture.path("conn.cache")).unwrap(),
		"old.example.com"
	);

	// The cache is still fresh, so the changed source is not consulted.
	fs::write(fixture.path("known_hosts"), "new.example.com ssh-rsa AAAA\n").unwrap();
	fixture
		.cmd()
		.args(["ssh", "old"])
		.assert()
		.success()
		.stdout("old.example.com\n");

	fixture
		.cmd()
		.args(["ssh", "--update", "new"])
		.assert()
		.success()
		.stdout("new.example.com\n");
	assert_eq!(
		fs::read_to_string(fixture.path("conn.cache")).unwrap(),
		"new.example.com"
	);
}

#[cfg(unix)]
#[test]
fn test_alias_regexp_matcher() {
	let fixture = Fixture::with_config(
		KNOWN_HOSTS,
		"alias_regexp = ^n(\\d+)$\nalias_template = node$1.lab.internal\nmatcher = alias_regexp, subtoken",
	);

	fixture
		.cmd()
		.args(["ssh", "n42"])
		.assert()
		.success()
		.stdout("node42.lab.internal\n");
}

#[cfg(unix)]
#[test]
fn test_debug_flag_logs_to_stderr() {
	let fixture = Fixture::new(KNOWN_HOSTS);

	fixture
		.cmd()
		.args(["ssh", "--debug", "db"])
		.assert()
		.success()
		.stdout("db.prod.example.com\n")
		.stderr(predicate::str::contains("building cache"));
}

#[cfg(unix)]
#[test]
fn test_exit_code_propagates() {
	let fixture = Fixture::with_config("", "ssh_bin = sh");

	// -c takes a value, so there is no host token here.
	fixture
		.cmd()
		.args(["ssh", "-c", "exit 7"])
		.assert()
		.code(7);
}

#[cfg(unix)]
#[test]
fn test_binary_not_found() {
	let fixture = Fixture::with_config("", "ssh_bin = /nonexistent/bin/ssh");

	fixture
		.cmd()
		.args(["ssh", "host"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("not found"));
}

#[cfg(unix)]
#[test]
fn test_symlink_named_ssh() {
	let fixture = Fixture::new(KNOWN_HOSTS);
	let link = fixture.path("ssh");
	std::os::unix::fs::symlink(assert_cmd::cargo::cargo_bin("conn"), &link).unwrap();

	assert_cmd::Command::new(Path::new(&link))
		.env_remove("RUST_LOG")
		.env("CONN_CONFIG", fixture.path("conn.conf"))
		.arg("db")
		.assert()
		.success()
		.stdout("db.prod.example.com\n");
}

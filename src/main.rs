use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

use conn_cli::config::{Options, config_path, expand_path, load_options};
use conn_cli::exec::{execute_command, resolve_command};
use conn_cli::hosts::{FileCache, HostCache, ListerRegistry};
use conn_cli::logging::init_logging;
use conn_cli::matching::MatcherRegistry;
use conn_cli::wrapper::{Decision, Resolver, Wrapper, usage};

/// Commands available when conn is not wrapping ssh or scp.
#[derive(Parser)]
#[command(name = "conn")]
#[command(
	author,
	version,
	about = "ssh/scp wrapper that expands abbreviated host names from known hosts"
)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
	/// Configuration inspection commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display the effective options
	Show,
	/// Print the config file location
	Path,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let argv: Vec<String> = std::env::args().collect();

	let Some(mut wrapper) = Wrapper::new(&argv) else {
		init_logging(false);
		return handle_cli(&argv);
	};

	let flags = wrapper.parse_args();
	init_logging(flags.debug);

	let options = load_options();
	let listers = ListerRegistry::with_builtins();
	let matchers = MatcherRegistry::with_builtins(&options);
	let cache = HostCache::new(
		FileCache::new(expand_path(&options.cache_file)),
		options.cache_expire,
	);
	let resolver = Resolver::new(&options, &cache, &listers, &matchers);

	wrapper.expand(&resolver);

	let decision = wrapper.decide(&options);
	if let Some(listing) = decision.listing() {
		print!("{listing}");
		return Ok(ExitCode::SUCCESS);
	}

	let Decision::Run { binary, args } = decision else {
		return Ok(ExitCode::SUCCESS);
	};

	let binary_path =
		resolve_command(&binary).ok_or_else(|| anyhow::anyhow!("Command not found: {binary}"))?;
	let status = execute_command(&binary_path, &args)
		.with_context(|| format!("Failed to execute: {}", binary_path.display()))?;

	Ok(ExitCode::from(status.code().unwrap_or(1) as u8))
}

fn handle_cli(argv: &[String]) -> Result<ExitCode> {
	let options = load_options();

	let cli = match Cli::try_parse_from(argv) {
		Ok(cli) => cli,
		Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
			e.print().context("Failed to print help")?;
			return Ok(ExitCode::SUCCESS);
		}
		// Anything unrecognised gets the usage banner, not a clap error.
		Err(_) => Cli { command: None },
	};

	match cli.command {
		Some(Commands::Config { action }) => match action {
			ConfigAction::Show => handle_config_show(&options),
			ConfigAction::Path => {
				println!("{}", config_path(&options).display());
				Ok(ExitCode::SUCCESS)
			}
		},
		None => {
			print!("{}", usage(&options.sep));
			Ok(ExitCode::SUCCESS)
		}
	}
}

fn handle_config_show(options: &Options) -> Result<ExitCode> {
	let path = config_path(options);
	println!("# Source: {}", path.display());
	if !path.exists() {
		println!("# (not found, using defaults)");
	}

	for (key, value) in options.entries() {
		println!("{key} = {value}");
	}

	Ok(ExitCode::SUCCESS)
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `linguist`: inspect and query Qt Linguist `.ts` catalogs.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use linguist_catalog::Strictness;
use linguist_config::{CatalogConfigLayer, LinguistConfigLayer, LoggingConfigLayer};

mod commands;
mod logging;
mod version;

use commands::CliContext;

/// Query and validate Qt Linguist translation catalogs.
#[derive(Parser, Debug)]
#[command(name = "linguist", about = "Qt Linguist catalog tool", version)]
struct Args {
	/// Configuration file (default: $XDG_CONFIG_HOME/linguist/config.toml)
	#[arg(long, global = true, env = "LINGUIST_CONFIG")]
	config: Option<PathBuf>,

	/// Fail on the first malformed record
	#[arg(long, global = true, conflicts_with = "lenient")]
	strict: bool,

	/// Skip malformed records and report them as warnings
	#[arg(long, global = true)]
	lenient: bool,

	/// Log level used when RUST_LOG is unset (trace, debug, info, warn, error, off)
	#[arg(long, global = true)]
	log_level: Option<String>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Print the translation of one message
	Lookup(commands::lookup::LookupArgs),
	/// List the messages of a catalog
	Dump(commands::dump::DumpArgs),
	/// Show translation coverage
	Stats(commands::stats::StatsArgs),
	/// Report suspicious translations
	Check(commands::check::CheckArgs),
	/// List catalogs in a directory and the locale that would be used
	Locales(commands::locales::LocalesArgs),
	/// Show version and build information
	Version,
}

impl Args {
	/// Global flags as the highest-precedence configuration layer.
	fn overrides(&self) -> LinguistConfigLayer {
		let strictness = if self.strict {
			Some(Strictness::Strict)
		} else if self.lenient {
			Some(Strictness::Lenient)
		} else {
			None
		};

		LinguistConfigLayer {
			catalog: Some(CatalogConfigLayer {
				strictness,
				..Default::default()
			}),
			logging: Some(LoggingConfigLayer {
				level: self.log_level.clone(),
				format: None,
			}),
		}
	}
}

fn main() -> anyhow::Result<ExitCode> {
	let args = Args::parse();

	if let Command::Version = args.command {
		println!("{}", version::format_version_info());
		return Ok(ExitCode::SUCCESS);
	}

	let config = linguist_config::load_config(args.config.clone(), args.overrides())?;
	logging::init(&config.logging);

	let ctx = CliContext { config };
	match args.command {
		Command::Lookup(cmd) => commands::lookup::run(cmd, &ctx),
		Command::Dump(cmd) => commands::dump::run(cmd, &ctx),
		Command::Stats(cmd) => commands::stats::run(cmd, &ctx),
		Command::Check(cmd) => commands::check::run(cmd, &ctx),
		Command::Locales(cmd) => commands::locales::run(cmd, &ctx),
		Command::Version => Ok(ExitCode::SUCCESS),
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use colored::Colorize;
use linguist_catalog::placeholder::fill_count;
use linguist_catalog::Catalog;
use tracing::debug;

use super::CliContext;

#[derive(Debug, Clone, clap::Args)]
pub struct LookupArgs {
	/// Catalog file (.ts)
	pub file: PathBuf,

	/// Context name, e.g. BibleTimeApp
	#[arg(long)]
	pub context: String,

	/// Source text exactly as written in the catalog
	#[arg(long)]
	pub source: String,

	/// Disambiguation comment
	#[arg(long)]
	pub comment: Option<String>,

	/// Count for numerus messages; also fills %n
	#[arg(short = 'n', long)]
	pub count: Option<u64>,

	/// Print the source text instead of failing when nothing is found
	#[arg(long)]
	pub fallback: bool,
}

pub fn run(args: LookupArgs, ctx: &CliContext) -> anyhow::Result<ExitCode> {
	let catalog = ctx.load_catalog(&args.file)?;
	let mut stdout = std::io::stdout().lock();
	let found = write_lookup(&args, &catalog, &mut stdout)?;
	if found || args.fallback {
		Ok(ExitCode::SUCCESS)
	} else {
		eprintln!(
			"{} no translation for {}::{:?}",
			"✗".red(),
			args.context,
			args.source
		);
		Ok(ExitCode::FAILURE)
	}
}

/// Write the translation; returns whether the key was found.
fn write_lookup(args: &LookupArgs, catalog: &Catalog, out: &mut impl Write) -> anyhow::Result<bool> {
	let comment = args.comment.as_deref();
	let result = match args.count {
		Some(n) => catalog.lookup_plural(&args.context, &args.source, comment, n),
		None => catalog.lookup(&args.context, &args.source, comment),
	};
	debug!(context = %args.context, found = result.is_ok(), "lookup");

	let text = match result {
		Ok(text) if !text.is_empty() || !args.fallback => text,
		Ok(_) => args.source.as_str(),
		Err(_) if args.fallback => args.source.as_str(),
		Err(_) => return Ok(false),
	};
	let text = match args.count {
		Some(n) => fill_count(text, n),
		None => text.to_string(),
	};
	writeln!(out, "{text}")?;
	Ok(true)
}

#[cfg(test)]
mod tests {
	use super::*;
	use linguist_catalog::LoadOptions;

	const INPUT: &str = r#"<TS version="2.1" language="cs"><context><name>QPushButton</name>
<message><source>Open</source><comment>Dialog Button</comment><translation>Otevřít</translation></message>
<message><source>Empty</source><translation></translation></message>
<message numerus="yes"><source>%n file(s)</source><translation><numerusform>%n soubor</numerusform><numerusform>%n soubory</numerusform><numerusform>%n souborů</numerusform></translation></message>
</context></TS>"#;

	fn args(source: &str, comment: Option<&str>) -> LookupArgs {
		LookupArgs {
			file: PathBuf::from("unused.ts"),
			context: "QPushButton".to_string(),
			source: source.to_string(),
			comment: comment.map(str::to_string),
			count: None,
			fallback: false,
		}
	}

	fn output(args: &LookupArgs) -> (bool, String) {
		let catalog = Catalog::load_str(INPUT, &LoadOptions::default()).unwrap();
		let mut out = Vec::new();
		let found = write_lookup(args, &catalog, &mut out).unwrap();
		(found, String::from_utf8(out).unwrap())
	}

	#[test]
	fn test_found() {
		assert_eq!(
			output(&args("Open", Some("Dialog Button"))),
			(true, "Otevřít\n".to_string())
		);
	}

	#[test]
	fn test_miss_without_fallback() {
		assert_eq!(output(&args("Open", None)), (false, String::new()));
	}

	#[test]
	fn test_miss_with_fallback() {
		let mut a = args("Open", None);
		a.fallback = true;
		assert_eq!(output(&a), (true, "Open\n".to_string()));
	}

	#[test]
	fn test_empty_translation() {
		assert_eq!(output(&args("Empty", None)), (true, "\n".to_string()));
		let mut a = args("Empty", None);
		a.fallback = true;
		assert_eq!(output(&a), (true, "Empty\n".to_string()));
	}

	#[test]
	fn test_plural_fills_count() {
		let mut a = args("%n file(s)", None);
		a.count = Some(3);
		assert_eq!(output(&a), (true, "3 soubory\n".to_string()));
		a.count = Some(7);
		assert_eq!(output(&a), (true, "7 souborů\n".to_string()));
	}
}

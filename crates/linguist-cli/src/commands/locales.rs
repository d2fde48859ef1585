// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;
use linguist_catalog::{resolve_locale, CatalogFile};
use serde::Serialize;
use tracing::info;

use super::CliContext;

#[derive(Debug, Clone, clap::Args)]
pub struct LocalesArgs {
	/// Directory holding the catalogs (overrides catalog.dir)
	#[arg(long)]
	pub dir: Option<PathBuf>,

	/// Only consider `<prefix>_<locale>.ts` files (overrides catalog.prefix)
	#[arg(long)]
	pub prefix: Option<String>,

	/// Preferred locale (overrides catalog.locale)
	#[arg(long)]
	pub locale: Option<String>,

	/// Emit JSON instead of text
	#[arg(long)]
	pub json: bool,
}

#[derive(Debug, Serialize)]
struct LocalesReport<'a> {
	resolved: Option<&'a str>,
	catalogs: &'a [CatalogFile],
}

pub fn run(args: LocalesArgs, ctx: &CliContext) -> anyhow::Result<ExitCode> {
	let mut config = ctx.config.catalog.clone();
	if let Some(dir) = args.dir.clone() {
		config.dir = dir;
	}
	if let Some(prefix) = args.prefix.clone() {
		config.prefix = Some(prefix);
	}

	let catalog_dir = config.catalog_dir();
	let files = catalog_dir
		.scan()
		.with_context(|| format!("failed to scan {}", catalog_dir.dir().display()))?;
	let locales: Vec<&str> = files.iter().map(|f| f.locale.as_str()).collect();
	let preferred = args.locale.as_deref().or(config.locale.as_deref());
	let resolved = resolve_locale(preferred, &config.default_locale, &locales);
	info!(dir = %catalog_dir.dir().display(), count = files.len(), resolved, "resolved locale");

	let mut stdout = std::io::stdout().lock();
	write_locales(&files, resolved, args.json, &mut stdout)?;

	if files.is_empty() {
		eprintln!(
			"{} no catalogs found in {}",
			"✗".red(),
			catalog_dir.dir().display()
		);
		return Ok(ExitCode::FAILURE);
	}
	Ok(ExitCode::SUCCESS)
}

fn write_locales(
	files: &[CatalogFile],
	resolved: Option<&str>,
	json: bool,
	out: &mut impl Write,
) -> anyhow::Result<()> {
	if json {
		let report = LocalesReport {
			resolved,
			catalogs: files,
		};
		serde_json::to_writer_pretty(&mut *out, &report)?;
		writeln!(out)?;
		return Ok(());
	}

	for file in files {
		if Some(file.locale.as_str()) == resolved {
			writeln!(
				out,
				"{} {:<8} {}",
				"✓".green(),
				file.locale.bold(),
				file.path.display()
			)?;
		} else {
			writeln!(out, "  {:<8} {}", file.locale, file.path.display())?;
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use linguist_catalog::CatalogDir;
	use tempfile::TempDir;

	fn catalogs() -> (TempDir, Vec<CatalogFile>) {
		let dir = tempfile::tempdir().unwrap();
		for name in ["bibletime_ui_cs.ts", "bibletime_ui_pt_BR.ts", "README.md"] {
			std::fs::write(dir.path().join(name), "<TS/>").unwrap();
		}
		let files = CatalogDir::new(dir.path())
			.with_prefix("bibletime_ui")
			.scan()
			.unwrap();
		(dir, files)
	}

	#[test]
	fn test_text_marks_resolved_locale() {
		let (_dir, files) = catalogs();
		let mut out = Vec::new();
		write_locales(&files, Some("pt_BR"), false, &mut out).unwrap();
		let text = String::from_utf8(out).unwrap();
		let lines: Vec<&str> = text.lines().collect();
		assert_eq!(lines.len(), 2);
		assert!(lines[0].starts_with("  cs"));
		assert!(lines[1].contains("✓"));
		assert!(lines[1].contains("pt_BR"));
	}

	#[test]
	fn test_json_report() {
		let (_dir, files) = catalogs();
		let mut out = Vec::new();
		write_locales(&files, Some("cs"), true, &mut out).unwrap();
		let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
		assert_eq!(json["resolved"], "cs");
		assert_eq!(json["catalogs"][0]["locale"], "cs");
		assert_eq!(json["catalogs"][1]["locale"], "pt_BR");
	}

	#[test]
	fn test_preferred_locale_wins() {
		let (_dir, files) = catalogs();
		let locales: Vec<&str> = files.iter().map(|f| f.locale.as_str()).collect();
		assert_eq!(resolve_locale(Some("pt-br"), "cs", &locales), Some("pt_BR"));
	}
}

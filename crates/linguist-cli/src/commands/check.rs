// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use colored::Colorize;
use linguist_catalog::lint::{self, Finding, Severity};
use tracing::info;

use super::CliContext;

#[derive(Debug, Clone, clap::Args)]
pub struct CheckArgs {
	/// Catalog file (.ts)
	pub file: PathBuf,

	/// Emit JSON instead of text
	#[arg(long)]
	pub json: bool,

	/// Hide findings below this severity (info, warning)
	#[arg(long, default_value = "info")]
	pub min_severity: Severity,
}

pub fn run(args: CheckArgs, ctx: &CliContext) -> anyhow::Result<ExitCode> {
	let catalog = ctx.load_catalog(&args.file)?;
	let findings = lint::check(&catalog);
	info!(path = %args.file.display(), findings = findings.len(), "checked catalog");

	let mut stdout = std::io::stdout().lock();
	write_findings(&findings, &args, &mut stdout)?;

	if findings.iter().any(|f| f.severity == Severity::Warning) {
		Ok(ExitCode::FAILURE)
	} else {
		Ok(ExitCode::SUCCESS)
	}
}

fn write_findings(findings: &[Finding], args: &CheckArgs, out: &mut impl Write) -> anyhow::Result<()> {
	let shown: Vec<&Finding> = findings
		.iter()
		.filter(|f| f.severity >= args.min_severity)
		.collect();

	if args.json {
		serde_json::to_writer_pretty(&mut *out, &shown)?;
		writeln!(out)?;
		return Ok(());
	}

	for finding in &shown {
		let severity = match finding.severity {
			Severity::Warning => "warning".yellow().bold(),
			Severity::Info => "info".cyan(),
		};
		let location = finding
			.location
			.as_ref()
			.map(|l| format!("{l}: "))
			.unwrap_or_default();
		writeln!(
			out,
			"{}{}: {}: {}",
			location.dimmed(),
			severity,
			finding.key,
			finding.kind
		)?;
	}

	let warnings = findings
		.iter()
		.filter(|f| f.severity == Severity::Warning)
		.count();
	writeln!(
		out,
		"{} warning(s), {} info",
		warnings,
		findings.len() - warnings
	)?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use linguist_catalog::{Catalog, LoadOptions};

	fn findings() -> Vec<Finding> {
		let catalog = Catalog::load_str(
			r#"<TS language="cs"><context><name>BibleTime</name>
<message><location filename="../../src/bibletime_init.cpp" line="733"/><source>Sw&amp;itch session</source><translation>Přepnout relaci</translation></message>
<message><source>Copy</source><translation></translation></message>
</context></TS>"#,
			&LoadOptions::default(),
		)
		.unwrap();
		lint::check(&catalog)
	}

	fn args(min_severity: Severity, json: bool) -> CheckArgs {
		CheckArgs {
			file: PathBuf::from("unused.ts"),
			json,
			min_severity,
		}
	}

	#[test]
	fn test_text_output() {
		let mut out = Vec::new();
		write_findings(&findings(), &args(Severity::Info, false), &mut out).unwrap();
		let text = String::from_utf8(out).unwrap();
		assert!(text.contains("../../src/bibletime_init.cpp:733"));
		assert!(text.contains("accelerator missing in translation"));
		assert!(text.contains("untranslated"));
		assert!(text.contains("1 warning(s), 1 info"));
	}

	#[test]
	fn test_min_severity_filters() {
		let mut out = Vec::new();
		write_findings(&findings(), &args(Severity::Warning, true), &mut out).unwrap();
		let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
		let shown = json.as_array().unwrap();
		assert_eq!(shown.len(), 1);
		assert_eq!(shown[0]["kind"], "accelerator");
		assert_eq!(shown[0]["severity"], "warning");
	}
}

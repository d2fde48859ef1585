// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use colored::Colorize;
use linguist_catalog::CatalogStats;
use serde::Serialize;

use super::CliContext;

#[derive(Debug, Clone, clap::Args)]
pub struct StatsArgs {
	/// Catalog files (.ts)
	#[arg(required = true)]
	pub files: Vec<PathBuf>,

	/// Emit JSON instead of text
	#[arg(long)]
	pub json: bool,
}

#[derive(Debug, Serialize)]
struct FileStats {
	file: PathBuf,
	#[serde(flatten)]
	stats: CatalogStats,
}

pub fn run(args: StatsArgs, ctx: &CliContext) -> anyhow::Result<ExitCode> {
	let mut report = Vec::with_capacity(args.files.len());
	for file in &args.files {
		let catalog = ctx.load_catalog(file)?;
		report.push(FileStats {
			file: file.clone(),
			stats: CatalogStats::collect(&catalog),
		});
	}

	let mut stdout = std::io::stdout().lock();
	write_stats(&report, args.json, &mut stdout)?;
	Ok(ExitCode::SUCCESS)
}

fn write_stats(report: &[FileStats], json: bool, out: &mut impl Write) -> anyhow::Result<()> {
	if json {
		serde_json::to_writer_pretty(&mut *out, report)?;
		writeln!(out)?;
		return Ok(());
	}

	for entry in report {
		let stats = &entry.stats;
		let percent = format!("{:.1}%", stats.completion_percent);
		let percent = if stats.completion_percent >= 100.0 {
			percent.green()
		} else {
			percent.yellow()
		};
		writeln!(
			out,
			"{} [{}] {}",
			entry.file.display().to_string().bold(),
			stats.language.as_deref().unwrap_or("?"),
			percent
		)?;
		let counts = &stats.counts;
		writeln!(
			out,
			"  {} messages: {} finished, {} unfinished, {} untranslated, {} obsolete ({} numerus)",
			counts.total,
			counts.finished,
			counts.unfinished,
			counts.untranslated,
			counts.obsolete,
			counts.numerus
		)?;
		for context in stats.contexts.iter().filter(|c| c.counts.finished < c.counts.total) {
			writeln!(
				out,
				"  {}: {}/{} finished",
				context.name.dimmed(),
				context.counts.finished,
				context.counts.total
			)?;
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use linguist_catalog::{Catalog, LoadOptions};

	fn report() -> Vec<FileStats> {
		let catalog = Catalog::load_str(
			r#"<TS language="cs"><context><name>A</name>
<message><source>a</source><translation>A</translation></message>
<message><source>b</source><translation></translation></message>
</context></TS>"#,
			&LoadOptions::default(),
		)
		.unwrap();
		vec![FileStats {
			file: PathBuf::from("app_cs.ts"),
			stats: CatalogStats::collect(&catalog),
		}]
	}

	#[test]
	fn test_text_report() {
		let mut out = Vec::new();
		write_stats(&report(), false, &mut out).unwrap();
		let text = String::from_utf8(out).unwrap();
		assert!(text.contains("[cs]"));
		assert!(text.contains("50.0%"));
		assert!(text.contains("2 messages: 1 finished, 0 unfinished, 1 untranslated"));
		assert!(text.contains("1/2 finished"));
	}

	#[test]
	fn test_json_report() {
		let mut out = Vec::new();
		write_stats(&report(), true, &mut out).unwrap();
		let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
		assert_eq!(json[0]["file"], "app_cs.ts");
		assert_eq!(json[0]["total"], 2);
		assert_eq!(json[0]["completion_percent"], 50.0);
	}
}

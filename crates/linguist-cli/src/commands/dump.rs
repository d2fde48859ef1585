// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use colored::Colorize;
use linguist_catalog::{Catalog, MessageEntry, TranslationState};

use super::CliContext;

#[derive(Debug, Clone, clap::Args)]
pub struct DumpArgs {
	/// Catalog file (.ts)
	pub file: PathBuf,

	/// Only list messages of this context
	#[arg(long)]
	pub context: Option<String>,

	/// Emit JSON instead of text
	#[arg(long)]
	pub json: bool,
}

pub fn run(args: DumpArgs, ctx: &CliContext) -> anyhow::Result<ExitCode> {
	let catalog = ctx.load_catalog(&args.file)?;
	let mut stdout = std::io::stdout().lock();
	write_dump(&args, &catalog, &mut stdout)?;
	Ok(ExitCode::SUCCESS)
}

fn selected<'a>(args: &'a DumpArgs, catalog: &'a Catalog) -> Vec<&'a MessageEntry> {
	catalog
		.entries()
		.filter(|e| args.context.as_deref().map_or(true, |c| e.key.context == c))
		.collect()
}

fn write_dump(args: &DumpArgs, catalog: &Catalog, out: &mut impl Write) -> anyhow::Result<()> {
	let entries = selected(args, catalog);

	if args.json {
		serde_json::to_writer_pretty(&mut *out, &entries)?;
		writeln!(out)?;
		return Ok(());
	}

	let mut current_context: Option<&str> = None;
	for entry in entries {
		if current_context != Some(entry.key.context.as_str()) {
			current_context = Some(&entry.key.context);
			let name = if entry.key.context.is_empty() {
				"(no context)"
			} else {
				entry.key.context.as_str()
			};
			writeln!(out, "{}", name.bold())?;
		}

		let comment = entry
			.key
			.disambiguation()
			.map(|d| format!(" ({d})").dimmed().to_string())
			.unwrap_or_default();
		let forms = entry.translation.forms().join(" | ");
		let translation = match entry.state() {
			TranslationState::Finished => forms.green(),
			TranslationState::Unfinished => forms.yellow(),
			TranslationState::Untranslated => "(untranslated)".red(),
			TranslationState::Obsolete => forms.dimmed(),
		};
		writeln!(out, "  {:?}{} → {}", entry.key.source_text, comment, translation)?;
	}
	Ok(())
}

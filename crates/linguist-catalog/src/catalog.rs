// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The in-memory translation catalog for one locale.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{CatalogError, LookupMiss, Result};
use crate::model::{CatalogHeader, MessageEntry, MessageKey};
use crate::numerus::NumerusRule;
use crate::parser::{self, Diagnostic, DiagnosticKind, LoadOptions};

/// context → source text → disambiguation → entry index.
type Index = HashMap<String, HashMap<String, HashMap<String, usize>>>;

/// Immutable catalog of translations for one locale.
///
/// Built once by one of the `load_*` constructors and then only read, so it
/// can be shared across threads behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
	header: CatalogHeader,
	entries: Vec<MessageEntry>,
	index: Index,
	diagnostics: Vec<Diagnostic>,
	numerus: NumerusRule,
}

impl Catalog {
	/// Parse a catalog from `.ts` text.
	pub fn load_str(input: &str, options: &LoadOptions) -> Result<Self> {
		let parsed = parser::parse(input, options)?;
		let mut catalog = Self {
			numerus: parsed
				.header
				.language
				.as_deref()
				.map(NumerusRule::for_language)
				.unwrap_or_default(),
			header: parsed.header,
			diagnostics: parsed.diagnostics,
			..Self::default()
		};

		for (position, entry) in parsed.entries {
			if let Some(previous) = catalog.insert(entry) {
				catalog.diagnostics.push(Diagnostic {
					position,
					kind: DiagnosticKind::DuplicateMessage { key: previous.key },
				});
			}
		}

		debug!(
			language = catalog.header.language.as_deref().unwrap_or("-"),
			entries = catalog.entries.len(),
			contexts = catalog.index.len(),
			diagnostics = catalog.diagnostics.len(),
			"loaded catalog"
		);
		Ok(catalog)
	}

	/// Read a catalog from any byte stream.
	pub fn load_reader<R: Read>(mut reader: R, options: &LoadOptions) -> Result<Self> {
		let mut bytes = Vec::new();
		reader.read_to_end(&mut bytes).map_err(CatalogError::Read)?;
		let input = String::from_utf8(bytes).map_err(|e| {
			CatalogError::Read(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
		})?;
		Self::load_str(&input, options)
	}

	/// Read a catalog file.
	pub fn load_path(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self> {
		let path = path.as_ref();
		debug!(path = %path.display(), "reading catalog");
		let bytes = std::fs::read(path).map_err(|source| CatalogError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		let input = String::from_utf8(bytes).map_err(|_| CatalogError::InvalidUtf8 {
			path: path.to_path_buf(),
		})?;
		Self::load_str(&input, options)
	}

	/// Insert an entry, replacing one with the same key.
	///
	/// The replaced entry is returned; its locations are kept in front of
	/// the new entry's locations and its position in iteration order is
	/// preserved.
	fn insert(&mut self, mut entry: MessageEntry) -> Option<MessageEntry> {
		let slot = self
			.index
			.entry(entry.key.context.clone())
			.or_default()
			.entry(entry.key.source_text.clone())
			.or_default();

		match slot.get(&entry.key.disambiguation) {
			Some(&i) => {
				let mut locations = std::mem::take(&mut self.entries[i].locations);
				locations.append(&mut entry.locations);
				entry.locations = locations;
				Some(std::mem::replace(&mut self.entries[i], entry))
			}
			None => {
				slot.insert(entry.key.disambiguation.clone(), self.entries.len());
				self.entries.push(entry);
				None
			}
		}
	}

	/// Exact lookup of the translation for a key.
	///
	/// An entry whose translation is empty yields `Ok("")`; the caller
	/// decides whether to show the source text instead.
	pub fn lookup(
		&self,
		context: &str,
		source_text: &str,
		disambiguation: Option<&str>,
	) -> std::result::Result<&str, LookupMiss> {
		self.find(context, source_text, disambiguation)
			.map(|entry| entry.translation.text())
			.ok_or(LookupMiss)
	}

	/// The whole entry for a key.
	pub fn find(
		&self,
		context: &str,
		source_text: &str,
		disambiguation: Option<&str>,
	) -> Option<&MessageEntry> {
		let index = *self
			.index
			.get(context)?
			.get(source_text)?
			.get(disambiguation.unwrap_or(""))?;
		self.entries.get(index)
	}

	pub fn get(&self, key: &MessageKey) -> Option<&MessageEntry> {
		self.find(&key.context, &key.source_text, key.disambiguation())
	}

	pub fn contains(&self, key: &MessageKey) -> bool {
		self.get(key).is_some()
	}

	/// Lookup that falls back to `source_text` on a miss or an empty translation.
	pub fn translate<'a>(
		&'a self,
		context: &str,
		source_text: &'a str,
		disambiguation: Option<&str>,
	) -> &'a str {
		match self.lookup(context, source_text, disambiguation) {
			Ok(text) if !text.is_empty() => text,
			_ => source_text,
		}
	}

	/// Lookup of the numerus form matching `n`.
	///
	/// Plain messages return their only text regardless of `n`.
	pub fn lookup_plural(
		&self,
		context: &str,
		source_text: &str,
		disambiguation: Option<&str>,
		n: u64,
	) -> std::result::Result<&str, LookupMiss> {
		let entry = self
			.find(context, source_text, disambiguation)
			.ok_or(LookupMiss)?;
		Ok(entry.translation.form(self.numerus.form_index(n)))
	}

	/// Plural lookup with the same fallback as [`Catalog::translate`].
	pub fn translate_plural<'a>(
		&'a self,
		context: &str,
		source_text: &'a str,
		disambiguation: Option<&str>,
		n: u64,
	) -> &'a str {
		match self.lookup_plural(context, source_text, disambiguation, n) {
			Ok(text) if !text.is_empty() => text,
			_ => source_text,
		}
	}

	/// Entries in first-appearance order.
	pub fn entries(&self) -> impl Iterator<Item = &MessageEntry> {
		self.entries.iter()
	}

	/// Context names in first-appearance order.
	pub fn contexts(&self) -> Vec<&str> {
		let mut seen = std::collections::HashSet::new();
		self.entries
			.iter()
			.map(|e| e.key.context.as_str())
			.filter(|c| seen.insert(*c))
			.collect()
	}

	/// Entries of one context in first-appearance order.
	pub fn context_entries<'a>(
		&'a self,
		context: &'a str,
	) -> impl Iterator<Item = &'a MessageEntry> + 'a {
		self.entries.iter().filter(move |e| e.key.context == context)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn header(&self) -> &CatalogHeader {
		&self.header
	}

	pub fn language(&self) -> Option<&str> {
		self.header.language.as_deref()
	}

	pub fn numerus_rule(&self) -> NumerusRule {
		self.numerus
	}

	/// Non-fatal problems from the load: skipped records and duplicates.
	pub fn diagnostics(&self) -> &[Diagnostic] {
		&self.diagnostics
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Translation coverage statistics.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::model::{MessageEntry, TranslationState};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
	pub total: usize,
	pub finished: usize,
	pub unfinished: usize,
	pub untranslated: usize,
	pub obsolete: usize,
	pub numerus: usize,
}

impl Counts {
	fn add(&mut self, entry: &MessageEntry) {
		self.total += 1;
		match entry.state() {
			TranslationState::Finished => self.finished += 1,
			TranslationState::Unfinished => self.unfinished += 1,
			TranslationState::Untranslated => self.untranslated += 1,
			TranslationState::Obsolete => self.obsolete += 1,
		}
		if entry.is_numerus() {
			self.numerus += 1;
		}
	}

	/// Share of non-obsolete entries that are finished, in percent.
	pub fn completion_percent(&self) -> f64 {
		let active = self.total - self.obsolete;
		if active == 0 {
			100.0
		} else {
			self.finished as f64 * 100.0 / active as f64
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextStats {
	pub name: String,
	#[serde(flatten)]
	pub counts: Counts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStats {
	pub language: Option<String>,
	#[serde(flatten)]
	pub counts: Counts,
	pub completion_percent: f64,
	pub contexts: Vec<ContextStats>,
}

impl CatalogStats {
	pub fn collect(catalog: &Catalog) -> Self {
		let mut counts = Counts::default();
		let mut contexts: Vec<ContextStats> = Vec::new();

		for entry in catalog.entries() {
			counts.add(entry);
			let position = match contexts.iter().position(|c| c.name == entry.key.context) {
				Some(position) => position,
				None => {
					contexts.push(ContextStats {
						name: entry.key.context.clone(),
						counts: Counts::default(),
					});
					contexts.len() - 1
				}
			};
			contexts[position].counts.add(entry);
		}

		Self {
			language: catalog.language().map(str::to_string),
			completion_percent: counts.completion_percent(),
			counts,
			contexts,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::parser::LoadOptions;

	const INPUT: &str = r#"<TS version="2.1" language="cs">
<context><name>A</name>
<message><source>a</source><translation>A</translation></message>
<message><source>b</source><translation type="unfinished">B</translation></message>
<message><source>c</source><translation></translation></message>
</context>
<context><name>B</name>
<message><source>d</source><translation type="obsolete">D</translation></message>
<message numerus="yes"><source>%n e</source><translation><numerusform>e</numerusform></translation></message>
</context>
</TS>"#;

	#[test]
	fn test_collect_counts() {
		let catalog = Catalog::load_str(INPUT, &LoadOptions::default()).unwrap();
		let stats = CatalogStats::collect(&catalog);
		assert_eq!(
			stats.counts,
			Counts {
				total: 5,
				finished: 2,
				unfinished: 1,
				untranslated: 1,
				obsolete: 1,
				numerus: 1,
			}
		);
		assert_eq!(stats.completion_percent, 50.0);
		assert_eq!(stats.language.as_deref(), Some("cs"));
		assert_eq!(stats.contexts.len(), 2);
		assert_eq!(stats.contexts[0].name, "A");
		assert_eq!(stats.contexts[0].counts.total, 3);
		assert_eq!(stats.contexts[1].counts.completion_percent(), 100.0);
	}

	#[test]
	fn test_empty_catalog_is_complete() {
		let catalog = Catalog::load_str("<TS/>", &LoadOptions::default()).unwrap();
		let stats = CatalogStats::collect(&catalog);
		assert_eq!(stats.completion_percent, 100.0);
		assert!(stats.contexts.is_empty());
	}

	#[test]
	fn test_serializes_flat() {
		let catalog = Catalog::load_str(INPUT, &LoadOptions::default()).unwrap();
		let json = serde_json::to_value(CatalogStats::collect(&catalog)).unwrap();
		assert_eq!(json["total"], 5);
		assert_eq!(json["contexts"][1]["name"], "B");
		assert_eq!(json["contexts"][1]["obsolete"], 1);
	}
}

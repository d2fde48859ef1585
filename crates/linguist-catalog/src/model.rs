// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Catalog data model.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Composite identity of one translatable phrase.
///
/// An empty `disambiguation` means the message carries no `<comment>`;
/// an empty comment element and a missing one are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MessageKey {
	pub context: String,
	pub source_text: String,
	pub disambiguation: String,
}

impl MessageKey {
	pub fn new(context: impl Into<String>, source_text: impl Into<String>) -> Self {
		Self {
			context: context.into(),
			source_text: source_text.into(),
			disambiguation: String::new(),
		}
	}

	pub fn with_disambiguation(mut self, disambiguation: impl Into<String>) -> Self {
		self.disambiguation = disambiguation.into();
		self
	}

	/// The disambiguation comment, if the key has one.
	pub fn disambiguation(&self) -> Option<&str> {
		if self.disambiguation.is_empty() {
			None
		} else {
			Some(&self.disambiguation)
		}
	}
}

impl fmt::Display for MessageKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}::{:?}", self.context, self.source_text)?;
		if let Some(d) = self.disambiguation() {
			write!(f, " ({d})")?;
		}
		Ok(())
	}
}

/// Where a message was extracted from. Informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
	pub file: String,
	pub line: Option<u32>,
}

impl Location {
	pub fn new(file: impl Into<String>, line: Option<u32>) -> Self {
		Self {
			file: file.into(),
			line,
		}
	}
}

impl fmt::Display for Location {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.line {
			Some(line) => write!(f, "{}:{}", self.file, line),
			None => f.write_str(&self.file),
		}
	}
}

/// The `type` attribute of `<translation>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationType {
	#[default]
	Finished,
	Unfinished,
	Obsolete,
	Vanished,
}

impl TranslationType {
	/// Parse the attribute value. A missing attribute means finished.
	pub fn from_attribute(value: Option<&str>) -> Option<Self> {
		match value {
			None | Some("") => Some(Self::Finished),
			Some("unfinished") => Some(Self::Unfinished),
			Some("obsolete") => Some(Self::Obsolete),
			Some("vanished") => Some(Self::Vanished),
			Some(_) => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Finished => "finished",
			Self::Unfinished => "unfinished",
			Self::Obsolete => "obsolete",
			Self::Vanished => "vanished",
		}
	}

	/// Obsolete and vanished messages no longer exist in the application.
	pub fn is_obsolete(self) -> bool {
		matches!(self, Self::Obsolete | Self::Vanished)
	}
}

/// Translated text of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Translation {
	Text(String),
	/// One form per numerus category of the catalog language.
	Numerus(Vec<String>),
}

impl Default for Translation {
	fn default() -> Self {
		Self::Text(String::new())
	}
}

impl Translation {
	/// The text, or the first numerus form.
	pub fn text(&self) -> &str {
		match self {
			Self::Text(text) => text,
			Self::Numerus(forms) => forms.first().map(String::as_str).unwrap_or(""),
		}
	}

	/// The numerus form at `index`, clamped to the last available form.
	pub fn form(&self, index: usize) -> &str {
		match self {
			Self::Text(text) => text,
			Self::Numerus(forms) => forms
				.get(index)
				.or_else(|| forms.last())
				.map(String::as_str)
				.unwrap_or(""),
		}
	}

	pub fn forms(&self) -> &[String] {
		match self {
			Self::Text(text) => std::slice::from_ref(text),
			Self::Numerus(forms) => forms,
		}
	}

	/// True when no form carries any text.
	pub fn is_empty(&self) -> bool {
		self.forms().iter().all(String::is_empty)
	}
}

/// Coarse translation state used by statistics and validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationState {
	Finished,
	Unfinished,
	Untranslated,
	Obsolete,
}

/// One message record of a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageEntry {
	pub key: MessageKey,
	/// The `id` attribute used by id-based catalogs.
	pub id: Option<String>,
	pub translation: Translation,
	pub translation_type: TranslationType,
	/// Shorter `<lengthvariant>` texts after the first one.
	pub length_variants: Vec<String>,
	pub locations: Vec<Location>,
	pub extra_comment: Option<String>,
	pub translator_comment: Option<String>,
	pub old_source: Option<String>,
	pub old_comment: Option<String>,
	/// `<extra-*>` elements keyed without the prefix, plus `userdata`.
	pub extras: BTreeMap<String, String>,
}

impl MessageEntry {
	pub fn new(key: MessageKey, translation: Translation) -> Self {
		Self {
			key,
			id: None,
			translation,
			translation_type: TranslationType::Finished,
			length_variants: Vec::new(),
			locations: Vec::new(),
			extra_comment: None,
			translator_comment: None,
			old_source: None,
			old_comment: None,
			extras: BTreeMap::new(),
		}
	}

	pub fn is_numerus(&self) -> bool {
		matches!(self.translation, Translation::Numerus(_))
	}

	/// False when the translation is empty, meaning "show the source text".
	pub fn is_translated(&self) -> bool {
		!self.translation.is_empty()
	}

	pub fn is_obsolete(&self) -> bool {
		self.translation_type.is_obsolete()
	}

	pub fn state(&self) -> TranslationState {
		if self.is_obsolete() {
			TranslationState::Obsolete
		} else if !self.is_translated() {
			TranslationState::Untranslated
		} else if self.translation_type == TranslationType::Unfinished {
			TranslationState::Unfinished
		} else {
			TranslationState::Finished
		}
	}
}

/// Attributes of the `<TS>` root element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogHeader {
	pub version: Option<String>,
	pub language: Option<String>,
	pub source_language: Option<String>,
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Catalog discovery and loading configuration.

use std::path::PathBuf;

use linguist_catalog::{CatalogDir, LoadOptions, Strictness};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOCALE: &str = "en";

/// Catalog configuration (runtime, fully resolved).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
	/// Directory holding `<prefix>_<locale>.ts` files.
	pub dir: PathBuf,
	pub prefix: Option<String>,
	/// Explicitly requested locale; the OS locale is used when unset.
	pub locale: Option<String>,
	pub default_locale: String,
	pub strictness: Strictness,
	pub include_obsolete: bool,
	pub include_unfinished: bool,
}

impl Default for CatalogConfig {
	fn default() -> Self {
		CatalogConfigLayer::default().finalize()
	}
}

impl CatalogConfig {
	pub fn load_options(&self) -> LoadOptions {
		LoadOptions {
			strictness: self.strictness,
			include_unfinished: self.include_unfinished,
			include_obsolete: self.include_obsolete,
		}
	}

	pub fn catalog_dir(&self) -> CatalogDir {
		let dir = CatalogDir::new(self.dir.clone());
		match &self.prefix {
			Some(prefix) => dir.with_prefix(prefix.clone()),
			None => dir,
		}
	}
}

/// Catalog configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfigLayer {
	#[serde(default)]
	pub dir: Option<PathBuf>,
	#[serde(default)]
	pub prefix: Option<String>,
	#[serde(default)]
	pub locale: Option<String>,
	#[serde(default)]
	pub default_locale: Option<String>,
	#[serde(default)]
	pub strictness: Option<Strictness>,
	#[serde(default)]
	pub include_obsolete: Option<bool>,
	#[serde(default)]
	pub include_unfinished: Option<bool>,
}

impl CatalogConfigLayer {
	pub fn merge(&mut self, other: CatalogConfigLayer) {
		if other.dir.is_some() {
			self.dir = other.dir;
		}
		if other.prefix.is_some() {
			self.prefix = other.prefix;
		}
		if other.locale.is_some() {
			self.locale = other.locale;
		}
		if other.default_locale.is_some() {
			self.default_locale = other.default_locale;
		}
		if other.strictness.is_some() {
			self.strictness = other.strictness;
		}
		if other.include_obsolete.is_some() {
			self.include_obsolete = other.include_obsolete;
		}
		if other.include_unfinished.is_some() {
			self.include_unfinished = other.include_unfinished;
		}
	}

	pub fn finalize(self) -> CatalogConfig {
		CatalogConfig {
			dir: self.dir.unwrap_or_else(|| PathBuf::from(".")),
			prefix: self.prefix,
			locale: self.locale,
			default_locale: self
				.default_locale
				.unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
			strictness: self.strictness.unwrap_or_default(),
			include_obsolete: self.include_obsolete.unwrap_or(true),
			include_unfinished: self.include_unfinished.unwrap_or(true),
		}
	}
}

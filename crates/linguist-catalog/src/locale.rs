// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Discovery of per-locale catalog files such as `bibletime_ui_cs.ts`.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::error::{CatalogError, Result};
use crate::parser::LoadOptions;

/// A catalog file found on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogFile {
	pub locale: String,
	pub path: PathBuf,
}

/// A directory holding one `.ts` file per locale.
#[derive(Debug, Clone)]
pub struct CatalogDir {
	dir: PathBuf,
	prefix: Option<String>,
}

impl CatalogDir {
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self {
			dir: dir.into(),
			prefix: None,
		}
	}

	/// Only consider files named `<prefix>_<locale>.ts`.
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = Some(prefix.into());
		self
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}

	/// List catalog files, sorted by locale.
	pub fn scan(&self) -> Result<Vec<CatalogFile>> {
		let read_dir = std::fs::read_dir(&self.dir).map_err(|source| CatalogError::DirRead {
			path: self.dir.clone(),
			source,
		})?;

		let mut files = Vec::new();
		for entry in read_dir {
			let entry = entry.map_err(|source| CatalogError::DirRead {
				path: self.dir.clone(),
				source,
			})?;
			let path = entry.path();
			if !path.is_file() {
				continue;
			}
			let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
				continue;
			};
			if let Some(locale) = self.locale_of(file_name) {
				files.push(CatalogFile { locale, path });
			}
		}

		files.sort_by(|a, b| a.locale.cmp(&b.locale));
		debug!(dir = %self.dir.display(), count = files.len(), "scanned catalog directory");
		Ok(files)
	}

	/// Locales with a catalog file.
	pub fn locales(&self) -> Result<Vec<String>> {
		Ok(self.scan()?.into_iter().map(|f| f.locale).collect())
	}

	/// Extract the locale from a file name, or `None` when it is not a catalog.
	fn locale_of(&self, file_name: &str) -> Option<String> {
		let stem = file_name.strip_suffix(".ts")?;
		match &self.prefix {
			Some(prefix) => {
				let locale = stem.strip_prefix(prefix.as_str())?.strip_prefix('_')?;
				(!locale.is_empty()).then(|| locale.to_string())
			}
			None => {
				let parts: Vec<&str> = stem.split('_').collect();
				let last = *parts.last()?;
				if parts.len() >= 3 && is_region(last) {
					Some(format!("{}_{}", parts[parts.len() - 2], last))
				} else if parts.len() >= 2 && !last.is_empty() {
					Some(last.to_string())
				} else {
					None
				}
			}
		}
	}

	/// Load the catalog for `locale`.
	pub fn load(&self, locale: &str, options: &LoadOptions) -> Result<Catalog> {
		let file = self
			.scan()?
			.into_iter()
			.find(|f| f.locale.eq_ignore_ascii_case(locale))
			.ok_or_else(|| CatalogError::UnknownLocale(locale.to_string()))?;

		let catalog = Catalog::load_path(&file.path, options)?;
		if let Some(language) = catalog.language() {
			if !same_locale(language, &file.locale) {
				warn!(
					path = %file.path.display(),
					file_locale = %file.locale,
					language,
					"catalog language attribute disagrees with file name"
				);
			}
		}
		Ok(catalog)
	}
}

fn is_region(segment: &str) -> bool {
	(2..=3).contains(&segment.len()) && segment.chars().all(|c| c.is_ascii_uppercase())
}

fn same_locale(a: &str, b: &str) -> bool {
	a.replace('-', "_").eq_ignore_ascii_case(&b.replace('-', "_"))
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

pub mod check;
pub mod dump;
pub mod locales;
pub mod lookup;
pub mod stats;

use std::path::Path;

use anyhow::Context;
use linguist_catalog::Catalog;
use linguist_config::LinguistConfig;
use tracing::warn;

/// State shared by all subcommands.
pub struct CliContext {
	pub config: LinguistConfig,
}

impl CliContext {
	/// Load a catalog file with the configured load options.
	///
	/// Load diagnostics are logged; lenient mode may have skipped records.
	pub fn load_catalog(&self, path: &Path) -> anyhow::Result<Catalog> {
		let options = self.config.catalog.load_options();
		let catalog = Catalog::load_path(path, &options)
			.with_context(|| format!("failed to load catalog {}", path.display()))?;
		for diagnostic in catalog.diagnostics() {
			warn!(path = %path.display(), "{diagnostic}");
		}
		Ok(catalog)
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration as produced by one source.

use serde::{Deserialize, Serialize};

use crate::sections::{CatalogConfigLayer, LoggingConfigLayer};

/// One configuration layer; `None` sections leave lower layers untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinguistConfigLayer {
	#[serde(default)]
	pub catalog: Option<CatalogConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
}

impl LinguistConfigLayer {
	pub fn merge(&mut self, other: LinguistConfigLayer) {
		if let Some(other_catalog) = other.catalog {
			self.catalog
				.get_or_insert_with(Default::default)
				.merge(other_catalog);
		}
		if let Some(other_logging) = other.logging {
			self.logging
				.get_or_insert_with(Default::default)
				.merge(other_logging);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use linguist_catalog::Strictness;
	use proptest::prelude::*;

	#[test]
	fn test_merge_fills_missing_sections() {
		let mut base = LinguistConfigLayer::default();
		base.merge(LinguistConfigLayer {
			logging: Some(LoggingConfigLayer {
				level: Some("debug".to_string()),
				format: None,
			}),
			..Default::default()
		});
		assert!(base.catalog.is_none());
		assert_eq!(
			base.logging.and_then(|l| l.level),
			Some("debug".to_string())
		);
	}

	#[test]
	fn test_serde_roundtrip() {
		let layer = LinguistConfigLayer {
			catalog: Some(CatalogConfigLayer {
				prefix: Some("bibletime_ui".to_string()),
				strictness: Some(Strictness::Lenient),
				..Default::default()
			}),
			logging: None,
		};
		let text = toml::to_string(&layer).unwrap();
		let parsed: LinguistConfigLayer = toml::from_str(&text).unwrap();
		assert_eq!(parsed, layer);
	}

	fn level() -> impl Strategy<Value = Option<String>> {
		prop::option::of(prop::sample::select(vec!["trace", "debug", "info", "warn"]).prop_map(String::from))
	}

	proptest! {
		#[test]
		fn test_later_layer_wins(a in level(), b in level()) {
			let mut merged = LinguistConfigLayer {
				logging: Some(LoggingConfigLayer { level: a.clone(), format: None }),
				..Default::default()
			};
			merged.merge(LinguistConfigLayer {
				logging: Some(LoggingConfigLayer { level: b.clone(), format: None }),
				..Default::default()
			});
			let level = merged.logging.and_then(|l| l.level);
			prop_assert_eq!(level, b.or(a));
		}
	}
}

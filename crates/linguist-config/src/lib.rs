// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration management for the linguist tools.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment, CLI)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`LINGUIST_*`)
//!
//! # Usage
//!
//! ```ignore
//! use linguist_config::{load_config, LinguistConfigLayer};
//!
//! let config = load_config(None, LinguistConfigLayer::default())?;
//! let catalogs = config.catalog.catalog_dir();
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::LinguistConfigLayer;
pub use sections::*;
pub use sources::{
	user_config_file, CliSource, ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource,
};

use std::path::PathBuf;

use tracing::{debug, info};

/// Fully resolved configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinguistConfig {
	pub catalog: CatalogConfig,
	pub logging: LoggingConfig,
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Command-line overrides
/// 2. Environment variables (`LINGUIST_*`)
/// 3. Config file (`config_file`, or `$XDG_CONFIG_HOME/linguist/config.toml`)
/// 4. Built-in defaults
pub fn load_config(
	config_file: Option<PathBuf>,
	cli: LinguistConfigLayer,
) -> Result<LinguistConfig, ConfigError> {
	let mut sources: Vec<Box<dyn ConfigSource>> = vec![
		Box::new(DefaultsSource),
		Box::new(EnvSource),
		Box::new(CliSource::new(cli)),
	];
	match config_file {
		Some(path) => sources.push(Box::new(TomlSource::required(path))),
		None => {
			if let Some(user) = TomlSource::user() {
				sources.push(Box::new(user));
			}
		}
	}

	load_from_sources(sources)
}

/// Merge the given sources by precedence and finalize.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<LinguistConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = LinguistConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: LinguistConfigLayer) -> Result<LinguistConfig, ConfigError> {
	let catalog = layer.catalog.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	validate_config(&catalog, &logging)?;

	info!(
		dir = %catalog.dir.display(),
		prefix = catalog.prefix.as_deref().unwrap_or("-"),
		locale = catalog.locale.as_deref().unwrap_or("-"),
		default_locale = %catalog.default_locale,
		strictness = %catalog.strictness,
		"configuration loaded"
	);

	Ok(LinguistConfig { catalog, logging })
}

/// Validate cross-field configuration rules.
fn validate_config(catalog: &CatalogConfig, logging: &LoggingConfig) -> Result<(), ConfigError> {
	if catalog.default_locale.trim().is_empty() {
		return Err(ConfigError::Validation(
			"catalog.default_locale must not be empty".to_string(),
		));
	}

	if !LOG_LEVELS.contains(&logging.level.to_ascii_lowercase().as_str()) {
		return Err(ConfigError::invalid_value(
			"logging.level",
			format!(
				"'{}' is not one of {}",
				logging.level,
				LOG_LEVELS.join(", ")
			),
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use linguist_catalog::Strictness;

	struct FixedSource(&'static str, Precedence, LinguistConfigLayer);

	impl ConfigSource for FixedSource {
		fn name(&self) -> &'static str {
			self.0
		}

		fn precedence(&self) -> Precedence {
			self.1
		}

		fn load(&self) -> Result<LinguistConfigLayer, ConfigError> {
			Ok(self.2.clone())
		}
	}

	fn locale_layer(locale: &str) -> LinguistConfigLayer {
		LinguistConfigLayer {
			catalog: Some(CatalogConfigLayer {
				locale: Some(locale.to_string()),
				..Default::default()
			}),
			logging: None,
		}
	}

	#[test]
	fn test_defaults() {
		let config = load_from_sources(vec![Box::new(DefaultsSource)]).unwrap();
		assert_eq!(config, LinguistConfig::default());
	}

	#[test]
	fn test_precedence_is_applied_regardless_of_order() {
		let sources: Vec<Box<dyn ConfigSource>> = vec![
			Box::new(FixedSource("cli", Precedence::CommandLine, locale_layer("cs"))),
			Box::new(FixedSource("env", Precedence::Environment, locale_layer("de"))),
			Box::new(FixedSource("file", Precedence::ConfigFile, locale_layer("fr"))),
		];
		let config = load_from_sources(sources).unwrap();
		assert_eq!(config.catalog.locale.as_deref(), Some("cs"));
	}

	#[test]
	fn test_env_overrides_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.toml");
		std::fs::write(
			&path,
			"[catalog]\nlocale = \"fr\"\nprefix = \"bibletime_ui\"\nstrictness = \"lenient\"\n",
		)
		.unwrap();

		let sources: Vec<Box<dyn ConfigSource>> = vec![
			Box::new(FixedSource("env", Precedence::Environment, locale_layer("de"))),
			Box::new(TomlSource::new(&path)),
			Box::new(DefaultsSource),
		];
		let config = load_from_sources(sources).unwrap();
		assert_eq!(config.catalog.locale.as_deref(), Some("de"));
		assert_eq!(config.catalog.prefix.as_deref(), Some("bibletime_ui"));
		assert_eq!(config.catalog.strictness, Strictness::Lenient);
	}

	#[test]
	fn test_empty_default_locale_is_rejected() {
		let layer = LinguistConfigLayer {
			catalog: Some(CatalogConfigLayer {
				default_locale: Some("  ".to_string()),
				..Default::default()
			}),
			logging: None,
		};
		let result = finalize(layer);
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[test]
	fn test_unknown_log_level_is_rejected() {
		let layer = LinguistConfigLayer {
			catalog: None,
			logging: Some(LoggingConfigLayer {
				level: Some("verbose".to_string()),
				format: None,
			}),
		};
		let err = finalize(layer).unwrap_err();
		assert!(err.to_string().contains("logging.level"));
	}

	#[test]
	fn test_explicit_missing_file_fails() {
		let result = load_config(
			Some(PathBuf::from("/nonexistent/linguist.toml")),
			LinguistConfigLayer::default(),
		);
		assert!(matches!(result, Err(ConfigError::FileRead { .. })));
	}
}

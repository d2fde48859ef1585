// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: TOML files, environment variables and CLI flags.

use std::path::PathBuf;
use std::str::FromStr;

use linguist_catalog::Strictness;
use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::LinguistConfigLayer;
use crate::sections::{CatalogConfigLayer, LogFormat, LoggingConfigLayer};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
	CommandLine = 60,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<LinguistConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<LinguistConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(LinguistConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
	required: bool,
}

impl TomlSource {
	/// A file that may be absent.
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			required: false,
		}
	}

	/// A file named explicitly by the user; absence is an error.
	pub fn required(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			required: true,
		}
	}

	/// `$XDG_CONFIG_HOME/linguist/config.toml`.
	pub fn user() -> Option<Self> {
		user_config_file().map(Self::new)
	}
}

/// Location of the per-user configuration file.
pub fn user_config_file() -> Option<PathBuf> {
	std::env::var_os("XDG_CONFIG_HOME")
		.filter(|v| !v.is_empty())
		.map(PathBuf::from)
		.or_else(dirs::config_dir)
		.map(|dir| dir.join("linguist").join("config.toml"))
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<LinguistConfigLayer, ConfigError> {
		if !self.required && !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(LinguistConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: LinguistConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: LINGUIST_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<LinguistConfigLayer, ConfigError> {
		debug!("loading environment variables");
		layer_from_env(&|name| std::env::var(name).ok())
	}
}

type Lookup<'a> = dyn Fn(&str) -> Option<String> + 'a;

fn layer_from_env(lookup: &Lookup<'_>) -> Result<LinguistConfigLayer, ConfigError> {
	let var = |name: &str| lookup(name).filter(|s| !s.is_empty());

	let catalog = CatalogConfigLayer {
		dir: var("LINGUIST_CATALOG_DIR").map(PathBuf::from),
		prefix: var("LINGUIST_CATALOG_PREFIX"),
		locale: var("LINGUIST_LOCALE"),
		default_locale: var("LINGUIST_DEFAULT_LOCALE"),
		strictness: env_bool(lookup, "LINGUIST_STRICT")?.map(|strict| {
			if strict {
				Strictness::Strict
			} else {
				Strictness::Lenient
			}
		}),
		include_obsolete: env_bool(lookup, "LINGUIST_INCLUDE_OBSOLETE")?,
		include_unfinished: env_bool(lookup, "LINGUIST_INCLUDE_UNFINISHED")?,
	};

	let logging = LoggingConfigLayer {
		level: var("LINGUIST_LOG_LEVEL"),
		format: env_parse::<LogFormat>(lookup, "LINGUIST_LOG_FORMAT")?,
	};

	Ok(LinguistConfigLayer {
		catalog: Some(catalog),
		logging: Some(logging),
	})
}

fn env_bool(lookup: &Lookup<'_>, name: &str) -> Result<Option<bool>, ConfigError> {
	match lookup(name).filter(|s| !s.is_empty()) {
		Some(v) => match v.to_ascii_lowercase().as_str() {
			"1" | "true" | "yes" | "on" => Ok(Some(true)),
			"0" | "false" | "no" | "off" => Ok(Some(false)),
			_ => Err(ConfigError::invalid_value(
				name,
				format!("invalid boolean value '{v}'"),
			)),
		},
		None => Ok(None),
	}
}

fn env_parse<T>(lookup: &Lookup<'_>, name: &str) -> Result<Option<T>, ConfigError>
where
	T: FromStr<Err = String>,
{
	match lookup(name).filter(|s| !s.is_empty()) {
		Some(v) => v
			.parse()
			.map(Some)
			.map_err(|message| ConfigError::invalid_value(name, message)),
		None => Ok(None),
	}
}

/// Overrides taken from command-line flags.
pub struct CliSource {
	overrides: LinguistConfigLayer,
}

impl CliSource {
	pub fn new(overrides: LinguistConfigLayer) -> Self {
		Self { overrides }
	}
}

impl ConfigSource for CliSource {
	fn name(&self) -> &'static str {
		"command-line"
	}

	fn precedence(&self) -> Precedence {
		Precedence::CommandLine
	}

	fn load(&self) -> Result<LinguistConfigLayer, ConfigError> {
		debug!("applying command-line overrides");
		Ok(self.overrides.clone())
	}
}

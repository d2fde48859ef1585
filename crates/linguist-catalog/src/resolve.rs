// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale resolution logic.

use std::sync::OnceLock;

static DETECTED_LOCALE: OnceLock<Option<String>> = OnceLock::new();

/// The operating system locale, detected once per process.
pub fn system_locale() -> Option<&'static str> {
	DETECTED_LOCALE
		.get_or_init(|| sys_locale::get_locale().map(|l| normalize(&l)))
		.as_deref()
}

/// Resolve which of the `available` catalog locales to load.
///
/// Resolution order (highest to lowest priority):
/// 1. Explicit preference (command line, configuration)
/// 2. Operating system locale
/// 3. Configured default locale
///
/// Each candidate matches an available locale exactly (ignoring case and
/// treating `-` like `_`), or failing that by primary language subtag, so
/// `cs_CZ` selects a `cs` catalog and `pt` selects `pt_BR`.
///
/// # Example
///
/// ```
/// use linguist_catalog::resolve_locale;
///
/// let available = ["cs", "de", "pt_BR"];
/// assert_eq!(resolve_locale(Some("pt-br"), "cs", &available), Some("pt_BR"));
/// ```
pub fn resolve_locale<'a, S: AsRef<str>>(
	preferred: Option<&str>,
	default: &str,
	available: &'a [S],
) -> Option<&'a str> {
	resolve_with(preferred, system_locale(), default, available)
}

fn resolve_with<'a, S: AsRef<str>>(
	preferred: Option<&str>,
	system: Option<&str>,
	default: &str,
	available: &'a [S],
) -> Option<&'a str> {
	[preferred, system, Some(default)]
		.into_iter()
		.flatten()
		.filter(|candidate| !candidate.is_empty())
		.find_map(|candidate| match_locale(candidate, available))
}

/// Find the available locale that best matches `candidate`.
pub fn match_locale<'a, S: AsRef<str>>(candidate: &str, available: &'a [S]) -> Option<&'a str> {
	let wanted = normalize(candidate);
	let exact = available
		.iter()
		.map(AsRef::<str>::as_ref)
		.find(|locale| normalize(locale) == wanted);
	if exact.is_some() {
		return exact;
	}

	let language = primary(&wanted);
	available
		.iter()
		.map(AsRef::<str>::as_ref)
		.find(|locale| primary(&normalize(locale)) == language)
}

/// `pt-BR.UTF-8` → `pt_br`
fn normalize(locale: &str) -> String {
	locale
		.split(['.', '@'])
		.next()
		.unwrap_or_default()
		.replace('-', "_")
		.to_ascii_lowercase()
}

fn primary(locale: &str) -> &str {
	locale.split('_').next().unwrap_or(locale)
}

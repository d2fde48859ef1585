// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Translation checks in the spirit of Qt Linguist's validators.

use std::fmt;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::model::{Location, MessageEntry, MessageKey, TranslationType};
use crate::placeholder::PlaceMarkers;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
	Info,
	Warning,
}

impl fmt::Display for Severity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Info => f.write_str("info"),
			Self::Warning => f.write_str("warning"),
		}
	}
}

impl std::str::FromStr for Severity {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"info" => Ok(Self::Info),
			"warning" | "warn" => Ok(Self::Warning),
			other => Err(format!("unknown severity '{other}'")),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FindingKind {
	Untranslated,
	Unfinished,
	/// Argument numbers present on only one side.
	PlaceMarkers { missing: Vec<u8>, unexpected: Vec<u8> },
	Accelerator { source: bool, translation: bool },
	Punctuation { expected: char },
	NumerusForms { expected: usize, found: usize },
}

impl fmt::Display for FindingKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Untranslated => f.write_str("untranslated"),
			Self::Unfinished => f.write_str("translation is unfinished"),
			Self::PlaceMarkers {
				missing,
				unexpected,
			} => {
				let list = |args: &[u8]| {
					args.iter()
						.map(|a| format!("%{a}"))
						.collect::<Vec<_>>()
						.join(", ")
				};
				match (missing.is_empty(), unexpected.is_empty()) {
					(false, true) => write!(f, "missing place markers {}", list(missing)),
					(true, false) => write!(f, "unexpected place markers {}", list(unexpected)),
					_ => write!(
						f,
						"missing place markers {}; unexpected {}",
						list(missing),
						list(unexpected)
					),
				}
			}
			Self::Accelerator {
				source: true,
				translation: false,
			} => f.write_str("accelerator missing in translation"),
			Self::Accelerator { .. } => f.write_str("accelerator not present in source"),
			Self::Punctuation { expected } => {
				write!(f, "translation should end with '{expected}'")
			}
			Self::NumerusForms { expected, found } => {
				write!(f, "expected {expected} numerus forms, found {found}")
			}
		}
	}
}

/// One problem found in one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
	pub key: MessageKey,
	pub severity: Severity,
	#[serde(flatten)]
	pub kind: FindingKind,
	/// First known call site of the message.
	pub location: Option<Location>,
}

impl fmt::Display for Finding {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if let Some(location) = &self.location {
			write!(f, "{location}: ")?;
		}
		write!(f, "{}: {}: {}", self.severity, self.key, self.kind)
	}
}

/// Run every check over the catalog, in entry order.
pub fn check(catalog: &Catalog) -> Vec<Finding> {
	let expected_forms = catalog.numerus_rule().form_count();
	let mut findings = Vec::new();
	for entry in catalog.entries() {
		check_entry(entry, expected_forms, &mut findings);
	}
	findings
}

fn check_entry(entry: &MessageEntry, expected_forms: usize, out: &mut Vec<Finding>) {
	let mut push = |severity, kind| {
		out.push(Finding {
			key: entry.key.clone(),
			severity,
			kind,
			location: entry.locations.first().cloned(),
		})
	};

	if !entry.is_translated() {
		if !entry.is_obsolete() {
			push(Severity::Info, FindingKind::Untranslated);
		}
		return;
	}
	if entry.is_obsolete() {
		return;
	}
	if entry.translation_type == TranslationType::Unfinished {
		push(Severity::Info, FindingKind::Unfinished);
	}

	let source = entry.key.source_text.as_str();
	let forms = entry.translation.forms();

	if entry.is_numerus() && forms.len() != expected_forms {
		push(
			Severity::Warning,
			FindingKind::NumerusForms {
				expected: expected_forms,
				found: forms.len(),
			},
		);
	}

	let source_markers = PlaceMarkers::scan(source);
	for form in forms.iter().filter(|f| !f.is_empty()) {
		let markers = PlaceMarkers::scan(form);
		if markers.args != source_markers.args {
			push(
				Severity::Warning,
				FindingKind::PlaceMarkers {
					missing: source_markers.args.difference(&markers.args).copied().collect(),
					unexpected: markers.args.difference(&source_markers.args).copied().collect(),
				},
			);
			break;
		}
	}

	let translation = entry.translation.text();
	let source_accel = has_accelerator(source);
	let translation_accel = has_accelerator(translation);
	if source_accel != translation_accel {
		push(
			Severity::Warning,
			FindingKind::Accelerator {
				source: source_accel,
				translation: translation_accel,
			},
		);
	}

	if let Some(expected) = final_punctuation(source) {
		if final_punctuation(translation) != Some(expected) {
			push(Severity::Warning, FindingKind::Punctuation { expected });
		}
	}
}

/// True when the text marks a keyboard accelerator such as `&File`.
///
/// `&&` is a literal ampersand and `&name;` looks like an entity.
pub fn has_accelerator(text: &str) -> bool {
	let chars: Vec<char> = text.chars().collect();
	let mut i = 0;
	while i < chars.len() {
		if chars[i] != '&' {
			i += 1;
			continue;
		}
		match chars.get(i + 1) {
			Some('&') => i += 2,
			Some(c) if c.is_whitespace() => i += 1,
			Some(_) => {
				let entity = chars[i + 1..]
					.iter()
					.take(8)
					.position(|c| *c == ';')
					.is_some_and(|end| {
						end > 0
							&& chars[i + 1..i + 1 + end]
								.iter()
								.all(|c| c.is_ascii_alphanumeric() || *c == '#')
					});
				if !entity {
					return true;
				}
				i += 1;
			}
			None => i += 1,
		}
	}
	false
}

fn final_punctuation(text: &str) -> Option<char> {
	text.trim_end()
		.chars()
		.next_back()
		.filter(|c| matches!(c, '.' | '!' | '?' | ':' | '…'))
}

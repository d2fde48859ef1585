// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Loads the shipped BibleTime Czech catalog end to end.

use linguist_catalog::lint::{self, FindingKind};
use linguist_catalog::{
	Catalog, CatalogStats, LoadOptions, Location, LookupMiss, NumerusRule, TranslationState,
};

const CATALOG: &str = include_str!("fixtures/bibletime_ui_cs.ts");

fn load() -> Catalog {
	Catalog::load_str(CATALOG, &LoadOptions::default()).expect("fixture loads in strict mode")
}

#[test]
fn test_header() {
	let catalog = load();
	assert_eq!(catalog.header().version.as_deref(), Some("2.1"));
	assert_eq!(catalog.language(), Some("cs"));
	assert_eq!(catalog.header().source_language, None);
	assert_eq!(catalog.numerus_rule(), NumerusRule::Czech);
}

#[test]
fn test_sizes() {
	let catalog = load();
	assert_eq!(catalog.len(), 897);
	assert_eq!(catalog.contexts().len(), 73);
	assert!(catalog.diagnostics().is_empty());
}

#[test]
fn test_warning_translation() {
	let catalog = load();
	assert_eq!(
		catalog.lookup("BibleTimeApp", "Warning!", None),
		Ok("Varování!")
	);
}

#[test]
fn test_warning_has_two_locations() {
	let catalog = load();
	let entry = catalog.find("BibleTimeApp", "Warning!", None).unwrap();
	assert_eq!(
		entry.locations,
		vec![
			Location::new("../../src/bibletimeapp.cpp", Some(66)),
			Location::new("../../src/mobile/bibletimeapp.cpp", Some(63)),
		]
	);
	assert_eq!(entry.translation.text(), "Varování!");
}

#[test]
fn test_language_name_with_extracomment() {
	let catalog = load();
	let entry = catalog.find("QObject", "English", None).unwrap();
	assert_eq!(entry.extra_comment.as_deref(), Some("Language name en"));
	assert_eq!(entry.translation.text(), "Angličtina");
	assert_eq!(
		catalog.lookup("BtBookshelfLanguagesPage", "English", None),
		Ok("Angličtina")
	);
}

#[test]
fn test_comment_is_part_of_key() {
	let catalog = load();
	let context = "Search::BtSearchSyntaxHelpDialog";
	assert_eq!(
		catalog.lookup(context, "jesus AND god", Some("Do not translate \"AND\".")),
		Ok("ježíš AND bůh")
	);
	assert_eq!(catalog.lookup(context, "jesus AND god", None), Err(LookupMiss));
	assert_eq!(
		catalog.lookup("Search::BtSearchOptionsArea", "jesus AND god", Some("Do not translate \"AND\".")),
		Err(LookupMiss)
	);
}

#[test]
fn test_comment_distinguishes_identical_source() {
	let input = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="cs">
<context>
    <name>Search::BtSearchOptionsArea</name>
    <message>
        <source>jesus AND god</source>
        <comment>Do not translate &quot;AND&quot;.</comment>
        <translation>ježíš AND bůh</translation>
    </message>
    <message>
        <source>jesus AND god</source>
        <translation>ježíš A bůh</translation>
    </message>
</context>
</TS>
"#;
	let catalog = Catalog::load_str(input, &LoadOptions::default()).unwrap();
	assert_eq!(catalog.len(), 2);
	assert_eq!(
		catalog.lookup(
			"Search::BtSearchOptionsArea",
			"jesus AND god",
			Some("Do not translate \"AND\".")
		),
		Ok("ježíš AND bůh")
	);
	assert_eq!(
		catalog.lookup("Search::BtSearchOptionsArea", "jesus AND god", None),
		Ok("ježíš A bůh")
	);
}

#[test]
fn test_dialog_buttons() {
	let catalog = load();
	for (source, translation) in [("OK", "OK"), ("Open", "Otevřít"), ("Save", "Uložit")] {
		assert_eq!(
			catalog.lookup("QPushButton", source, Some("Dialog Button")),
			Ok(translation)
		);
	}
}

#[test]
fn test_header_message_is_untranslated() {
	let catalog = load();
	assert_eq!(catalog.lookup("", "", None), Ok(""));
	assert_eq!(catalog.translate("", "", None), "");

	let entry = catalog.find("", "", None).unwrap();
	assert_eq!(entry.state(), TranslationState::Untranslated);
	assert!(entry
		.translator_comment
		.as_deref()
		.is_some_and(|c| c.starts_with("Bibletime User Interface translation\n")));
}

#[test]
fn test_entities_in_source_are_decoded() {
	let catalog = load();
	assert_eq!(
		catalog.lookup("BibleTime", "Sw&itch session", None),
		Ok("Přepnout relaci")
	);
}

#[test]
fn test_stats() {
	let stats = CatalogStats::collect(&load());
	assert_eq!(stats.counts.total, 897);
	assert_eq!(stats.counts.untranslated, 1);
	assert_eq!(stats.counts.finished, 896);
	assert_eq!(stats.counts.obsolete, 0);
	assert_eq!(stats.counts.numerus, 0);
	assert_eq!(stats.contexts.len(), 73);
}

#[test]
fn test_lint_reports_missing_accelerator() {
	let findings = lint::check(&load());
	assert!(findings.iter().any(|f| {
		f.key.context == "BibleTime"
			&& f.key.source_text == "Sw&itch session"
			&& f.kind
				== FindingKind::Accelerator {
					source: true,
					translation: false,
				}
	}));
	assert_eq!(
		findings
			.iter()
			.filter(|f| f.kind == FindingKind::Untranslated)
			.count(),
		1
	);
}

#[test]
fn test_lenient_load_matches_strict() {
	let strict = load();
	let lenient = Catalog::load_str(CATALOG, &LoadOptions::lenient()).unwrap();
	let a: Vec<_> = strict.entries().collect();
	let b: Vec<_> = lenient.entries().collect();
	assert_eq!(a, b);
}

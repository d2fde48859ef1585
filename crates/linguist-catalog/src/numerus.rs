// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Plural form selection for numerus messages.
//!
//! Qt stores one `<numerusform>` per plural category of the target
//! language, in a fixed order. [`NumerusRule`] maps a count to the index
//! of the form to use.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumerusRule {
	/// No plural distinction.
	Single,
	/// `1` and everything else.
	#[default]
	OneOther,
	/// `0` and `1` share the singular form.
	French,
	/// Russian, Ukrainian, Belarusian and the BCS languages.
	EastSlavic,
	Polish,
	/// Czech and Slovak.
	Czech,
	Slovenian,
	Lithuanian,
	Latvian,
	Irish,
	Arabic,
}

impl NumerusRule {
	/// Pick the rule for a locale such as `cs`, `pt_BR` or `sr-Latn`.
	pub fn for_language(locale: &str) -> Self {
		let normalized = locale.replace('-', "_");
		let mut parts = normalized.split('_');
		let language = parts.next().unwrap_or_default().to_ascii_lowercase();
		let region = parts.last().map(str::to_ascii_uppercase);

		match language.as_str() {
			"ja" | "zh" | "ko" | "vi" | "th" | "id" | "ms" | "tr" | "fa" | "ka" => Self::Single,
			"fr" => Self::French,
			"pt" if region.as_deref() == Some("BR") => Self::French,
			"ru" | "uk" | "be" | "sr" | "hr" | "bs" => Self::EastSlavic,
			"pl" => Self::Polish,
			"cs" | "sk" => Self::Czech,
			"sl" => Self::Slovenian,
			"lt" => Self::Lithuanian,
			"lv" => Self::Latvian,
			"ga" => Self::Irish,
			"ar" => Self::Arabic,
			_ => Self::OneOther,
		}
	}

	/// Number of forms a complete translation carries.
	pub fn form_count(self) -> usize {
		match self {
			Self::Single => 1,
			Self::OneOther | Self::French => 2,
			Self::EastSlavic | Self::Polish | Self::Czech | Self::Lithuanian | Self::Latvian => 3,
			Self::Slovenian => 4,
			Self::Irish => 3,
			Self::Arabic => 6,
		}
	}

	/// Index of the form to use for `n`. Always below [`Self::form_count`].
	pub fn form_index(self, n: u64) -> usize {
		let n10 = n % 10;
		let n100 = n % 100;
		match self {
			Self::Single => 0,
			Self::OneOther => usize::from(n != 1),
			Self::French => usize::from(n > 1),
			Self::EastSlavic => {
				if n10 == 1 && n100 != 11 {
					0
				} else if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
					1
				} else {
					2
				}
			}
			Self::Polish => {
				if n == 1 {
					0
				} else if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
					1
				} else {
					2
				}
			}
			Self::Czech => match n {
				1 => 0,
				2..=4 => 1,
				_ => 2,
			},
			Self::Slovenian => match n100 {
				1 => 0,
				2 => 1,
				3 | 4 => 2,
				_ => 3,
			},
			Self::Lithuanian => {
				if n10 == 1 && n100 != 11 {
					0
				} else if n10 >= 2 && !(10..20).contains(&n100) {
					1
				} else {
					2
				}
			}
			Self::Latvian => {
				if n10 == 1 && n100 != 11 {
					0
				} else if n != 0 {
					1
				} else {
					2
				}
			}
			Self::Irish => match n {
				1 => 0,
				2 => 1,
				_ => 2,
			},
			Self::Arabic => match n {
				0 => 0,
				1 => 1,
				2 => 2,
				_ if (3..=10).contains(&n100) => 3,
				_ if n100 >= 11 => 4,
				_ => 5,
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_language_lookup() {
		assert_eq!(NumerusRule::for_language("cs"), NumerusRule::Czech);
		assert_eq!(NumerusRule::for_language("cs_CZ"), NumerusRule::Czech);
		assert_eq!(NumerusRule::for_language("pt_BR"), NumerusRule::French);
		assert_eq!(NumerusRule::for_language("pt-br"), NumerusRule::French);
		assert_eq!(NumerusRule::for_language("pt_PT"), NumerusRule::OneOther);
		assert_eq!(NumerusRule::for_language("zh_TW"), NumerusRule::Single);
		assert_eq!(NumerusRule::for_language("en"), NumerusRule::OneOther);
		assert_eq!(NumerusRule::for_language(""), NumerusRule::OneOther);
	}

	#[test]
	fn test_czech_forms() {
		let rule = NumerusRule::Czech;
		assert_eq!(rule.form_index(1), 0);
		assert_eq!(rule.form_index(3), 1);
		assert_eq!(rule.form_index(5), 2);
		assert_eq!(rule.form_index(0), 2);
		assert_eq!(rule.form_index(22), 2);
	}

	#[test]
	fn test_east_slavic_forms() {
		let rule = NumerusRule::EastSlavic;
		assert_eq!(rule.form_index(1), 0);
		assert_eq!(rule.form_index(21), 0);
		assert_eq!(rule.form_index(11), 2);
		assert_eq!(rule.form_index(22), 1);
		assert_eq!(rule.form_index(12), 2);
		assert_eq!(rule.form_index(25), 2);
	}

	#[test]
	fn test_polish_forms() {
		let rule = NumerusRule::Polish;
		assert_eq!(rule.form_index(1), 0);
		assert_eq!(rule.form_index(21), 2);
		assert_eq!(rule.form_index(24), 1);
		assert_eq!(rule.form_index(14), 2);
	}

	#[test]
	fn test_french_and_english_zero() {
		assert_eq!(NumerusRule::French.form_index(0), 0);
		assert_eq!(NumerusRule::OneOther.form_index(0), 1);
		assert_eq!(NumerusRule::OneOther.form_index(1), 0);
	}

	#[test]
	fn test_irish_forms() {
		let rule = NumerusRule::for_language("ga_IE");
		assert_eq!(rule, NumerusRule::Irish);
		assert_eq!(rule.form_count(), 3);
		let indices: Vec<usize> = [0, 1, 2, 3, 7, 11].iter().map(|&n| rule.form_index(n)).collect();
		assert_eq!(indices, vec![2, 0, 1, 2, 2, 2]);
	}

	#[test]
	fn test_arabic_forms() {
		let rule = NumerusRule::Arabic;
		let indices: Vec<usize> = [0, 1, 2, 3, 11, 100, 102]
			.iter()
			.map(|&n| rule.form_index(n))
			.collect();
		assert_eq!(indices, vec![0, 1, 2, 3, 4, 5, 5]);
	}

	proptest! {
		#[test]
		fn test_form_index_in_range(n in any::<u64>(), lang in prop::sample::select(vec![
			"ja", "en", "fr", "pt_BR", "ru", "pl", "cs", "sl", "lt", "lv", "ga", "ar",
		])) {
			let rule = NumerusRule::for_language(lang);
			prop_assert!(rule.form_index(n) < rule.form_count());
		}
	}
}

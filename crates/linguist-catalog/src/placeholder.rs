// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Qt place markers (`%1`, `%L2`, `%n`) inside message text.

use std::collections::BTreeSet;

/// The place markers found in a piece of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceMarkers {
	/// Argument numbers `1..=99` from `%N` and `%LN`.
	pub args: BTreeSet<u8>,
	/// Whether `%n` or `%Ln` appears.
	pub count: bool,
}

impl PlaceMarkers {
	pub fn scan(text: &str) -> Self {
		let mut markers = Self::default();
		let bytes = text.as_bytes();
		let mut i = 0;
		while i < bytes.len() {
			if bytes[i] != b'%' {
				i += 1;
				continue;
			}
			let mut j = i + 1;
			if bytes.get(j) == Some(&b'L') {
				j += 1;
			}
			match bytes.get(j) {
				Some(b'n') => {
					markers.count = true;
					i = j + 1;
				}
				Some(d) if d.is_ascii_digit() && *d != b'0' => {
					let mut value = u32::from(d - b'0');
					j += 1;
					if let Some(d2) = bytes.get(j).filter(|b| b.is_ascii_digit()) {
						value = value * 10 + u32::from(d2 - b'0');
						j += 1;
					}
					if let Ok(arg) = u8::try_from(value) {
						markers.args.insert(arg);
					}
					i = j;
				}
				_ => i += 1,
			}
		}
		markers
	}

	pub fn is_empty(&self) -> bool {
		self.args.is_empty() && !self.count
	}
}

/// Substitute `%n` and `%Ln` with `n`.
pub fn fill_count(text: &str, n: u64) -> String {
	text.replace("%Ln", &n.to_string()).replace("%n", &n.to_string())
}

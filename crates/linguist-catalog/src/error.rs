// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Catalog error types.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur while loading catalogs.
#[derive(Debug, Error)]
pub enum CatalogError {
	/// I/O error reading a catalog file
	#[error("failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// I/O error reading a catalog stream
	#[error("failed to read catalog: {0}")]
	Read(#[source] std::io::Error),

	/// Catalog bytes are not UTF-8
	#[error("{path} is not valid UTF-8")]
	InvalidUtf8 { path: PathBuf },

	/// Malformed catalog structure
	#[error(transparent)]
	Parse(#[from] ParseError),

	/// No catalog file exists for the requested locale
	#[error("no catalog for locale '{0}'")]
	UnknownLocale(String),

	/// Catalog directory could not be listed
	#[error("failed to list catalog directory {path}: {source}")]
	DirRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

/// One-based line and column inside the catalog text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Position {
	pub line: usize,
	pub column: usize,
}

impl Position {
	/// Compute the position of a byte offset within `input`.
	pub fn at(input: &str, offset: usize) -> Self {
		let mut offset = offset.min(input.len());
		while !input.is_char_boundary(offset) {
			offset -= 1;
		}
		let before = &input[..offset];
		let line = before.matches('\n').count() + 1;
		let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
		let column = before[line_start..].chars().count() + 1;
		Self { line, column }
	}
}

impl fmt::Display for Position {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.line, self.column)
	}
}

/// A malformed catalog envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error at {position}: {kind}")]
pub struct ParseError {
	pub position: Position,
	pub kind: ParseErrorKind,
}

impl ParseError {
	pub fn new(position: Position, kind: ParseErrorKind) -> Self {
		Self { position, kind }
	}
}

/// What was wrong with the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ParseErrorKind {
	#[error("malformed XML: {0}")]
	Xml(String),

	#[error("expected <TS> root element, found <{0}>")]
	UnexpectedRoot(String),

	#[error("unexpected <{element}> inside <{parent}>")]
	UnexpectedElement { element: String, parent: String },

	#[error("unexpected text inside <{parent}>")]
	UnexpectedText { parent: String },

	#[error("<{parent}> is missing required <{element}>")]
	MissingElement { element: String, parent: String },

	#[error("invalid {attribute}=\"{value}\" on <{element}>")]
	InvalidAttribute {
		element: String,
		attribute: String,
		value: String,
	},

	#[error("unexpected end of input")]
	UnexpectedEof,
}

/// Returned by lookups when the catalog holds no entry for a key.
///
/// Callers are expected to display the source text instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("message not found in catalog")]
pub struct LookupMiss;

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Pull parser for the Qt Linguist `.ts` format.
//!
//! The parser walks the `quick-xml` event stream with one method per
//! element level (`TS`, `context`, `message`, text elements). Structural
//! problems go through [`TsParser::flag`]: in strict mode they abort the
//! load, in lenient mode the enclosing record is skipped and a
//! [`Diagnostic`] is recorded. XML syntax errors are always fatal because
//! the event stream cannot be resynchronized after them.

use std::cell::Cell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::error::{ParseError, ParseErrorKind, Position};
use crate::model::{
	CatalogHeader, Location, MessageEntry, MessageKey, Translation, TranslationType,
};

/// Element names that belong to the `.ts` vocabulary. Any of these in the
/// wrong place is a structural error; other unknown elements are skipped.
const VOCABULARY: &[&str] = &[
	"TS",
	"context",
	"name",
	"message",
	"source",
	"translation",
	"comment",
	"oldsource",
	"oldcomment",
	"extracomment",
	"translatorcomment",
	"location",
	"numerusform",
	"lengthvariant",
	"byte",
	"userdata",
	"dependencies",
	"dependency",
];

/// How the loader reacts to malformed records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
	/// The first structural problem fails the whole load.
	#[default]
	Strict,
	/// Malformed records are skipped and reported as diagnostics.
	Lenient,
}

impl FromStr for Strictness {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"strict" => Ok(Self::Strict),
			"lenient" => Ok(Self::Lenient),
			other => Err(format!("unknown strictness '{other}'")),
		}
	}
}

impl fmt::Display for Strictness {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Strict => f.write_str("strict"),
			Self::Lenient => f.write_str("lenient"),
		}
	}
}

/// Options controlling a catalog load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
	pub strictness: Strictness,
	/// Keep `type="unfinished"` translations.
	pub include_unfinished: bool,
	/// Keep `type="obsolete"` and `type="vanished"` messages.
	pub include_obsolete: bool,
}

impl Default for LoadOptions {
	fn default() -> Self {
		Self {
			strictness: Strictness::Strict,
			include_unfinished: true,
			include_obsolete: true,
		}
	}
}

impl LoadOptions {
	pub fn strict() -> Self {
		Self::default()
	}

	pub fn lenient() -> Self {
		Self {
			strictness: Strictness::Lenient,
			..Self::default()
		}
	}
}

/// Something noteworthy that happened during a load without failing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
	pub position: Position,
	#[serde(flatten)]
	pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "diagnostic", rename_all = "snake_case")]
pub enum DiagnosticKind {
	/// A malformed `<message>` was dropped.
	SkippedMessage {
		context: String,
		reason: ParseErrorKind,
	},
	/// A `<context>` without `<name>` was dropped with all its messages.
	SkippedContext { reason: ParseErrorKind },
	/// A misplaced element outside any message was dropped.
	SkippedElement { reason: ParseErrorKind },
	/// A `<location>` with an unreadable line was dropped; its message was kept.
	SkippedLocation { reason: ParseErrorKind },
	/// A later record replaced an earlier one with the same key.
	DuplicateMessage { key: MessageKey },
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.kind {
			DiagnosticKind::SkippedMessage { context, reason } => write!(
				f,
				"{}: skipped message in context '{}': {}",
				self.position, context, reason
			),
			DiagnosticKind::SkippedContext { reason } => {
				write!(f, "{}: skipped context: {}", self.position, reason)
			}
			DiagnosticKind::SkippedElement { reason } => {
				write!(f, "{}: skipped element: {}", self.position, reason)
			}
			DiagnosticKind::SkippedLocation { reason } => {
				write!(f, "{}: skipped location: {}", self.position, reason)
			}
			DiagnosticKind::DuplicateMessage { key } => {
				write!(f, "{}: duplicate message {}", self.position, key)
			}
		}
	}
}

/// Output of a successful parse, before indexing.
#[derive(Debug, Default)]
pub(crate) struct ParsedCatalog {
	pub header: CatalogHeader,
	pub entries: Vec<(Position, MessageEntry)>,
	pub diagnostics: Vec<Diagnostic>,
}

/// Parse `.ts` text.
pub(crate) fn parse(input: &str, options: &LoadOptions) -> Result<ParsedCatalog, ParseError> {
	let input = input.strip_prefix('\u{feff}').unwrap_or(input);
	let mut parser = TsParser::new(input, options);
	parser.parse_document()?;
	Ok(parser.output)
}

/// First structural problem found inside a record.
struct Problem {
	position: Position,
	kind: ParseErrorKind,
}

/// Converts reader offsets to line and column without rescanning the input.
///
/// Reader offsets only grow, so each call scans the bytes since the last one.
struct LineCursor {
	offset: Cell<usize>,
	position: Cell<Position>,
}

impl LineCursor {
	fn new() -> Self {
		Self {
			offset: Cell::new(0),
			position: Cell::new(Position { line: 1, column: 1 }),
		}
	}

	fn at(&self, input: &str, offset: usize) -> Position {
		let mut offset = offset.min(input.len());
		while !input.is_char_boundary(offset) {
			offset -= 1;
		}
		let from = self.offset.get();
		if offset < from {
			return Position::at(input, offset);
		}

		let chunk = &input[from..offset];
		let mut position = self.position.get();
		match chunk.rfind('\n') {
			Some(last) => {
				position.line += chunk.bytes().filter(|&b| b == b'\n').count();
				position.column = chunk[last + 1..].chars().count() + 1;
			}
			None => position.column += chunk.chars().count(),
		}
		self.offset.set(offset);
		self.position.set(position);
		position
	}
}

struct TsParser<'a> {
	input: &'a str,
	reader: Reader<&'a [u8]>,
	cursor: LineCursor,
	options: &'a LoadOptions,
	output: ParsedCatalog,
	/// File of the previous `<location>`, inherited when `filename` is omitted.
	current_file: String,
	/// Last absolute line per file, the base for relative `line="+N"`.
	last_lines: HashMap<String, i64>,
}

impl<'a> TsParser<'a> {
	fn new(input: &'a str, options: &'a LoadOptions) -> Self {
		Self {
			input,
			reader: Reader::from_str(input),
			cursor: LineCursor::new(),
			options,
			output: ParsedCatalog::default(),
			current_file: String::new(),
			last_lines: HashMap::new(),
		}
	}

	fn position(&self) -> Position {
		self.cursor.at(self.input, self.reader.buffer_position() as usize)
	}

	fn error(&self, kind: ParseErrorKind) -> ParseError {
		ParseError::new(self.position(), kind)
	}

	fn xml_error(&self, err: impl fmt::Display) -> ParseError {
		ParseError::new(
			self.cursor.at(self.input, self.reader.error_position() as usize),
			ParseErrorKind::Xml(err.to_string()),
		)
	}

	fn next(&mut self) -> Result<Event<'a>, ParseError> {
		match self.reader.read_event() {
			Ok(event) => Ok(event),
			Err(e) => Err(self.xml_error(e)),
		}
	}

	/// Skip the rest of an element whose start tag was just read.
	fn skip(&mut self, start: &BytesStart<'a>) -> Result<(), ParseError> {
		match self.reader.read_to_end(start.name()) {
			Ok(_) => Ok(()),
			Err(e) => Err(self.xml_error(e)),
		}
	}

	/// Report a structural problem inside a record.
	///
	/// Strict mode returns the error; lenient mode keeps the first problem
	/// in `slot` so the caller can drop the record once it is fully read.
	fn flag(
		&self,
		slot: &mut Option<Problem>,
		position: Position,
		kind: ParseErrorKind,
	) -> Result<(), ParseError> {
		match self.options.strictness {
			Strictness::Strict => Err(ParseError::new(position, kind)),
			Strictness::Lenient => {
				if slot.is_none() {
					*slot = Some(Problem { position, kind });
				}
				Ok(())
			}
		}
	}

	fn note(&mut self, position: Position, kind: DiagnosticKind) {
		self.output.diagnostics.push(Diagnostic { position, kind });
	}

	/// A vocabulary element outside of any message, in the wrong parent.
	fn misplaced(
		&mut self,
		element: String,
		parent: &str,
		subtree: Option<&BytesStart<'a>>,
	) -> Result<(), ParseError> {
		let position = self.position();
		let kind = ParseErrorKind::UnexpectedElement {
			element,
			parent: parent.to_string(),
		};
		if self.options.strictness == Strictness::Strict {
			return Err(ParseError::new(position, kind));
		}
		warn!(%position, reason = %kind, "skipping misplaced element");
		self.note(position, DiagnosticKind::SkippedElement { reason: kind });
		match subtree {
			Some(start) => self.skip(start),
			None => Ok(()),
		}
	}

	/// Non-whitespace text outside of any message.
	fn stray_text(&mut self, parent: &str) -> Result<(), ParseError> {
		let position = self.position();
		let kind = ParseErrorKind::UnexpectedText {
			parent: parent.to_string(),
		};
		if self.options.strictness == Strictness::Strict {
			return Err(ParseError::new(position, kind));
		}
		self.note(position, DiagnosticKind::SkippedElement { reason: kind });
		Ok(())
	}

	fn attribute(&self, start: &BytesStart<'a>, name: &str) -> Result<Option<String>, ParseError> {
		for attr in start.attributes() {
			let attr = attr.map_err(|e| self.xml_error(e))?;
			if attr.key.as_ref() == name.as_bytes() {
				let value = attr.unescape_value().map_err(|e| self.xml_error(e))?;
				return Ok(Some(value.into_owned()));
			}
		}
		Ok(None)
	}

	fn parse_document(&mut self) -> Result<(), ParseError> {
		let mut root_seen = false;
		loop {
			match self.next()? {
				Event::Start(start) => {
					let name = element_name(&start);
					if root_seen || name != "TS" {
						return Err(self.error(ParseErrorKind::UnexpectedRoot(name)));
					}
					root_seen = true;
					self.output.header = self.header(&start)?;
					self.parse_ts()?;
				}
				Event::Empty(start) => {
					let name = element_name(&start);
					if root_seen || name != "TS" {
						return Err(self.error(ParseErrorKind::UnexpectedRoot(name)));
					}
					root_seen = true;
					self.output.header = self.header(&start)?;
				}
				Event::Text(text) if is_blank(&text) => {}
				Event::Text(_) | Event::CData(_) => {
					return Err(self.error(ParseErrorKind::UnexpectedText {
						parent: "document".to_string(),
					}));
				}
				Event::End(end) => {
					let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
					return Err(self.error(ParseErrorKind::Xml(format!(
						"unexpected closing tag </{name}>"
					))));
				}
				Event::Eof => break,
				_ => {}
			}
		}

		if root_seen {
			Ok(())
		} else {
			Err(self.error(ParseErrorKind::UnexpectedEof))
		}
	}

	fn header(&self, start: &BytesStart<'a>) -> Result<CatalogHeader, ParseError> {
		Ok(CatalogHeader {
			version: self.attribute(start, "version")?,
			language: self.attribute(start, "language")?,
			source_language: self.attribute(start, "sourcelanguage")?,
		})
	}

	fn parse_ts(&mut self) -> Result<(), ParseError> {
		loop {
			match self.next()? {
				Event::Start(start) => match element_name(&start).as_str() {
					"context" => self.parse_context()?,
					"dependencies" => self.skip(&start)?,
					name if is_vocabulary(name) => {
						self.misplaced(name.to_string(), "TS", Some(&start))?
					}
					_ => self.skip(&start)?,
				},
				Event::Empty(start) => match element_name(&start).as_str() {
					"context" => {
						let mut problem = None;
						self.flag(&mut problem, self.position(), missing_context_name())?;
						if let Some(problem) = problem {
							self.skip_context(problem, 0);
						}
					}
					"dependencies" => {}
					name if is_vocabulary(name) => self.misplaced(name.to_string(), "TS", None)?,
					_ => {}
				},
				Event::Text(text) if is_blank(&text) => {}
				Event::Text(_) | Event::CData(_) => self.stray_text("TS")?,
				Event::End(_) => return Ok(()),
				Event::Eof => return Err(self.error(ParseErrorKind::UnexpectedEof)),
				_ => {}
			}
		}
	}

	fn parse_context(&mut self) -> Result<(), ParseError> {
		let start_position = self.position();
		let mut name: Option<String> = None;
		let mut messages: Vec<(Position, MessageEntry)> = Vec::new();
		let mut problem = None;

		loop {
			match self.next()? {
				Event::Start(start) => match element_name(&start).as_str() {
					"name" => name = Some(self.read_text(&start, &mut problem)?),
					"comment" => {
						self.read_text(&start, &mut problem)?;
					}
					"message" => {
						let position = self.position();
						let hint = name.as_deref().unwrap_or_default().to_string();
						if let Some(entry) = self.parse_message(&start, &hint)? {
							messages.push((position, entry));
						}
					}
					element if is_vocabulary(element) => {
						self.misplaced(element.to_string(), "context", Some(&start))?
					}
					_ => self.skip(&start)?,
				},
				Event::Empty(start) => match element_name(&start).as_str() {
					"name" => name = Some(String::new()),
					"comment" => {}
					"message" => {
						let position = self.position();
						let kind = ParseErrorKind::MissingElement {
							element: "source".to_string(),
							parent: "message".to_string(),
						};
						let mut slot = None;
						self.flag(&mut slot, position, kind)?;
						if let Some(problem) = slot {
							let context = name.clone().unwrap_or_default();
							self.skip_message(problem, context);
						}
					}
					element if is_vocabulary(element) => {
						self.misplaced(element.to_string(), "context", None)?
					}
					_ => {}
				},
				Event::Text(text) if is_blank(&text) => {}
				Event::Text(_) | Event::CData(_) => self.stray_text("context")?,
				Event::End(_) => break,
				Event::Eof => return Err(self.error(ParseErrorKind::UnexpectedEof)),
				_ => {}
			}
		}

		// A broken <name> or <comment> taints the whole context.
		if name.is_none() && problem.is_none() {
			self.flag(&mut problem, start_position, missing_context_name())?;
		}

		if let Some(problem) = problem {
			self.skip_context(problem, messages.len());
			return Ok(());
		}

		let name = name.unwrap_or_default();
		trace!(context = %name, messages = messages.len(), "parsed context");
		for (position, mut entry) in messages {
			entry.key.context = name.clone();
			self.accept(position, entry);
		}
		Ok(())
	}

	fn skip_context(&mut self, problem: Problem, dropped: usize) {
		warn!(
			position = %problem.position,
			reason = %problem.kind,
			dropped,
			"skipping malformed context"
		);
		self.note(
			problem.position,
			DiagnosticKind::SkippedContext {
				reason: problem.kind,
			},
		);
	}

	fn skip_message(&mut self, problem: Problem, context: String) {
		warn!(
			position = %problem.position,
			context = %context,
			reason = %problem.kind,
			"skipping malformed message"
		);
		self.note(
			problem.position,
			DiagnosticKind::SkippedMessage {
				context,
				reason: problem.kind,
			},
		);
	}

	/// Apply the include filters and keep the entry.
	fn accept(&mut self, position: Position, entry: MessageEntry) {
		let keep = match entry.translation_type {
			TranslationType::Unfinished => self.options.include_unfinished,
			TranslationType::Obsolete | TranslationType::Vanished => self.options.include_obsolete,
			TranslationType::Finished => true,
		};
		if keep {
			self.output.entries.push((position, entry));
		}
	}

	/// Parse one `<message>`. Returns `None` when lenient mode dropped it.
	fn parse_message(
		&mut self,
		start: &BytesStart<'a>,
		context_hint: &str,
	) -> Result<Option<MessageEntry>, ParseError> {
		let position = self.position();
		let numerus = self.attribute(start, "numerus")?.as_deref() == Some("yes");
		let id = self.attribute(start, "id")?;

		let mut problem = None;
		let mut source = None;
		let mut comment = String::new();
		let mut translation = if numerus {
			Translation::Numerus(Vec::new())
		} else {
			Translation::default()
		};
		let mut translation_type = TranslationType::Finished;
		let mut length_variants = Vec::new();
		let mut locations = Vec::new();
		let mut extra_comment = None;
		let mut translator_comment = None;
		let mut old_source = None;
		let mut old_comment = None;
		let mut extras = BTreeMap::new();

		loop {
			match self.next()? {
				Event::Start(child) => {
					let name = element_name(&child);
					match name.as_str() {
						"source" => source = Some(self.read_text(&child, &mut problem)?),
						"comment" => comment = self.read_text(&child, &mut problem)?,
						"oldsource" => old_source = Some(self.read_text(&child, &mut problem)?),
						"oldcomment" => old_comment = Some(self.read_text(&child, &mut problem)?),
						"extracomment" => {
							extra_comment = Some(self.read_text(&child, &mut problem)?)
						}
						"translatorcomment" => {
							translator_comment = Some(self.read_text(&child, &mut problem)?)
						}
						"translation" => {
							translation_type = self.translation_type(&child, &mut problem)?;
							let (text, variants) =
								self.read_translation(&child, numerus, &mut problem)?;
							translation = text;
							length_variants = variants;
						}
						"location" => {
							if let Some(location) = self.location(&child)? {
								locations.push(location);
							}
							self.skip(&child)?;
						}
						"userdata" => {
							let text = self.read_text(&child, &mut problem)?;
							extras.insert(name, text);
						}
						extra if extra.starts_with("extra-") => {
							let text = self.read_text(&child, &mut problem)?;
							extras.insert(extra["extra-".len()..].to_string(), text);
						}
						element if is_vocabulary(element) => {
							let kind = ParseErrorKind::UnexpectedElement {
								element: element.to_string(),
								parent: "message".to_string(),
							};
							self.flag(&mut problem, self.position(), kind)?;
							self.skip(&child)?;
						}
						_ => self.skip(&child)?,
					}
				}
				Event::Empty(child) => {
					let name = element_name(&child);
					match name.as_str() {
						"source" => source = Some(String::new()),
						"comment" => comment.clear(),
						"oldsource" => old_source = Some(String::new()),
						"oldcomment" => old_comment = Some(String::new()),
						"extracomment" => extra_comment = Some(String::new()),
						"translatorcomment" => translator_comment = Some(String::new()),
						"translation" => {
							translation_type = self.translation_type(&child, &mut problem)?;
						}
						"location" => {
							if let Some(location) = self.location(&child)? {
								locations.push(location);
							}
						}
						"userdata" => {
							extras.insert(name, String::new());
						}
						extra if extra.starts_with("extra-") => {
							extras.insert(extra["extra-".len()..].to_string(), String::new());
						}
						element if is_vocabulary(element) => {
							let kind = ParseErrorKind::UnexpectedElement {
								element: element.to_string(),
								parent: "message".to_string(),
							};
							self.flag(&mut problem, self.position(), kind)?;
						}
						_ => {}
					}
				}
				Event::Text(text) if is_blank(&text) => {}
				Event::Text(_) | Event::CData(_) => {
					let kind = ParseErrorKind::UnexpectedText {
						parent: "message".to_string(),
					};
					self.flag(&mut problem, self.position(), kind)?;
				}
				Event::End(_) => break,
				Event::Eof => return Err(self.error(ParseErrorKind::UnexpectedEof)),
				_ => {}
			}
		}

		if source.is_none() {
			let kind = ParseErrorKind::MissingElement {
				element: "source".to_string(),
				parent: "message".to_string(),
			};
			self.flag(&mut problem, position, kind)?;
		}

		if let Some(problem) = problem {
			self.skip_message(problem, context_hint.to_string());
			return Ok(None);
		}

		let key =
			MessageKey::new(String::new(), source.unwrap_or_default()).with_disambiguation(comment);
		Ok(Some(MessageEntry {
			key,
			id,
			translation,
			translation_type,
			length_variants,
			locations,
			extra_comment,
			translator_comment,
			old_source,
			old_comment,
			extras,
		}))
	}

	fn translation_type(
		&self,
		start: &BytesStart<'a>,
		problem: &mut Option<Problem>,
	) -> Result<TranslationType, ParseError> {
		let value = self.attribute(start, "type")?;
		match TranslationType::from_attribute(value.as_deref()) {
			Some(kind) => Ok(kind),
			None => {
				let kind = ParseErrorKind::InvalidAttribute {
					element: "translation".to_string(),
					attribute: "type".to_string(),
					value: value.unwrap_or_default(),
				};
				self.flag(problem, self.position(), kind)?;
				Ok(TranslationType::Finished)
			}
		}
	}

	/// Read a `<location>` element's attributes.
	///
	/// A reference with an unreadable line is dropped in either mode; only
	/// a diagnostic is left behind.
	fn location(&mut self, start: &BytesStart<'a>) -> Result<Option<Location>, ParseError> {
		if let Some(file) = self.attribute(start, "filename")? {
			self.current_file = file;
		}
		let file = self.current_file.clone();

		let Some(raw) = self.attribute(start, "line")? else {
			return Ok(Some(Location::new(file, None)));
		};

		let line = if raw.starts_with('+') || raw.starts_with('-') {
			let base = self.last_lines.get(&file).copied().unwrap_or(0);
			raw.parse::<i64>().ok().map(|offset| base + offset)
		} else {
			raw.parse::<i64>().ok()
		};

		match line.and_then(|l| u32::try_from(l).ok()) {
			Some(line) => {
				self.last_lines.insert(file.clone(), i64::from(line));
				Ok(Some(Location::new(file, Some(line))))
			}
			None => {
				let kind = ParseErrorKind::InvalidAttribute {
					element: "location".to_string(),
					attribute: "line".to_string(),
					value: raw,
				};
				let position = self.position();
				warn!(%position, reason = %kind, "dropping location");
				self.note(position, DiagnosticKind::SkippedLocation { reason: kind });
				Ok(None)
			}
		}
	}

	/// Collect the text content of a leaf element, including `<byte>` escapes.
	fn read_text(
		&mut self,
		start: &BytesStart<'a>,
		problem: &mut Option<Problem>,
	) -> Result<String, ParseError> {
		let parent = element_name(start);
		let mut text = String::new();
		loop {
			match self.next()? {
				Event::Text(t) => text.push_str(&self.unescape(&t)?),
				Event::CData(data) => text.push_str(&String::from_utf8_lossy(&data)),
				Event::Empty(child) if child.name().as_ref() == b"byte" => {
					if let Some(c) = self.byte_value(&child, problem)? {
						text.push(c);
					}
				}
				Event::Empty(child) => {
					let kind = ParseErrorKind::UnexpectedElement {
						element: element_name(&child),
						parent: parent.clone(),
					};
					self.flag(problem, self.position(), kind)?;
				}
				Event::Start(child) => {
					let kind = ParseErrorKind::UnexpectedElement {
						element: element_name(&child),
						parent: parent.clone(),
					};
					self.flag(problem, self.position(), kind)?;
					self.skip(&child)?;
				}
				Event::End(_) => return Ok(text),
				Event::Eof => return Err(self.error(ParseErrorKind::UnexpectedEof)),
				_ => {}
			}
		}
	}

	/// Read `<translation>`: direct text, `<numerusform>`s or `<lengthvariant>`s.
	///
	/// Returns the translation and any length variants after the first.
	fn read_translation(
		&mut self,
		start: &BytesStart<'a>,
		numerus: bool,
		problem: &mut Option<Problem>,
	) -> Result<(Translation, Vec<String>), ParseError> {
		let mut direct = String::new();
		let mut forms = Vec::new();
		let mut variants = Vec::new();

		loop {
			match self.next()? {
				Event::Text(t) => direct.push_str(&self.unescape(&t)?),
				Event::CData(data) => direct.push_str(&String::from_utf8_lossy(&data)),
				Event::Start(child) => match element_name(&child).as_str() {
					"numerusform" => {
						if !numerus {
							self.unexpected_in_translation("numerusform", problem)?;
						}
						let mut form_variants = self.read_variants(&child, problem)?;
						forms.push(if form_variants.is_empty() {
							String::new()
						} else {
							form_variants.swap_remove(0)
						});
					}
					"lengthvariant" => variants.push(self.read_text(&child, problem)?),
					element if is_vocabulary(element) => {
						self.unexpected_in_translation(element, problem)?;
						self.skip(&child)?;
					}
					_ => self.skip(&child)?,
				},
				Event::Empty(child) => match element_name(&child).as_str() {
					"byte" => {
						if let Some(c) = self.byte_value(&child, problem)? {
							direct.push(c);
						}
					}
					"numerusform" => {
						if !numerus {
							self.unexpected_in_translation("numerusform", problem)?;
						}
						forms.push(String::new());
					}
					"lengthvariant" => variants.push(String::new()),
					element if is_vocabulary(element) => {
						self.unexpected_in_translation(element, problem)?
					}
					_ => {}
				},
				Event::End(_) => break,
				Event::Eof => return Err(self.error(ParseErrorKind::UnexpectedEof)),
				_ => {}
			}
		}

		if numerus {
			if forms.is_empty() && !direct.trim().is_empty() {
				forms.push(direct);
			}
			return Ok((Translation::Numerus(forms), Vec::new()));
		}

		if variants.is_empty() {
			Ok((Translation::Text(direct), Vec::new()))
		} else {
			let first = variants.remove(0);
			Ok((Translation::Text(first), variants))
		}
	}

	/// Read a `<numerusform>`, which may itself hold length variants.
	fn read_variants(
		&mut self,
		start: &BytesStart<'a>,
		problem: &mut Option<Problem>,
	) -> Result<Vec<String>, ParseError> {
		let mut direct = String::new();
		let mut variants = Vec::new();
		loop {
			match self.next()? {
				Event::Text(t) => direct.push_str(&self.unescape(&t)?),
				Event::CData(data) => direct.push_str(&String::from_utf8_lossy(&data)),
				Event::Start(child) if child.name().as_ref() == b"lengthvariant" => {
					variants.push(self.read_text(&child, problem)?);
				}
				Event::Empty(child) if child.name().as_ref() == b"byte" => {
					if let Some(c) = self.byte_value(&child, problem)? {
						direct.push(c);
					}
				}
				Event::Start(child) => {
					let kind = ParseErrorKind::UnexpectedElement {
						element: element_name(&child),
						parent: element_name(start),
					};
					self.flag(problem, self.position(), kind)?;
					self.skip(&child)?;
				}
				Event::Empty(child) => {
					let kind = ParseErrorKind::UnexpectedElement {
						element: element_name(&child),
						parent: element_name(start),
					};
					self.flag(problem, self.position(), kind)?;
				}
				Event::End(_) => break,
				Event::Eof => return Err(self.error(ParseErrorKind::UnexpectedEof)),
				_ => {}
			}
		}

		if variants.is_empty() {
			variants.push(direct);
		}
		Ok(variants)
	}

	fn unexpected_in_translation(
		&self,
		element: &str,
		problem: &mut Option<Problem>,
	) -> Result<(), ParseError> {
		let kind = ParseErrorKind::UnexpectedElement {
			element: element.to_string(),
			parent: "translation".to_string(),
		};
		self.flag(problem, self.position(), kind)
	}

	fn unescape(&self, text: &BytesText<'a>) -> Result<String, ParseError> {
		text
			.unescape()
			.map(|s| s.into_owned())
			.map_err(|e| self.xml_error(e))
	}

	/// Decode `<byte value="x1b"/>` (hex with `x` prefix, or decimal).
	fn byte_value(
		&self,
		start: &BytesStart<'a>,
		problem: &mut Option<Problem>,
	) -> Result<Option<char>, ParseError> {
		let raw = self.attribute(start, "value")?.unwrap_or_default();
		let code = match raw.strip_prefix('x').or_else(|| raw.strip_prefix('X')) {
			Some(hex) => u32::from_str_radix(hex, 16).ok(),
			None => raw.parse::<u32>().ok(),
		};
		match code.and_then(char::from_u32) {
			Some(c) => Ok(Some(c)),
			None => {
				let kind = ParseErrorKind::InvalidAttribute {
					element: "byte".to_string(),
					attribute: "value".to_string(),
					value: raw,
				};
				self.flag(problem, self.position(), kind)?;
				Ok(None)
			}
		}
	}
}

fn element_name(start: &BytesStart<'_>) -> String {
	String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

fn missing_context_name() -> ParseErrorKind {
	ParseErrorKind::MissingElement {
		element: "name".to_string(),
		parent: "context".to_string(),
	}
}

fn is_vocabulary(name: &str) -> bool {
	VOCABULARY.contains(&name)
}

fn is_blank(text: &BytesText<'_>) -> bool {
	text.iter().all(u8::is_ascii_whitespace)
}

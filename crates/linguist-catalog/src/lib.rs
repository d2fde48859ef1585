// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Qt Linguist translation catalogs.
//!
//! This crate loads `.ts` catalogs into an immutable [`Catalog`] and answers
//! exact-match lookups on the `(context, source text, disambiguation)` key.
//! A miss is reported as [`LookupMiss`] and an untranslated entry as the
//! empty string; showing the source text instead is left to the caller, or
//! to [`Catalog::translate`].
//!
//! # Example
//!
//! ```
//! use linguist_catalog::{Catalog, LoadOptions, LookupMiss};
//!
//! let catalog = Catalog::load_str(
//!     r#"<TS version="2.1" language="cs">
//!         <context>
//!             <name>QPushButton</name>
//!             <message>
//!                 <source>Open</source>
//!                 <comment>Dialog Button</comment>
//!                 <translation>Otevřít</translation>
//!             </message>
//!         </context>
//!     </TS>"#,
//!     &LoadOptions::default(),
//! )?;
//!
//! assert_eq!(catalog.lookup("QPushButton", "Open", Some("Dialog Button")), Ok("Otevřít"));
//! assert_eq!(catalog.lookup("QPushButton", "Open", None), Err(LookupMiss));
//! assert_eq!(catalog.translate("QPushButton", "Save", None), "Save");
//! # Ok::<(), linguist_catalog::CatalogError>(())
//! ```

mod catalog;
mod error;
pub mod lint;
mod locale;
mod model;
pub mod numerus;
mod parser;
pub mod placeholder;
mod resolve;
pub mod stats;

pub use catalog::Catalog;
pub use error::{CatalogError, LookupMiss, ParseError, ParseErrorKind, Position, Result};
pub use locale::{CatalogDir, CatalogFile};
pub use model::{
	CatalogHeader, Location, MessageEntry, MessageKey, Translation, TranslationState,
	TranslationType,
};
pub use numerus::NumerusRule;
pub use parser::{Diagnostic, DiagnosticKind, LoadOptions, Strictness};
pub use resolve::{match_locale, resolve_locale, system_locale};
pub use stats::CatalogStats;

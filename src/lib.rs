//! # noet-lint
//!
//! A Rust library for validating a vault of typed, cross-linked markdown notes.
//!
//! ## Overview
//!
//! Each note in a vault declares a type and structured metadata in a `---` fenced frontmatter
//! block, lives in a type-specific folder under a type-specific filename, carries hierarchical
//! tags, and links to other notes with `[[wiki-links]]`. noet-lint checks all of that and
//! reports what it finds. It never decides what to do about it: callers choose whether a finding
//! blocks, warns or is ignored.
//!
//! ### Key Features
//!
//! - **Tolerant frontmatter parsing**: the YAML subset written by note-taking tools (scalars,
//!   quoted strings, inline, flow and block sequences) without a YAML parser
//! - **Type schemas**: required fields, enumerated values, calendar-checked dates, filename
//!   prefixes and folder locations per note type
//! - **Tag taxonomy**: namespaced tags against a closed vocabulary, with open-ended namespaces and
//!   per-type coverage requirements
//! - **Link resolution**: wiki-links resolved against every note stem, tolerating type prefixes
//!   and `#heading` / `^block` suffixes
//! - **Replaceable rules**: built-in schema and taxonomy, or your own as TOML
//!
//! ## Architecture
//!
//! - **[`codec`]**: Frontmatter extraction, field parsing and the [`Finding`](codec::Finding) types
//! - **[`schema`]**: [`SchemaRegistry`](schema::SchemaRegistry) and the schema checker
//! - **[`taxonomy`]**: [`TagTaxonomy`](taxonomy::TagTaxonomy) and the tag checker
//! - **[`links`]**: Wiki-link extraction and the [`ReferenceResolver`](links::ReferenceResolver)
//! - **[`validate`]**: The [`Validator`](validate::Validator) sequencing all of the above
//! - **[`vault`]**: Walking a vault on disk, building the identifier set, reading notes
//! - **[`config`]**: `noet-lint.toml` settings
//!
//! ## Quick Start
//!
//! ### Validating a single note
//!
//! ```rust
//! use noet_lint::{
//!     codec::FindingKind,
//!     links::IdentifierSet,
//!     validate::{NoteInput, Validator},
//! };
//!
//! let text = "---\ntype: Meeting\ntitle: Kickoff\ndate: 2024-02-30\nattendees: []\n---\nSee [[Apollo]]\n";
//! let note = NoteInput::new("Meetings/Meeting - 2024-03-01 Kickoff.md", text);
//! let identifiers: IdentifierSet = ["Project - Apollo"].into_iter().collect();
//!
//! let report = Validator::default().validate(&note, Some(&identifiers));
//! assert_eq!(report.of_kind(FindingKind::InvalidDate).count(), 1);
//! assert_eq!(report.of_kind(FindingKind::BrokenLink).count(), 0);
//! ```
//!
//! ### Validating a vault
//!
//! ```rust,no_run
//! use noet_lint::{config::LintConfig, validate::Validator, vault::Vault};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), noet_lint::LintError> {
//! let vault = Vault::discover(Path::new("."), LintConfig::default())?;
//! let validator = Validator::from_config(vault.config(), vault.root())?;
//! for report in validator.validate_vault(&vault)? {
//!     if !report.is_clean() {
//!         print!("{report}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Findings, not errors
//!
//! Content problems (an unclosed header, a missing field, an unknown tag, a broken link) are
//! [`Finding`](codec::Finding)s with a [`Severity`](codec::Severity). Validation of a note always
//! completes. [`LintError`] is reserved for the surroundings: unreadable files, unwalkable
//! directories, malformed configuration.
//!
//! ### Resolution order
//!
//! A link target is tried as written, then with a known type prefix stripped, then (only if it
//! had no prefix) with each prefix added, then cut at `#`, then cut at `^`. Suffixes are cut from
//! the target as written, so `[[Apollo#Scope]]` does not reach `Project - Apollo`.

pub mod codec;
pub mod config;
pub mod error;
pub mod links;
pub mod paths;
pub mod schema;
pub mod taxonomy;
pub mod validate;
pub mod vault;

pub use error::*;

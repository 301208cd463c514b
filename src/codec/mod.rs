//! Reading notes: frontmatter extraction, field parsing and the finding types every checker
//! reports through.
//!
//! ## Key Components
//!
//! - [`extract_header`] - Splits a note into its `---` fenced frontmatter block and body
//! - [`parse_fields`] - Turns the frontmatter block into a [`FieldMap`] without a YAML parser
//! - [`Finding`] / [`NoteReport`] - Classified, ordered validation results
//!
//! ```rust
//! use noet_lint::codec::{extract_header, parse_fields, FieldValue};
//!
//! let note = "---\ntype: Task\ntags: [area/engineering, \"wip\"]\n---\n# Body\n";
//! let extract = extract_header(note);
//! let fields = parse_fields(extract.header);
//! assert_eq!(
//!     fields["tags"],
//!     FieldValue::List(vec!["area/engineering".to_string(), "wip".to_string()])
//! );
//! ```

pub mod diagnostic;
pub mod fields;
pub mod frontmatter;

pub use diagnostic::{Finding, FindingKind, NoteReport, Severity};
pub use fields::{is_null_sentinel, note_type, parse_fields, FieldMap, FieldValue};
pub use frontmatter::{extract_header, HeaderExtract, HeaderStatus};

//! Note type schemas and the checker that enforces them.
//!
//! A [`SchemaRegistry`] maps each note type to its required fields, enumerated values, date
//! fields and filename convention. [`SchemaChecker`] applies it to a parsed
//! [`FieldMap`](crate::codec::FieldMap) and the note's vault-relative path.

pub mod check;
pub mod registry;

pub use check::{is_calendar_date, SchemaChecker};
pub use registry::{DatePlacement, EnumRule, FilenameRule, Location, SchemaRegistry, TypeSchema};

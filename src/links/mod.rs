//! Wiki-link extraction and resolution against the vault's note stems.

pub mod extract;
pub mod resolve;

pub use extract::{body_references, header_references, note_references, RefSite, Reference};
pub use resolve::{IdentifierSet, ReferenceResolver};

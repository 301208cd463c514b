//! Hierarchical tag taxonomy and the tag checker.

pub mod check;
pub mod registry;

pub use check::{note_tags, TagChecker};
pub use registry::{Coverage, Namespace, NamespacePolicy, TagTaxonomy, MAX_TAG_DEPTH};

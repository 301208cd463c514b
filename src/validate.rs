//! Runs every checker over a note and assembles the [`NoteReport`].

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{
    codec::{
        diagnostic::{Finding, FindingKind, NoteReport},
        fields::{note_type, parse_fields},
        frontmatter::{extract_header, HeaderStatus},
    },
    config::LintConfig,
    error::LintError,
    links::{note_references, IdentifierSet, ReferenceResolver},
    schema::{SchemaChecker, SchemaRegistry},
    taxonomy::{note_tags, TagChecker, TagTaxonomy},
    vault::Vault,
};

/// Which checkers run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Checks {
    /// Type presence, required fields, enumerated values and dates.
    pub schema: bool,
    /// Filename prefix, filename dates, location and underscores.
    pub filename: bool,
    pub tags: bool,
    /// Wiki-link resolution. Only runs when an identifier set is supplied.
    pub links: bool,
}

impl Default for Checks {
    fn default() -> Self {
        Checks {
            schema: true,
            filename: true,
            tags: true,
            links: true,
        }
    }
}

/// A note to validate: its vault-relative path and current text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteInput<'a> {
    pub path: &'a str,
    pub text: &'a str,
}

impl<'a> NoteInput<'a> {
    pub fn new(path: &'a str, text: &'a str) -> Self {
        NoteInput { path, text }
    }
}

/// Validates notes against a schema registry and tag taxonomy.
///
/// The registries are immutable for the validator's lifetime, so one validator can be shared
/// across threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validator {
    schema: SchemaRegistry,
    taxonomy: TagTaxonomy,
    checks: Checks,
}

impl Validator {
    pub fn new(schema: SchemaRegistry, taxonomy: TagTaxonomy) -> Self {
        Validator {
            schema,
            taxonomy,
            checks: Checks::default(),
        }
    }

    /// Build a validator from `config`, loading registry files relative to `base`.
    pub fn from_config(config: &LintConfig, base: &Path) -> Result<Self, LintError> {
        Ok(Validator::new(config.schema_registry(base)?, config.tag_taxonomy(base)?)
            .with_checks(config.checks))
    }

    pub fn with_checks(mut self, checks: Checks) -> Self {
        self.checks = checks;
        self
    }

    pub fn checks(&self) -> Checks {
        self.checks
    }

    pub fn schema(&self) -> &SchemaRegistry {
        &self.schema
    }

    pub fn taxonomy(&self) -> &TagTaxonomy {
        &self.taxonomy
    }

    /// Validate one note.
    ///
    /// Notes without a frontmatter block produce an empty report. Links are only checked when
    /// `identifiers` is supplied. Findings are ordered: structure, schema, tags, then header
    /// links followed by body links.
    #[tracing::instrument(skip_all, fields(path = note.path))]
    pub fn validate(&self, note: &NoteInput<'_>, identifiers: Option<&IdentifierSet>) -> NoteReport {
        let mut report = NoteReport::new(note.path);
        let extract = extract_header(note.text);
        if !extract.found() {
            tracing::debug!("no frontmatter, skipping");
            return report;
        }
        report.has_header = true;

        if extract.status == HeaderStatus::Unclosed {
            report.findings.push(
                Finding::error(
                    FindingKind::UnclosedHeader,
                    "Frontmatter is not closed with '---'",
                )
                .with_line(1),
            );
        }

        let fields = parse_fields(extract.header);
        let type_name = note_type(&fields);
        tracing::trace!("parsed {} fields, type '{type_name}'", fields.len());

        if self.checks.schema || self.checks.filename {
            let checker = SchemaChecker::new(&self.schema)
                .with_field_rules(self.checks.schema)
                .with_filename_rules(self.checks.filename);
            report.findings.extend(checker.check(&fields, note.path));
        }

        if self.checks.tags {
            let tags = note_tags(&fields);
            report
                .findings
                .extend(TagChecker::new(&self.taxonomy).check(&tags, type_name));
        }

        if self.checks.links {
            if let Some(identifiers) = identifiers {
                let refs = note_references(&extract);
                let resolver = ReferenceResolver::new(identifiers, &self.schema.link_prefixes);
                report.findings.extend(resolver.check(&refs));
            }
        }

        tracing::debug!("{} findings", report.findings.len());
        report
    }

    /// Validate every note in `vault`, in path order.
    ///
    /// The identifier set is built once and shared by every note. Files that cannot be read are
    /// logged and skipped; only failure to enumerate the vault is an error.
    #[tracing::instrument(skip_all, fields(root = ?vault.root()))]
    pub fn validate_vault(&self, vault: &Vault) -> Result<Vec<NoteReport>, LintError> {
        let paths = vault.note_paths()?;
        let identifiers = if self.checks.links {
            Some(vault.identifiers_from(&paths))
        } else {
            None
        };
        tracing::info!("validating {} notes", paths.len());

        let mut reports = Vec::with_capacity(paths.len());
        for path in &paths {
            let note = match vault.read(path) {
                Ok(note) => note,
                Err(e) => {
                    tracing::warn!("skipping {path:?}: {e}");
                    continue;
                }
            };
            reports.push(self.validate(&note.as_input(), identifiers.as_ref()));
        }
        Ok(reports)
    }
}

//! Finding types produced while validating a note.
//!
//! Every checker in this crate reports through [`Finding`]. A finding never aborts validation:
//! callers receive the complete, ordered list in a [`NoteReport`] and decide for themselves
//! whether to block, warn or ignore.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How strongly a finding should be surfaced.
///
/// Ordered from least to most severe so `severity >= Severity::Warning` reads naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational note, e.g. a new value in an open-ended tag namespace.
    Info,
    /// A recommendation the note does not have to follow.
    Suggestion,
    /// A likely mistake that is not a hard convention violation (prefix typos, broken links).
    Warning,
    /// A hard violation of the vault schema or taxonomy.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Info => "info",
            Severity::Suggestion => "suggestion",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(label)
    }
}

/// Machine-readable classification of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    // Structural
    UnclosedHeader,

    // Schema
    MissingType,
    MissingField,
    EmptyField,
    InvalidValue,
    InvalidDate,

    // Filename and location conventions
    MissingPrefix,
    PrefixTypo,
    TitleCase,
    MissingFilenameDate,
    InvalidFilenameDate,
    DailyFilename,
    DailyYearMismatch,
    WrongLocation,
    Underscore,

    // Tag taxonomy
    TagMarker,
    TagCase,
    FlatTag,
    MalformedTag,
    TagDepth,
    UnknownNamespace,
    UnknownTagValue,
    OpenNamespaceValue,
    MissingTagCoverage,
    RecommendedTagCoverage,

    // References
    BrokenLink,
}

/// One validation issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub severity: Severity,
    pub message: String,
    /// 1-based line in the note text, when the issue has a precise location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Finding {
    pub fn new(kind: FindingKind, severity: Severity, message: impl Into<String>) -> Self {
        Finding {
            kind,
            severity,
            message: message.into(),
            line: None,
        }
    }

    pub fn error(kind: FindingKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Error, message)
    }

    pub fn warning(kind: FindingKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Warning, message)
    }

    pub fn suggestion(kind: FindingKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Suggestion, message)
    }

    pub fn info(kind: FindingKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Info, message)
    }

    /// Add location information to this finding
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{} (line {line}): {}", self.severity, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

/// The ordered findings for a single note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteReport {
    /// Vault-relative path of the note.
    pub path: String,
    /// Whether the note starts with a frontmatter fence. Notes without one are not validated.
    pub has_header: bool,
    pub findings: Vec<Finding>,
}

impl NoteReport {
    pub fn new(path: impl Into<String>) -> Self {
        NoteReport {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(Finding::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_error())
    }

    /// Findings at or above `min` severity.
    pub fn at_least(&self, min: Severity) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.severity >= min)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }

    pub fn of_kind(&self, kind: FindingKind) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.kind == kind)
    }
}

impl fmt::Display for NoteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.path)?;
        for finding in &self.findings {
            writeln!(f, "   - {finding}")?;
        }
        Ok(())
    }
}

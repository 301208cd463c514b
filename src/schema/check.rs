use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    codec::{
        diagnostic::{Finding, FindingKind},
        fields::{is_null_sentinel, note_type, FieldMap},
    },
    paths::NotePath,
    schema::registry::{DatePlacement, FilenameRule, Location, SchemaRegistry, TypeSchema},
};

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("static date pattern is valid"));

static LEADING_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("static date pattern is valid"));

static FOLDER_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{4})").expect("static year pattern is valid"));

/// Whether `value` is exactly `YYYY-MM-DD` and names a real calendar day.
pub fn is_calendar_date(value: &str) -> bool {
    // chrono alone accepts unpadded fields such as `2024-1-01`.
    ISO_DATE.is_match(value) && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// Validates a note's fields and path against a [`SchemaRegistry`].
///
/// Field rules (type presence, required fields, enumerations, dates) and filename rules (prefix,
/// dates in the name, location, underscores) can be toggled independently; both are on by
/// default.
#[derive(Debug, Clone, Copy)]
pub struct SchemaChecker<'r> {
    registry: &'r SchemaRegistry,
    field_rules: bool,
    filename_rules: bool,
}

impl<'r> SchemaChecker<'r> {
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        SchemaChecker {
            registry,
            field_rules: true,
            filename_rules: true,
        }
    }

    pub fn with_field_rules(mut self, enabled: bool) -> Self {
        self.field_rules = enabled;
        self
    }

    pub fn with_filename_rules(mut self, enabled: bool) -> Self {
        self.filename_rules = enabled;
        self
    }

    /// Check `fields` parsed from the note at vault-relative `path`.
    ///
    /// A missing type yields a single finding. Unknown types are not validated.
    pub fn check(&self, fields: &FieldMap, path: &str) -> Vec<Finding> {
        let mut findings = Vec::new();
        let type_name = note_type(fields);
        if type_name.is_empty() {
            if self.field_rules {
                findings.push(Finding::error(
                    FindingKind::MissingType,
                    "Missing required field: type",
                ));
            }
            return findings;
        }
        let Some(schema) = self.registry.get(type_name) else {
            tracing::debug!("no schema registered for type {type_name}, skipping");
            return findings;
        };

        if self.field_rules {
            self.check_required(schema, fields, &mut findings);
            self.check_enums(type_name, fields, &mut findings);
            self.check_dates(fields, &mut findings);
        }
        if self.filename_rules {
            self.check_filename(schema, NotePath::new(path), &mut findings);
        }
        findings
    }

    fn check_required(&self, schema: &TypeSchema, fields: &FieldMap, findings: &mut Vec<Finding>) {
        for field in &schema.required {
            match fields.get(field) {
                None => findings.push(Finding::error(
                    FindingKind::MissingField,
                    format!("Missing required field for {}: {field}", schema.name),
                )),
                Some(value) if value.is_null() && !self.registry.allows_empty(field) => {
                    findings.push(Finding::error(
                        FindingKind::EmptyField,
                        format!("Empty value for required field: {field}"),
                    ))
                }
                Some(_) => {}
            }
        }
    }

    fn check_enums(&self, type_name: &str, fields: &FieldMap, findings: &mut Vec<Finding>) {
        for rule in &self.registry.enums {
            let Some(value) = fields.get(&rule.field) else {
                continue;
            };
            let Some(allowed) = rule.allowed_for(type_name) else {
                continue;
            };
            let scoped = rule.by_type.contains_key(type_name);
            for item in value.values() {
                if is_null_sentinel(item) || allowed.iter().any(|a| a == item) {
                    continue;
                }
                let message = if scoped {
                    format!(
                        "Invalid {} value '{item}' for {type_name}. Valid: {}",
                        rule.field,
                        allowed.join(", ")
                    )
                } else {
                    format!(
                        "Invalid {} value '{item}'. Valid: {}",
                        rule.field,
                        allowed.join(", ")
                    )
                };
                findings.push(Finding::error(FindingKind::InvalidValue, message));
            }
        }
    }

    fn check_dates(&self, fields: &FieldMap, findings: &mut Vec<Finding>) {
        for (field, value) in fields {
            if !self.registry.is_date_field(field) {
                continue;
            }
            for item in value.values() {
                if is_null_sentinel(item) || is_calendar_date(item.trim()) {
                    continue;
                }
                findings.push(Finding::error(
                    FindingKind::InvalidDate,
                    format!("Invalid date format for '{field}': '{item}' (expected YYYY-MM-DD)"),
                ));
            }
        }
    }

    fn check_filename(&self, schema: &TypeSchema, path: NotePath<'_>, findings: &mut Vec<Finding>) {
        let rule = &schema.filename;
        let stem = path.stem();
        let start = findings.len();

        // Text after a matched prefix, trimmed. `None` when the stem lacks the prefix.
        let title = match rule.prefix_stem() {
            Some(prefix) => match stem.strip_prefix(prefix) {
                Some(rest) => Some(rest.trim()),
                None => {
                    findings.push(prefix_finding(rule, prefix, stem));
                    None
                }
            },
            None => Some(stem),
        };

        match rule.date {
            DatePlacement::None => {}
            DatePlacement::AfterPrefix => {
                if let (Some(title), Some(prefix)) = (title, rule.prefix_stem()) {
                    check_leading_date(prefix, title, findings);
                }
            }
            DatePlacement::WholeStem => check_date_stem(path, findings),
        }

        if let Location::Folder(folder) = &rule.location {
            if !path.in_folder(folder) {
                findings.push(Finding::error(
                    FindingKind::WrongLocation,
                    format!("Wrong location: should be in {folder}"),
                ));
            }
        }

        if !rule.is_date_named() && stem.contains('_') {
            findings.push(Finding::error(
                FindingKind::Underscore,
                "Use spaces instead of underscores in filenames",
            ));
        }

        if rule.prefix_stem().is_some() {
            if let Some(first) = title.and_then(|t| t.chars().next()) {
                if first.is_lowercase() {
                    findings.push(Finding::error(
                        FindingKind::TitleCase,
                        "Title should start with uppercase",
                    ));
                }
            }
        }

        if !rule.pattern.is_empty() {
            for finding in &mut findings[start..] {
                finding
                    .message
                    .push_str(&format!(" (expected pattern: {})", rule.pattern));
            }
        }
    }
}

fn prefix_finding(rule: &FilenameRule, prefix: &str, stem: &str) -> Finding {
    let typo = rule
        .typos
        .iter()
        .map(|t| t.trim_end())
        .find(|t| !t.is_empty() && stem.starts_with(t));
    match typo {
        Some(typo) => Finding::warning(
            FindingKind::PrefixTypo,
            format!("Typo in prefix: '{typo}' should be '{prefix}'"),
        ),
        None => Finding::error(
            FindingKind::MissingPrefix,
            format!("Missing prefix: filename should start with '{prefix}'"),
        ),
    }
}

fn check_leading_date(prefix: &str, title: &str, findings: &mut Vec<Finding>) {
    if !LEADING_DATE.is_match(title) {
        findings.push(Finding::error(
            FindingKind::MissingFilenameDate,
            format!("Filename should include a date: '{prefix} YYYY-MM-DD Title'"),
        ));
        return;
    }
    let date = title.get(..10).unwrap_or(title);
    if !is_calendar_date(date) {
        findings.push(Finding::error(
            FindingKind::InvalidFilenameDate,
            format!("Invalid date in filename: '{date}'"),
        ));
    }
}

fn check_date_stem(path: NotePath<'_>, findings: &mut Vec<Finding>) {
    let stem = path.stem();
    if !is_calendar_date(stem) {
        findings.push(Finding::error(
            FindingKind::DailyFilename,
            format!("Daily note filename should be YYYY-MM-DD.md, got '{stem}'"),
        ));
        return;
    }
    if let Some(caps) = FOLDER_YEAR.captures(path.folder()) {
        let folder_year = &caps[1];
        let file_year = stem.get(..4).unwrap_or(stem);
        if folder_year != file_year {
            findings.push(Finding::error(
                FindingKind::DailyYearMismatch,
                format!("Daily note year mismatch: file is {file_year} but in {folder_year}/ folder"),
            ));
        }
    }
}

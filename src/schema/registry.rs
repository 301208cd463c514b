//! Per-type schema rules: required fields, enumerated values, date fields and filename
//! conventions.
//!
//! The registry is plain data. [`SchemaRegistry::builtin`] carries the vault conventions this
//! crate ships with; a vault can replace them wholesale with a TOML file loaded through
//! [`SchemaRegistry::from_toml`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::LintError;

/// Location marker for notes that live at the vault root (or anywhere).
pub const ROOT_LOCATION: &str = "root";

/// Where notes of a type must live.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Location {
    /// No folder constraint.
    #[default]
    Root,
    /// The note's folder must equal or lie beneath this vault-relative folder.
    Folder(String),
}

impl From<String> for Location {
    fn from(value: String) -> Self {
        Location::from(value.as_str())
    }
}

impl From<&str> for Location {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == ROOT_LOCATION {
            Location::Root
        } else {
            Location::Folder(trimmed.to_string())
        }
    }
}

impl From<Location> for String {
    fn from(value: Location) -> Self {
        match value {
            Location::Root => ROOT_LOCATION.to_string(),
            Location::Folder(folder) => folder,
        }
    }
}

/// Where a date must appear in a type's filename.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePlacement {
    #[default]
    None,
    /// `Meeting - 2024-03-01 Kickoff`
    AfterPrefix,
    /// `2024-03-01`
    WholeStem,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilenameRule {
    /// Required stem prefix, e.g. `"Project - "`. Compared with trailing whitespace trimmed.
    #[serde(default)]
    pub prefix: Option<String>,
    /// Known misspellings of the prefix, reported as typos rather than missing prefixes.
    #[serde(default)]
    pub typos: Vec<String>,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub date: DatePlacement,
    /// Human readable pattern shown alongside filename findings.
    #[serde(default)]
    pub pattern: String,
}

impl FilenameRule {
    /// The prefix as compared against stems: trailing whitespace removed.
    pub fn prefix_stem(&self) -> Option<&str> {
        self.prefix
            .as_deref()
            .map(str::trim_end)
            .filter(|p| !p.is_empty())
    }

    /// Stems whose canonical form is a date tolerate underscores.
    pub fn is_date_named(&self) -> bool {
        self.date == DatePlacement::WholeStem
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSchema {
    pub name: String,
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub filename: FilenameRule,
}

/// Allowed values for one field, globally and per note type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumRule {
    pub field: String,
    /// Values allowed for every type without an override. Empty means unconstrained.
    #[serde(default)]
    pub values: Vec<String>,
    /// Type-scoped overrides.
    #[serde(default)]
    pub by_type: BTreeMap<String, Vec<String>>,
}

impl EnumRule {
    /// The allowed set for `note_type`, if the field is constrained for it.
    pub fn allowed_for(&self, note_type: &str) -> Option<&[String]> {
        match self.by_type.get(note_type) {
            Some(values) => Some(values.as_slice()),
            None if !self.values.is_empty() => Some(self.values.as_slice()),
            None => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRegistry {
    pub types: Vec<TypeSchema>,
    #[serde(default)]
    pub enums: Vec<EnumRule>,
    /// Fields holding `YYYY-MM-DD` dates.
    #[serde(default)]
    pub date_fields: Vec<String>,
    /// Required fields that may legitimately be empty (relations, optional links).
    #[serde(default)]
    pub allow_empty: Vec<String>,
    /// Filename prefixes tried when resolving wiki-links.
    #[serde(default)]
    pub link_prefixes: Vec<String>,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        SchemaRegistry::builtin()
    }
}

impl SchemaRegistry {
    /// Parse a schema registry from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, LintError> {
        Ok(toml::from_str(content)?)
    }

    pub fn get(&self, note_type: &str) -> Option<&TypeSchema> {
        self.types.iter().find(|t| t.name == note_type)
    }

    pub fn is_date_field(&self, field: &str) -> bool {
        self.date_fields.iter().any(|f| f == field)
    }

    pub fn allows_empty(&self, field: &str) -> bool {
        self.allow_empty.iter().any(|f| f == field)
    }

    /// The vault conventions shipped with this crate.
    pub fn builtin() -> Self {
        let mut types = Vec::with_capacity(BUILTIN_TYPES.len());
        for (name, required, prefix, location, date) in BUILTIN_TYPES {
            types.push(TypeSchema {
                name: name.to_string(),
                required: required.iter().map(|s| s.to_string()).collect(),
                filename: FilenameRule {
                    prefix: prefix.map(str::to_string),
                    typos: builtin_typos(name),
                    location: Location::from(*location),
                    date: *date,
                    pattern: builtin_pattern(name, *prefix, *date),
                },
            });
        }

        let mut enums = Vec::with_capacity(BUILTIN_ENUMS.len() + 1);
        enums.push(EnumRule {
            field: "status".to_string(),
            values: vec![],
            by_type: BUILTIN_STATUS
                .iter()
                .map(|(t, values)| (t.to_string(), strings(values)))
                .collect(),
        });
        for (field, values) in BUILTIN_ENUMS {
            enums.push(EnumRule {
                field: field.to_string(),
                values: strings(values),
                by_type: BTreeMap::new(),
            });
        }

        SchemaRegistry {
            types,
            enums,
            date_fields: strings(BUILTIN_DATE_FIELDS),
            allow_empty: strings(BUILTIN_ALLOW_EMPTY),
            link_prefixes: strings(BUILTIN_LINK_PREFIXES),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn builtin_typos(name: &str) -> Vec<String> {
    match name {
        "CodeSnippet" => vec!["CodeSnipet - ".to_string()],
        "Organisation" => vec!["Organization - ".to_string()],
        _ => vec![],
    }
}

fn builtin_pattern(name: &str, prefix: Option<&str>, date: DatePlacement) -> String {
    let placeholder = match name {
        "Project" | "Workstream" | "Forum" | "System" | "Organisation" | "DataAsset"
        | "Location" | "Department" | "Query" => "{{Name}}",
        "MOC" | "Dashboard" => "{{Scope}}",
        "ArchModel" => "{{ViewName}}",
        "Trip" => "{{Destination}}",
        "Email" => "{{From}} - {{Subject}}",
        "FormSubmission" => "{{Type}} for {{Project}}",
        "Person" => "{{Name}}",
        _ => "{{Title}}",
    };
    match (prefix, date) {
        (_, DatePlacement::WholeStem) => "YYYY-MM-DD.md".to_string(),
        (Some(prefix), DatePlacement::AfterPrefix) => format!("{prefix}YYYY-MM-DD {placeholder}.md"),
        (Some(prefix), DatePlacement::None) => format!("{prefix}{placeholder}.md"),
        (None, _) => format!("{placeholder}.md"),
    }
}

type BuiltinType = (
    &'static str,
    &'static [&'static str],
    Option<&'static str>,
    &'static str,
    DatePlacement,
);

const BUILTIN_TYPES: &[BuiltinType] = &[
    // Events
    ("Task", &["type", "title", "completed", "priority"], Some("Task - "), "Tasks/", DatePlacement::None),
    ("Project", &["type", "title", "status", "priority"], Some("Project - "), "Projects/", DatePlacement::None),
    ("Meeting", &["type", "title", "date", "attendees"], Some("Meeting - "), "Meetings/", DatePlacement::AfterPrefix),
    ("ADR", &["type", "title", "status", "adrType"], Some("ADR - "), "ADRs/", DatePlacement::None),
    ("Daily", &["type", "title", "date"], None, "Daily/", DatePlacement::WholeStem),
    ("Incubator", &["type", "title", "status", "domain"], Some("Incubator - "), "Incubator/", DatePlacement::None),
    ("FormSubmission", &["type", "title", "formType", "status", "project"], Some("FormSubmission - "), "Forms/", DatePlacement::None),
    ("Email", &["type", "title", "subject", "from", "date"], Some("Email - "), "Emails/", DatePlacement::None),
    ("Trip", &["type", "title", "status"], Some("Trip - "), "Trips/", DatePlacement::None),
    ("Workstream", &["type", "title"], Some("Workstream - "), "Projects/", DatePlacement::None),
    ("Forum", &["type", "title"], Some("Forum - "), "Projects/", DatePlacement::None),
    ("Objective", &["type", "title", "objectiveType", "status"], Some("Objective - "), "Objectives/", DatePlacement::None),
    // Entities
    ("Person", &["type", "title"], None, "People/", DatePlacement::None),
    ("System", &["type", "title"], Some("System - "), ROOT_LOCATION, DatePlacement::None),
    ("Organisation", &["type", "title"], Some("Organisation - "), ROOT_LOCATION, DatePlacement::None),
    ("DataAsset", &["type", "title"], Some("DataAsset - "), ROOT_LOCATION, DatePlacement::None),
    ("Location", &["type", "title"], Some("Location - "), ROOT_LOCATION, DatePlacement::None),
    ("Department", &["type", "title"], Some("Department - "), ROOT_LOCATION, DatePlacement::None),
    // Nodes
    ("Concept", &["type", "title"], Some("Concept - "), ROOT_LOCATION, DatePlacement::None),
    ("Pattern", &["type", "title"], Some("Pattern - "), ROOT_LOCATION, DatePlacement::None),
    ("Reference", &["type", "title", "referenceType"], Some("Reference - "), ROOT_LOCATION, DatePlacement::None),
    ("Research", &["type", "title"], Some("Research - "), ROOT_LOCATION, DatePlacement::None),
    ("Threat", &["type", "title"], Some("Threat - "), ROOT_LOCATION, DatePlacement::None),
    ("Framework", &["type", "title"], Some("Framework - "), ROOT_LOCATION, DatePlacement::None),
    ("Tool", &["type", "title"], Some("Tool - "), ROOT_LOCATION, DatePlacement::None),
    ("Article", &["type", "title"], Some("Article - "), ROOT_LOCATION, DatePlacement::None),
    ("CodeSnippet", &["type", "title"], Some("CodeSnippet - "), ROOT_LOCATION, DatePlacement::None),
    // Navigation
    ("MOC", &["type", "title"], Some("_MOC - "), ROOT_LOCATION, DatePlacement::None),
    ("Dashboard", &["type", "title"], Some("_Dashboard - "), ROOT_LOCATION, DatePlacement::None),
    ("Query", &["type", "title", "queryType"], Some("Query - "), ROOT_LOCATION, DatePlacement::None),
    ("ArchModel", &["type", "title"], Some("ArchModel - "), ROOT_LOCATION, DatePlacement::None),
    // Governance (synced)
    ("Policy", &["type", "title", "source", "status"], Some("Policy - "), "Sync/Policies/", DatePlacement::None),
    ("Guardrail", &["type", "title", "source", "scope", "status"], Some("Guardrail - "), "Sync/Guardrails/", DatePlacement::None),
    // Legacy types, still valid but consolidated into Reference and Concept
    ("Weblink", &["type", "title", "url"], Some("Weblink - "), ROOT_LOCATION, DatePlacement::None),
    ("Book", &["type", "title"], None, ROOT_LOCATION, DatePlacement::None),
    ("YouTube", &["type", "title", "url"], None, ROOT_LOCATION, DatePlacement::None),
    ("Capability", &["type", "title"], None, ROOT_LOCATION, DatePlacement::None),
    ("Theme", &["type", "title"], None, ROOT_LOCATION, DatePlacement::None),
    ("Principle", &["type", "title"], None, ROOT_LOCATION, DatePlacement::None),
];

const BUILTIN_STATUS: &[(&str, &[&str])] = &[
    ("Task", &["active", "completed", "paused"]),
    ("Project", &["active", "paused", "completed"]),
    ("ADR", &["draft", "proposed", "accepted", "deprecated", "superseded"]),
    ("Incubator", &["seed", "exploring", "validated", "accepted", "rejected"]),
    ("FormSubmission", &["draft", "submitted", "pending", "approved", "rejected", "expired"]),
    ("Objective", &["draft", "agreed", "in-progress", "reviewed", "achieved", "partial", "missed"]),
    ("Article", &["idea", "drafting", "review", "published", "archived"]),
    ("System", &["active", "planned", "deprecated", "retired"]),
    ("Policy", &["active", "draft", "deprecated"]),
    ("Guardrail", &["active", "draft", "deprecated"]),
    ("Workstream", &["active", "paused", "completed"]),
    ("Trip", &["idea", "planning", "booked", "completed", "cancelled"]),
];

const BUILTIN_ENUMS: &[(&str, &[&str])] = &[
    ("priority", &["high", "medium", "low"]),
    ("adrType", &["Technology_ADR", "Architecture_ADR", "Integration_ADR", "Security_ADR", "Data_ADR", "AI_ADR"]),
    ("confidence", &["high", "medium", "low"]),
    ("freshness", &["current", "recent", "stale"]),
    ("source", &["primary", "secondary", "synthesis", "external", "local", "confluence"]),
    ("criticality", &["critical", "high", "medium", "low"]),
    ("referenceType", &["weblink", "youtube", "article", "book"]),
    ("conceptType", &["concept", "principle", "capability", "theme"]),
    ("articleType", &["blog-post", "linkedin-post", "talk", "presentation", "video", "podcast", "newsletter"]),
    ("targetAudience", &["internal", "external", "both"]),
    ("objectiveType", &["performance", "development"]),
    ("goalCategory", &["cascaded", "strategic", "personal"]),
    ("readingStatus", &["to-read", "reading", "completed", "abandoned", "reference"]),
    ("threatType", &["attack", "vulnerability", "weakness", "exploit"]),
    ("principleType", &["axiom", "heuristic", "law", "mental-model"]),
    ("frameworkType", &["taxonomy", "model", "matrix", "methodology", "reference-architecture"]),
    ("toolType", &["ide", "library", "framework", "platform", "service", "cli", "extension"]),
    ("formType", &["DPIA", "CyberRisk", "TPRM", "IAF", "ChangeRequest", "Other"]),
    ("queryType", &["table", "list", "task"]),
    ("authority", &["draft", "local", "team", "organizational"]),
    ("transformationType", &["modernisation", "migration", "greenfield", "integration", "decommission", "uplift"]),
    ("transformationScope", &["enterprise", "department", "team", "application"]),
];

const BUILTIN_DATE_FIELDS: &[&str] = &[
    "created",
    "modified",
    "date",
    "reviewed",
    "doDate",
    "dueBy",
    "submittedDate",
    "responseDate",
    "expiryDate",
    "publishedDate",
    "completedDate",
    "effectiveDate",
    "reviewDate",
    "archivedDate",
];

const BUILTIN_ALLOW_EMPTY: &[&str] = &[
    "relatedTo",
    "nodeRelationships",
    "entityRelationships",
    "supersedes",
    "dependsOn",
    "contradicts",
    "project",
    "attendees",
    "domain",
    "parent-ideas",
];

const BUILTIN_LINK_PREFIXES: &[&str] = &[
    // Entities
    "System - ",
    "Organisation - ",
    "DataAsset - ",
    "Location - ",
    "Department - ",
    // Nodes
    "Concept - ",
    "Pattern - ",
    "Capability - ",
    "Theme - ",
    "Weblink - ",
    "Book - ",
    "Research - ",
    "YouTube - ",
    "Threat - ",
    "Principle - ",
    "Framework - ",
    "Tool - ",
    "Article - ",
    "Reference - ",
    "CodeSnippet - ",
    // Events
    "Meeting - ",
    "Project - ",
    "Task - ",
    "ADR - ",
    "Email - ",
    "Trip - ",
    "Daily - ",
    "Incubator - ",
    "Workstream - ",
    "Forum - ",
    "FormSubmission - ",
    "Objective - ",
    // Navigation
    "_MOC - ",
    "_Dashboard - ",
    "Query - ",
    "ArchModel - ",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lookup() {
        let registry = SchemaRegistry::builtin();
        let meeting = registry.get("Meeting").unwrap();
        assert_eq!(meeting.required, vec!["type", "title", "date", "attendees"]);
        assert_eq!(meeting.filename.prefix_stem(), Some("Meeting -"));
        assert_eq!(
            meeting.filename.location,
            Location::Folder("Meetings/".to_string())
        );
        assert_eq!(meeting.filename.pattern, "Meeting - YYYY-MM-DD {{Title}}.md");

        let daily = registry.get("Daily").unwrap();
        assert!(daily.filename.is_date_named());
        assert_eq!(daily.filename.pattern, "YYYY-MM-DD.md");

        let person = registry.get("Person").unwrap();
        assert_eq!(person.filename.prefix_stem(), None);
        assert_eq!(person.filename.pattern, "{{Name}}.md");

        assert!(registry.get("meeting").is_none());
    }

    #[test]
    fn builtin_type_names_are_unique() {
        let registry = SchemaRegistry::builtin();
        let mut names: Vec<&str> = registry.types.iter().map(|t| t.name.as_str()).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn enum_rule_scoping() {
        let registry = SchemaRegistry::builtin();
        let status = registry.enums.iter().find(|e| e.field == "status").unwrap();
        assert_eq!(status.allowed_for("Task").unwrap().len(), 3);
        assert!(status.allowed_for("Person").is_none());

        let priority = registry
            .enums
            .iter()
            .find(|e| e.field == "priority")
            .unwrap();
        assert_eq!(priority.allowed_for("Person").unwrap(), ["high", "medium", "low"]);
    }

    #[test]
    fn location_strings() {
        assert_eq!(Location::from("root"), Location::Root);
        assert_eq!(Location::from(""), Location::Root);
        assert_eq!(
            Location::from("Sync/Policies/"),
            Location::Folder("Sync/Policies/".to_string())
        );
        assert_eq!(String::from(Location::Root), "root");
    }

    #[test]
    fn parse_registry_from_toml() {
        let toml = r#"
date_fields = ["date", "due"]
allow_empty = ["attendees"]
link_prefixes = ["Meeting - "]

[[types]]
name = "Meeting"
required = ["type", "title", "date"]

[types.filename]
prefix = "Meeting - "
location = "Meetings/"
date = "after_prefix"

[[types]]
name = "Note"

[[enums]]
field = "status"

[enums.by_type]
Meeting = ["planned", "held"]
"#;
        let registry = SchemaRegistry::from_toml(toml).unwrap();
        assert_eq!(registry.types.len(), 2);
        let meeting = registry.get("Meeting").unwrap();
        assert_eq!(meeting.filename.date, DatePlacement::AfterPrefix);
        assert_eq!(
            meeting.filename.location,
            Location::Folder("Meetings/".to_string())
        );
        let note = registry.get("Note").unwrap();
        assert!(note.required.is_empty());
        assert_eq!(note.filename.location, Location::Root);
        assert!(registry.is_date_field("due"));
        assert!(registry.allows_empty("attendees"));
        assert_eq!(
            registry.enums[0].allowed_for("Meeting").unwrap(),
            ["planned", "held"]
        );
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(SchemaRegistry::from_toml("types = 3").is_err());
    }
}

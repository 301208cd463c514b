//! The approved tag vocabulary: hierarchical namespaces, flat tags and per-type coverage.

use serde::{Deserialize, Serialize};

use crate::error::LintError;

/// Maximum number of `/`-separated segments in a hierarchical tag.
pub const MAX_TAG_DEPTH: usize = 3;

/// How a namespace treats values missing from its vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamespacePolicy {
    /// Unknown values are errors.
    #[default]
    Closed,
    /// Unknown values are expected to appear over time (projects, people) and are only noted.
    OpenEnded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    pub name: String,
    #[serde(default)]
    pub policy: NamespacePolicy,
    #[serde(default)]
    pub values: Vec<String>,
}

impl Namespace {
    pub fn knows(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// Tag namespaces a note type must or should carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coverage {
    pub note_type: String,
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub recommended: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagTaxonomy {
    pub namespaces: Vec<Namespace>,
    #[serde(default)]
    pub flat_tags: Vec<String>,
    #[serde(default)]
    pub coverage: Vec<Coverage>,
}

impl Default for TagTaxonomy {
    fn default() -> Self {
        TagTaxonomy::builtin()
    }
}

impl TagTaxonomy {
    pub fn from_toml(content: &str) -> Result<Self, LintError> {
        Ok(toml::from_str(content)?)
    }

    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.iter().find(|ns| ns.name == name)
    }

    pub fn namespace_names(&self) -> Vec<&str> {
        self.namespaces.iter().map(|ns| ns.name.as_str()).collect()
    }

    pub fn is_flat_tag(&self, tag: &str) -> bool {
        self.flat_tags.iter().any(|t| t == tag)
    }

    pub fn coverage_for(&self, note_type: &str) -> Option<&Coverage> {
        self.coverage.iter().find(|c| c.note_type == note_type)
    }

    /// The taxonomy shipped with this crate.
    pub fn builtin() -> Self {
        let namespaces = BUILTIN_NAMESPACES
            .iter()
            .map(|(name, policy, values)| Namespace {
                name: name.to_string(),
                policy: *policy,
                values: values.iter().map(|v| v.to_string()).collect(),
            })
            .collect();
        let coverage = BUILTIN_COVERAGE
            .iter()
            .map(|(note_type, required, recommended)| Coverage {
                note_type: note_type.to_string(),
                required: required.iter().map(|v| v.to_string()).collect(),
                recommended: recommended.iter().map(|v| v.to_string()).collect(),
            })
            .collect();
        TagTaxonomy {
            namespaces,
            flat_tags: BUILTIN_FLAT_TAGS.iter().map(|t| t.to_string()).collect(),
            coverage,
        }
    }
}

const BUILTIN_NAMESPACES: &[(&str, NamespacePolicy, &[&str])] = &[
    (
        "domain",
        NamespacePolicy::Closed,
        &[
            "engineering",
            "design",
            "security",
            "architecture",
            "data",
            "operations",
            "product",
            "marketing",
            "people",
        ],
    ),
    (
        "area",
        NamespacePolicy::Closed,
        &["engineering", "design", "marketing", "ops"],
    ),
    (
        "project",
        NamespacePolicy::OpenEnded,
        &["example-app", "docs-site"],
    ),
    (
        "technology",
        NamespacePolicy::OpenEnded,
        &[
            "python",
            "javascript",
            "react",
            "docker",
            "aws",
            "rust",
            "kubernetes",
            "azure",
        ],
    ),
    ("person", NamespacePolicy::OpenEnded, &[]),
    (
        "status",
        NamespacePolicy::Closed,
        &["draft", "review", "published", "active", "archived"],
    ),
    (
        "type",
        NamespacePolicy::Closed,
        &[
            "guide",
            "reference",
            "tutorial",
            "api-docs",
            "meeting",
            "decision",
        ],
    ),
    (
        "activity",
        NamespacePolicy::Closed,
        &["planning", "research", "review", "delivery"],
    ),
];

const BUILTIN_FLAT_TAGS: &[&str] = &["pinned", "draft", "archive", "wip"];

type BuiltinCoverage = (&'static str, &'static [&'static str], &'static [&'static str]);

const BUILTIN_COVERAGE: &[BuiltinCoverage] = &[
    ("Project", &["project"], &["domain", "status"]),
    ("ADR", &["domain"], &["technology"]),
    ("Meeting", &[], &["project", "person"]),
    ("Task", &[], &["project"]),
    ("Concept", &[], &["domain"]),
    ("Reference", &[], &["domain", "type"]),
    ("Tool", &[], &["technology"]),
];

use std::collections::BTreeSet;

use crate::{
    codec::{
        diagnostic::{Finding, FindingKind},
        fields::{FieldMap, FieldValue},
    },
    taxonomy::registry::{NamespacePolicy, TagTaxonomy, MAX_TAG_DEPTH},
};

/// Number of known values quoted when rejecting a tag value.
const VALUE_SAMPLE: usize = 6;

/// Tags declared in the `tags` field, in order.
///
/// A scalar `tags` value is split on commas. Empty entries are dropped.
pub fn note_tags(fields: &FieldMap) -> Vec<String> {
    match fields.get("tags") {
        Some(FieldValue::List(items)) => items
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        Some(FieldValue::Scalar(value)) => value
            .split(',')
            .map(|t| t.trim().trim_matches(|c| c == '"' || c == '\''))
            .filter(|t| !t.is_empty() && *t != "null" && *t != "None")
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}

/// Checks tags against a [`TagTaxonomy`].
#[derive(Debug, Clone, Copy)]
pub struct TagChecker<'t> {
    taxonomy: &'t TagTaxonomy,
}

impl<'t> TagChecker<'t> {
    pub fn new(taxonomy: &'t TagTaxonomy) -> Self {
        TagChecker { taxonomy }
    }

    /// Check each tag, then the namespace coverage expected for `note_type`.
    pub fn check<S: AsRef<str>>(&self, tags: &[S], note_type: &str) -> Vec<Finding> {
        let mut findings = Vec::new();
        let mut present = BTreeSet::new();

        for raw in tags {
            let raw = raw.as_ref().trim();
            let mut tag = raw;
            if tag.starts_with('#') {
                tag = tag.trim_start_matches('#');
                findings.push(Finding::error(
                    FindingKind::TagMarker,
                    format!("Tag should not have # prefix in frontmatter: {raw}"),
                ));
            }
            if let Some((namespace, _)) = tag.split_once('/') {
                if !namespace.is_empty() {
                    present.insert(namespace.to_string());
                }
            }
            self.check_tag(tag, &mut findings);
        }

        if !note_type.is_empty() {
            self.check_coverage(note_type, &present, &mut findings);
        }
        findings
    }

    fn check_tag(&self, tag: &str, findings: &mut Vec<Finding>) {
        let lower = tag.to_lowercase();
        if lower != tag {
            findings.push(Finding::error(
                FindingKind::TagCase,
                format!("Tag '{tag}' must be lowercase: use '{lower}'"),
            ));
            return;
        }

        if !tag.contains('/') {
            if !self.taxonomy.is_flat_tag(tag) {
                findings.push(Finding::error(
                    FindingKind::FlatTag,
                    format!(
                        "Flat tag '{tag}' must be hierarchical (e.g. 'area/engineering'). Approved flat tags: {}",
                        self.taxonomy.flat_tags.join(", ")
                    ),
                ));
            }
            return;
        }

        let segments: Vec<&str> = tag.split('/').collect();
        if segments.iter().any(|s| s.is_empty()) {
            findings.push(Finding::error(
                FindingKind::MalformedTag,
                format!("Tag '{tag}' has an empty segment"),
            ));
            return;
        }
        if segments.len() > MAX_TAG_DEPTH {
            findings.push(Finding::error(
                FindingKind::TagDepth,
                format!(
                    "Tag '{tag}' is nested too deeply: at most {MAX_TAG_DEPTH} segments allowed"
                ),
            ));
            return;
        }

        let name = segments[0];
        let Some(namespace) = self.taxonomy.namespace(name) else {
            findings.push(Finding::error(
                FindingKind::UnknownNamespace,
                format!(
                    "Tag '{tag}': unknown namespace '{name}'. Known namespaces: {}",
                    self.taxonomy.namespace_names().join(", ")
                ),
            ));
            return;
        };

        let value = segments[1];
        if namespace.knows(value) {
            return;
        }
        match namespace.policy {
            NamespacePolicy::OpenEnded => findings.push(Finding::info(
                FindingKind::OpenNamespaceValue,
                format!("Tag '{tag}': new value '{value}' in namespace '{name}'"),
            )),
            NamespacePolicy::Closed => findings.push(Finding::error(
                FindingKind::UnknownTagValue,
                format!(
                    "Tag '{tag}': value '{value}' not in taxonomy for namespace '{name}'. Known values: {}",
                    sample(&namespace.values)
                ),
            )),
        }
    }

    fn check_coverage(
        &self,
        note_type: &str,
        present: &BTreeSet<String>,
        findings: &mut Vec<Finding>,
    ) {
        let Some(coverage) = self.taxonomy.coverage_for(note_type) else {
            return;
        };
        for ns in &coverage.required {
            if !present.contains(ns) {
                findings.push(Finding::error(
                    FindingKind::MissingTagCoverage,
                    format!("{note_type} notes require at least one '{ns}/' tag"),
                ));
            }
        }
        let missing: Vec<&str> = coverage
            .recommended
            .iter()
            .filter(|ns| !present.contains(*ns))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            let listed: Vec<String> = missing.iter().map(|ns| format!("'{ns}/'")).collect();
            findings.push(Finding::suggestion(
                FindingKind::RecommendedTagCoverage,
                format!(
                    "Consider adding tags for {note_type} notes: {}",
                    listed.join(", ")
                ),
            ));
        }
    }
}

fn sample(values: &[String]) -> String {
    let shown = values
        .iter()
        .take(VALUE_SAMPLE)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if values.len() > VALUE_SAMPLE {
        format!("{shown}, ...")
    } else {
        shown
    }
}

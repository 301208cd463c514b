use std::collections::HashSet;

use crate::{
    codec::diagnostic::{Finding, FindingKind},
    links::extract::Reference,
};

/// Every note stem in the vault.
///
/// Built once per run by the vault enumeration and shared read-only with each resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierSet {
    stems: HashSet<String>,
}

impl IdentifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, stem: &str) -> bool {
        self.stems.contains(stem)
    }

    pub fn len(&self) -> usize {
        self.stems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stems.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.stems.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for IdentifierSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        IdentifierSet {
            stems: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for IdentifierSet {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        self.stems.extend(iter.into_iter().map(Into::into));
    }
}

/// Produces candidate note stems for a link target.
type Transform = fn(&str, &[String]) -> Vec<String>;

/// Tried in order; resolution stops at the first candidate present in the identifier set.
///
/// Heading and block suffixes are only stripped from the target as written, after prefix
/// normalization has failed, so `[[Apollo#Scope]]` does not find `Project - Apollo`.
const TRANSFORMS: &[(&str, Transform)] = &[
    ("exact", exact),
    ("strip_prefix", strip_prefix),
    ("add_prefix", add_prefix),
    ("before_heading", before_heading),
    ("before_block", before_block),
];

fn exact(target: &str, _: &[String]) -> Vec<String> {
    vec![target.to_string()]
}

fn strip_prefix(target: &str, prefixes: &[String]) -> Vec<String> {
    prefixes
        .iter()
        .filter_map(|p| target.strip_prefix(p.as_str()))
        .map(str::to_string)
        .collect()
}

fn add_prefix(target: &str, prefixes: &[String]) -> Vec<String> {
    if prefixes.iter().any(|p| target.starts_with(p.as_str())) {
        return Vec::new();
    }
    prefixes.iter().map(|p| format!("{p}{target}")).collect()
}

fn before_heading(target: &str, _: &[String]) -> Vec<String> {
    target
        .split_once('#')
        .map(|(note, _)| vec![note.to_string()])
        .unwrap_or_default()
}

fn before_block(target: &str, _: &[String]) -> Vec<String> {
    target
        .split_once('^')
        .map(|(note, _)| vec![note.to_string()])
        .unwrap_or_default()
}

/// Decides whether link targets name existing notes.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceResolver<'a> {
    identifiers: &'a IdentifierSet,
    prefixes: &'a [String],
}

impl<'a> ReferenceResolver<'a> {
    /// `prefixes` are the filename prefixes (e.g. `"Project - "`) a link may omit or include.
    pub fn new(identifiers: &'a IdentifierSet, prefixes: &'a [String]) -> Self {
        ReferenceResolver {
            identifiers,
            prefixes,
        }
    }

    pub fn resolves(&self, target: &str) -> bool {
        for (name, transform) in TRANSFORMS {
            let hit = transform(target, self.prefixes)
                .iter()
                .any(|candidate| self.identifiers.contains(candidate));
            if hit {
                tracing::trace!("[[{target}]] resolved by {name}");
                return true;
            }
        }
        false
    }

    /// One warning per reference that does not resolve.
    pub fn check(&self, refs: &[Reference]) -> Vec<Finding> {
        refs.iter()
            .filter(|r| !self.resolves(&r.target))
            .map(|r| {
                Finding::warning(
                    FindingKind::BrokenLink,
                    format!("Broken link: {} (no note named '{}')", r.display(), r.target),
                )
                .with_line(r.line)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::extract::body_references;
    use crate::schema::SchemaRegistry;
    use test_log::test;

    fn apollo() -> IdentifierSet {
        ["Project - Apollo", "Ada Lovelace", "2024-03-01"]
            .into_iter()
            .collect()
    }

    #[test]
    fn resolution_order() {
        let ids = apollo();
        let prefixes = SchemaRegistry::builtin().link_prefixes;
        let resolver = ReferenceResolver::new(&ids, &prefixes);

        assert!(resolver.resolves("Project - Apollo"));
        assert!(resolver.resolves("Apollo"));
        assert!(resolver.resolves("Project - Apollo#Scope"));
        assert!(resolver.resolves("Project - Apollo^block-1"));
        assert!(resolver.resolves("Ada Lovelace#Early life"));
        assert!(resolver.resolves("2024-03-01"));

        assert!(!resolver.resolves("Apollo#Scope"));
        assert!(!resolver.resolves("apollo"));
        assert!(!resolver.resolves("Gemini"));
    }

    #[test]
    fn prefix_stripping() {
        let ids: IdentifierSet = ["Kubernetes"].into_iter().collect();
        let prefixes = vec!["Tool - ".to_string(), "Concept - ".to_string()];
        let resolver = ReferenceResolver::new(&ids, &prefixes);
        assert!(resolver.resolves("Tool - Kubernetes"));
        assert!(!resolver.resolves("Framework - Kubernetes"));
    }

    #[test]
    fn prefixed_targets_are_not_prefixed_again() {
        let ids: IdentifierSet = ["Tool - Tool - Hammer"].into_iter().collect();
        let prefixes = vec!["Tool - ".to_string()];
        let resolver = ReferenceResolver::new(&ids, &prefixes);
        assert!(!resolver.resolves("Tool - Hammer"));
        assert!(resolver.resolves("Tool - Tool - Hammer"));
    }

    #[test]
    fn empty_identifier_set_resolves_nothing() {
        let ids = IdentifierSet::new();
        let resolver = ReferenceResolver::new(&ids, &[]);
        assert!(ids.is_empty());
        assert!(!resolver.resolves("Anything"));
    }

    #[test]
    fn broken_links_are_located() {
        let ids = apollo();
        let prefixes = SchemaRegistry::builtin().link_prefixes;
        let resolver = ReferenceResolver::new(&ids, &prefixes);
        let refs = body_references("[[Apollo]]\n\n[[Apollo#Scope|scope]]\n", 10);
        let findings = resolver.check(&refs);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::BrokenLink);
        assert_eq!(findings[0].line, Some(12));
        assert!(findings[0].message.contains("[[Apollo#Scope]]"));
    }
}

//! Locates `[[wiki-link]]` references in a note.
//!
//! References are collected from the frontmatter block and from the body. Body references inside
//! fenced or indented code blocks and inline code spans are ignored; code is located with
//! pulldown-cmark so the rules match what a markdown renderer would show.

use once_cell::sync::Lazy;
use pulldown_cmark::{Event, Options, Parser, Tag};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::codec::frontmatter::HeaderExtract;

/// `[[target]]`, `[[target|alias]]` and `![[embed]]`.
static WIKI_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(!?)\[\[([^\]|]+)(?:\|([^\]]+))?\]\]").expect("static link pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefSite {
    Header,
    Body,
}

/// A reference to another note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// The link target, including any `#heading` or `^block` suffix. Never includes the alias.
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Written as `![[...]]`.
    #[serde(default)]
    pub embed: bool,
    pub site: RefSite,
    /// 1-based line in the note text.
    pub line: usize,
}

impl Reference {
    /// The reference as written, without its alias.
    pub fn display(&self) -> String {
        let bang = if self.embed { "!" } else { "" };
        format!("{bang}[[{}]]", self.target)
    }
}

/// All references in a note: header references first, then body references, each in order of
/// appearance.
pub fn note_references(extract: &HeaderExtract<'_>) -> Vec<Reference> {
    let mut refs = header_references(extract.header, extract.header_line);
    refs.extend(body_references(extract.body, extract.body_line));
    refs
}

/// References in a frontmatter block whose first line is note line `first_line`.
pub fn header_references(header: &str, first_line: usize) -> Vec<Reference> {
    scan(header, first_line, RefSite::Header, &[])
}

/// References in a note body whose first line is note line `first_line`.
pub fn body_references(body: &str, first_line: usize) -> Vec<Reference> {
    let code = code_ranges(body);
    scan(body, first_line, RefSite::Body, &code)
}

/// Byte ranges of code blocks and inline code spans.
fn code_ranges(body: &str) -> Vec<Range<usize>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    Parser::new_ext(body, options)
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Start(Tag::CodeBlock(_)) | Event::Code(_) => Some(range),
            _ => None,
        })
        .collect()
}

fn scan(text: &str, first_line: usize, site: RefSite, skip: &[Range<usize>]) -> Vec<Reference> {
    if !text.contains("[[") {
        return Vec::new();
    }
    let line_starts: Vec<usize> = std::iter::once(0)
        .chain(text.match_indices('\n').map(|(idx, _)| idx + 1))
        .collect();

    let mut refs = Vec::new();
    for caps in WIKI_LINK.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if skip.iter().any(|r| r.contains(&whole.start())) {
            tracing::trace!("skipping link inside code: {}", whole.as_str());
            continue;
        }
        let target = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
        if target.is_empty() {
            continue;
        }
        let line_idx = line_starts.partition_point(|start| *start <= whole.start()) - 1;
        refs.push(Reference {
            target: target.to_string(),
            alias: caps
                .get(3)
                .map(|m| m.as_str().trim().to_string())
                .filter(|a| !a.is_empty()),
            embed: caps.get(1).is_some_and(|m| !m.as_str().is_empty()),
            site,
            line: first_line + line_idx,
        });
    }
    refs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::frontmatter::extract_header;

    fn targets(refs: &[Reference]) -> Vec<&str> {
        refs.iter().map(|r| r.target.as_str()).collect()
    }

    #[test]
    fn link_forms() {
        let refs = body_references(
            "See [[Apollo]], [[Project - Apollo#Scope|the scope]] and ![[Diagram^fig-1]].",
            1,
        );
        assert_eq!(
            targets(&refs),
            vec!["Apollo", "Project - Apollo#Scope", "Diagram^fig-1"]
        );
        assert_eq!(refs[1].alias.as_deref(), Some("the scope"));
        assert!(!refs[0].embed);
        assert!(refs[2].embed);
        assert_eq!(refs[2].display(), "![[Diagram^fig-1]]");
    }

    #[test]
    fn code_is_ignored() {
        let body = "\
Intro [[Real]]

```rust
let x = [[Fenced]];
```

    [[Indented]]

Inline `[[Span]]` and [[After]]
";
        let refs = body_references(body, 1);
        assert_eq!(targets(&refs), vec!["Real", "After"]);
        assert_eq!(refs[0].line, 1);
        assert_eq!(refs[1].line, 9);
    }

    #[test]
    fn empty_targets_are_dropped() {
        assert!(body_references("[[ ]] and [[]]", 1).is_empty());
    }

    #[test]
    fn note_line_numbers_span_header_and_body() {
        let note = "---\ntype: Meeting\nattendees:\n  - \"[[Ada Lovelace]]\"\n---\n# Notes\n\nAsk [[Grace]]\n";
        let extract = extract_header(note);
        let refs = note_references(&extract);
        assert_eq!(targets(&refs), vec!["Ada Lovelace", "Grace"]);
        assert_eq!(refs[0].site, RefSite::Header);
        assert_eq!(refs[0].line, 4);
        assert_eq!(refs[1].site, RefSite::Body);
        assert_eq!(refs[1].line, 8);
    }
}

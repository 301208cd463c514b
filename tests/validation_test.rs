//! End-to-end behaviour of the validation core through the public API.

mod common;

use noet_lint::{
    codec::{extract_header, parse_fields, FieldValue, FindingKind, Severity},
    links::{IdentifierSet, ReferenceResolver},
    schema::{is_calendar_date, SchemaChecker, SchemaRegistry},
    taxonomy::{TagChecker, TagTaxonomy},
    validate::{Checks, NoteInput, Validator},
};

fn list(items: &[&str]) -> FieldValue {
    FieldValue::List(items.iter().map(|s| s.to_string()).collect())
}

#[test]
fn inline_sequences_strip_quotes_and_empty_elements() {
    common::init_logging();
    for (input, expected) in [
        ("tags: [a, b, \"c\"]", list(&["a", "b", "c"])),
        ("tags: [a, b, \"c\",]", list(&["a", "b", "c"])),
        ("tags: ['a' , , b]", list(&["a", "b"])),
        ("tags: []", list(&[])),
        ("tags: [ ]", list(&[])),
    ] {
        assert_eq!(parse_fields(input)["tags"], expected, "{input}");
    }
}

#[test]
fn sequences_and_scalars_keep_their_shape() {
    common::init_logging();
    let fields = parse_fields(
        "single: [only]\nempty:\nflow: [a,\n  b,\n  c]\nblock:\n  - x\n  - \"y\"\nlast: 1\nlast: 2\n",
    );
    assert_eq!(fields["single"], list(&["only"]));
    assert_eq!(fields["empty"], FieldValue::Scalar(String::new()));
    assert_eq!(fields["flow"], list(&["a", "b", "c"]));
    assert_eq!(fields["block"], list(&["x", "y"]));
    assert_eq!(fields["last"], FieldValue::Scalar("2".to_string()));
}

#[test]
fn complete_required_fields_yield_no_missing_or_empty_findings() {
    common::init_logging();
    let registry = SchemaRegistry::builtin();
    let checker = SchemaChecker::new(&registry).with_filename_rules(false);
    for schema in &registry.types {
        let mut header = String::new();
        for field in &schema.required {
            let value = match field.as_str() {
                "type" => schema.name.clone(),
                "date" => "2024-03-01".to_string(),
                // Pick an allowed value wherever the field is enumerated.
                other => registry
                    .enums
                    .iter()
                    .find(|e| e.field == other)
                    .and_then(|e| e.allowed_for(&schema.name))
                    .and_then(|allowed| allowed.first().cloned())
                    .unwrap_or_else(|| "Something".to_string()),
            };
            header.push_str(&format!("{field}: {value}\n"));
        }
        let findings = checker.check(&parse_fields(&header), "anywhere.md");
        assert!(
            findings
                .iter()
                .all(|f| !matches!(f.kind, FindingKind::MissingField | FindingKind::EmptyField)),
            "{}: {findings:?}",
            schema.name
        );
    }
}

#[test]
fn impossible_dates_yield_exactly_one_finding() {
    common::init_logging();
    let registry = SchemaRegistry::builtin();
    let checker = SchemaChecker::new(&registry).with_filename_rules(false);
    for bad in ["2024-02-30", "2024-13-01"] {
        let fields = parse_fields(&format!("type: Person\ntitle: Ada\ncreated: {bad}"));
        let findings = checker.check(&fields, "People/Ada.md");
        assert_eq!(findings.len(), 1, "{bad}: {findings:?}");
        assert_eq!(findings[0].kind, FindingKind::InvalidDate);
    }
    for good in ["2024-02-29", "2023-01-31", "2024-12-01"] {
        assert!(is_calendar_date(good));
        let fields = parse_fields(&format!("type: Person\ntitle: Ada\ncreated: {good}"));
        assert!(checker.check(&fields, "People/Ada.md").is_empty());
    }
}

#[test]
fn flat_tags() {
    common::init_logging();
    let taxonomy = TagTaxonomy::builtin();
    let checker = TagChecker::new(&taxonomy);
    for tag in &taxonomy.flat_tags {
        assert!(checker.check(&[tag.as_str()], "").is_empty(), "{tag}");
    }
    for tag in ["todo", "idea", "q3"] {
        let findings = checker.check(&[tag], "");
        assert_eq!(findings.len(), 1, "{tag}");
        assert_eq!(findings[0].kind, FindingKind::FlatTag);
        assert!(findings[0].message.contains("must be hierarchical"));
    }
}

#[test]
fn closed_namespace_values() {
    common::init_logging();
    let taxonomy = TagTaxonomy::builtin();
    let checker = TagChecker::new(&taxonomy);
    assert!(checker.check(&["domain/engineering"], "").is_empty());

    let findings = checker.check(&["domain/unknownvalue"], "");
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].severity, Severity::Error);
    assert!(findings[0].message.contains("domain"));
}

#[test]
fn resolver_prefix_and_suffix_ordering() {
    common::init_logging();
    let identifiers: IdentifierSet = ["Project - Apollo"].into_iter().collect();
    let registry = SchemaRegistry::builtin();
    let resolver = ReferenceResolver::new(&identifiers, &registry.link_prefixes);

    assert!(resolver.resolves("Apollo"));
    assert!(resolver.resolves("Project - Apollo#Scope"));
    // Suffixes are stripped from the target as written, after prefix normalization.
    assert!(!resolver.resolves("Apollo#Scope"));
}

#[test]
fn meeting_filename_convention() {
    common::init_logging();
    let registry = SchemaRegistry::builtin();
    let checker = SchemaChecker::new(&registry).with_field_rules(false);
    let fields = parse_fields("type: Meeting");

    assert!(checker
        .check(&fields, "Meetings/Meeting - 2024-03-01 Kickoff.md")
        .is_empty());

    let findings = checker.check(&fields, "Meetings/meeting-2024-03-01.md");
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].kind, FindingKind::MissingPrefix);
}

#[test]
fn validation_is_idempotent() {
    common::init_logging();
    let text = "---\ntype: Task\ntitle: fix_it\npriority: someday\ntags: [Loud, '#area/ops', x/y/z/w]\nstatus:\n---\n[[A]] [[B#c]] `[[code]]`\n";
    let note = NoteInput::new("Task - fix_it.md", text);
    let identifiers: IdentifierSet = ["B"].into_iter().collect();
    let validator = Validator::default();

    let first = validator.validate(&note, Some(&identifiers));
    let second = validator.validate(&note, Some(&identifiers));
    assert!(!first.findings.is_empty());
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn findings_follow_discovery_order() {
    common::init_logging();
    let text = "---\ntype: Task\ntitle: Ship\ncompleted: false\npriority: high\ntags: [todo]\nrelatedTo: \"[[Missing One]]\"\n---\n[[Missing Two]]\n";
    let note = NoteInput::new("Tasks/Task - Ship.md", text);
    let report = Validator::default().validate(&note, Some(&IdentifierSet::new()));
    let kinds: Vec<FindingKind> = report.findings.iter().map(|f| f.kind).collect();
    assert_eq!(
        kinds,
        vec![
            FindingKind::FlatTag,
            FindingKind::RecommendedTagCoverage,
            FindingKind::BrokenLink,
            FindingKind::BrokenLink,
        ]
    );
    assert_eq!(report.findings[2].line, Some(7));
    assert_eq!(report.findings[3].line, Some(9));
}

#[test]
fn empty_and_headerless_input() {
    common::init_logging();
    let validator = Validator::default().with_checks(Checks::default());
    for text in ["", "\n", "no header here", "--\ntype: Task\n--\n"] {
        let report = validator.validate(&NoteInput::new("x.md", text), Some(&IdentifierSet::new()));
        assert!(report.is_clean(), "{text:?}");
        assert!(!extract_header(text).found());
    }
}

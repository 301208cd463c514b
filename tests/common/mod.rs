//! Shared test utilities for integration tests.
//!
//! Import from integration test files as:
//! ```ignore
//! mod common;
//! ```

use std::path::Path;
use tempfile::TempDir;

/// Initialize tracing for tests, respecting RUST_LOG env var.
///
/// Safe to call multiple times; subsequent calls are no-ops.
#[allow(dead_code)]
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// Write `text` to `relative` under `root`, creating folders as needed.
#[allow(dead_code)]
pub fn write_note(root: &Path, relative: &str, text: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, text).unwrap();
}

/// Create a small vault with a `.obsidian` marker and a mix of clean and broken notes.
///
/// | Note | Problems |
/// |---|---|
/// | `Projects/Project - Apollo.md` | none |
/// | `Meetings/Meeting - 2024-03-01 Kickoff.md` | broken link to `[[Gemini]]` |
/// | `People/Ada Lovelace.md` | none |
/// | `Tasks/task_cleanup.md` | missing prefix, underscore, flat tag, invalid priority |
/// | `Daily/2024/2024-03-01.md` | none |
/// | `README.md` | no frontmatter, not validated |
/// | `Templates/Meeting Template.md` | excluded |
#[allow(dead_code)]
pub fn create_test_vault() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::create_dir_all(root.join(".obsidian")).unwrap();

    write_note(
        root,
        "Projects/Project - Apollo.md",
        r#"---
type: Project
title: Apollo
status: active
priority: high
created: 2024-01-15
tags: [project/apollo, domain/engineering, status/active]
---
# Apollo

Owner: [[Ada Lovelace]]
"#,
    );

    write_note(
        root,
        "Meetings/Meeting - 2024-03-01 Kickoff.md",
        r#"---
type: Meeting
title: Kickoff
date: 2024-03-01
attendees:
  - "[[Ada Lovelace]]"
tags: [project/apollo, person/ada-lovelace]
---
# Kickoff

- Scope of [[Apollo]] agreed, see [[Project - Apollo#Scope|scope]]
- Follow up on [[Gemini]]

```
[[Not a link]]
```
"#,
    );

    write_note(
        root,
        "People/Ada Lovelace.md",
        "---\ntype: Person\ntitle: Ada Lovelace\n---\n# Ada\n",
    );

    write_note(
        root,
        "Tasks/task_cleanup.md",
        r#"---
type: Task
title: Cleanup
completed: false
priority: urgent
tags: [todo, project/apollo]
---
Clean up after [[Apollo]].
"#,
    );

    write_note(
        root,
        "Daily/2024/2024-03-01.md",
        "---\ntype: Daily\ntitle: 2024-03-01\ndate: 2024-03-01\n---\n[[Meeting - 2024-03-01 Kickoff]]\n",
    );

    write_note(root, "README.md", "# Vault\n\n[[Nowhere]]\n");

    write_note(
        root,
        "Templates/Meeting Template.md",
        "---\ntype: Meeting\ntitle: {{title}}\n---\n",
    );

    dir
}

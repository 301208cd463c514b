//! Note enumeration and reading for a vault on disk.

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::{
    config::{get_content, LintConfig},
    error::LintError,
    links::IdentifierSet,
    paths::{os_path_to_string, vault_relative, NotePath},
    validate::NoteInput,
};

/// Walk up from `start` to the first directory containing `marker`.
pub fn find_vault_root(start: &Path, marker: &str) -> Option<PathBuf> {
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
    start
        .ancestors()
        .find(|dir| dir.join(marker).exists())
        .map(Path::to_path_buf)
}

/// A note read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFile {
    /// Vault-relative path with `/` separators.
    pub path: String,
    pub text: String,
}

impl NoteFile {
    pub fn as_input(&self) -> NoteInput<'_> {
        NoteInput::new(&self.path, &self.text)
    }
}

/// A vault root together with the configuration governing how it is walked.
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
    config: LintConfig,
}

impl Vault {
    /// The root is canonicalized when it exists so walked paths are absolute.
    pub fn new(root: PathBuf, config: LintConfig) -> Self {
        let root = root.canonicalize().unwrap_or(root);
        Vault { root, config }
    }

    /// Locate the vault containing `start` by its marker entry.
    pub fn discover(start: &Path, config: LintConfig) -> Result<Self, LintError> {
        match find_vault_root(start, &config.vault_marker) {
            Some(root) => Ok(Vault::new(root, config)),
            None => Err(LintError::NotFound(format!(
                "no '{}' found above {start:?}",
                config.vault_marker
            ))),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Every note file in the vault, sorted, skipping hidden and excluded directories.
    pub fn note_paths(&self) -> Result<Vec<PathBuf>, LintError> {
        if !self.root.is_dir() {
            return Err(LintError::NotFound(format!("{:?} is not a directory", self.root)));
        }
        let is_skipped = |entry: &DirEntry| {
            entry.depth() > 0
                && entry.file_type().is_dir()
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| self.config.is_excluded_dir(name))
        };

        let mut paths = Vec::new();
        for entry in WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_skipped(e))
        {
            match entry {
                Ok(entry) if entry.file_type().is_file() && self.config.is_note_file(entry.path()) => {
                    paths.push(entry.into_path())
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("skipping unreadable vault entry: {e}"),
            }
        }
        tracing::debug!("found {} notes under {:?}", paths.len(), self.root);
        Ok(paths)
    }

    /// Stems of every note in the vault.
    pub fn identifiers(&self) -> Result<IdentifierSet, LintError> {
        Ok(self.identifiers_from(&self.note_paths()?))
    }

    /// Stems of the given note paths.
    pub fn identifiers_from(&self, paths: &[PathBuf]) -> IdentifierSet {
        paths
            .iter()
            .map(|p| NotePath::new(&os_path_to_string(p)).stem().to_string())
            .collect()
    }

    /// Whether `path` lies in an excluded or hidden directory of this vault.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let relative = os_path_to_string(relative);
        let note = NotePath::new(&relative);
        note.folder()
            .split('/')
            .any(|dir| !dir.is_empty() && self.config.is_excluded_dir(dir))
    }

    /// The vault-relative form of `path`. Relative paths are taken as already vault-relative.
    pub fn relative_path(&self, path: &Path) -> Result<String, LintError> {
        if path.is_absolute() {
            let root = self.root.canonicalize().unwrap_or_else(|_| self.root.clone());
            let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
            vault_relative(path, root)
        } else {
            Ok(os_path_to_string(path))
        }
    }

    /// Read the note at `path`, which may be absolute or relative to the vault root.
    pub fn read(&self, path: &Path) -> Result<NoteFile, LintError> {
        let full = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        };
        let text = get_content(&full)?;
        Ok(NoteFile {
            path: self.relative_path(&full)?,
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use test_log::test;

    fn vault_fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for folder in [".obsidian", "Projects", "Templates", "node_modules/pkg", ".trash", "People"] {
            fs::create_dir_all(root.join(folder)).unwrap();
        }
        fs::write(root.join("Projects/Project - Apollo.md"), "---\ntype: Project\n---\n").unwrap();
        fs::write(root.join("People/Ada Lovelace.md"), "# Ada").unwrap();
        fs::write(root.join("Templates/Project Template.md"), "").unwrap();
        fs::write(root.join("node_modules/pkg/README.md"), "").unwrap();
        fs::write(root.join(".trash/Old.md"), "").unwrap();
        fs::write(root.join("People/photo.png"), "").unwrap();
        dir
    }

    #[test]
    fn enumerates_notes_and_skips_excluded_dirs() {
        let dir = vault_fixture();
        let vault = Vault::new(dir.path().to_path_buf(), LintConfig::default());
        let ids = vault.identifiers().unwrap();
        let mut stems: Vec<&str> = ids.iter().collect();
        stems.sort();
        assert_eq!(stems, vec!["Ada Lovelace", "Project - Apollo"]);
    }

    #[test]
    fn discovers_root_from_nested_path() {
        let dir = vault_fixture();
        let nested = dir.path().join("Projects/Project - Apollo.md");
        let vault = Vault::discover(&nested, LintConfig::default()).unwrap();
        assert_eq!(vault.root(), dir.path().canonicalize().unwrap());

        let read = vault.read(&nested).unwrap();
        assert_eq!(read.path, "Projects/Project - Apollo.md");
        assert!(read.text.starts_with("---"));
    }

    #[test]
    fn discover_without_marker_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = LintConfig {
            vault_marker: "no-such-marker-file".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            Vault::discover(dir.path(), config),
            Err(LintError::NotFound(_))
        ));
    }

    #[test]
    fn exclusion_by_folder() {
        let vault = Vault::new(PathBuf::from("/vault"), LintConfig::default());
        assert!(vault.is_excluded(Path::new("/vault/Templates/Task.md")));
        assert!(vault.is_excluded(Path::new("Templates/Sub/Task.md")));
        assert!(vault.is_excluded(Path::new(".obsidian/plugins/x.md")));
        assert!(!vault.is_excluded(Path::new("/vault/Tasks/Task - A.md")));
        assert!(!vault.is_excluded(Path::new("Task - Templates.md")));
    }

    #[test]
    fn relative_root_reads_every_note() {
        let dir = tempfile::tempdir_in(".").unwrap();
        fs::create_dir_all(dir.path().join("Projects")).unwrap();
        fs::write(dir.path().join("Projects/Project - Apollo.md"), "---\ntype: Project\n---\n").unwrap();
        let relative = PathBuf::from(dir.path().file_name().unwrap());
        assert!(relative.is_relative());

        let vault = Vault::new(relative, LintConfig::default());
        let paths = vault.note_paths().unwrap();
        assert_eq!(paths.len(), 1);
        let note = vault.read(&paths[0]).unwrap();
        assert_eq!(note.path, "Projects/Project - Apollo.md");
        assert!(vault.read(Path::new("Projects/Project - Apollo.md")).is_ok());

        let reports = crate::validate::Validator::default()
            .validate_vault(&vault)
            .unwrap();
        assert_eq!(reports.len(), 1);
    }

    #[test]
    fn missing_root_is_an_error() {
        let vault = Vault::new(PathBuf::from("/definitely/not/here"), LintConfig::default());
        assert!(vault.note_paths().is_err());
    }
}

use std::{
    borrow::Cow,
    fmt::{Display, Formatter},
    path::{Component, Path},
};

use crate::error::LintError;

/// Utility function to replace separators and convert to unicode (via to_string_lossy) on os path.
pub fn os_path_to_string<P: AsRef<Path>>(os_path_ref: P) -> String {
    let res = os_path_ref
        .as_ref()
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| match c {
            Component::RootDir => Cow::from("".to_string()),
            _ => c.as_os_str().to_string_lossy(),
        })
        .collect::<Vec<_>>()
        .join("/");
    tracing::trace!(
        "os_path_to_string: turned {:?} into {}",
        os_path_ref.as_ref().components(),
        res
    );
    res
}

/// Express `path` relative to the vault `root`, with `/` separators.
pub fn vault_relative<P: AsRef<Path>, R: AsRef<Path>>(path: P, root: R) -> Result<String, LintError> {
    let relative = path.as_ref().strip_prefix(root.as_ref())?;
    Ok(os_path_to_string(relative))
}

/// A vault-relative note path split into folder and stem.
///
/// Paths always use `/` separators. The vault root folder is the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotePath<'a> {
    pub path: &'a str,
    /// Index of '/' separating folder from file
    dir_sep: Option<usize>,
    /// Index of '.' separating stem from extension
    ext_sep: Option<usize>,
}

impl<'a> NotePath<'a> {
    pub fn new(path: &'a str) -> NotePath<'a> {
        let path = path.trim_start_matches("./");
        let dir_sep = path.rfind('/');
        let file_start = dir_sep.map(|idx| idx + 1).unwrap_or(0);
        let ext_sep = path[file_start..]
            .rfind('.')
            // Hidden files have no extension
            .filter(|idx| *idx > 0)
            .map(|idx| idx + file_start);
        NotePath {
            path,
            dir_sep,
            ext_sep,
        }
    }

    /// Containing folder, `""` at the vault root.
    pub fn folder(&self) -> &'a str {
        match self.dir_sep {
            Some(idx) => self.path[..idx].trim_start_matches('/'),
            None => "",
        }
    }

    /// Filename without extension. This is the note's identifier within the vault.
    pub fn stem(&self) -> &'a str {
        let start = self.dir_sep.map(|idx| idx + 1).unwrap_or(0);
        &self.path[start..self.ext_sep.unwrap_or(self.path.len())]
    }

    /// Whether the folder equals `prefix` or lies beneath it.
    pub fn in_folder(&self, prefix: &str) -> bool {
        let prefix = prefix.trim_matches('/');
        if prefix.is_empty() {
            return true;
        }
        let folder = self.folder();
        folder == prefix
            || folder
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl<'a> From<&'a str> for NotePath<'a> {
    fn from(path: &'a str) -> Self {
        NotePath::new(path)
    }
}

impl<'a> From<&'a String> for NotePath<'a> {
    fn from(path: &'a String) -> Self {
        NotePath::new(path)
    }
}

impl Display for NotePath<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path)
    }
}

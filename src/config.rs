use crate::{error::LintError, schema::SchemaRegistry, taxonomy::TagTaxonomy, validate::Checks};
use serde::{Deserialize, Serialize};
use std::{
    fs::{read_to_string, write},
    path::{Path, PathBuf},
};

/// Standard configuration filename, looked up at the vault root.
pub const CONFIG_FILE: &str = "noet-lint.toml";

/// Settings for a validation run.
///
/// Every field has a default, so an empty or partial `noet-lint.toml` is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Directory names skipped when enumerating notes, at any depth. Hidden directories are
    /// always skipped.
    pub excluded_dirs: Vec<String>,
    /// Entry whose presence marks a directory as the vault root.
    pub vault_marker: String,
    /// Note file extensions, without the dot.
    pub extensions: Vec<String>,
    /// TOML schema registry replacing the built-in one. Relative to the vault root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<PathBuf>,
    /// TOML tag taxonomy replacing the built-in one. Relative to the vault root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxonomy: Option<PathBuf>,
    pub checks: Checks,
}

impl Default for LintConfig {
    fn default() -> Self {
        LintConfig {
            excluded_dirs: ["Templates", ".obsidian", ".git", "node_modules", ".claude"]
                .iter()
                .map(|d| d.to_string())
                .collect(),
            vault_marker: ".obsidian".to_string(),
            extensions: vec!["md".to_string()],
            schema: None,
            taxonomy: None,
            checks: Checks::default(),
        }
    }
}

impl LintConfig {
    pub fn from_toml(content: &str) -> Result<Self, LintError> {
        let config: LintConfig = toml::from_str(content)?;
        if config.extensions.is_empty() {
            return Err(LintError::Config(
                "at least one note extension is required".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn is_excluded_dir(&self, name: &str) -> bool {
        name.starts_with('.') || self.excluded_dirs.iter().any(|d| d == name)
    }

    pub fn is_note_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|x| x == ext))
    }

    /// The configured schema registry, or the built-in one.
    pub fn schema_registry(&self, base: &Path) -> Result<SchemaRegistry, LintError> {
        match &self.schema {
            Some(path) => SchemaRegistry::from_toml(&get_content(base.join(path))?),
            None => Ok(SchemaRegistry::builtin()),
        }
    }

    /// The configured tag taxonomy, or the built-in one.
    pub fn tag_taxonomy(&self, base: &Path) -> Result<TagTaxonomy, LintError> {
        match &self.taxonomy {
            Some(path) => TagTaxonomy::from_toml(&get_content(base.join(path))?),
            None => Ok(TagTaxonomy::builtin()),
        }
    }
}

pub trait LintConfigProvider: Send + Sync {
    fn get_config(&self) -> Result<LintConfig, LintError>;
    fn set_config(&self, config: &LintConfig) -> Result<(), LintError>;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TomlConfigProvider {
    path: PathBuf,
}

impl TomlConfigProvider {
    pub fn new(path: PathBuf) -> Self {
        TomlConfigProvider { path }
    }

    /// Provider for the standard config file under `root`.
    pub fn in_vault(root: &Path) -> Self {
        TomlConfigProvider::new(root.join(CONFIG_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LintConfigProvider for TomlConfigProvider {
    fn get_config(&self) -> Result<LintConfig, LintError> {
        tracing::debug!("Attempting to read config from: {:?}", &self.path);
        if !self.path.exists() {
            tracing::debug!("Config file not found, using defaults.");
            return Ok(LintConfig::default());
        }
        LintConfig::from_toml(&read_to_string(&self.path)?)
    }

    fn set_config(&self, config: &LintConfig) -> Result<(), LintError> {
        tracing::debug!("Attempting to write config to: {:?}", &self.path);
        let toml_string = toml::to_string(config)?;
        write(&self.path, toml_string)?;
        Ok(())
    }
}

pub fn get_content<P: AsRef<Path>>(path: P) -> Result<String, LintError> {
    tracing::debug!("Reading {:?}", path.as_ref());
    Ok(read_to_string(path)?)
}

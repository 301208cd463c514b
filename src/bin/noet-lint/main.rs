//! noet-lint CLI tool
//!
//! Command-line interface for validating vault notes with the noet-lint library.
//!
//! ## Commands
//!
//! - `check <files>...`: Validate specific notes, e.g. from an editor hook or pre-commit
//! - `scan [root]`: Validate every note in a vault
//!
//! The vault root is found by walking up from the first file (or from `scan`'s root) to the
//! directory containing the configured vault marker, unless `--vault` is given. Settings are read
//! from `noet-lint.toml` at the vault root, or from `--config`.
//!
//! ## Exit status
//!
//! Findings are reported but never fail the run unless `--strict` is given, in which case any
//! error-severity finding exits with status 1.

use clap::{Args, Parser, Subcommand};
use noet_lint::{
    codec::{NoteReport, Severity},
    config::{LintConfig, LintConfigProvider, TomlConfigProvider},
    validate::Validator,
    vault::Vault,
    LintError,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "noet-lint")]
#[command(author, version, about = "Validate frontmatter, filenames, tags and wiki-links in a markdown vault", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Common {
    /// Vault root (default: discovered from the vault marker)
    #[arg(long)]
    vault: Option<PathBuf>,

    /// Configuration file path (default: <vault>/noet-lint.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print reports as JSON
    #[arg(long)]
    json: bool,

    /// Exit with status 1 when any error-severity finding is reported
    #[arg(long)]
    strict: bool,

    /// Also print informational findings and clean notes
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate specific notes
    Check {
        /// Notes to validate
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        common: Common,
    },

    /// Validate every note in a vault
    Scan {
        /// Directory inside the vault (default: current directory)
        #[arg(default_value = ".")]
        root: PathBuf,

        #[command(flatten)]
        common: Common,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let (reports, common) = match cli.command {
        Commands::Check { files, common } => {
            let vault = open_vault(&files[0], &common)?;
            let validator = Validator::from_config(vault.config(), vault.root())?;
            let identifiers = if validator.checks().links {
                Some(vault.identifiers()?)
            } else {
                None
            };

            let mut reports = Vec::with_capacity(files.len());
            for file in &files {
                let file = file.canonicalize()?;
                if vault.is_excluded(&file) || !vault.config().is_note_file(&file) {
                    tracing::debug!("skipping {file:?}");
                    continue;
                }
                let note = vault.read(&file)?;
                reports.push(validator.validate(&note.as_input(), identifiers.as_ref()));
            }
            (reports, common)
        }
        Commands::Scan { root, common } => {
            let vault = open_vault(&root, &common)?;
            let validator = Validator::from_config(vault.config(), vault.root())?;
            (validator.validate_vault(&vault)?, common)
        }
    };

    if common.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_reports(&reports, common.verbose);
    }

    if common.strict && reports.iter().any(NoteReport::has_errors) {
        std::process::exit(1);
    }
    Ok(())
}

fn open_vault(start: &Path, common: &Common) -> Result<Vault, LintError> {
    let root = match &common.vault {
        Some(root) => root.clone(),
        None => {
            // An explicit config may name a different vault marker.
            let probe = load_config(common.config.as_deref(), None)?;
            Vault::discover(start, probe)?.root().to_path_buf()
        }
    };
    let root = root.canonicalize()?;
    let config = load_config(common.config.as_deref(), Some(&root))?;
    tracing::debug!("vault root: {root:?}");
    Ok(Vault::new(root, config))
}

fn load_config(explicit: Option<&Path>, root: Option<&Path>) -> Result<LintConfig, LintError> {
    match (explicit, root) {
        (Some(path), _) => TomlConfigProvider::new(path.to_path_buf()).get_config(),
        (None, Some(root)) => TomlConfigProvider::in_vault(root).get_config(),
        (None, None) => Ok(LintConfig::default()),
    }
}

fn print_reports(reports: &[NoteReport], verbose: bool) {
    let min = if verbose {
        Severity::Info
    } else {
        Severity::Suggestion
    };
    let mut errors = 0;
    let mut warnings = 0;
    for report in reports {
        errors += report.count(Severity::Error);
        warnings += report.count(Severity::Warning);

        let shown: Vec<_> = report.at_least(min).collect();
        if shown.is_empty() {
            if verbose {
                println!("{}: ok", report.path);
            }
            continue;
        }
        println!("{}:", report.path);
        for finding in shown {
            println!("   - {finding}");
        }
    }
    println!(
        "{} notes checked, {errors} errors, {warnings} warnings",
        reports.len()
    );
}

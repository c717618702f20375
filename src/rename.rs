//! Batch renaming of PDFs inside experiment folders
//!
//! Renames are computed up front into a [`RenamePlan`], checked for
//! collisions, and only then applied. A collision anywhere rejects the whole
//! batch before the first file is touched.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::layout::{has_pdf_suffix, is_experiment_dir_name};

/// Placeholder marker in a filename pattern
pub const PLACEHOLDER: char = '$';

/// A filename pattern such as `Codes $.pdf`
///
/// Only the text before the first `$` takes part in matching. The rest is
/// kept so the pattern can be displayed as entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenamePattern {
    raw: String,
}

impl FilenamePattern {
    pub fn parse(raw: impl Into<String>) -> Self {
        FilenamePattern { raw: raw.into() }
    }

    /// Text before the placeholder, or the whole pattern if it has none
    pub fn prefix(&self) -> &str {
        match self.raw.split_once(PLACEHOLDER) {
            Some((prefix, _)) => prefix,
            None => &self.raw,
        }
    }

    /// Whether a file name matches: prefix and `.pdf` suffix, case-sensitive
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.starts_with(self.prefix()) && has_pdf_suffix(Path::new(file_name))
    }
}

impl fmt::Display for FilenamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Options for a batch rename
#[derive(Debug, Clone)]
pub struct RenameOptions {
    /// Directory holding the `Experiment N` folders
    pub target_dir: PathBuf,
    /// Pattern selecting which PDFs to rename
    pub pattern: FilenamePattern,
    /// String prepended to each matching file name
    pub prepend: String,
    /// Plan and validate only, rename nothing
    pub dry_run: bool,
}

/// One planned rename within an experiment folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Ordered list of renames, sorted by folder then file name
#[derive(Debug, Clone, Default)]
pub struct RenamePlan {
    pub renames: Vec<Rename>,
}

impl RenamePlan {
    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }

    /// Fail on the first rename whose target will exist when it runs
    ///
    /// A target that is the source of an earlier rename in the plan has been
    /// moved away by then and does not count.
    pub fn validate(&self) -> Result<()> {
        let mut moved: HashSet<&Path> = HashSet::new();
        for rename in &self.renames {
            if !moved.contains(rename.to.as_path()) && fs::symlink_metadata(&rename.to).is_ok() {
                return Err(Error::RenameCollision {
                    from: rename.from.clone(),
                    to: rename.to.clone(),
                });
            }
            moved.insert(rename.from.as_path());
        }
        Ok(())
    }

    /// Apply every rename in order
    ///
    /// An OS error stops the batch; earlier renames stay applied.
    pub fn apply(&self) -> Result<()> {
        for rename in &self.renames {
            fs::rename(&rename.from, &rename.to)?;
            info!("Renamed: {} -> {}", rename.from.display(), rename.to.display());
        }
        Ok(())
    }
}

/// Outcome of a batch rename
#[derive(Debug, Clone)]
pub struct RenameReport {
    /// Renames performed, or the ones that would be performed for a dry run
    pub renames: Vec<Rename>,
    pub dry_run: bool,
}

/// Compute the renames for `options` without touching the filesystem
pub fn plan_renames(options: &RenameOptions) -> Result<RenamePlan> {
    if !options.target_dir.is_dir() {
        return Err(Error::DirectoryNotFound(options.target_dir.clone()));
    }

    let mut plan = RenamePlan::default();

    for folder in sorted_entries(&options.target_dir)? {
        let Some(folder_name) = file_name_str(&folder) else {
            continue;
        };
        if !folder.is_dir() || !is_experiment_dir_name(folder_name) {
            debug!(path = %folder.display(), "skipping non-experiment entry");
            continue;
        }

        for file in sorted_entries(&folder)? {
            if !file.is_file() {
                continue;
            }
            let Some(file_name) = file_name_str(&file) else {
                continue;
            };
            if options.pattern.matches(file_name) {
                let to = folder.join(format!("{}{}", options.prepend, file_name));
                plan.renames.push(Rename { from: file.clone(), to });
            }
        }
    }

    Ok(plan)
}

/// Rename every matching PDF in the experiment folders of `target_dir`
///
/// # Example
///
/// ```no_run
/// use coursework_pdfs::rename::{rename_matching, FilenamePattern, RenameOptions};
/// use std::path::PathBuf;
///
/// let options = RenameOptions {
///     target_dir: PathBuf::from("ML"),
///     pattern: FilenamePattern::parse("Codes $.pdf"),
///     prepend: "ML_".to_string(),
///     dry_run: false,
/// };
///
/// rename_matching(&options).expect("Failed to rename");
/// ```
pub fn rename_matching(options: &RenameOptions) -> Result<RenameReport> {
    let plan = plan_renames(options)?;
    plan.validate()?;

    if plan.is_empty() {
        info!(
            pattern = %options.pattern,
            "no files matched in {}",
            options.target_dir.display()
        );
    } else if options.dry_run {
        for rename in &plan.renames {
            info!("Would rename: {} -> {}", rename.from.display(), rename.to.display());
        }
    } else {
        plan.apply()?;
    }

    Ok(RenameReport {
        renames: plan.renames,
        dry_run: options.dry_run,
    })
}

/// Directory entries sorted by path for reproducible processing order
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();
    Ok(entries)
}

fn file_name_str(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

//! Coursework directory layout and output naming conventions
//!
//! Expected input tree under a subject directory:
//!
//! ```text
//! <target_dir>/
//!     <subject>_initials.pdf
//!     <subject>_Assignment 1.pdf
//!     Experiment 1/
//!         <subject>_Writeup 1.pdf
//!         <subject>_Codes 1.pdf
//!     output/
//!         <id>_<subject>_Full_Merged.pdf
//!         individual_merges/
//!             <id>_<subject>_Experiment_1_merged.pdf
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

/// Name prefix shared by every experiment folder
pub const EXPERIMENT_DIR_PREFIX: &str = "Experiment";

/// Extension of every file the tools look at
pub const PDF_EXTENSION: &str = ".pdf";

/// Id prefix used by the argument-driven merger when none is given
pub const DEFAULT_ID_PREFIX: &str = "C026";

/// Short identifier namespacing output filenames (e.g. a roll-number code)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdPrefix(String);

impl IdPrefix {
    /// Use a literal prefix as-is
    pub fn new(prefix: impl Into<String>) -> Self {
        IdPrefix(prefix.into())
    }

    /// Derive the prefix from a roll number
    ///
    /// Roll numbers below 100 get an extra zero: 5 → `C05`, 26 → `C026`,
    /// 123 → `C123`.
    pub fn from_roll_number(roll_no: u32) -> Self {
        if roll_no < 100 {
            IdPrefix(format!("C0{}", roll_no))
        } else {
            IdPrefix(format!("C{}", roll_no))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for IdPrefix {
    fn default() -> Self {
        IdPrefix::new(DEFAULT_ID_PREFIX)
    }
}

impl fmt::Display for IdPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps experiment and assignment numbers to input and output paths
#[derive(Debug, Clone)]
pub struct CourseLayout {
    pub target_dir: PathBuf,
    pub subject: String,
    pub id_prefix: IdPrefix,
}

impl CourseLayout {
    pub fn new(target_dir: impl Into<PathBuf>, subject: impl Into<String>, id_prefix: IdPrefix) -> Self {
        Self {
            target_dir: target_dir.into(),
            subject: subject.into(),
            id_prefix,
        }
    }

    /// `Experiment {i}/`
    pub fn experiment_dir(&self, index: usize) -> PathBuf {
        self.target_dir.join(format!("{} {}", EXPERIMENT_DIR_PREFIX, index))
    }

    /// `Experiment {i}/{subject}_Writeup {i}.pdf`
    pub fn writeup_path(&self, index: usize) -> PathBuf {
        self.experiment_dir(index)
            .join(format!("{}_Writeup {}{}", self.subject, index, PDF_EXTENSION))
    }

    /// `Experiment {i}/{subject}_Codes {i}.pdf`
    pub fn codes_path(&self, index: usize) -> PathBuf {
        self.experiment_dir(index)
            .join(format!("{}_Codes {}{}", self.subject, index, PDF_EXTENSION))
    }

    /// `{subject}_initials.pdf`
    pub fn initials_path(&self) -> PathBuf {
        self.target_dir
            .join(format!("{}_initials{}", self.subject, PDF_EXTENSION))
    }

    /// `{subject}_Assignment {i}.pdf`
    pub fn assignment_path(&self, index: usize) -> PathBuf {
        self.target_dir
            .join(format!("{}_Assignment {}{}", self.subject, index, PDF_EXTENSION))
    }

    pub fn output_dir(&self) -> PathBuf {
        self.target_dir.join("output")
    }

    pub fn individual_merges_dir(&self) -> PathBuf {
        self.output_dir().join("individual_merges")
    }

    /// `output/individual_merges/{id}_{subject}_Experiment_{i}_merged.pdf`
    pub fn individual_merge_path(&self, index: usize) -> PathBuf {
        self.individual_merges_dir().join(format!(
            "{}_{}_Experiment_{}_merged{}",
            self.id_prefix, self.subject, index, PDF_EXTENSION
        ))
    }

    /// `output/{id}_{subject}_Full_Merged.pdf`
    pub fn full_merge_path(&self) -> PathBuf {
        self.output_dir().join(format!(
            "{}_{}_Full_Merged{}",
            self.id_prefix, self.subject, PDF_EXTENSION
        ))
    }
}

/// True if a directory name marks an experiment folder
///
/// Plain prefix check, so `Experimental` qualifies too.
pub fn is_experiment_dir_name(name: &str) -> bool {
    name.starts_with(EXPERIMENT_DIR_PREFIX)
}

/// True if `path` has a file name ending in `.pdf` (case-sensitive)
pub fn has_pdf_suffix(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(PDF_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> CourseLayout {
        CourseLayout::new("/courses/DS", "DS", IdPrefix::from_roll_number(26))
    }

    #[test]
    fn test_id_prefix_from_roll_number() {
        assert_eq!(IdPrefix::from_roll_number(5).as_str(), "C05");
        assert_eq!(IdPrefix::from_roll_number(26).as_str(), "C026");
        assert_eq!(IdPrefix::from_roll_number(99).as_str(), "C099");
        assert_eq!(IdPrefix::from_roll_number(100).as_str(), "C100");
        assert_eq!(IdPrefix::from_roll_number(123).as_str(), "C123");
    }

    #[test]
    fn test_default_id_prefix() {
        assert_eq!(IdPrefix::default().to_string(), "C026");
    }

    #[test]
    fn test_input_paths() {
        let layout = layout();
        assert_eq!(
            layout.writeup_path(3),
            Path::new("/courses/DS/Experiment 3/DS_Writeup 3.pdf")
        );
        assert_eq!(
            layout.codes_path(3),
            Path::new("/courses/DS/Experiment 3/DS_Codes 3.pdf")
        );
        assert_eq!(layout.initials_path(), Path::new("/courses/DS/DS_initials.pdf"));
        assert_eq!(
            layout.assignment_path(2),
            Path::new("/courses/DS/DS_Assignment 2.pdf")
        );
    }

    #[test]
    fn test_output_paths() {
        let layout = layout();
        assert_eq!(
            layout.individual_merge_path(1),
            Path::new("/courses/DS/output/individual_merges/C026_DS_Experiment_1_merged.pdf")
        );
        assert_eq!(
            layout.full_merge_path(),
            Path::new("/courses/DS/output/C026_DS_Full_Merged.pdf")
        );
    }

    #[test]
    fn test_experiment_dir_name() {
        assert!(is_experiment_dir_name("Experiment 1"));
        assert!(is_experiment_dir_name("Experimental"));
        assert!(!is_experiment_dir_name("experiment 1"));
        assert!(!is_experiment_dir_name("Lab 1"));
    }

    #[test]
    fn test_pdf_suffix() {
        assert!(has_pdf_suffix(Path::new("a/Codes 1.pdf")));
        assert!(!has_pdf_suffix(Path::new("a/Codes 1.PDF")));
        assert!(!has_pdf_suffix(Path::new("a/Codes 1.pdf.bak")));
    }
}

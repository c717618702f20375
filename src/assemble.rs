//! Planning and executing a full coursework merge
//!
//! A run merges each experiment's writeup (and optionally its code PDF) into
//! an individual document, then merges the optional initials page, every
//! individual document and any assignments into one final PDF.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::layout::{CourseLayout, IdPrefix};
use crate::pdf::{merge_pdfs, MergeOptions};

/// What to do when an experiment's writeup is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingInputPolicy {
    /// Merge whatever exists; the merge step warns about the writeup
    #[default]
    BestEffort,
    /// Abort the run before anything is written
    FailFast,
}

/// Parameters of one merge run
#[derive(Debug, Clone)]
pub struct MergeJob {
    pub target_dir: PathBuf,
    pub subject: String,
    pub num_experiments: usize,
    pub include_code: bool,
    pub include_initials: bool,
    pub num_assignments: usize,
    pub id_prefix: IdPrefix,
    pub missing_writeup: MissingInputPolicy,
}

impl MergeJob {
    /// A job with code, initials and assignments turned off
    pub fn new(
        target_dir: PathBuf,
        subject: impl Into<String>,
        num_experiments: usize,
        id_prefix: IdPrefix,
    ) -> Self {
        Self {
            target_dir,
            subject: subject.into(),
            num_experiments,
            include_code: false,
            include_initials: false,
            num_assignments: 0,
            id_prefix,
            missing_writeup: MissingInputPolicy::default(),
        }
    }

    pub fn layout(&self) -> CourseLayout {
        CourseLayout::new(self.target_dir.clone(), self.subject.clone(), self.id_prefix.clone())
    }
}

/// Why an input was left out of a merge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Initials,
    Writeup,
    Code,
    Assignment,
}

impl InputKind {
    fn label(self) -> &'static str {
        match self {
            InputKind::Initials => "initials",
            InputKind::Writeup => "writeup",
            InputKind::Code => "code",
            InputKind::Assignment => "assignment",
        }
    }
}

/// A missing input that was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingInput {
    pub kind: InputKind,
    pub path: PathBuf,
}

impl std::fmt::Display for MissingInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} not found. Skipping {} PDF.",
            self.path.display(),
            self.kind.label()
        )
    }
}

/// Inputs and output of one experiment's individual merge
#[derive(Debug, Clone)]
pub struct ExperimentPlan {
    pub index: usize,
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
}

/// Everything a run will read and write, computed before any output exists
#[derive(Debug, Clone)]
pub struct JobPlan {
    pub layout: CourseLayout,
    /// Inputs placed before the experiments (the initials page)
    pub leading: Vec<PathBuf>,
    pub experiments: Vec<ExperimentPlan>,
    /// Inputs placed after the experiments (assignments)
    pub trailing: Vec<PathBuf>,
    pub full_output: PathBuf,
    /// Optional inputs dropped during planning
    pub missing: Vec<MissingInput>,
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct MergeSummary {
    pub individual_dir: PathBuf,
    pub individual_outputs: Vec<PathBuf>,
    pub full_output: PathBuf,
    /// Every input skipped during planning or merging
    pub missing: Vec<MissingInput>,
    pub page_count: usize,
}

/// Build the merge plan for `job` without writing anything
pub fn plan_job(job: &MergeJob) -> Result<JobPlan> {
    let layout = job.layout();
    let mut missing = Vec::new();

    let mut leading = Vec::new();
    if job.include_initials {
        let initials = layout.initials_path();
        if initials.exists() {
            leading.push(initials);
        } else {
            missing.push(MissingInput { kind: InputKind::Initials, path: initials });
        }
    }

    let mut experiments = Vec::with_capacity(job.num_experiments);
    for index in 1..=job.num_experiments {
        let writeup = layout.writeup_path(index);
        if job.missing_writeup == MissingInputPolicy::FailFast && !writeup.exists() {
            return Err(Error::MissingRequiredInput(writeup));
        }

        let mut inputs = vec![writeup];
        if job.include_code {
            let code = layout.codes_path(index);
            if code.exists() {
                inputs.push(code);
            } else {
                missing.push(MissingInput { kind: InputKind::Code, path: code });
            }
        }

        experiments.push(ExperimentPlan {
            index,
            inputs,
            output: layout.individual_merge_path(index),
        });
    }

    let mut trailing = Vec::new();
    for index in 1..=job.num_assignments {
        let assignment = layout.assignment_path(index);
        if assignment.exists() {
            trailing.push(assignment);
        } else {
            missing.push(MissingInput { kind: InputKind::Assignment, path: assignment });
        }
    }

    let full_output = layout.full_merge_path();
    Ok(JobPlan {
        layout,
        leading,
        experiments,
        trailing,
        full_output,
        missing,
    })
}

impl JobPlan {
    /// Inputs of the final merge, in order
    pub fn full_merge_inputs(&self) -> Vec<PathBuf> {
        self.leading
            .iter()
            .cloned()
            .chain(self.experiments.iter().map(|e| e.output.clone()))
            .chain(self.trailing.iter().cloned())
            .collect()
    }

    /// Create the output directories and run every merge in the plan
    pub fn execute(self) -> Result<MergeSummary> {
        let individual_dir = self.layout.individual_merges_dir();
        fs::create_dir_all(&individual_dir)?;

        for missing in &self.missing {
            warn!("{}", missing);
        }
        for initials in &self.leading {
            info!("Initials PDF added to merge list: {}", initials.display());
        }

        let mut missing = self.missing.clone();
        let mut individual_outputs = Vec::with_capacity(self.experiments.len());

        for experiment in &self.experiments {
            let report = merge_pdfs(&MergeOptions {
                input_paths: experiment.inputs.clone(),
                output_path: experiment.output.clone(),
            })?;

            // Only the writeup reaches the merge unchecked
            missing.extend(report.skipped.into_iter().map(|path| MissingInput {
                kind: InputKind::Writeup,
                path,
            }));

            info!(
                experiment = experiment.index,
                pages = report.page_count,
                "Merged {} into {}",
                describe_inputs(&experiment.inputs),
                experiment.output.display()
            );
            individual_outputs.push(experiment.output.clone());
        }

        for assignment in &self.trailing {
            info!("Added assignment PDF to merge list: {}", assignment.display());
        }

        let report = merge_pdfs(&MergeOptions {
            input_paths: self.full_merge_inputs(),
            output_path: self.full_output.clone(),
        })?;
        info!(pages = report.page_count, "Final merge written to {}", self.full_output.display());

        Ok(MergeSummary {
            individual_dir,
            individual_outputs,
            full_output: self.full_output,
            missing,
            page_count: report.page_count,
        })
    }
}

/// Plan and run a full coursework merge
pub fn build_and_merge(job: &MergeJob) -> Result<MergeSummary> {
    plan_job(job)?.execute()
}

fn describe_inputs(inputs: &[PathBuf]) -> String {
    inputs
        .iter()
        .map(|p| display_name(p))
        .collect::<Vec<_>>()
        .join(" + ")
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn job(dir: &Path) -> MergeJob {
        MergeJob::new(dir.to_path_buf(), "Phys", 2, IdPrefix::new("C026"))
    }

    #[test]
    fn test_plan_orders_inputs() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::write(root.join("Phys_initials.pdf"), b"").unwrap();
        fs::write(root.join("Phys_Assignment 1.pdf"), b"").unwrap();

        let job = MergeJob {
            include_initials: true,
            num_assignments: 1,
            ..job(root)
        };
        let plan = plan_job(&job).unwrap();
        let layout = job.layout();

        assert_eq!(
            plan.full_merge_inputs(),
            vec![
                layout.initials_path(),
                layout.individual_merge_path(1),
                layout.individual_merge_path(2),
                layout.assignment_path(1),
            ]
        );
        assert!(plan.missing.is_empty());
    }

    #[test]
    fn test_plan_keeps_unchecked_writeup() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let plan = plan_job(&job(temp_dir.path())).unwrap();

        assert_eq!(plan.experiments.len(), 2);
        assert_eq!(plan.experiments[0].inputs, vec![job(temp_dir.path()).layout().writeup_path(1)]);
        assert!(plan.missing.is_empty());
    }

    #[test]
    fn test_plan_records_missing_optional_inputs() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let job = MergeJob {
            include_code: true,
            include_initials: true,
            num_assignments: 1,
            ..job(temp_dir.path())
        };
        let plan = plan_job(&job).unwrap();

        let kinds: Vec<InputKind> = plan.missing.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![InputKind::Initials, InputKind::Code, InputKind::Code, InputKind::Assignment]
        );
        assert!(plan.leading.is_empty());
        assert!(plan.trailing.is_empty());
    }

    #[test]
    fn test_plan_fail_fast_on_missing_writeup() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let job = MergeJob {
            missing_writeup: MissingInputPolicy::FailFast,
            ..job(temp_dir.path())
        };

        let result = plan_job(&job);
        assert!(matches!(result.unwrap_err(), Error::MissingRequiredInput(_)));
        assert!(!job.layout().output_dir().exists());
    }

    #[test]
    fn test_missing_input_message() {
        let missing = MissingInput {
            kind: InputKind::Code,
            path: PathBuf::from("Experiment 1/Phys_Codes 1.pdf"),
        };
        assert_eq!(
            missing.to_string(),
            "Experiment 1/Phys_Codes 1.pdf not found. Skipping code PDF."
        );
    }
}

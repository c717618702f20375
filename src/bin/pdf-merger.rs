//! PDF Merger CLI tool
//!
//! Merges each experiment's writeup and code PDFs into individual documents
//! and combines them, with optional initials and assignments, into one PDF.

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;

use coursework_pdfs::assemble::{plan_job, JobPlan, MergeJob, MissingInputPolicy};
use coursework_pdfs::layout::IdPrefix;
use coursework_pdfs::logging::init_logger;
use coursework_pdfs::prompt::prompt_merge_job;

/// PDF Merger - Merge experiment PDFs into one complete document
#[derive(Parser)]
#[command(name = "pdf-merger")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Merge 8 DS experiments with their code PDFs
    pdf-merger --target-dir ./DS --subject DS --num 8 --include-code

    # Add the initials page and two assignments, naming outputs by roll number
    pdf-merger --target-dir ./DS --subject DS --num 8 --include-initials --num-assignments 2 --roll-number 26

    # Answer prompts instead of passing flags
    pdf-merger --interactive")]
struct Cli {
    /// Root directory containing the experiment folders
    #[arg(long, required_unless_present = "interactive")]
    target_dir: Option<PathBuf>,

    /// Subject name used in every file name (e.g. DS, OS)
    #[arg(long, required_unless_present = "interactive")]
    subject: Option<String>,

    /// Number of experiments
    #[arg(long, required_unless_present = "interactive")]
    num: Option<usize>,

    /// Include Codes PDFs if available
    #[arg(long)]
    include_code: bool,

    /// Prepend the initials PDF if available
    #[arg(long)]
    include_initials: bool,

    /// Number of assignments
    #[arg(long, default_value_t = 0)]
    num_assignments: usize,

    /// Prefix for output file names
    #[arg(long, default_value = "C026", conflicts_with = "roll_number")]
    id_prefix: String,

    /// Derive the output prefix from a roll number (26 -> C026, 123 -> C123)
    #[arg(long)]
    roll_number: Option<u32>,

    /// Abort if any experiment writeup is missing
    #[arg(long)]
    strict: bool,

    /// Print the merge plan without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Collect the inputs with prompts instead of flags
    #[arg(short, long)]
    interactive: bool,

    /// Show debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let policy = if cli.strict {
        MissingInputPolicy::FailFast
    } else {
        MissingInputPolicy::BestEffort
    };

    let job = if cli.interactive {
        println!("Individual file name format: <roll_no>_<subject>_Experiment_<experiment_number>_merged.pdf");
        println!("Full file name format: <roll_no>_<subject>_Full_Merged.pdf");
        MergeJob {
            missing_writeup: policy,
            ..prompt_merge_job()?
        }
    } else {
        let id_prefix = match cli.roll_number {
            Some(roll_no) => IdPrefix::from_roll_number(roll_no),
            None => IdPrefix::new(cli.id_prefix),
        };
        MergeJob {
            include_code: cli.include_code,
            include_initials: cli.include_initials,
            num_assignments: cli.num_assignments,
            missing_writeup: policy,
            ..MergeJob::new(
                cli.target_dir.context("--target-dir is required")?,
                cli.subject.context("--subject is required")?,
                cli.num.context("--num is required")?,
                id_prefix,
            )
        }
    };

    let plan = plan_job(&job)?;

    if cli.dry_run {
        print_plan(&plan);
        return Ok(());
    }

    eprintln!("Merging PDFs...");
    let summary = plan.execute()?;

    println!();
    println!("Merge complete.");
    if !summary.missing.is_empty() {
        println!("{} input file(s) were missing and skipped", summary.missing.len());
    }
    println!("Individual merges stored in: {}", summary.individual_dir.display());
    println!(
        "Final full merged PDF: {} ({} pages)",
        summary.full_output.display(),
        summary.page_count
    );

    Ok(())
}

fn print_plan(plan: &JobPlan) {
    for experiment in &plan.experiments {
        println!("Experiment {} -> {}", experiment.index, experiment.output.display());
        for input in &experiment.inputs {
            println!("    {}", input.display());
        }
    }

    println!("Full merge -> {}", plan.full_output.display());
    for input in plan.full_merge_inputs() {
        println!("    {}", input.display());
    }

    for missing in &plan.missing {
        println!("Warning: {}", missing);
    }
}

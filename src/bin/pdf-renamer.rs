//! PDF Renamer CLI tool
//!
//! Prepends a string to PDFs in `Experiment N` folders whose names match a
//! pattern.

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;

use coursework_pdfs::logging::init_logger;
use coursework_pdfs::prompt::prompt_rename_options;
use coursework_pdfs::rename::{rename_matching, FilenamePattern, RenameOptions};
use coursework_pdfs::Error;

/// PDF Renamer - Prepend a string to matching PDFs in experiment folders
#[derive(Parser)]
#[command(name = "pdf-renamer")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Turn every 'Experiment N/Codes N.pdf' into 'Experiment N/ML_Codes N.pdf'
    pdf-renamer --target_dir ./ML --filename_pattern \"Codes $.pdf\" --pre_append_string ML_

    # Preview without renaming
    pdf-renamer --target_dir ./ML --filename_pattern \"Codes $.pdf\" --pre_append_string ML_ --dry-run

    # Answer prompts instead of passing flags
    pdf-renamer --interactive")]
struct Cli {
    /// Path to the parent directory containing experiment folders
    #[arg(long = "target_dir", alias = "target-dir", required_unless_present = "interactive")]
    target_dir: Option<PathBuf>,

    /// Pattern of filenames to detect (e.g., 'Codes $.pdf'); only the part before $ is matched
    #[arg(long = "filename_pattern", alias = "filename-pattern", required_unless_present = "interactive")]
    filename_pattern: Option<String>,

    /// String to prepend to the filename (e.g., 'ML_')
    #[arg(long = "pre_append_string", alias = "pre-append-string", required_unless_present = "interactive")]
    pre_append_string: Option<String>,

    /// Show what would be renamed without renaming anything
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
        // A missing target directory is reported but is not a failed run
        if let Some(Error::DirectoryNotFound(_)) = e.downcast_ref::<Error>() {
            eprintln!("Error: {}", e);
            return;
        }
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let options = if cli.interactive {
        println!("PDF Renamer for Experiment Folders");
        RenameOptions {
            dry_run: cli.dry_run,
            ..prompt_rename_options()?
        }
    } else {
        RenameOptions {
            target_dir: cli.target_dir.context("--target_dir is required")?,
            pattern: FilenamePattern::parse(
                cli.filename_pattern.context("--filename_pattern is required")?,
            ),
            prepend: cli.pre_append_string.context("--pre_append_string is required")?,
            dry_run: cli.dry_run,
        }
    };

    let report = rename_matching(&options)?;

    if report.renames.is_empty() {
        println!(
            "No files matching '{}' found in experiment folders of {}",
            options.pattern,
            options.target_dir.display()
        );
    } else if report.dry_run {
        println!("{} file(s) would be renamed", report.renames.len());
    } else {
        println!("Renamed {} file(s)", report.renames.len());
    }

    Ok(())
}

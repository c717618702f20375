//! Interactive prompts producing the same options as the command-line flags

use std::path::PathBuf;

use dialoguer::{Confirm, Input};

use crate::assemble::MergeJob;
use crate::error::Result;
use crate::layout::IdPrefix;
use crate::rename::{FilenamePattern, RenameOptions};

fn ask_text(prompt: &str) -> Result<String> {
    let answer: String = Input::new().with_prompt(prompt).interact_text()?;
    Ok(answer.trim().to_string())
}

fn ask_number(prompt: &str, default: Option<usize>) -> Result<usize> {
    let mut input = Input::<usize>::new().with_prompt(prompt);
    if let Some(default) = default {
        input = input.default(default);
    }
    Ok(input.interact_text()?)
}

fn ask_yes_no(prompt: &str) -> Result<bool> {
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

/// Ask for the renamer's target directory, pattern and prepend string
pub fn prompt_rename_options() -> Result<RenameOptions> {
    let target_dir = ask_text("Enter path to parent directory")?;
    let pattern = ask_text("Enter filename pattern to match (e.g., 'Codes $.pdf')")?;
    let prepend = ask_text("Enter string to prepend to matching files")?;

    Ok(RenameOptions {
        target_dir: PathBuf::from(target_dir),
        pattern: FilenamePattern::parse(pattern),
        prepend,
        dry_run: false,
    })
}

/// Ask for everything a merge run needs, deriving the id prefix from a roll number
pub fn prompt_merge_job() -> Result<MergeJob> {
    let roll_no: u32 = Input::new()
        .with_prompt("Enter roll number (used in output file names)")
        .interact_text()?;
    let target_dir = ask_text("Enter target directory path")?;
    let subject = ask_text("Enter the subject name (e.g., DS, OS)")?;
    let num_experiments = ask_number("Enter number of experiments", None)?;
    let include_code = ask_yes_no("Are there code PDFs?")?;
    let num_assignments = ask_number("Enter number of assignments", Some(0))?;
    let include_initials = ask_yes_no("Include initials PDF?")?;

    Ok(MergeJob {
        include_code,
        include_initials,
        num_assignments,
        ..MergeJob::new(
            PathBuf::from(target_dir),
            subject,
            num_experiments,
            IdPrefix::from_roll_number(roll_no),
        )
    })
}

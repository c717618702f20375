//! Error types for the coursework PDF tools

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the coursework PDF library
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Interactive prompt failed (closed terminal, bad input stream)
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// Target directory missing or not a directory
    #[error("The directory '{}' does not exist.", .0.display())]
    DirectoryNotFound(PathBuf),

    /// A planned rename would overwrite an existing file
    #[error("Cannot rename {} -> {}: target already exists", .from.display(), .to.display())]
    RenameCollision { from: PathBuf, to: PathBuf },

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A required merge input (the experiment writeup) is missing
    #[error("Required file not found: {}", .0.display())]
    MissingRequiredInput(PathBuf),

    /// General error
    #[error("{0}")]
    General(String),
}

//! Coursework PDF Library
//!
//! Tools for organizing lab coursework PDFs laid out as `Experiment N/`
//! folders under a subject directory. This library provides functionality to:
//! - Prepend a string to PDFs in experiment folders that match a name pattern
//! - Plan and merge per-experiment writeup/code PDFs into individual documents
//! - Merge initials, individual merges and assignments into one final PDF
//!
//! # Example
//!
//! ```no_run
//! use coursework_pdfs::assemble::{build_and_merge, MergeJob};
//! use coursework_pdfs::layout::IdPrefix;
//! use std::path::PathBuf;
//!
//! let job = MergeJob {
//!     include_code: true,
//!     ..MergeJob::new(PathBuf::from("DS"), "DS", 8, IdPrefix::from_roll_number(26))
//! };
//!
//! let summary = build_and_merge(&job).expect("Failed to merge coursework");
//! println!("{}", summary.full_output.display());
//! ```

pub mod assemble;
pub mod error;
pub mod layout;
pub mod logging;
pub mod pdf;
pub mod prompt;
pub mod rename;

// Re-export commonly used items
pub use error::{Error, Result};

//! PDF merging functionality using lopdf

use std::collections::{BTreeMap, HashSet};
use std::io::Write;
use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, ObjectId};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::Result;

/// Options for merging PDFs
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Candidate PDF paths in the order they should be merged
    pub input_paths: Vec<PathBuf>,
    /// Output PDF file path
    pub output_path: PathBuf,
}

/// What a merge actually did with its candidates
#[derive(Debug, Clone, Default)]
pub struct MergeReport {
    /// Inputs appended to the output, in order
    pub merged: Vec<PathBuf>,
    /// Inputs skipped because they were not on disk
    pub skipped: Vec<PathBuf>,
    /// Pages in the written document
    pub page_count: usize,
}

/// Merge the existing PDFs among `input_paths` into a single PDF
///
/// Missing candidates are skipped with a warning. An empty or all-missing
/// list still writes a valid PDF with no pages. The output is written to a
/// temporary file next to `output_path` and moved into place at the end.
///
/// Based on the lopdf merge example:
/// https://github.com/J-F-Liu/lopdf/blob/main/examples/merge.rs
///
/// # Example
///
/// ```no_run
/// use coursework_pdfs::pdf::{MergeOptions, merge_pdfs};
/// use std::path::PathBuf;
///
/// let options = MergeOptions {
///     input_paths: vec![
///         PathBuf::from("Experiment 1/DS_Writeup 1.pdf"),
///         PathBuf::from("Experiment 1/DS_Codes 1.pdf"),
///     ],
///     output_path: PathBuf::from("C026_DS_Experiment_1_merged.pdf"),
/// };
///
/// merge_pdfs(&options).expect("Failed to merge");
/// ```
pub fn merge_pdfs(options: &MergeOptions) -> Result<MergeReport> {
    let mut report = MergeReport::default();

    // Load the documents that exist, skip the rest
    let mut documents: Vec<Document> = Vec::new();
    for path in &options.input_paths {
        if !path.exists() {
            warn!("{} not found. Skipping.", path.display());
            report.skipped.push(path.clone());
            continue;
        }

        debug!(path = %path.display(), "loading");
        documents.push(Document::load(path)?);
        report.merged.push(path.clone());
    }

    let mut merged_doc = concatenate(documents);
    report.page_count = merged_doc.get_pages().len();

    merged_doc.compress();
    save_atomically(&mut merged_doc, &options.output_path)?;

    Ok(report)
}

/// Concatenate the pages of `documents` in order into a new document
fn concatenate(documents: Vec<Document>) -> Document {
    // Define a starting max_id for merged document
    let mut max_id = 1;
    let mut page_ids: Vec<ObjectId> = Vec::new();
    let mut objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for mut doc in documents {
        // Renumber objects in this document to avoid conflicts
        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        // get_pages is keyed by page number, so this keeps page order
        let pages = doc.get_pages();
        for &page_id in pages.values() {
            // The old page tree is dropped, so pull inherited attributes down first
            inherit_page_attributes(&mut doc, page_id);
        }
        page_ids.extend(pages.into_values());

        objects.extend(doc.objects);
    }

    let mut merged_doc = Document::with_version("1.5");
    merged_doc.objects.extend(objects);

    // new_object_id() must hand out IDs above everything copied in
    merged_doc.max_id = max_id - 1;

    let pages_id = merged_doc.new_object_id();

    let kids: Vec<Object> = page_ids
        .iter()
        .map(|&id| Object::Reference(id))
        .collect();

    let mut pages_object = Dictionary::new();
    pages_object.set("Type", Object::Name(b"Pages".to_vec()));
    pages_object.set("Count", Object::Integer(page_ids.len() as i64));
    pages_object.set("Kids", Object::Array(kids));

    let catalog_id = merged_doc.new_object_id();
    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));

    merged_doc.objects.insert(catalog_id, Object::Dictionary(catalog));
    merged_doc.objects.insert(pages_id, Object::Dictionary(pages_object));
    merged_doc.trailer.set("Root", Object::Reference(catalog_id));

    // Re-parent every page under the new page tree
    for &page_id in &page_ids {
        if let Ok(Object::Dictionary(dict)) = merged_doc.get_object_mut(page_id) {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }

    merged_doc
}

/// Page attributes a page may inherit from its page-tree ancestors
const INHERITABLE_KEYS: [&[u8]; 4] = [b"MediaBox", b"Resources", b"CropBox", b"Rotate"];

/// Copy attributes `page_id` inherits through its `Parent` chain onto the page
///
/// Values set on the page itself win; otherwise the nearest ancestor's value
/// is used.
fn inherit_page_attributes(doc: &mut Document, page_id: ObjectId) {
    let mut inherited: Vec<(&'static [u8], Object)> = Vec::new();

    {
        let Ok(Object::Dictionary(page)) = doc.get_object(page_id) else {
            return;
        };

        let mut missing: Vec<&'static [u8]> = INHERITABLE_KEYS
            .iter()
            .copied()
            .filter(|key| !page.has(key))
            .collect();
        let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
        let mut visited = HashSet::new();

        while let Some(parent_id) = parent {
            // Stop on malformed trees that loop back on themselves
            if missing.is_empty() || !visited.insert(parent_id) {
                break;
            }
            let Ok(Object::Dictionary(node)) = doc.get_object(parent_id) else {
                break;
            };

            missing.retain(|key| match node.get(key) {
                Ok(value) => {
                    inherited.push((*key, value.clone()));
                    false
                }
                Err(_) => true,
            });
            parent = node.get(b"Parent").and_then(Object::as_reference).ok();
        }
    }

    if inherited.is_empty() {
        return;
    }
    if let Ok(Object::Dictionary(page)) = doc.get_object_mut(page_id) {
        for (key, value) in inherited {
            page.set(key.to_vec(), value);
        }
    }
}

/// Write `doc` to a temp file beside `output_path`, then move it into place
fn save_atomically(doc: &mut Document, output_path: &Path) -> Result<()> {
    let dir = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    doc.save_to(&mut temp)?;
    temp.flush()?;
    temp.persist(output_path).map_err(|e| e.error)?;

    Ok(())
}

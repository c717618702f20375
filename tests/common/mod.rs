//! Shared helpers for building coursework trees in a temp directory

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use lopdf::{dictionary, Document, Object, ObjectId, Stream};

/// Dictionary key each fixture page carries to identify it after a merge
const MARKER_KEY: &[u8] = b"FixtureMarker";

/// Write a PDF whose pages are tagged with `markers`, in order
pub fn write_marked_pdf(path: &Path, markers: &[&str]) {
    write_fixture(path, markers, false);
}

/// Like [`write_marked_pdf`], but `MediaBox` and `Resources` live only on the
/// `Pages` node, so every page inherits them
pub fn write_inheriting_pdf(path: &Path, markers: &[&str]) {
    write_fixture(path, markers, true);
}

fn write_fixture(path: &Path, markers: &[&str], inherit: bool) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources = dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    };
    let media_box: Vec<Object> = vec![0.into(), 0.into(), 612.into(), 792.into()];

    let mut kids = Vec::new();
    for marker in markers {
        let content = format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET", marker);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "FixtureMarker" => Object::string_literal(*marker),
        };
        if !inherit {
            page.set("MediaBox", media_box.clone());
            page.set("Resources", resources.clone());
        }
        let page_id = doc.add_object(page);
        kids.push(Object::Reference(page_id));
    }

    let mut pages = dictionary! {
        "Type" => "Pages",
        "Count" => kids.len() as i64,
        "Kids" => kids,
    };
    if inherit {
        pages.set("MediaBox", media_box);
        pages.set("Resources", resources);
    }
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc.save(path).expect("Failed to save fixture PDF");
}

/// Look up `key` on a page, falling back to its page-tree ancestors
pub fn page_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut node_id = Some(page_id);
    while let Some(id) = node_id {
        let node = doc.get_dictionary(id).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        node_id = node.get(b"Parent").and_then(Object::as_reference).ok();
    }
    None
}

/// Page markers of a PDF, in page order
pub fn read_markers(path: &Path) -> Vec<String> {
    let doc = Document::load(path).expect("Failed to load PDF");
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let page = doc
                .get_object(page_id)
                .and_then(Object::as_dict)
                .expect("Page is not a dictionary");
            let marker = page
                .get(MARKER_KEY)
                .and_then(Object::as_str)
                .expect("Page has no marker");
            String::from_utf8_lossy(marker).into_owned()
        })
        .collect()
}

/// Create an empty file (with parent directories)
pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create directory");
    }
    fs::write(path, b"").expect("Failed to create file");
}

/// Sorted relative paths of every file and directory under `root`
pub fn snapshot(root: &Path) -> Vec<PathBuf> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<PathBuf>) {
        for entry in fs::read_dir(dir).expect("Failed to read directory") {
            let path = entry.expect("Failed to read entry").path();
            out.push(path.strip_prefix(root).unwrap().to_path_buf());
            if path.is_dir() {
                walk(root, &path, out);
            }
        }
    }

    let mut out = Vec::new();
    if root.exists() {
        walk(root, root, &mut out);
    }
    out.sort();
    out
}

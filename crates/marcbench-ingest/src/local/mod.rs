//! Local document folders
//!
//! Expected layout:
//!
//! ```text
//! root/
//!   doc_001/
//!     page_texts.json   {"doc_index": 1, "page_texts": ["Title: A", "Body: B"]}
//!     scan1.png
//!   doc_002/
//!     ...
//! ```
//!
//! A folder without `page_texts.json` is not a document and is skipped. A
//! `page_texts.json` that does not parse aborts the whole load.

use marcbench_common::{BenchError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use crate::normalize::{ColumnHints, RawItem, SourceBatch};

/// Name prefix of document folders
pub const DOCUMENT_DIR_PREFIX: &str = "doc_";

/// Per-document metadata file
pub const PAGE_TEXTS_FILE: &str = "page_texts.json";

/// Recognised scan extensions (compared case-insensitively)
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff", "webp"];

#[derive(Debug, Deserialize)]
struct PageTexts {
    #[serde(default)]
    doc_index: Option<Value>,
    #[serde(default)]
    page_texts: Vec<Option<String>>,
}

/// Adapter reading a directory of document folders
#[derive(Debug, Clone)]
pub struct LocalDirectoryAdapter {
    folder_prefix: String,
    metadata_file: String,
}

impl Default for LocalDirectoryAdapter {
    fn default() -> Self {
        Self {
            folder_prefix: DOCUMENT_DIR_PREFIX.to_string(),
            metadata_file: PAGE_TEXTS_FILE.to_string(),
        }
    }
}

impl LocalDirectoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_folder_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.folder_prefix = prefix.into();
        self
    }

    /// Read every document folder under `root`, in lexicographic folder order
    #[instrument(skip(self), fields(root = %root.display()))]
    pub fn load(&self, root: &Path) -> Result<SourceBatch> {
        if !root.is_dir() {
            return Err(BenchError::validation(format!(
                "dataset path '{}' is not a readable directory",
                root.display()
            )));
        }

        let mut items = Vec::new();
        let mut skipped = 0usize;

        for folder in self.document_folders(root)? {
            match self.read_document(&folder)? {
                Some(item) => items.push(item),
                None => skipped += 1,
            }
        }

        info!(documents = items.len(), skipped, "Read local document folders");

        Ok(SourceBatch {
            items,
            hints: ColumnHints::default(),
        })
    }

    fn document_folders(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut folders = Vec::new();

        for entry in WalkDir::new(root).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            let is_document = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(&self.folder_prefix));

            if is_document && entry.path().is_dir() {
                folders.push(entry.into_path());
            }
        }

        Ok(folders)
    }

    fn read_document(&self, folder: &Path) -> Result<Option<RawItem>> {
        let metadata_path = folder.join(&self.metadata_file);
        if !metadata_path.is_file() {
            debug!(folder = %folder.display(), "Skipping folder without {}", self.metadata_file);
            return Ok(None);
        }

        let bytes = std::fs::read(&metadata_path)?;
        let parsed: PageTexts = serde_json::from_slice(&bytes)
            .map_err(|e| BenchError::malformed(metadata_path.display().to_string(), e))?;

        let text = join_page_texts(&parsed.page_texts);
        let id = match parsed.doc_index {
            Some(index) if !index.is_null() => index,
            _ => Value::String(folder_name(folder)),
        };
        let images = discover_images(folder)?
            .into_iter()
            .map(Value::String)
            .collect();

        let mut item = RawItem::new();
        item.insert("id".to_string(), id);
        item.insert("images".to_string(), Value::Array(images));
        // This source has no separate reference text; both fields carry the page text.
        item.insert("metadata".to_string(), Value::String(text.clone()));
        item.insert("unimarc".to_string(), Value::String(text));

        Ok(Some(item))
    }
}

fn folder_name(folder: &Path) -> String {
    folder
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Join the non-empty page texts with newlines
fn join_page_texts(pages: &[Option<String>]) -> String {
    pages
        .iter()
        .flatten()
        .filter(|text| !text.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Image files directly inside `folder`, sorted by file name
fn discover_images(folder: &Path) -> Result<Vec<String>> {
    let mut images = Vec::new();

    for entry in WalkDir::new(folder).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.path().is_file() && has_image_extension(entry.path()) {
            images.push(entry.path().to_string_lossy().into_owned());
        }
    }

    Ok(images)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

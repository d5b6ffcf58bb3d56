use crate::error::CollectionError;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

lazy_static! {
    static ref DOC_RE: Regex = Regex::new(r"(?s)<DOC>(.*?)</DOC>").expect("valid regex");
    static ref DOCNO_RE: Regex = Regex::new(r"<DOCNO>(.*?)</DOCNO>").expect("valid regex");
    static ref TEXT_RE: Regex = Regex::new(r"(?s)<TEXT>(.*?)</TEXT>").expect("valid regex");
}

/// One `<DOC>` record as found in the collection, before indexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub docno: Option<String>,
    pub text: Option<String>,
}

/// Read every file under `root` (recursively, in sorted path order) and concatenate the contents.
///
/// A file that is not valid UTF-8 is decoded as Latin-1.
pub fn load_collection_text(root: &Path) -> Result<String, CollectionError> {
    if !root.exists() {
        return Err(CollectionError::NotFound { path: root.to_path_buf() });
    }

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            CollectionError::io(path, e.into())
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    files.sort();

    let mut content = String::new();
    for file in &files {
        let bytes = fs::read(file).map_err(|e| CollectionError::io(file, e))?;
        content.push_str(&decode(bytes));
    }
    tracing::info!(files = files.len(), root = %root.display(), "loaded collection files");
    Ok(content)
}

fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        // Latin-1 maps each byte to the code point of the same value.
        Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
    }
}

/// Split concatenated collection text into `<DOC>` records.
pub fn parse_documents(content: &str) -> Vec<RawDocument> {
    DOC_RE
        .captures_iter(content)
        .map(|doc| {
            let body = doc.get(1).map_or("", |m| m.as_str());
            RawDocument {
                docno: DOCNO_RE.captures(body).map(|c| c[1].trim().to_string()),
                text: TEXT_RE.captures(body).map(|c| c[1].trim().to_string()),
            }
        })
        .collect()
}

/// Load and parse a collection directory (or a single file).
pub fn load_documents(root: &Path) -> Result<Vec<RawDocument>, CollectionError> {
    let content = load_collection_text(root)?;
    let docs = parse_documents(&content);
    tracing::info!(records = docs.len(), "parsed document records");
    Ok(docs)
}

use crate::document::{DocId, DocumentStatus};
use crate::error::SearchError;
use crate::index::SearchIndex;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InputDoc {
    pub id: DocId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("I/O error reading {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("invalid JSON in {path}: {source}")]
    Json { path: PathBuf, source: serde_json::Error },

    #[error("document {id} from {path} rejected: {source}")]
    Rejected { id: DocId, path: PathBuf, source: SearchError },
}

/// Every `.json`/`.jsonl` file under `input`, sorted by path. A file path is
/// returned as is.
pub fn input_files(input: &Path) -> Vec<PathBuf> {
    if input.is_file() {
        return vec![input.to_path_buf()];
    }
    let mut files: Vec<PathBuf> = WalkDir::new(input)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file())
        .filter(|p| matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")))
        .collect();
    files.sort();
    files
}

/// Reads documents from a JSON file (array or single object) or a JSONL file.
pub fn read_documents(path: &Path) -> Result<Vec<InputDoc>, LoadError> {
    let io_err = |source| LoadError::Io { path: path.to_path_buf(), source };
    let json_err = |source| LoadError::Json { path: path.to_path_buf(), source };
    let reader = BufReader::new(File::open(path).map_err(io_err)?);

    if path.extension().and_then(|s| s.to_str()) == Some("jsonl") {
        let mut docs = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(io_err)?;
            if line.trim().is_empty() {
                continue;
            }
            docs.push(serde_json::from_str(&line).map_err(json_err)?);
        }
        return Ok(docs);
    }

    let json: serde_json::Value = serde_json::from_reader(reader).map_err(json_err)?;
    if json.is_array() {
        serde_json::from_value(json).map_err(json_err)
    } else {
        Ok(vec![serde_json::from_value(json).map_err(json_err)?])
    }
}

/// Loads every document under `input` into `index`, stopping at the first
/// failure. Returns the number of documents added.
pub fn load_into(index: &mut SearchIndex, input: &Path) -> Result<usize, LoadError> {
    let mut added = 0;
    for file in input_files(input) {
        for doc in read_documents(&file)? {
            index
                .add_document(doc.id, &doc.text, doc.status, &doc.ratings)
                .map_err(|source| LoadError::Rejected { id: doc.id, path: file.clone(), source })?;
            added += 1;
        }
        tracing::debug!(file = %file.display(), "loaded input file");
    }
    tracing::info!(added, total = index.document_count(), "ingested documents");
    Ok(added)
}

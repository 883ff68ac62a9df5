use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("report path has no file name: {0:?}")]
    NoFileName(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode summary: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Machine-readable companion to the text report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchSummary {
    pub pattern: String,
    pub searched: usize,
    pub matched: Vec<String>,
    pub elapsed_ms: u64,
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

/// Writes report files so readers never observe a half-written file.
///
/// Content goes to a temp file in the target directory, which is then renamed
/// over the destination in one step; an existing file stays in place until then.
#[derive(Debug, Clone, Default)]
pub struct ReportWriter;

impl ReportWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_text(&self, path: &Path, content: &str) -> Result<PathBuf, PersistError> {
        let (dir, target) = split_target(path)?;
        ensure_output_dir(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }

    pub fn write_summary(
        &self,
        path: &Path,
        summary: &SearchSummary,
    ) -> Result<PathBuf, PersistError> {
        let content = serde_json::to_string_pretty(summary)?;
        self.write_text(path, &content)
    }
}

fn split_target(path: &Path) -> Result<(PathBuf, PathBuf), PersistError> {
    if path.file_name().is_none() {
        return Err(PersistError::NoFileName(path.to_path_buf()));
    }
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, path.to_path_buf()))
}

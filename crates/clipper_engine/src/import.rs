use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clipper_logging::clip_info;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::filename::note_filename;
use crate::frontmatter::build_note_document;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("vault directory missing or not writable: {0}")]
    VaultDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// A selected review item reduced to what its note needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNote {
    pub url: String,
    pub title: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
    pub skipped_titles: Vec<String>,
}

/// Ensure the vault directory exists; create if missing.
pub fn ensure_vault_dir(dir: &Path) -> Result<(), ImportError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| ImportError::VaultDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(ImportError::VaultDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| ImportError::VaultDir(e.to_string()))?;
    }
    // Basic writability probe: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| ImportError::VaultDir(e.to_string()))?;
    Ok(())
}

/// Materializes selected items as frontmatter-only notes in the vault.
pub struct NoteImporter {
    vault_dir: PathBuf,
    url_key: String,
}

impl NoteImporter {
    pub fn new(vault_dir: PathBuf, url_key: impl Into<String>) -> Self {
        Self {
            vault_dir,
            url_key: url_key.into(),
        }
    }

    /// Imports every note, counting name collisions as skips.
    ///
    /// A collision never aborts the batch; any other IO failure does.
    pub fn import(&self, notes: &[PendingNote]) -> Result<ImportReport, ImportError> {
        ensure_vault_dir(&self.vault_dir)?;

        let mut report = ImportReport::default();
        for note in notes {
            let filename = note_filename(&note.title);
            let content = build_note_document(&self.url_key, &note.url, &note.tags);
            match self.create_note(&filename, &content) {
                Ok(()) => report.imported += 1,
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                    clip_info!("note already exists, skipping: {}", filename);
                    report.skipped += 1;
                    report.skipped_titles.push(note.title.clone());
                }
                Err(err) => return Err(ImportError::Io(err)),
            }
        }
        Ok(report)
    }

    fn create_note(&self, filename: &str, content: &str) -> io::Result<()> {
        let target = self.vault_dir.join(filename);
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(target)?;
        file.write_all(content.as_bytes())?;
        file.flush()
    }
}

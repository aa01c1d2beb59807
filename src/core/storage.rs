//! Persistence of translated documents
//!
//! Results land in one directory as `translated_<N>.txt`, where `N` is one
//! more than the largest suffix already present. The number comes from a
//! directory scan, not a stored counter, so two writers can compute the same
//! `N`. Files are opened with create-new semantics and a taken `N` moves the
//! writer on to the next one instead of overwriting.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::core::errors::{Result, TranslationError};

const MAX_CLAIM_ATTEMPTS: u32 = 64;

fn result_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^translated_(\d+)\.txt$").expect("valid regex"))
}

/// Output directory for translated documents
#[derive(Debug, Clone)]
pub struct ResultStore {
    dir: PathBuf,
}

impl ResultStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the directory (mode 0777 on unix) if it is missing
    pub async fn ensure_dir(&self) -> Result<()> {
        if tokio::fs::metadata(&self.dir).await.is_ok() {
            return Ok(());
        }

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| self.file_error(&self.dir, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&self.dir, std::fs::Permissions::from_mode(0o777))
                .await
                .map_err(|e| self.file_error(&self.dir, e))?;
        }

        debug!("Created output directory {}", self.dir.display());
        Ok(())
    }

    /// One more than the largest `translated_<N>.txt` suffix; 1 when none exist
    pub fn next_index(&self) -> Result<u64> {
        let mut max = 0u64;

        for entry in WalkDir::new(&self.dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| TranslationError::FileError {
                path: self.dir.display().to_string(),
                message: e.to_string(),
            })?;

            let name = entry.file_name().to_string_lossy();
            let index = result_name_pattern()
                .captures(&name)
                .and_then(|caps| caps[1].parse::<u64>().ok());

            if let Some(index) = index {
                max = max.max(index);
            }
        }

        max.checked_add(1).ok_or_else(|| self.exhausted())
    }

    /// [`ResultStore::next_index`] on the blocking pool
    pub async fn scan_next_index(&self) -> Result<u64> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.next_index())
            .await
            .map_err(|e| TranslationError::InternalError(format!("directory scan failed: {}", e)))?
    }

    /// Path for a given index
    pub fn path_for(&self, index: u64) -> PathBuf {
        self.dir.join(format!("translated_{}.txt", index))
    }

    /// Write a result body to the next free `translated_<N>.txt`
    pub async fn persist(&self, body: &[u8]) -> Result<PathBuf> {
        self.ensure_dir().await?;

        let mut index = self.scan_next_index().await?;
        for _ in 0..MAX_CLAIM_ATTEMPTS {
            let path = self.path_for(index);
            let opened = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await;

            match opened {
                Ok(mut file) => {
                    file.write_all(body)
                        .await
                        .map_err(|e| self.file_error(&path, e))?;
                    file.flush().await.map_err(|e| self.file_error(&path, e))?;

                    info!("Saved translated document to {}", path.display());
                    return Ok(path);
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    debug!("{} already taken, trying next index", path.display());
                    index = index.checked_add(1).ok_or_else(|| self.exhausted())?;
                }
                Err(e) => return Err(self.file_error(&path, e)),
            }
        }

        Err(TranslationError::FileError {
            path: self.dir.display().to_string(),
            message: format!("no free result name after {} attempts", MAX_CLAIM_ATTEMPTS),
        })
    }

    fn exhausted(&self) -> TranslationError {
        TranslationError::FileError {
            path: self.dir.display().to_string(),
            message: "result numbering exhausted".to_string(),
        }
    }

    fn file_error(&self, path: &Path, e: std::io::Error) -> TranslationError {
        TranslationError::FileError {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    }
}

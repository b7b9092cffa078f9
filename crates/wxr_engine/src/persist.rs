use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory {path:?} missing or not writable: {message}")]
    OutputDir { path: PathBuf, message: String },
    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Ensure the output directory exists, creating it (and parents) if missing.
///
/// Idempotent. Fails if the path is occupied by something other than a
/// directory. Permission problems surface on the first write, which names
/// the file it was writing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    let output_dir_err = |message: String| PersistError::OutputDir {
        path: dir.to_path_buf(),
        message,
    };
    if dir.exists() && !dir.is_dir() {
        return Err(output_dir_err("path is not a directory".into()));
    }
    fs::create_dir_all(dir).map_err(|e| output_dir_err(e.to_string()))
}

/// A file that landed in the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub bytes: u64,
    /// A file of the same name existed before this write.
    pub replaced: bool,
}

/// Writes whole files into one directory via temp file + rename, so a
/// reader never observes a half-written document.
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `content` to `{dir}/{filename}`, replacing any existing file.
    pub fn write(&self, filename: &str, content: &str) -> Result<WrittenFile, PersistError> {
        let target = self.dir.join(filename);
        let io_err = |source: io::Error| PersistError::Io {
            path: target.clone(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(io_err)?;
        tmp.write_all(content.as_bytes()).map_err(io_err)?;
        tmp.flush().map_err(io_err)?;
        tmp.as_file_mut().sync_all().map_err(io_err)?;

        // The rename replaces an existing file in one step; the old document
        // stays in place if it fails.
        let replaced = target.is_file();
        tmp.persist(&target).map_err(|e| io_err(e.error))?;
        Ok(WrittenFile {
            path: target,
            bytes: content.len() as u64,
            replaced,
        })
    }
}

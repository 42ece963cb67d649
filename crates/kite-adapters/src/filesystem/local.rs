//! Local filesystem adapter using std::fs.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use kite_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{KiteError, KiteResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn dir_exists(&self, path: &Path) -> KiteResult<bool> {
        probe(path).map(|meta| meta.is_some_and(|m| m.is_dir()))
    }

    fn file_exists(&self, path: &Path) -> KiteResult<bool> {
        probe(path).map(|meta| meta.is_some())
    }

    fn create_dir_all(&self, path: &Path) -> KiteResult<()> {
        fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_new(&self, path: &Path, content: &str) -> KiteResult<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => ApplicationError::FileExists {
                    path: path.to_path_buf(),
                }
                .into(),
                _ => map_io_error(path, e, "create file"),
            })?;

        file.write_all(content.as_bytes())
            .map_err(|e| map_io_error(path, e, "write file"))
    }
}

/// Metadata for `path`, `None` when nothing is there.
fn probe(path: &Path) -> KiteResult<Option<fs::Metadata>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta)),
        Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
            Ok(None)
        }
        Err(e) => Err(map_io_error(path, e, "inspect")),
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> KiteError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}

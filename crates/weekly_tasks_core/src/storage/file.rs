//! File-per-record backend.
//!
//! # Invariants
//! - Writes go to a sibling temp file that is renamed over the target, so a
//!   crash mid-write leaves the previous payload intact.

use super::{StorageBackend, StorageResult};
use log::{error, warn};
use std::ffi::OsString;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

const TEMP_SUFFIX: &str = ".tmp";

/// Record stored as one UTF-8 file on disk.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
    temp_path: PathBuf,
}

impl FileBackend {
    /// Uses `path` as the record file. Parent directories are created lazily
    /// on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut temp_name = path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| OsString::from("record"));
        temp_name.push(TEMP_SUFFIX);
        let temp_path = path.with_file_name(temp_name);
        Self { path, temp_path }
    }

    /// Uses `<dir>/<record_key>.json` as the record file.
    pub fn in_dir(dir: impl AsRef<Path>, record_key: &str) -> Self {
        Self::new(dir.as_ref().join(format!("{record_key}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for FileBackend {
    fn read(&self) -> StorageResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => {
                error!(
                    "event=record_read module=storage status=error backend=file error={}",
                    err
                );
                Err(err.into())
            }
        }
    }

    fn write(&self, raw: &str) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let result = (|| -> std::io::Result<()> {
            let mut file = fs::File::create(&self.temp_path)?;
            file.write_all(raw.as_bytes())?;
            file.sync_all()?;
            fs::rename(&self.temp_path, &self.path)
        })();

        if let Err(err) = result {
            error!(
                "event=record_write module=storage status=error backend=file error={}",
                err
            );
            if let Err(cleanup_err) = fs::remove_file(&self.temp_path) {
                if cleanup_err.kind() != ErrorKind::NotFound {
                    warn!(
                        "event=record_write module=storage status=cleanup_failed backend=file error={}",
                        cleanup_err
                    );
                }
            }
            return Err(err.into());
        }

        Ok(())
    }
}

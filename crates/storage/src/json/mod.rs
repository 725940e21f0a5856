use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use attendance_core::model::Record;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::repository::{RecordRepository, StorageError};

mod mapping;

pub use mapping::{Decoded, SourceShape, decode, encode};

/// Default data file name, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "attendance_pro_data.json";

/// Stores the record as a single JSON document.
#[derive(Clone, Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordRepository for JsonFileRepository {
    async fn load(&self) -> Record {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no data file yet, starting with defaults");
                return Record::default();
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "data file unreadable, starting with defaults");
                return Record::default();
            }
        };

        let decoded = decode(&text);
        match decoded.shape {
            SourceShape::Corrupt => {
                warn!(path = %self.path.display(), "data file is not a JSON object, starting with defaults");
            }
            SourceShape::Legacy => {
                info!(path = %self.path.display(), "migrated legacy single-student data file");
            }
            SourceShape::Unrecognized => {
                warn!(path = %self.path.display(), "data file has no students, seeded default student");
            }
            SourceShape::Current => {}
        }
        if decoded.repairs > 0 {
            warn!(
                path = %self.path.display(),
                repairs = decoded.repairs,
                "repaired malformed entries in data file"
            );
        }
        decoded.record
    }

    async fn save(&self, record: &Record) -> Result<(), StorageError> {
        let text = encode(record)?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_replacing(&path, &text))
            .await
            .map_err(|e| StorageError::Internal(e.to_string()))?
    }
}

/// Write `contents` to a sibling temp file and move it over `path`, so the
/// target is either the old document or the new one.
fn write_replacing(path: &Path, contents: &str) -> Result<(), StorageError> {
    let write_err = |err: std::io::Error| StorageError::Write {
        path: path.to_path_buf(),
        message: err.to_string(),
    };

    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(write_err)?;

    let mut temp = NamedTempFile::new_in(parent).map_err(write_err)?;
    temp.write_all(contents.as_bytes()).map_err(write_err)?;
    temp.as_file().sync_all().map_err(write_err)?;
    temp.persist(path).map_err(|err| write_err(err.error))?;

    debug!(path = %path.display(), bytes = contents.len(), "saved data file");
    Ok(())
}

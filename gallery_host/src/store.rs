use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use gallery_core::{HighScoreStore, StoreError};
use proto::HighScoreRecord;

/// High score persisted as a postcard `HighScoreRecord` in a single file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling of the record with `.tmp` appended to the full file name
    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl HighScoreStore for FileStore {
    fn load(&self) -> Result<Option<i32>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let record = HighScoreRecord::from_bytes(&bytes)
            .map_err(|err| StoreError::Corrupt(err.to_string()))?;
        Ok(Some(record.high_score))
    }

    fn save(&mut self, value: i32) -> Result<(), StoreError> {
        let bytes = HighScoreRecord::new(value)
            .to_bytes()
            .map_err(|err| StoreError::Corrupt(err.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Replace the record whole: write a sibling file, then rename over
        let tmp = self.tmp_path();
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

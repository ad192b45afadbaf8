use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    application::services::ResponseStore,
    domain::{CategoryKey, DomainError, ResponseDocument},
};

/// Response store keeping one pretty-printed JSON file per category.
///
/// Documents live at `<data_dir>/<type>_responses.json`. Writes replace the
/// whole file and are not coordinated, so concurrent writers to the same
/// category race and the last one wins.
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    /// Opens a store rooted at `data_dir`, creating the directory if needed.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self, DomainError> {
        let dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|err| {
            DomainError::storage(format!("failed to create data directory {:?}: {err}", dir))
        })?;

        Ok(Self { data_dir: dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, key: &CategoryKey) -> PathBuf {
        self.data_dir.join(key.file_name())
    }
}

impl ResponseStore for JsonFileStore {
    fn load(&self, key: &CategoryKey) -> Result<Option<ResponseDocument>, DomainError> {
        let path = self.path_for(key);
        debug!(category = %key, path = %path.display(), "reading responses");

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(DomainError::storage(format!(
                    "failed to read {}: {err}",
                    path.display()
                )))
            }
        };

        serde_json::from_slice(&bytes).map(Some).map_err(|err| {
            DomainError::serialization(format!("failed to parse {}: {err}", path.display()))
        })
    }

    fn save(&self, key: &CategoryKey, document: &ResponseDocument) -> Result<(), DomainError> {
        let path = self.path_for(key);
        debug!(category = %key, path = %path.display(), "writing responses");

        // The directory may have been removed since the store was opened.
        fs::create_dir_all(&self.data_dir).map_err(|err| {
            DomainError::storage(format!(
                "failed to create data directory {:?}: {err}",
                self.data_dir
            ))
        })?;

        let payload = serde_json::to_vec_pretty(document)
            .map_err(|err| DomainError::serialization(format!("serialization error: {err}")))?;

        fs::write(&path, payload).map_err(|err| {
            DomainError::storage(format!("failed to write {}: {err}", path.display()))
        })
    }

    fn ping(&self) -> Result<(), DomainError> {
        let metadata = fs::metadata(&self.data_dir).map_err(|err| {
            DomainError::storage(format!(
                "data directory {:?} unavailable: {err}",
                self.data_dir
            ))
        })?;

        if !metadata.is_dir() {
            return Err(DomainError::storage(format!(
                "data path {:?} is not a directory",
                self.data_dir
            )));
        }
        Ok(())
    }

    fn describe(&self) -> String {
        self.data_dir.display().to_string()
    }
}

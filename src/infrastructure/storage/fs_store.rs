use crate::domain::{EventMap, Storage, StorageKeys};
use crate::error::Result;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Clone)]
pub struct FileSystemStore {
    data_dir: PathBuf,
}

impl FileSystemStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.get_path_for_key(StorageKeys::MATCHES_BY_EVENT)
    }

    /// Where an unreadable snapshot is moved before the store starts over.
    pub fn corrupt_path(&self) -> PathBuf {
        self.snapshot_path().with_extension("json.corrupt")
    }

    fn get_path_for_key(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Writes the whole document to a sibling temp file, flushes it to disk
    /// and renames it over the target, so readers only ever see a complete
    /// snapshot.
    fn write_json_file<T: serde::Serialize + ?Sized>(&self, key: &str, data: &T) -> Result<()> {
        self.ensure_dir(&self.data_dir)?;

        let path = self.get_path_for_key(key);
        let tmp_path = path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(data)?;

        let mut file = File::create(&tmp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp_path, &path)?;

        debug!("Wrote {}", path.display());
        Ok(())
    }

    fn read_json_file<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.get_path_for_key(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        match serde_json::from_str(&content) {
            Ok(data) => Ok(Some(data)),
            Err(e) => {
                // Keep the unreadable file so the next save cannot destroy it.
                let aside = path.with_extension("json.corrupt");
                fs::rename(&path, &aside)?;
                warn!("Moved unreadable {} to {}", path.display(), aside.display());
                Err(e.into())
            }
        }
    }
}

impl Storage for FileSystemStore {
    fn load_events(&self) -> Result<Option<EventMap>> {
        self.read_json_file(StorageKeys::MATCHES_BY_EVENT)
    }

    fn save_events(&self, events: &EventMap) -> Result<()> {
        self.write_json_file(StorageKeys::MATCHES_BY_EVENT, events)
    }
}

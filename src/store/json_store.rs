use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::store::{HighScoreStore, StoreError};

const FILE_NAME: &str = "high_scores.json";

/// Best scores kept as a flat string map in a JSON file under the data dir.
pub struct JsonStore {
    base_dir: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonStore {
    pub fn new() -> Result<Self, StoreError> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typeblitz");
        Self::with_base_dir(base_dir)
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&base_dir)?;
        let mut store = Self {
            base_dir,
            values: BTreeMap::new(),
        };
        store.values = store.load();
        Ok(store)
    }

    fn file_path(&self) -> PathBuf {
        self.base_dir.join(FILE_NAME)
    }

    /// A missing or unreadable file starts empty; the next save rewrites it.
    fn load(&self) -> BTreeMap<String, String> {
        let path = self.file_path();
        if !path.exists() {
            return BTreeMap::new();
        }
        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("ignoring corrupt {}: {e}", path.display());
                BTreeMap::new()
            }),
            Err(e) => {
                log::warn!("could not read {}: {e}", path.display());
                BTreeMap::new()
            }
        }
    }

    fn save(&self) -> Result<(), StoreError> {
        let path = self.file_path();
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(&self.values)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

impl HighScoreStore for JsonStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        let mut store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        store.set("timeless_high_score", "21").unwrap();
        store.set("practice_high_score_hard", "4").unwrap();

        let reopened = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(reopened.get("timeless_high_score").unwrap().as_deref(), Some("21"));
        assert_eq!(reopened.get("practice_high_score_hard").unwrap().as_deref(), Some("4"));
        assert_eq!(reopened.get("practice_high_score_easy").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(FILE_NAME), "not json").unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.get("timeless_high_score").unwrap(), None);
    }

    #[test]
    fn test_save_leaves_no_tmp_file() {
        let dir = tempdir().unwrap();
        let mut store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        store.set("timeless_high_score", "3").unwrap();
        assert!(dir.path().join(FILE_NAME).exists());
        assert!(!dir.path().join("high_scores.tmp").exists());
    }
}
